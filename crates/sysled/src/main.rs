//! sysled: command-line control for Linux LED class devices.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "sysled",
    version,
    about = "Control Linux LED class devices and tri-color RGB LEDs"
)]
struct Args {
    /// Output as JSON (for list, status, config)
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Operate on a single LED directory instead of the configured RGB LED
    #[arg(long, global = true, value_name = "PATH")]
    channel: Option<PathBuf>,

    /// Log every attribute write
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        config_path: args.config,
        channel: args.channel,
    };
    if let Err(e) = cli::run(args.command, &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
