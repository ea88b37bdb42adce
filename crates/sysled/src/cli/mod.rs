//! CLI subcommands: discovery, status, configuration, LED control.

mod config_cmd;
mod control;
mod list;
mod status;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use sysled_lib::config::Config;
pub(super) use sysled_lib::discover::{self, DiscoveredLed};
pub(super) use sysled_lib::error::Result;
pub(super) use sysled_lib::led::{self, Channel, ChannelState, Led, RgbLed, RgbState};
pub(super) use sysled_lib::{LedError, Trigger};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Serialize to pretty JSON and print it.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| LedError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{json_str}");
    Ok(())
}

/// Global options shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub config_path: Option<PathBuf>,
    pub channel: Option<PathBuf>,
}

impl Options {
    fn load_config(&self) -> Config {
        match &self.config_path {
            Some(path) => {
                let (config, warnings) = Config::load_from(path);
                for w in &warnings {
                    log::warn!("{w}");
                }
                config
            }
            None => Config::load(),
        }
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ListOutput {
    pub root: String,
    pub count: usize,
    pub leds: Vec<DiscoveredLed>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(super) enum StatusOutput {
    Channel(ChannelState),
    Rgb(RgbState),
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

/// The device a control command acts on.
pub(super) enum Target {
    Channel(Channel),
    Rgb(RgbLed),
}

impl Target {
    /// `--channel` wins; otherwise the RGB LED from config.
    pub(super) fn open(opts: &Options) -> Result<Self> {
        if let Some(path) = &opts.channel {
            return Ok(Target::Channel(Channel::open(path)?));
        }
        let config = opts.load_config();
        if !config.has_rgb() {
            let hint = opts
                .config_path
                .clone()
                .or_else(Config::path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".into());
            return Err(LedError::Config(format!(
                "no RGB LED configured; set red/green/blue in {hint} or pass --channel"
            )));
        }
        Ok(Target::Rgb(RgbLed::open(&config.rgb_paths()?)?))
    }

    pub(super) fn led(&mut self) -> &mut dyn Led {
        match self {
            Target::Channel(ch) => ch,
            Target::Rgb(rgb) => rgb,
        }
    }

    pub(super) fn status(&self) -> StatusOutput {
        match self {
            Target::Channel(ch) => StatusOutput::Channel(ch.state()),
            Target::Rgb(rgb) => StatusOutput::Rgb(rgb.state()),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List LED class devices
    List {
        /// Directory to scan (default: leds_root from config, /sys/class/leds)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Show channel state: max brightness, active and available triggers
    Status,

    /// Show current configuration and file paths
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Set the RGB LED color (#RRGGBB, #RRGGBBAA or a color name)
    Color {
        /// Color to apply, e.g. "#FF8000" or "orange"
        color: String,
    },

    /// Set brightness as a fraction of the maximum (0.0 to 1.0)
    Brightness {
        /// Brightness level between 0.0 and 1.0
        #[arg(value_parser = control::parse_level)]
        level: f64,
    },

    /// Hand the LED to a kernel trigger (e.g. none, heartbeat, disk-activity)
    Trigger {
        /// Trigger name as listed by `status`
        name: String,
    },

    /// Turn the LED off
    Off,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set one setting and save the config file
    Set {
        /// Setting to change
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(Config::KEYS))]
        key: String,
        /// New value (LED directory, or scan root for leds_root); "" clears global
        value: String,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::List { root } => {
            let root = root.unwrap_or_else(|| PathBuf::from(opts.load_config().leds_root));
            list::cmd_list(Path::new(&root), opts.json)
        }
        Command::Status => status::cmd_status(opts),
        Command::Config { action: None } => config_cmd::cmd_config(opts),
        Command::Config {
            action: Some(ConfigAction::Set { key, value }),
        } => {
            if opts.json {
                warn_json_unsupported("config set");
            }
            config_cmd::cmd_config_set(&key, &value, opts)
        }
        Command::Color { color } => {
            if opts.json {
                warn_json_unsupported("color");
            }
            control::cmd_color(&color, opts)
        }
        Command::Brightness { level } => {
            if opts.json {
                warn_json_unsupported("brightness");
            }
            control::cmd_brightness(level, opts)
        }
        Command::Trigger { name } => {
            if opts.json {
                warn_json_unsupported("trigger");
            }
            control::cmd_trigger(Trigger::new(name), opts)
        }
        Command::Off => {
            if opts.json {
                warn_json_unsupported("off");
            }
            control::cmd_off(opts)
        }
    }
}
