//! `config` subcommand: show current configuration and file paths, or
//! change one setting with `config set`.

use super::{Config, ConfigOutput, Options, Result, kv, kv_indent, kv_width, print_json};

pub(super) fn cmd_config_set(key: &str, value: &str, opts: &Options) -> Result<()> {
    let mut config = opts.load_config();
    config.set(key, value)?;
    let saved_to = match &opts.config_path {
        Some(path) => {
            config.save_to(path)?;
            path.clone()
        }
        None => {
            config.save()?;
            Config::path().unwrap_or_default()
        }
    };
    log::info!("saved {key} to {}", saved_to.display());
    println!("Saved: {key} = {}", value.trim());
    Ok(())
}

pub(super) fn cmd_config(opts: &Options) -> Result<()> {
    let config = opts.load_config();
    let config_path = opts.config_path.clone().or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };

    if opts.json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            problems,
        });
    }

    let w = kv_width(
        &["Config file:"],
        &["red:", "green:", "blue:", "global:", "leds_root:"],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    let unset = |path: &str| {
        if path.is_empty() {
            "(not set)".to_string()
        } else {
            path.to_string()
        }
    };
    println!("Settings:");
    kv_indent("red:", unset(&config.red), w);
    kv_indent("green:", unset(&config.green), w);
    kv_indent("blue:", unset(&config.blue), w);
    let global = if config.global.is_empty() {
        "(none)".to_string()
    } else {
        config.global.clone()
    };
    kv_indent("global:", global, w);
    kv_indent("leds_root:", &config.leds_root, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}
