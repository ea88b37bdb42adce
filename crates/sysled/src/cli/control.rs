//! `color` / `brightness` / `trigger` / `off` subcommands.

use super::{LedError, Options, Result, Target, Trigger, led};

/// Brightness levels are range-checked here; the library passes them through.
pub(super) fn parse_level(s: &str) -> std::result::Result<f64, String> {
    let level: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if !(0.0..=1.0).contains(&level) {
        return Err(format!("{level} is outside 0.0..=1.0"));
    }
    Ok(level)
}

pub(super) fn cmd_color(color: &str, opts: &Options) -> Result<()> {
    let color = led::parse_color(color)?;
    match Target::open(opts)? {
        Target::Rgb(mut rgb) => rgb.set_color(color)?,
        Target::Channel(_) => {
            return Err(LedError::NotImplemented(
                "color on a single channel; use `brightness` instead",
            ));
        }
    }
    println!("Color: {color}");
    Ok(())
}

pub(super) fn cmd_brightness(level: f64, opts: &Options) -> Result<()> {
    Target::open(opts)?.led().set_brightness(level)?;
    println!("Brightness: {level}");
    Ok(())
}

pub(super) fn cmd_trigger(trigger: Trigger, opts: &Options) -> Result<()> {
    let mut target = Target::open(opts)?;
    if let Target::Channel(ch) = &target
        && !ch.available_triggers().contains(&trigger)
    {
        log::warn!(
            "{trigger} is not in the kernel's trigger list for {}",
            ch.path().display()
        );
    }
    target.led().set_trigger(trigger.clone())?;
    println!("Trigger: {trigger}");
    Ok(())
}

pub(super) fn cmd_off(opts: &Options) -> Result<()> {
    Target::open(opts)?.led().off()?;
    println!("LED: off");
    Ok(())
}
