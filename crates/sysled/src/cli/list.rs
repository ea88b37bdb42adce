//! `list` subcommand: enumerate LED class devices.

use std::path::Path;

use super::{ListOutput, Result, discover, print_json};

pub(super) fn cmd_list(root: &Path, json: bool) -> Result<()> {
    let leds = discover::enumerate_leds(root);

    if json {
        return print_json(&ListOutput {
            root: root.display().to_string(),
            count: leds.len(),
            leds,
        });
    }

    if leds.is_empty() {
        println!("No LEDs found under {}.", root.display());
        return Ok(());
    }

    println!(
        "Found {} LED{} under {}:",
        leds.len(),
        if leds.len() == 1 { "" } else { "s" },
        root.display()
    );
    println!();

    for (i, led) in leds.iter().enumerate() {
        println!("  [{}] {}", i + 1, led.name);
        match led.max_brightness {
            Some(max) => println!("      Max brightness: {max}"),
            None => println!("      Max brightness: unreadable"),
        }
        if let Some(ref trigger) = led.trigger {
            println!("      Trigger: {trigger}");
        }
    }

    Ok(())
}
