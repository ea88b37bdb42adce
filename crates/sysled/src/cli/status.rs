//! `status` subcommand: show channel state of the target LED.

use super::{
    ChannelState, Options, Result, RgbState, StatusOutput, Target, format_kv, kv, kv_indent,
    kv_width, led, print_json,
};

const KEYS_TOP: [&str; 4] = ["Red:", "Green:", "Blue:", "Global:"];
const KEYS_INDENT: [&str; 4] = ["Path:", "Max brightness:", "Trigger:", "Available:"];

fn print_channel(title: &str, state: &ChannelState, w: usize) {
    kv(title, "", w);
    kv_indent("Path:", state.path.display(), w);
    kv_indent("Max brightness:", state.max_brightness, w);
    match &state.trigger {
        Some(trigger) => kv_indent("Trigger:", trigger, w),
        None => kv_indent("Trigger:", "unknown", w),
    }
    let available: Vec<&str> = state
        .available_triggers
        .iter()
        .map(|t| t.as_str())
        .collect();
    kv_indent("Available:", available.join(" "), w);
}

/// Cached composite color and trigger, one line each when known.
fn rgb_summary(state: &RgbState, w: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(color) = state.color {
        lines.push(format_kv("Color:", led::format_color(&color), w));
    }
    if let Some(trigger) = &state.trigger {
        lines.push(format_kv("Trigger:", trigger, w));
    }
    lines
}

/// Print or serialize the status output.
fn print_status(status: &StatusOutput, json: bool) -> Result<()> {
    if json {
        return print_json(status);
    }

    let w = kv_width(&KEYS_TOP, &KEYS_INDENT);
    match status {
        StatusOutput::Channel(state) => print_channel("Channel:", state, w),
        StatusOutput::Rgb(state) => {
            print_channel("Red:", &state.red, w);
            println!();
            print_channel("Green:", &state.green, w);
            println!();
            print_channel("Blue:", &state.blue, w);
            println!();
            match &state.global {
                Some(global) => print_channel("Global:", global, w),
                None => kv("Global:", "none (colors are independent)", w),
            }
            let summary = rgb_summary(state, w);
            if !summary.is_empty() {
                println!();
                for line in summary {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

pub(super) fn cmd_status(opts: &Options) -> Result<()> {
    let target = Target::open(opts)?;
    print_status(&target.status(), opts.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysled_lib::{Color, Trigger};

    fn channel_state() -> ChannelState {
        ChannelState {
            path: "/sys/class/leds/status".into(),
            max_brightness: 255,
            trigger: Some(Trigger::new("heartbeat")),
            available_triggers: vec![Trigger::none(), Trigger::new("heartbeat")],
        }
    }

    #[test]
    fn print_channel_status_succeeds() {
        let status = StatusOutput::Channel(channel_state());
        assert!(print_status(&status, false).is_ok());
        assert!(print_status(&status, true).is_ok());
    }

    fn rgb_state(color: Option<Color>, trigger: Option<Trigger>) -> RgbState {
        RgbState {
            red: channel_state(),
            green: channel_state(),
            blue: channel_state(),
            global: None,
            color,
            trigger,
        }
    }

    #[test]
    fn rgb_summary_shows_color_and_trigger() {
        let w = kv_width(&KEYS_TOP, &KEYS_INDENT);
        let state = rgb_state(
            Some(Color::rgb8(0xFF, 0x80, 0x00)),
            Some(Trigger::new("heartbeat")),
        );
        assert_eq!(
            rgb_summary(&state, w),
            vec![
                format_kv("Color:", "#FF8000", w),
                format_kv("Trigger:", "heartbeat", w),
            ]
        );
    }

    #[test]
    fn rgb_summary_trigger_only() {
        let w = kv_width(&KEYS_TOP, &KEYS_INDENT);
        let lines = rgb_summary(&rgb_state(None, Some(Trigger::none())), w);
        assert_eq!(lines, vec![format_kv("Trigger:", "none", w)]);
        assert!(rgb_summary(&rgb_state(None, None), w).is_empty());
    }

    #[test]
    fn human_and_json_rgb_status_succeed() {
        let status = StatusOutput::Rgb(rgb_state(Some(Color::WHITE), Some(Trigger::none())));
        assert!(print_status(&status, false).is_ok());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["trigger"], "none");
    }

    #[test]
    fn status_json_has_expected_fields() {
        let json = serde_json::to_value(StatusOutput::Channel(channel_state())).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5, "kind + 4 channel fields");
        assert_eq!(json["trigger"], "heartbeat");
        assert_eq!(json["available_triggers"][1], "heartbeat");
    }
}
