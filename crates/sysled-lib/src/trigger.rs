//! Trigger names and the kernel's `trigger` attribute format.
//!
//! Reading `trigger` yields every selectable trigger separated by spaces, with
//! the active one wrapped in brackets:
//!
//! ```text
//! none panic [disk-activity] heartbeat
//! ```

use std::fmt;

use serde::Serialize;

/// A trigger name. Open-ended: drivers register their own triggers, so any
/// string the kernel accepts is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Trigger(String);

impl Trigger {
    pub const NONE: &'static str = "none";
    pub const PANIC: &'static str = "panic";
    pub const DISK_ACTIVITY: &'static str = "disk-activity";
    pub const HEARTBEAT: &'static str = "heartbeat";

    pub fn new(name: impl Into<String>) -> Self {
        Trigger(name.into())
    }

    pub fn none() -> Self {
        Trigger::new(Self::NONE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Trigger {
    fn from(s: &str) -> Self {
        Trigger::new(s)
    }
}

impl From<String> for Trigger {
    fn from(s: String) -> Self {
        Trigger(s)
    }
}

impl AsRef<str> for Trigger {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parsed contents of a `trigger` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggerList {
    /// Every selectable trigger, in kernel order, brackets stripped.
    pub available: Vec<Trigger>,
    /// The bracketed entry, if any. `None` is distinct from the `none` trigger.
    pub current: Option<Trigger>,
}

impl TriggerList {
    /// Parse the text of a `trigger` attribute.
    ///
    /// The trailing newline the kernel appends is ignored, as are empty
    /// tokens from doubled separators.
    pub fn parse(text: &str) -> Self {
        let mut list = TriggerList::default();
        for token in text.trim().split(' ').filter(|t| !t.is_empty()) {
            let name = match token
                .strip_prefix('[')
                .and_then(|t| t.strip_suffix(']'))
            {
                Some(active) => {
                    let active = Trigger::new(active);
                    list.current = Some(active.clone());
                    active
                }
                None => Trigger::new(token),
            };
            list.available.push(name);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &TriggerList) -> Vec<&str> {
        list.available.iter().map(Trigger::as_str).collect()
    }

    #[test]
    fn parse_with_active_trigger() {
        let list = TriggerList::parse("none panic [disk-activity] heartbeat");
        assert_eq!(
            names(&list),
            vec!["none", "panic", "disk-activity", "heartbeat"]
        );
        assert_eq!(list.current, Some(Trigger::new(Trigger::DISK_ACTIVITY)));
    }

    #[test]
    fn parse_without_active_trigger() {
        let list = TriggerList::parse("none panic heartbeat");
        assert_eq!(names(&list), vec!["none", "panic", "heartbeat"]);
        assert_eq!(list.current, None);
    }

    #[test]
    fn parse_active_none_is_not_unset() {
        let list = TriggerList::parse("[none] panic heartbeat");
        assert_eq!(list.current, Some(Trigger::none()));
    }

    #[test]
    fn parse_strips_trailing_newline() {
        let list = TriggerList::parse("none [heartbeat]\n");
        assert_eq!(names(&list), vec!["none", "heartbeat"]);
        assert_eq!(list.current.as_ref().map(Trigger::as_str), Some("heartbeat"));
    }

    #[test]
    fn parse_skips_empty_tokens() {
        let list = TriggerList::parse("none  panic ");
        assert_eq!(names(&list), vec!["none", "panic"]);
    }

    #[test]
    fn parse_empty_text() {
        let list = TriggerList::parse("");
        assert!(list.available.is_empty());
        assert!(list.current.is_none());
    }

    #[test]
    fn parse_keeps_half_bracketed_token_verbatim() {
        let list = TriggerList::parse("[none panic]");
        assert_eq!(names(&list), vec!["[none", "panic]"]);
        assert!(list.current.is_none());
    }

    #[test]
    fn parse_driver_specific_triggers() {
        let list = TriggerList::parse("none kbd-scrolllock mmc0 [phy0tpt] timer");
        assert_eq!(
            names(&list),
            vec!["none", "kbd-scrolllock", "mmc0", "phy0tpt", "timer"]
        );
        assert_eq!(list.current, Some(Trigger::new("phy0tpt")));
    }

    #[test]
    fn trigger_display_and_conversions() {
        let t: Trigger = "heartbeat".into();
        assert_eq!(t.to_string(), "heartbeat");
        assert_eq!(Trigger::from(String::from("panic")).as_str(), Trigger::PANIC);
    }

    #[test]
    fn trigger_serializes_as_string() {
        let json = serde_json::to_string(&Trigger::new("timer")).unwrap();
        assert_eq!(json, "\"timer\"");
    }
}
