//! LED class enumeration: lists candidate channel directories.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::attr::{self, AttributeIo, Sysfs};
use crate::trigger::{Trigger, TriggerList};

/// An LED class directory found under the scan root (not opened).
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredLed {
    /// Directory name, e.g. `input3::capslock`.
    pub name: String,
    pub path: PathBuf,
    /// Parsed `max_brightness`, if readable.
    pub max_brightness: Option<u32>,
    /// Active trigger, if the `trigger` attribute is readable and marks one.
    pub trigger: Option<Trigger>,
}

/// Enumerate LED class directories under `root`, sorted by name.
///
/// Entries without a `max_brightness` attribute are skipped. A missing or
/// unreadable root yields an empty list.
pub fn enumerate_leds(root: &Path) -> Vec<DiscoveredLed> {
    let Ok(entries) = std::fs::read_dir(root) else {
        log::debug!("cannot read LED root {}", root.display());
        return Vec::new();
    };

    let mut leds: Vec<DiscoveredLed> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.join(attr::MAX_BRIGHTNESS).is_file())
        .map(|path| {
            let max_brightness = Sysfs
                .read_attr(&path, attr::MAX_BRIGHTNESS)
                .ok()
                .and_then(|s| s.trim().parse().ok());
            let trigger = Sysfs
                .read_attr(&path, attr::TRIGGER)
                .ok()
                .and_then(|s| TriggerList::parse(&s).current);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            DiscoveredLed {
                name,
                path,
                max_brightness,
                trigger,
            }
        })
        .collect();
    leds.sort_by(|a, b| a.name.cmp(&b.name));
    leds
}
