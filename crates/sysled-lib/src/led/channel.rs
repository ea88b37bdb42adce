//! Single LED class device (one physical output).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::attr::{self, AttributeIo, Sysfs};
use crate::error::{LedError, Result};
use crate::trigger::{Trigger, TriggerList};

use super::Led;

/// One LED channel backed by an attribute directory such as
/// `/sys/class/leds/input3::capslock`.
///
/// Only the trigger is cached. Brightness writes are fire-and-forget and
/// never read back.
#[derive(Debug)]
pub struct Channel<I: AttributeIo = Sysfs> {
    io: I,
    path: PathBuf,
    max_brightness: u32,
    trigger: Option<Trigger>,
    available: Vec<Trigger>,
}

/// Serializable snapshot of a channel's cached state.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelState {
    pub path: PathBuf,
    pub max_brightness: u32,
    pub trigger: Option<Trigger>,
    pub available_triggers: Vec<Trigger>,
}

impl Channel<Sysfs> {
    /// Open a channel on the real filesystem.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(Sysfs, path)
    }
}

impl<I: AttributeIo> Channel<I> {
    /// Open a channel, reading `max_brightness` and `trigger` once.
    ///
    /// Fails with [`LedError::DeviceUnavailable`] if either attribute is
    /// unreadable or `max_brightness` is not a positive integer.
    pub fn open_with(io: I, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let raw = io
            .read_attr(&path, attr::MAX_BRIGHTNESS)
            .map_err(|e| LedError::unavailable(path.clone(), format!("max_brightness: {e}")))?;
        let max_brightness: u32 = raw.trim().parse().map_err(|e| {
            LedError::unavailable(
                path.clone(),
                format!("max_brightness: {:?} is not an integer ({e})", raw.trim()),
            )
        })?;
        if max_brightness == 0 {
            return Err(LedError::unavailable(path, "max_brightness is 0"));
        }

        let text = io
            .read_attr(&path, attr::TRIGGER)
            .map_err(|e| LedError::unavailable(path.clone(), format!("trigger: {e}")))?;
        let triggers = TriggerList::parse(&text);

        log::info!(
            "opened LED {} (max_brightness {max_brightness}, trigger {})",
            path.display(),
            triggers.current.as_ref().map_or("unknown", Trigger::as_str)
        );

        Ok(Channel {
            io,
            path,
            max_brightness,
            trigger: triggers.current,
            available: triggers.available,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    /// Triggers the kernel listed when the channel was opened.
    pub fn available_triggers(&self) -> &[Trigger] {
        &self.available
    }

    /// Raw `brightness` value for an intensity: `round(intensity * max)`,
    /// halves rounded away from zero.
    pub fn brightness_value(&self, intensity: f64) -> i64 {
        (intensity * f64::from(self.max_brightness)).round() as i64
    }

    pub fn state(&self) -> ChannelState {
        ChannelState {
            path: self.path.clone(),
            max_brightness: self.max_brightness,
            trigger: self.trigger.clone(),
            available_triggers: self.available.clone(),
        }
    }

    fn write(&self, name: &'static str, value: &str) -> Result<()> {
        log::debug!("{}/{name} <- {value}", self.path.display());
        self.io
            .write_attr(&self.path, name, value)
            .map_err(|source| LedError::WriteFailed {
                path: self.path.clone(),
                attr: name,
                source,
            })
    }
}

impl<I: AttributeIo> Led for Channel<I> {
    fn set_brightness(&mut self, intensity: f64) -> Result<()> {
        let value = self.brightness_value(intensity);
        self.write(attr::BRIGHTNESS, &value.to_string())
    }

    /// Write the trigger name as-is. The kernel decides whether it is valid;
    /// the cache changes only if the write succeeds.
    fn set_trigger(&mut self, trigger: Trigger) -> Result<()> {
        self.write(attr::TRIGGER, trigger.as_str())?;
        log::info!("{} trigger -> {trigger}", self.path.display());
        self.trigger = Some(trigger);
        Ok(())
    }

    fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }
}
