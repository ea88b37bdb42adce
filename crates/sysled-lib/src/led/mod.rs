//! LED devices: single channels, tri-color composites, and the shared
//! capability trait both implement.

mod channel;
mod color;
mod rgb;

pub use channel::{Channel, ChannelState};
pub use color::{Color, FULL_SCALE, format_color, parse_color};
pub use rgb::{RgbChannel, RgbLed, RgbPaths, RgbState, SharedRgbLed};

use crate::error::Result;
use crate::trigger::Trigger;

/// Control surface shared by a single LED channel and an RGB composite.
pub trait Led {
    /// Set brightness as a fraction of the device maximum.
    ///
    /// Values outside `0.0..=1.0` are passed through unchecked; keeping them
    /// in range is the caller's job.
    fn set_brightness(&mut self, intensity: f64) -> Result<()>;

    /// Turn the LED off.
    fn off(&mut self) -> Result<()> {
        self.set_brightness(0.0)
    }

    /// Hand brightness control to a kernel trigger.
    fn set_trigger(&mut self, trigger: Trigger) -> Result<()>;

    /// Last observed or successfully applied trigger. Never touches hardware.
    fn trigger(&self) -> Option<&Trigger>;
}
