//! sysled: control Linux LED class devices, including tri-color RGB LEDs
//! built from separate red, green and blue channels.

pub mod attr;
pub mod config;
pub mod discover;
pub mod error;
pub mod led;
pub mod trigger;

pub use error::LedError;
pub use led::{Channel, Color, Led, RgbLed, RgbPaths, SharedRgbLed};
pub use trigger::Trigger;
