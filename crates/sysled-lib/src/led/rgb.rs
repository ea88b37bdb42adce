//! Tri-color LED composed of red, green and blue channels, with an optional
//! shared "global" channel gating all three.
//!
//! The kernel offers no transactions across attribute files, so multi-channel
//! operations either tolerate partial failure (`off`, `set_color`) or undo
//! completed steps when a later one fails (`set_trigger`).

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::attr::{AttributeIo, Sysfs};
use crate::error::{LedError, Result};
use crate::trigger::Trigger;

use super::channel::{Channel, ChannelState};
use super::color::Color;
use super::Led;

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

impl RgbChannel {
    /// Fixed write order for every multi-channel operation.
    pub const ALL: [RgbChannel; 3] = [RgbChannel::Red, RgbChannel::Green, RgbChannel::Blue];
}

impl fmt::Display for RgbChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RgbChannel::Red => write!(f, "red"),
            RgbChannel::Green => write!(f, "green"),
            RgbChannel::Blue => write!(f, "blue"),
        }
    }
}

/// Attribute directories of the channels making up an RGB LED.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RgbPaths {
    pub red: PathBuf,
    pub green: PathBuf,
    pub blue: PathBuf,
    /// Shared brightness/trigger line. `None` means the colors are independent.
    pub global: Option<PathBuf>,
}

impl RgbPaths {
    pub fn new(red: impl Into<PathBuf>, green: impl Into<PathBuf>, blue: impl Into<PathBuf>) -> Self {
        RgbPaths {
            red: red.into(),
            green: green.into(),
            blue: blue.into(),
            global: None,
        }
    }

    /// Attach a global channel. An empty path means "no global channel".
    pub fn with_global(mut self, global: impl Into<PathBuf>) -> Self {
        let global = global.into();
        self.global = (!global.as_os_str().is_empty()).then_some(global);
        self
    }
}

/// Serializable snapshot of an RGB LED's cached state.
#[derive(Debug, Clone, Serialize)]
pub struct RgbState {
    pub red: ChannelState,
    pub green: ChannelState,
    pub blue: ChannelState,
    pub global: Option<ChannelState>,
    pub color: Option<Color>,
    pub trigger: Option<Trigger>,
}

/// RGB LED built from three (or four) exclusively owned channels.
///
/// Color and trigger are cached from the last successful call and are never
/// read back from hardware, so they go stale if something else writes the
/// attributes.
#[derive(Debug)]
pub struct RgbLed<I: AttributeIo = Sysfs> {
    red: Channel<I>,
    green: Channel<I>,
    blue: Channel<I>,
    global: Option<Channel<I>>,
    color: Option<Color>,
    trigger: Option<Trigger>,
}

impl RgbLed<Sysfs> {
    /// Open all channels on the real filesystem.
    pub fn open(paths: &RgbPaths) -> Result<Self> {
        Self::open_with(Sysfs, paths)
    }
}

impl<I: AttributeIo + Clone> RgbLed<I> {
    /// Open red, green, blue and then the global channel. The first failure
    /// is returned as-is and nothing is kept.
    pub fn open_with(io: I, paths: &RgbPaths) -> Result<Self> {
        let red = Channel::open_with(io.clone(), &paths.red)?;
        let green = Channel::open_with(io.clone(), &paths.green)?;
        let blue = Channel::open_with(io.clone(), &paths.blue)?;
        let global = paths
            .global
            .as_ref()
            .map(|p| Channel::open_with(io, p))
            .transpose()?;
        Ok(RgbLed {
            red,
            green,
            blue,
            global,
            color: None,
            trigger: None,
        })
    }
}

impl<I: AttributeIo> RgbLed<I> {
    pub fn has_global(&self) -> bool {
        self.global.is_some()
    }

    pub fn channel(&self, which: RgbChannel) -> &Channel<I> {
        match which {
            RgbChannel::Red => &self.red,
            RgbChannel::Green => &self.green,
            RgbChannel::Blue => &self.blue,
        }
    }

    fn channel_mut(&mut self, which: RgbChannel) -> &mut Channel<I> {
        match which {
            RgbChannel::Red => &mut self.red,
            RgbChannel::Green => &mut self.green,
            RgbChannel::Blue => &mut self.blue,
        }
    }

    pub fn global(&self) -> Option<&Channel<I>> {
        self.global.as_ref()
    }

    /// Last color applied successfully, `None` before the first one.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Set the color by writing each channel's brightness directly, even
    /// when a global channel exists.
    ///
    /// Premultiplied alpha is divided out first. All three writes are always
    /// attempted in red, green, blue order; if any fail the result is a single
    /// [`LedError::AggregateFailure`] and the cached color is left alone.
    /// Re-applying the cached color is a no-op.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        if self.color == Some(color) {
            return Ok(());
        }

        let mut failed = 0;
        for (which, level) in RgbChannel::ALL.into_iter().zip(color.intensities()) {
            if let Err(e) = self.channel_mut(which).set_brightness(level) {
                log::debug!("set_color: {which} channel failed: {e}");
                failed += 1;
            }
        }
        if failed > 0 {
            return Err(LedError::AggregateFailure(failed));
        }

        self.color = Some(color);
        Ok(())
    }

    pub fn state(&self) -> RgbState {
        RgbState {
            red: self.red.state(),
            green: self.green.state(),
            blue: self.blue.state(),
            global: self.global.as_ref().map(Channel::state),
            color: self.color,
            trigger: self.trigger.clone(),
        }
    }

    /// Switch every color channel off, undoing completed steps if one fails.
    fn clear_channels(&mut self) -> Result<()> {
        let mut undo = Compensations::default();
        for which in RgbChannel::ALL {
            let previous = self.channel(which).trigger().cloned();
            if let Err(e) = self.channel_mut(which).off() {
                undo.unwind(self);
                return Err(e);
            }
            undo.push(which, previous);
        }
        Ok(())
    }
}

impl<I: AttributeIo> Led for RgbLed<I> {
    /// Only meaningful with a global channel; per-color brightness without a
    /// color is ambiguous and rejected.
    fn set_brightness(&mut self, intensity: f64) -> Result<()> {
        match self.global.as_mut() {
            Some(global) => global.set_brightness(intensity),
            None => Err(LedError::NotImplemented(
                "brightness on an RGB LED without a global channel",
            )),
        }
    }

    /// Attempts red, green and blue even after a failure and returns the
    /// first error. Nothing is undone.
    fn off(&mut self) -> Result<()> {
        if let Some(global) = self.global.as_mut() {
            return global.off();
        }
        let mut first_err = None;
        for which in RgbChannel::ALL {
            if let Err(e) = self.channel_mut(which).off() {
                log::debug!("off: {which} channel failed: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn set_trigger(&mut self, trigger: Trigger) -> Result<()> {
        if let Some(global) = self.global.as_mut() {
            global.set_trigger(trigger.clone())?;
            self.trigger = Some(trigger);
            return Ok(());
        }

        // Without a global line the channels are only switched off; the
        // requested trigger is recorded but never written to them.
        self.clear_channels()?;
        log::debug!("RGB trigger recorded as {trigger} (channels cleared)");
        self.trigger = Some(trigger);
        Ok(())
    }

    fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }
}

/// Undo log for a multi-channel sequence: each completed step records the
/// channel's previous trigger, restored in reverse order on failure.
#[derive(Default)]
struct Compensations {
    steps: Vec<(RgbChannel, Option<Trigger>)>,
}

impl Compensations {
    fn push(&mut self, which: RgbChannel, previous: Option<Trigger>) {
        self.steps.push((which, previous));
    }

    /// Best effort: restore failures are logged and dropped so the caller
    /// only sees the error that caused the rollback.
    fn unwind<I: AttributeIo>(self, led: &mut RgbLed<I>) {
        for (which, previous) in self.steps.into_iter().rev() {
            let Some(previous) = previous else {
                log::debug!("rollback: {which} had no known trigger, skipping");
                continue;
            };
            if let Err(e) = led.channel_mut(which).set_trigger(previous) {
                log::debug!("rollback: restoring {which} trigger failed: {e}");
            }
        }
    }
}

/// Thread-safe handle around an [`RgbLed`].
///
/// Each operation holds the lock for its whole multi-step sequence, so
/// `set_trigger`, `set_color` and `off` never interleave.
pub struct SharedRgbLed<I: AttributeIo = Sysfs> {
    inner: Arc<Mutex<RgbLed<I>>>,
}

impl<I: AttributeIo> Clone for SharedRgbLed<I> {
    fn clone(&self) -> Self {
        SharedRgbLed {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: AttributeIo> SharedRgbLed<I> {
    pub fn new(led: RgbLed<I>) -> Self {
        SharedRgbLed {
            inner: Arc::new(Mutex::new(led)),
        }
    }

    // The guarded state is only a cache, so a panic mid-operation leaves
    // nothing that needs repair.
    fn lock(&self) -> MutexGuard<'_, RgbLed<I>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_color(&self, color: Color) -> Result<()> {
        self.lock().set_color(color)
    }

    pub fn set_brightness(&self, intensity: f64) -> Result<()> {
        self.lock().set_brightness(intensity)
    }

    pub fn off(&self) -> Result<()> {
        self.lock().off()
    }

    pub fn set_trigger(&self, trigger: Trigger) -> Result<()> {
        self.lock().set_trigger(trigger)
    }

    pub fn color(&self) -> Option<Color> {
        self.lock().color()
    }

    pub fn trigger(&self) -> Option<Trigger> {
        self.lock().trigger().cloned()
    }

    pub fn state(&self) -> RgbState {
        self.lock().state()
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut RgbLed<I>) -> R) -> R {
        f(&mut self.lock())
    }
}
