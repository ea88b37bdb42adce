//! Unified error type for the sysled-lib crate.
//!
//! [`LedError`] covers the device-level failure kinds (`DeviceUnavailable`,
//! `WriteFailed`, `NotImplemented`, `AggregateFailure`) and the ambient ones
//! (`Config`, `Color`, `Io`). `From<io::Error>` lets `?` propagate plain I/O
//! errors from config persistence.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Unified error type for sysled-lib operations.
#[derive(Debug)]
pub enum LedError {
    /// A required attribute file is missing, unreadable or unparsable.
    /// Only produced while opening a device.
    DeviceUnavailable { path: PathBuf, reason: String },
    /// An attribute write did not complete.
    WriteFailed {
        path: PathBuf,
        attr: &'static str,
        source: io::Error,
    },
    /// The operation has no meaning for this device topology.
    NotImplemented(&'static str),
    /// Several independent writes were attempted and this many failed.
    AggregateFailure(usize),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Standard I/O error (config persistence).
    Io(io::Error),
}

impl LedError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        LedError::DeviceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::DeviceUnavailable { path, reason } => {
                write!(f, "LED unavailable at {}: {reason}", path.display())
            }
            LedError::WriteFailed { path, attr, source } => {
                write!(f, "Failed to write {}/{attr}: {source}", path.display())
            }
            LedError::NotImplemented(what) => write!(f, "Not supported: {what}"),
            LedError::AggregateFailure(n) => {
                write!(f, "{n} channel write{} failed", if *n == 1 { "" } else { "s" })
            }
            LedError::Config(e) => write!(f, "Config error: {e}"),
            LedError::Color(e) => write!(f, "Color error: {e}"),
            LedError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for LedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedError::WriteFailed { source, .. } => Some(source),
            LedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LedError {
    fn from(e: io::Error) -> Self {
        LedError::Io(e)
    }
}

/// Crate-level Result alias using [`LedError`].
pub type Result<T> = std::result::Result<T, LedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let e: LedError = io_err.into();
        assert!(matches!(e, LedError::Io(_)));
    }

    #[test]
    fn display_device_unavailable() {
        let e = LedError::unavailable("/sys/class/leds/red", "max_brightness: not a number");
        assert_eq!(
            e.to_string(),
            "LED unavailable at /sys/class/leds/red: max_brightness: not a number"
        );
    }

    #[test]
    fn display_write_failed() {
        let e = LedError::WriteFailed {
            path: "/sys/class/leds/red".into(),
            attr: "brightness",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            e.to_string(),
            "Failed to write /sys/class/leds/red/brightness: denied"
        );
    }

    #[test]
    fn display_not_implemented() {
        let e = LedError::NotImplemented("brightness without a global channel");
        assert_eq!(
            e.to_string(),
            "Not supported: brightness without a global channel"
        );
    }

    #[test]
    fn display_aggregate_failure_pluralizes() {
        assert_eq!(
            LedError::AggregateFailure(1).to_string(),
            "1 channel write failed"
        );
        assert_eq!(
            LedError::AggregateFailure(3).to_string(),
            "3 channel writes failed"
        );
    }

    #[test]
    fn display_config_error() {
        let e = LedError::Config("red path is empty".into());
        assert_eq!(e.to_string(), "Config error: red path is empty");
    }

    #[test]
    fn display_color_error() {
        let e = LedError::Color("bad hex".into());
        assert_eq!(e.to_string(), "Color error: bad hex");
    }

    #[test]
    fn source_chains_write_failure() {
        let e = LedError::WriteFailed {
            path: "/x".into(),
            attr: "trigger",
            source: io::Error::new(io::ErrorKind::InvalidInput, "invalid argument"),
        };
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("invalid argument"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = LedError::Color("test".into());
        assert!(std::error::Error::source(&e).is_none());
        assert!(std::error::Error::source(&LedError::AggregateFailure(2)).is_none());
    }

    #[test]
    fn question_mark_propagation_io() {
        fn inner() -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "nope"))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = outer().unwrap_err();
        assert!(matches!(err, LedError::Io(_)));
    }
}
