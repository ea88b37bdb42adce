//! Attribute file access: trait + sysfs backend + in-memory mock.
//!
//! An LED class device is a directory of small text attributes
//! (`brightness`, `max_brightness`, `trigger`). Devices never touch the
//! filesystem directly; they go through [`AttributeIo`] so tests can inject
//! failures and inspect write ordering.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

pub const BRIGHTNESS: &str = "brightness";
pub const MAX_BRIGHTNESS: &str = "max_brightness";
pub const TRIGGER: &str = "trigger";

// ── Trait ──

pub trait AttributeIo {
    /// Read the whole attribute file as text.
    fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String>;
    /// Replace the attribute's contents with `value`.
    fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()>;
}

impl<T: AttributeIo + ?Sized> AttributeIo for &T {
    fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String> {
        (**self).read_attr(dir, name)
    }
    fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()> {
        (**self).write_attr(dir, name, value)
    }
}

impl<T: AttributeIo + ?Sized> AttributeIo for Rc<T> {
    fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String> {
        (**self).read_attr(dir, name)
    }
    fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()> {
        (**self).write_attr(dir, name, value)
    }
}

impl<T: AttributeIo + ?Sized> AttributeIo for Arc<T> {
    fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String> {
        (**self).read_attr(dir, name)
    }
    fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()> {
        (**self).write_attr(dir, name, value)
    }
}

// ── Sysfs backend ──

/// Real backend: blocking whole-file reads and writes under the device directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sysfs;

impl AttributeIo for Sysfs {
    fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String> {
        std::fs::read_to_string(dir.join(name))
    }

    fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()> {
        // Attributes are created by the kernel; a missing one is an error, not a new file.
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(dir.join(name))?;
        file.write_all(value.as_bytes())
    }
}

/// In-memory attribute store for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    type Key = (PathBuf, String);

    /// Attribute contents keyed by `(dir, name)`. Every successful write is
    /// recorded in order; `fail_reads` / `fail_writes` inject errors.
    #[derive(Debug, Default)]
    pub struct MockSysfs {
        /// Attribute storage: (dir, name) → contents.
        pub files: RefCell<HashMap<Key, String>>,
        /// Recorded writes: (dir, name, value), including failed attempts.
        pub writes: RefCell<Vec<(PathBuf, String, String)>>,
        /// Attributes whose reads fail.
        pub fail_reads: RefCell<HashSet<Key>>,
        /// Attributes whose writes fail.
        pub fail_writes: RefCell<HashSet<Key>>,
    }

    impl MockSysfs {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an LED directory with the given attribute contents.
        pub fn add_led(&self, dir: impl AsRef<Path>, max_brightness: &str, trigger: &str) {
            let dir = dir.as_ref();
            self.set(dir, MAX_BRIGHTNESS, max_brightness);
            self.set(dir, TRIGGER, trigger);
            self.set(dir, BRIGHTNESS, "0");
        }

        pub fn set(&self, dir: impl AsRef<Path>, name: &str, value: &str) {
            self.files
                .borrow_mut()
                .insert((dir.as_ref().to_path_buf(), name.to_string()), value.into());
        }

        pub fn get(&self, dir: impl AsRef<Path>, name: &str) -> Option<String> {
            self.files
                .borrow()
                .get(&(dir.as_ref().to_path_buf(), name.to_string()))
                .cloned()
        }

        pub fn fail_read(&self, dir: impl AsRef<Path>, name: &str) {
            self.fail_reads
                .borrow_mut()
                .insert((dir.as_ref().to_path_buf(), name.to_string()));
        }

        pub fn fail_write(&self, dir: impl AsRef<Path>, name: &str) {
            self.fail_writes
                .borrow_mut()
                .insert((dir.as_ref().to_path_buf(), name.to_string()));
        }

        /// Stop injecting write failures for an attribute.
        pub fn heal_write(&self, dir: impl AsRef<Path>, name: &str) {
            self.fail_writes
                .borrow_mut()
                .remove(&(dir.as_ref().to_path_buf(), name.to_string()));
        }

        /// Recorded write attempts as `"<dir>/<name>=<value>"` strings.
        pub fn write_log(&self) -> Vec<String> {
            self.writes
                .borrow()
                .iter()
                .map(|(dir, name, value)| format!("{}/{name}={value}", dir.display()))
                .collect()
        }

        pub fn clear_writes(&self) {
            self.writes.borrow_mut().clear();
        }
    }

    impl AttributeIo for MockSysfs {
        fn read_attr(&self, dir: &Path, name: &str) -> io::Result<String> {
            let key = (dir.to_path_buf(), name.to_string());
            if self.fail_reads.borrow().contains(&key) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "mock: read failure injected",
                ));
            }
            self.files.borrow().get(&key).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("mock: no {name} attribute"))
            })
        }

        fn write_attr(&self, dir: &Path, name: &str, value: &str) -> io::Result<()> {
            let key = (dir.to_path_buf(), name.to_string());
            self.writes
                .borrow_mut()
                .push((key.0.clone(), key.1.clone(), value.to_string()));
            if self.fail_writes.borrow().contains(&key) {
                return Err(io::Error::other("mock: write failure injected"));
            }
            self.files.borrow_mut().insert(key, value.to_string());
            Ok(())
        }
    }
}
