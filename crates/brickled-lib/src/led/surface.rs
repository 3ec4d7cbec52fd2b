//! Driver control surface — trait + sysfs backend.
//!
//! The `led_anim` driver reads its live configuration from a directory of
//! small text files. [`ControlSurface`] is the seam between the sync engine
//! and that directory so tests can record writes instead of touching sysfs.

use std::io::Write;
use std::path::PathBuf;

/// Default location of the driver's control directory.
pub const DEFAULT_CONTROL_ROOT: &str = "/sys/class/led_anim";

// ── Trait ──

pub trait ControlSurface {
    /// Truncate `file_name` under the control root and write `value` as one line.
    fn write_value(&self, file_name: &str, value: &str) -> std::io::Result<()>;

    /// Display form of the full path for `file_name`, used in log lines.
    fn describe(&self, file_name: &str) -> String {
        file_name.to_string()
    }
}

// ── Sysfs backend ──

/// Control surface backed by a real directory (normally `/sys/class/led_anim`).
#[derive(Debug, Clone)]
pub struct SysfsSurface {
    root: PathBuf,
}

impl SysfsSurface {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SysfsSurface { root: root.into() }
    }
}

impl Default for SysfsSurface {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_ROOT)
    }
}

impl ControlSurface for SysfsSurface {
    fn write_value(&self, file_name: &str, value: &str) -> std::io::Result<()> {
        // The handle is dropped (closed) on every path out of this block.
        let mut file = std::fs::File::create(self.root.join(file_name))?;
        writeln!(file, "{value}")?;
        file.flush()
    }

    fn describe(&self, file_name: &str) -> String {
        self.root.join(file_name).display().to_string()
    }
}

// ── Mock ──

pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// In-memory surface for tests. Records every successful write in order;
    /// file names listed in `fail_files` return an error instead.
    #[derive(Default)]
    pub struct RecordingSurface {
        /// Recorded writes: (file name, value).
        pub writes: RefCell<Vec<(String, String)>>,
        /// File names that fail to open.
        pub fail_files: RefCell<HashSet<String>>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every write to `file_name` fail.
        pub fn fail_on(&self, file_name: &str) {
            self.fail_files.borrow_mut().insert(file_name.to_string());
        }

        /// File names written, in order.
        pub fn file_names(&self) -> Vec<String> {
            self.writes.borrow().iter().map(|(f, _)| f.clone()).collect()
        }

        /// Last value written to `file_name`, if any.
        pub fn last_value(&self, file_name: &str) -> Option<String> {
            self.writes
                .borrow()
                .iter()
                .rev()
                .find(|(f, _)| f == file_name)
                .map(|(_, v)| v.clone())
        }
    }

    impl ControlSurface for RecordingSurface {
        fn write_value(&self, file_name: &str, value: &str) -> std::io::Result<()> {
            if self.fail_files.borrow().contains(file_name) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("cannot open {file_name}"),
                ));
            }
            self.writes
                .borrow_mut()
                .push((file_name.to_string(), value.to_string()));
            Ok(())
        }
    }
}
