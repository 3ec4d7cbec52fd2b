//! Application configuration — TOML-based, platform-aware paths.
//!
//! Separate from the LED settings file: this holds where the driver lives,
//! which shell commands back the menu actions, and the two menu toggles.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::led::DEFAULT_CONTROL_ROOT;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# brickled configuration — changes made outside the app may be overwritten.\n\n";

/// File name of the LED settings file inside the config directory.
const SETTINGS_FILE: &str = "settings.ini";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of the `led_anim` control files. Default: "/sys/class/led_anim".
    #[serde(default = "default_control_root")]
    pub control_root: String,

    /// LED settings file. Empty = `settings.ini` in the config directory.
    #[serde(default)]
    pub settings_path: String,

    /// Command run by "Enable all". Empty = disabled.
    #[serde(default)]
    pub enable_all_command: String,

    /// Command run by "Disable all". Empty = disabled.
    #[serde(default)]
    pub disable_all_command: String,

    /// Command run on shutdown to (re)install the boot-time daemon.
    #[serde(default)]
    pub install_command: String,

    /// Command run by "Uninstall".
    #[serde(default)]
    pub uninstall_command: String,

    /// Command run when low battery indication is switched on.
    #[serde(default)]
    pub low_battery_on_command: String,

    /// Command run when low battery indication is switched off.
    #[serde(default)]
    pub low_battery_off_command: String,

    /// Seconds before a running command is killed.
    #[serde(default = "default_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Cycle colors around the hue wheel instead of the fixed palette.
    #[serde(default)]
    pub extended_colors: bool,

    /// Low battery indication flag as last toggled from the menu.
    #[serde(default)]
    pub low_battery_indication: bool,
}

fn default_control_root() -> String {
    DEFAULT_CONTROL_ROOT.into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            control_root: default_control_root(),
            settings_path: String::new(),
            enable_all_command: String::new(),
            disable_all_command: String::new(),
            install_command: String::new(),
            uninstall_command: String::new(),
            low_battery_on_command: String::new(),
            low_battery_off_command: String::new(),
            command_timeout_secs: default_timeout_secs(),
            extended_colors: false,
            low_battery_indication: false,
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `control_root` is empty or whitespace-only.
    EmptyControlRoot,
    /// `command_timeout_secs` is zero.
    ZeroTimeout,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyControlRoot => write!(f, "control_root cannot be empty"),
            ValidationError::ZeroTimeout => {
                write!(f, "command_timeout_secs must be at least 1")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("brickled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Default location of the LED settings file.
    pub fn default_settings_path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join(SETTINGS_FILE))
    }

    /// Effective LED settings path: `settings_path` if set, else the default.
    pub fn settings_file(&self) -> Option<PathBuf> {
        let p = self.settings_path.trim();
        if p.is_empty() {
            Self::default_settings_path()
        } else {
            Some(PathBuf::from(p))
        }
    }

    /// Command timeout as a [`Duration`](std::time::Duration).
    pub fn command_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.command_timeout_secs)
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        std::fs::rename(&tmp, path).inspect_err(|_| {
            let _ = std::fs::remove_file(&tmp);
        })
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.control_root.trim().is_empty() {
            errors.push(ValidationError::EmptyControlRoot);
        }
        if self.command_timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
