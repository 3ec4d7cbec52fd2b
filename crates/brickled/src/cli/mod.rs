//! CLI subcommands — interactive editor, one-shot sync, status and settings edits.

mod config_cmd;
mod run;
mod set;
mod status;
mod sync;

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use brickled_lib::BrickledError;
pub(super) use brickled_lib::config::Config;
pub(super) use brickled_lib::error::Result;
pub(super) use brickled_lib::led::{self, SysfsSurface};
pub(super) use brickled_lib::models::{self, LedCluster, LedSettings};
pub(super) use brickled_lib::settings;
pub(super) use brickled_lib::state::AppState;

const PADDING: usize = 2;

/// Options shared by every subcommand.
pub struct GlobalOpts {
    pub json: bool,
    pub config_path: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
}

impl GlobalOpts {
    /// Config file in effect: `--config`, else the platform default.
    pub(super) fn config_file(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(Config::path)
    }

    /// Settings file in effect: `--settings`, else whatever the config says.
    pub(super) fn settings_file(&self, config: &Config) -> Result<PathBuf> {
        self.settings_path
            .clone()
            .or_else(|| config.settings_file())
            .ok_or_else(|| {
                BrickledError::Config("no config directory; pass --settings <PATH>".into())
            })
    }
}

/// Load config from `custom_path` or the default location, logging parse warnings.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Reject a config that cannot drive the hardware.
pub(super) fn require_valid(config: &Config) -> Result<()> {
    config.validate().map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        BrickledError::Config(msgs.join("; "))
    })
}

/// Load the LED settings file into a fresh state carrying the config's menu flags.
pub(super) fn load_state(config: &Config, path: &Path) -> Result<AppState> {
    let mut state = AppState {
        extended_colors_enabled: config.extended_colors,
        low_battery_indication_enabled: config.low_battery_indication,
        ..AppState::default()
    };
    settings::load_from(&mut state, path)?;
    Ok(state)
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| BrickledError::Io(std::io::Error::other(e)))?;
    println!("{text}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ClusterJson {
    pub cluster: String,
    pub name: String,
    pub brightness: i32,
    pub effect: String,
    pub effect_ordinal: i32,
    pub color: String,
    pub color_name: String,
    pub duration: i32,
}

impl ClusterJson {
    pub(super) fn new(cluster: LedCluster, s: &LedSettings) -> Self {
        ClusterJson {
            cluster: cluster.display_name().to_string(),
            name: cluster.internal_name().to_string(),
            brightness: s.brightness,
            effect: s.effect.display_name().to_string(),
            effect_ordinal: s.effect.ordinal(),
            color: format!("#{}", led::format_color(s.color)),
            color_name: led::color_name(s.color),
            duration: s.duration,
        }
    }
}

pub(super) fn clusters_json(state: &AppState) -> Vec<ClusterJson> {
    LedCluster::ALL
        .into_iter()
        .map(|c| ClusterJson::new(c, state.settings(c)))
        .collect()
}

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub settings_file: String,
    pub settings_file_exists: bool,
    pub extended_colors: bool,
    pub low_battery_indication: bool,
    pub clusters: Vec<ClusterJson>,
}

#[derive(Serialize)]
pub(super) struct SyncOutput {
    pub control_root: String,
    pub written: usize,
    pub failed: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct SetOutput {
    pub settings_file: String,
    pub sync: Option<SyncOutput>,
    pub clusters: Vec<ClusterJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub files: ConfigFilesJson,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct ConfigFilesJson {
    pub settings_file: Option<String>,
    pub settings_file_exists: bool,
    pub control_root_exists: bool,
}

/// Which clusters `set` edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClusterArg {
    Front,
    Top,
    Back,
    All,
}

impl ClusterArg {
    pub(super) fn clusters(self) -> Vec<LedCluster> {
        match self {
            ClusterArg::Front => vec![LedCluster::Front],
            ClusterArg::Top => vec![LedCluster::Top],
            ClusterArg::Back => vec![LedCluster::Back],
            ClusterArg::All => LedCluster::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive editor: one input symbol per line on stdin (up, down, left,
    /// right, confirm, cancel, start, select, l1, r1, power, ...)
    Run,

    /// Push the settings file to the driver once
    Sync,

    /// Show per-LED settings from the settings file
    Status,

    /// Show current configuration and file paths
    Config,

    /// Change settings for one or all LEDs, save, and push to the driver
    Set {
        /// LED to change
        #[arg(long, value_enum, default_value_t = ClusterArg::All)]
        cluster: ClusterArg,
        /// Color: hex ("#FF8000") or palette name ("orange", "light blue")
        #[arg(long)]
        color: Option<String>,
        /// Brightness (0-100, clamped)
        #[arg(long, allow_hyphen_values = true)]
        brightness: Option<i32>,
        /// Effect name ("breath", "blink 1") or ordinal (0-7)
        #[arg(long)]
        effect: Option<String>,
        /// Effect cycle duration in milliseconds (0-5000, clamped)
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<i32>,
        /// Save only; do not write the driver's control files
        #[arg(long)]
        no_sync: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, opts: &GlobalOpts) -> Result<()> {
    match cmd {
        Command::Run => {
            if opts.json {
                warn_json_unsupported("run");
            }
            run::cmd_run(opts)
        }
        Command::Sync => sync::cmd_sync(opts),
        Command::Status => status::cmd_status(opts),
        Command::Config => config_cmd::cmd_config(opts),
        Command::Set {
            cluster,
            color,
            brightness,
            effect,
            duration,
            no_sync,
        } => {
            let edit = set::SettingsEdit {
                clusters: cluster.clusters(),
                color,
                brightness,
                effect,
                duration,
            };
            set::cmd_set(opts, &edit, !no_sync)
        }
    }
}


#[cfg(test)]
mod json_struct_tests {
    use super::*;

    #[test]
    fn cluster_json_fields() {
        let json = serde_json::to_value(ClusterJson::new(
            LedCluster::Front,
            &LedSettings::default(),
        ))
        .unwrap();
        assert_eq!(json["cluster"], "Front LED");
        assert_eq!(json["name"], "f1f2");
        assert_eq!(json["brightness"], 50);
        assert_eq!(json["effect"], "Static");
        assert_eq!(json["effect_ordinal"], 4);
        assert_eq!(json["color"], "#FF0000");
        assert_eq!(json["color_name"], "Red");
        assert_eq!(json["duration"], 1000);
    }

    #[test]
    fn status_output_lists_all_clusters() {
        let output = StatusOutput {
            version: "0.1.0".into(),
            settings_file: "/tmp/settings.ini".into(),
            settings_file_exists: false,
            extended_colors: false,
            low_battery_indication: false,
            clusters: clusters_json(&AppState::default()),
        };
        let json = serde_json::to_value(&output).unwrap();
        let clusters = json["clusters"].as_array().unwrap();
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[2]["name"], "lr");
    }

    #[test]
    fn config_output_missing_paths_are_null() {
        let output = ConfigOutput {
            config_file: None,
            config_file_exists: false,
            settings: Config::default(),
            files: ConfigFilesJson {
                settings_file: None,
                settings_file_exists: false,
                control_root_exists: false,
            },
            problems: vec![],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["config_file"].is_null());
        assert!(json["files"]["settings_file"].is_null());
        assert_eq!(json["settings"]["control_root"], "/sys/class/led_anim");
    }
}

#[cfg(test)]
mod option_tests {
    use super::*;

    #[test]
    fn settings_override_wins() {
        let opts = GlobalOpts {
            json: false,
            config_path: None,
            settings_path: Some(PathBuf::from("/tmp/x.ini")),
        };
        let config = Config {
            settings_path: "/tmp/y.ini".into(),
            ..Config::default()
        };
        assert_eq!(opts.settings_file(&config).unwrap(), PathBuf::from("/tmp/x.ini"));
    }

    #[test]
    fn settings_from_config() {
        let opts = GlobalOpts {
            json: false,
            config_path: None,
            settings_path: None,
        };
        let config = Config {
            settings_path: "/tmp/y.ini".into(),
            ..Config::default()
        };
        assert_eq!(opts.settings_file(&config).unwrap(), PathBuf::from("/tmp/y.ini"));
    }

    #[test]
    fn require_valid_joins_problems() {
        let config = Config {
            control_root: String::new(),
            command_timeout_secs: 0,
            ..Config::default()
        };
        let err = require_valid(&config).unwrap_err().to_string();
        assert!(err.contains("control_root"));
        assert!(err.contains("command_timeout_secs"));
    }

    #[test]
    fn cluster_arg_all_expands() {
        assert_eq!(ClusterArg::All.clusters(), LedCluster::ALL.to_vec());
        assert_eq!(ClusterArg::Top.clusters(), vec![LedCluster::Top]);
    }
}
