//! Hardware sync — push every cluster's settings to the driver's control files.
//!
//! One file per concern per cluster, written as a single line:
//!
//! | concern    | file                   | format          |
//! |------------|------------------------|-----------------|
//! | brightness | `max_scale_<suffix>`   | decimal         |
//! | color      | `effect_rgb_hex_<sfx>` | 6 hex digits    |
//! | duration   | `effect_duration_<sfx>`| decimal (ms)    |
//! | effect     | `effect_<suffix>`      | decimal ordinal |
//!
//! The front cluster is two physical segments (`f1`, `f2`): its color,
//! duration and effect are written to both suffixes, and its brightness goes
//! to the shared `max_scale` file.

use crate::led::color::format_color;
use crate::models::{CLUSTER_COUNT, LedCluster, LedSettings};
use crate::state::AppState;

use super::surface::ControlSurface;

/// How a cluster is addressed in the control directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterAddress {
    /// Suffixes for the color/duration/effect files.
    pub suffixes: &'static [&'static str],
    /// File holding this cluster's brightness.
    pub brightness_file: &'static str,
}

/// Address table, indexed by cluster ordinal.
static ADDRESSES: [ClusterAddress; CLUSTER_COUNT] = [
    ClusterAddress {
        suffixes: &["f1", "f2"],
        brightness_file: "max_scale",
    }, // Front
    ClusterAddress {
        suffixes: &["m"],
        brightness_file: "max_scale_m",
    }, // Top
    ClusterAddress {
        suffixes: &["lr"],
        brightness_file: "max_scale_lr",
    }, // Back
];

/// Control-file addressing for `cluster`.
pub fn address(cluster: LedCluster) -> &'static ClusterAddress {
    &ADDRESSES[cluster.index()]
}

/// One control-file write, in the order it is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlWrite {
    pub file: String,
    pub value: String,
}

/// The ordered writes that push `settings` for `cluster`.
///
/// Ordering matters: per suffix, color and duration must land before the
/// effect file, which the driver treats as the trigger to re-read the rest.
/// Brightness comes last.
pub fn plan_cluster(cluster: LedCluster, settings: &LedSettings) -> Vec<ControlWrite> {
    let addr = address(cluster);
    let mut writes = Vec::with_capacity(addr.suffixes.len() * 3 + 1);
    for suffix in addr.suffixes {
        writes.push(ControlWrite {
            file: format!("effect_rgb_hex_{suffix}"),
            value: format_color(settings.color),
        });
        writes.push(ControlWrite {
            file: format!("effect_duration_{suffix}"),
            value: settings.duration.to_string(),
        });
        writes.push(ControlWrite {
            file: format!("effect_{suffix}"),
            value: settings.effect.ordinal().to_string(),
        });
    }
    writes.push(ControlWrite {
        file: addr.brightness_file.to_string(),
        value: settings.brightness.to_string(),
    });
    writes
}

/// Outcome of a sync attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of writes that succeeded.
    pub written: usize,
    /// Files whose write failed (skipped).
    pub failed: Vec<String>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Push every cluster to the control surface, in cluster order.
///
/// Best effort: a write that fails is logged and skipped, the rest still go
/// out. `dirty_hardware` is cleared regardless of individual outcomes.
pub fn sync_leds(state: &mut AppState, surface: &impl ControlSurface) -> SyncReport {
    state.dirty_hardware = false;
    let mut report = SyncReport::default();
    for cluster in LedCluster::ALL {
        log::debug!(">>> updating {}", cluster.display_name());
        for w in plan_cluster(cluster, state.settings(cluster)) {
            log::debug!("writing {} -> {}", w.value, surface.describe(&w.file));
            match surface.write_value(&w.file, &w.value) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    log::warn!("failed to write {}: {e}", surface.describe(&w.file));
                    report.failed.push(w.file);
                }
            }
        }
    }
    report
}
