//! LED control — color cycling, driver control surface, hardware sync.

mod color;
mod surface;
mod sync;

pub use color::{HUE_STEP, color_name, format_color, next_color, palette_step, parse_color};
pub use surface::{ControlSurface, DEFAULT_CONTROL_ROOT, SysfsSurface, mock};
pub use sync::{ClusterAddress, ControlWrite, SyncReport, address, plan_cluster, sync_leds};
