//! Setting mutator — change the selected field of the selected cluster by one step.

use crate::led::{next_color, palette_step};
use crate::models::{
    AnimationEffect, BRIGHTNESS_STEP, DURATION_STEP, LedCluster, MAX_BRIGHTNESS, MAX_DURATION,
};
use crate::state::{AppState, SettingField};

/// Apply `delta` (`-1`, `0` or `+1`) to the field under the cursor.
///
/// `delta == 0` comes from Confirm: numeric fields are left as they are,
/// colors are normalized (palette or hue-wheel edge), and the match-colors
/// field copies the selected cluster's color to every cluster. Every result
/// stays within its bounds.
pub fn apply_delta(state: &mut AppState, delta: i32) {
    let extended = state.extended_colors_enabled;
    match state.selected_field {
        SettingField::SelectedLed => {
            // Left walks toward higher indices, the opposite of L1/R1.
            state.selected_cluster =
                LedCluster::from_index(state.selected_cluster.index() as i64 - delta as i64);
        }
        SettingField::Brightness => {
            let s = state.selected_mut();
            s.brightness = (s.brightness + delta * BRIGHTNESS_STEP).clamp(0, MAX_BRIGHTNESS);
        }
        SettingField::Effect => {
            let s = state.selected_mut();
            let ordinal = s.effect.ordinal() as i64 + delta as i64;
            s.effect = AnimationEffect::from_ordinal_clamped(ordinal);
        }
        SettingField::Duration => {
            let s = state.selected_mut();
            s.duration = (s.duration + delta * DURATION_STEP).clamp(0, MAX_DURATION);
        }
        SettingField::Color => {
            let s = state.selected_mut();
            s.color = if extended {
                next_color(s.color, delta)
            } else {
                palette_step(s.color, delta)
            };
        }
        SettingField::MatchColors => {
            if delta == 0 {
                let color = state.selected().color;
                log::debug!("copying color 0x{color:06X} to all clusters");
                for settings in state.led_settings.iter_mut() {
                    settings.color = color;
                }
            }
        }
    }
}
