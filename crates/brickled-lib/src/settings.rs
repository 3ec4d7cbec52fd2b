//! Settings store — per-cluster LED settings in a line-oriented text file.
//!
//! ```text
//! [f1f2]
//! brightness=50
//! color=0xFF0000
//! duration=1000
//! effect=4
//!
//! [m]
//! ...
//! ```
//!
//! Loading never rejects a file: unknown sections are skipped, malformed
//! values leave the field untouched, and out-of-range values are clamped.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{BrickledError, Result};
use crate::models::{AnimationEffect, LedCluster};
use crate::state::AppState;

/// Serialize every cluster's settings, in cluster order.
pub fn to_settings_string(state: &AppState) -> String {
    let mut out = String::new();
    for cluster in LedCluster::ALL {
        let s = state.settings(cluster);
        // Writing to a String cannot fail.
        let _ = writeln!(out, "[{}]", cluster.internal_name());
        let _ = writeln!(out, "brightness={}", s.brightness);
        let _ = writeln!(out, "color=0x{:06X}", s.color);
        let _ = writeln!(out, "duration={}", s.duration);
        let _ = writeln!(out, "effect={}", s.effect.ordinal());
        out.push('\n');
    }
    out
}

/// Overlay settings parsed from `contents` onto `state`.
pub fn apply_settings_str(state: &mut AppState, contents: &str) {
    let mut current: Option<LedCluster> = None;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = parse_section(name);
            if current.is_none() {
                log::debug!("ignoring unknown settings section [{name}]");
            }
            continue;
        }
        let Some(cluster) = current else {
            continue;
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        let settings = state.settings_mut(cluster);
        match key.trim() {
            "brightness" => {
                if let Some(v) = parse_leading_int(value) {
                    settings.brightness = v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                }
            }
            "color" => {
                if let Some(v) = parse_leading_hex(value) {
                    settings.color = v.min(u32::MAX as u64) as u32;
                }
            }
            "duration" => {
                if let Some(v) = parse_leading_int(value) {
                    settings.duration = v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                }
            }
            "effect" => {
                if let Some(v) = parse_leading_int(value) {
                    settings.effect = AnimationEffect::from_ordinal_clamped(v);
                }
            }
            other => log::debug!("ignoring unknown settings key {other:?}"),
        }
        settings.clamp();
    }
}

/// Map a section name to a cluster.
///
/// Accepts the internal name (`f1f2`) and the older `LED_<index>_<name>` form.
fn parse_section(name: &str) -> Option<LedCluster> {
    let name = name.trim();
    if let Some(cluster) = LedCluster::from_internal_name(name) {
        return Some(cluster);
    }
    let rest = name.strip_prefix("LED_")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let index: usize = digits.parse().ok()?;
    LedCluster::ALL.get(index).copied()
}

/// Parse an optionally signed decimal prefix (`"42ms"` → 42). `None` if no digits;
/// overlong digit runs saturate.
fn parse_leading_int(s: &str) -> Option<i64> {
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Too many digits saturates so the later clamp still applies.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Parse a hex prefix with optional `0x`/`#` (`"0xFF8000"` → 0xFF8000). `None` if no
/// digits; overlong digit runs saturate.
fn parse_leading_hex(s: &str) -> Option<u64> {
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('#'))
        .unwrap_or(s);
    let end = s
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(u64::from_str_radix(&s[..end], 16).unwrap_or(u64::MAX))
}

/// Load settings from `path` into `state`.
///
/// Returns `Ok(false)` if the file does not exist (defaults stay in place),
/// `Ok(true)` once the file has been applied, and an error if it exists but
/// cannot be read.
pub fn load_from(state: &mut AppState, path: &Path) -> Result<bool> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            log::info!("reading settings from {}", path.display());
            apply_settings_str(state, &contents);
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no settings file at {}, using defaults", path.display());
            Ok(false)
        }
        Err(e) => Err(BrickledError::Settings(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

/// Write the full settings file atomically (temp file, then rename),
/// creating the parent directory if needed.
///
/// On failure the existing file is left untouched and `dirty_settings`
/// stays set so the next save retries.
pub fn save_to(state: &mut AppState, path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| {
        BrickledError::Settings(format!("failed to write {}: {e}", path.display()))
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    let contents = to_settings_string(state);
    let tmp = path.with_extension("ini.tmp");
    if let Err(e) = std::fs::write(&tmp, &contents) {
        log::warn!("failed to open {} for writing: {e}", tmp.display());
        return Err(write_err(e));
    }
    // The temp file is a sibling, so rename stays on one filesystem.
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    state.dirty_settings = false;
    log::info!("settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedSettings, MAX_BRIGHTNESS, MAX_COLOR, MAX_DURATION};

    fn custom_state() -> AppState {
        let mut state = AppState::default();
        *state.settings_mut(LedCluster::Front) = LedSettings {
            brightness: 80,
            effect: AnimationEffect::Blink2,
            color: 0x00_80FF,
            duration: 2500,
        };
        *state.settings_mut(LedCluster::Top) = LedSettings {
            brightness: 0,
            effect: AnimationEffect::Disable,
            color: 0x12_3456,
            duration: 0,
        };
        *state.settings_mut(LedCluster::Back) = LedSettings {
            brightness: MAX_BRIGHTNESS,
            effect: AnimationEffect::Blink3,
            color: MAX_COLOR,
            duration: MAX_DURATION,
        };
        state
    }

    // ── serialization ──

    #[test]
    fn serialized_layout() {
        let text = to_settings_string(&custom_state());
        let first: Vec<&str> = text.lines().take(6).collect();
        assert_eq!(
            first,
            vec![
                "[f1f2]",
                "brightness=80",
                "color=0x0080FF",
                "duration=2500",
                "effect=6",
                ""
            ]
        );
        assert!(text.contains("[m]\n"));
        assert!(text.contains("[lr]\n"));
        assert!(text.ends_with("effect=7\n\n"));
    }

    #[test]
    fn sections_in_cluster_order() {
        let text = to_settings_string(&AppState::default());
        let f = text.find("[f1f2]").unwrap();
        let m = text.find("[m]").unwrap();
        let lr = text.find("[lr]").unwrap();
        assert!(f < m && m < lr);
    }

    #[test]
    fn string_round_trip() {
        let original = custom_state();
        let mut loaded = AppState::default();
        apply_settings_str(&mut loaded, &to_settings_string(&original));
        assert_eq!(loaded.led_settings, original.led_settings);
    }

    // ── parsing ──

    #[test]
    fn brightness_over_max_is_clamped_others_default() {
        let mut state = AppState::default();
        apply_settings_str(&mut state, "[f1f2]\nbrightness=999\n");
        let front = state.settings(LedCluster::Front);
        assert_eq!(front.brightness, MAX_BRIGHTNESS);
        let defaults = LedSettings::default();
        assert_eq!(front.effect, defaults.effect);
        assert_eq!(front.color, defaults.color);
        assert_eq!(front.duration, defaults.duration);
        assert_eq!(*state.settings(LedCluster::Top), defaults);
    }

    #[test]
    fn malformed_value_leaves_field_unchanged() {
        let mut state = AppState::default();
        state.settings_mut(LedCluster::Top).brightness = 30;
        apply_settings_str(&mut state, "[m]\nbrightness=abc\ncolor=zz\neffect=\n");
        let top = state.settings(LedCluster::Top);
        assert_eq!(top.brightness, 30);
        assert_eq!(top.color, LedSettings::default().color);
        assert_eq!(top.effect, LedSettings::default().effect);
    }

    #[test]
    fn negative_and_oversized_values_clamp() {
        let mut state = AppState::default();
        apply_settings_str(
            &mut state,
            "[lr]\nbrightness=-5\nduration=90000\neffect=12\ncolor=0x1FFFFFF\n",
        );
        let back = state.settings(LedCluster::Back);
        assert_eq!(back.brightness, 0);
        assert_eq!(back.duration, MAX_DURATION);
        assert_eq!(back.effect, AnimationEffect::Blink3);
        assert_eq!(back.color, MAX_COLOR);
    }

    #[test]
    fn overlong_digit_runs_saturate_then_clamp() {
        let mut state = AppState::default();
        apply_settings_str(
            &mut state,
            "[m]\nbrightness=99999999999999999999\nduration=-99999999999999999999\n\
             color=0x1FFFFFFFFFFFFFFFFF\neffect=123456789012345678901\n",
        );
        let top = state.settings(LedCluster::Top);
        assert_eq!(top.brightness, MAX_BRIGHTNESS);
        assert_eq!(top.duration, 0);
        assert_eq!(top.color, MAX_COLOR);
        assert_eq!(top.effect, AnimationEffect::Blink3);
    }

    #[test]
    fn color_accepts_with_or_without_prefix() {
        let mut state = AppState::default();
        apply_settings_str(&mut state, "[f1f2]\ncolor=00ff80\n[m]\ncolor=0XFF8000\n");
        assert_eq!(state.settings(LedCluster::Front).color, 0x00_FF80);
        assert_eq!(state.settings(LedCluster::Top).color, 0xFF_8000);
    }

    #[test]
    fn trailing_junk_after_number_is_ignored() {
        let mut state = AppState::default();
        apply_settings_str(&mut state, "[m]\nduration=1500ms\n");
        assert_eq!(state.settings(LedCluster::Top).duration, 1500);
    }

    #[test]
    fn unknown_section_drops_following_lines() {
        let mut state = AppState::default();
        apply_settings_str(
            &mut state,
            "[f1f2]\nbrightness=10\n[bogus]\nbrightness=90\n[lr]\nbrightness=20\n",
        );
        assert_eq!(state.settings(LedCluster::Front).brightness, 10);
        assert_eq!(state.settings(LedCluster::Top).brightness, 50);
        assert_eq!(state.settings(LedCluster::Back).brightness, 20);
    }

    #[test]
    fn lines_before_any_header_are_ignored() {
        let mut state = AppState::default();
        apply_settings_str(&mut state, "brightness=10\n");
        assert_eq!(state.led_settings, AppState::default().led_settings);
    }

    #[test]
    fn legacy_indexed_headers() {
        let mut state = AppState::default();
        apply_settings_str(&mut state, "[LED_2_b]\nbrightness=40\n[LED_7_x]\nbrightness=1\n");
        assert_eq!(state.settings(LedCluster::Back).brightness, 40);
        assert_eq!(state.settings(LedCluster::Front).brightness, 50);
    }

    #[test]
    fn load_twice_is_idempotent() {
        let text = to_settings_string(&custom_state());
        let mut a = AppState::default();
        apply_settings_str(&mut a, &text);
        let once = a.clone();
        apply_settings_str(&mut a, &text);
        assert_eq!(a, once);
    }

    // ── file I/O ──

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        let mut original = custom_state();
        original.dirty_settings = true;
        save_to(&mut original, &path).unwrap();
        assert!(!original.dirty_settings);
        assert!(!dir.path().join("settings.ini.tmp").exists());

        let mut loaded = AppState::default();
        assert!(load_from(&mut loaded, &path).unwrap());
        assert_eq!(loaded.led_settings, original.led_settings);
    }

    #[test]
    fn load_missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        assert!(!load_from(&mut state, &dir.path().join("none.ini")).unwrap());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn load_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        let err = load_from(&mut state, dir.path()).unwrap_err();
        assert!(matches!(err, BrickledError::Settings(_)));
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brickled").join("nested").join("settings.ini");
        let mut state = custom_state();
        state.dirty_settings = true;
        save_to(&mut state, &path).unwrap();
        assert!(!state.dirty_settings);

        let mut loaded = AppState::default();
        assert!(load_from(&mut loaded, &path).unwrap());
        assert_eq!(loaded.led_settings, state.led_settings);
    }

    #[test]
    fn failed_save_keeps_dirty_and_file() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let path = blocker.join("settings.ini");
        let mut state = AppState {
            dirty_settings: true,
            ..AppState::default()
        };
        assert!(save_to(&mut state, &path).is_err());
        assert!(state.dirty_settings);
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "x");
    }

    #[test]
    fn failed_rename_leaves_target_and_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // Renaming a file over a non-empty directory fails.
        let path = dir.path().join("settings.ini");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "old").unwrap();
        let mut state = AppState {
            dirty_settings: true,
            ..AppState::default()
        };
        let err = save_to(&mut state, &path).unwrap_err();
        assert!(matches!(err, BrickledError::Settings(_)));
        assert!(state.dirty_settings);
        assert!(path.is_dir());
        assert_eq!(std::fs::read_to_string(path.join("keep")).unwrap(), "old");
        assert!(!dir.path().join("settings.ini.tmp").exists());
    }
}
