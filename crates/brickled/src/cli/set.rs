//! `set` subcommand — edit settings without the interactive editor.

use super::{
    AppState, GlobalOpts, LedCluster, Result, SetOutput, SyncOutput, SysfsSurface, clusters_json,
    kv, kv_width, led, load_config, load_state, models, print_json, require_valid, settings,
};

/// Requested changes. `None` fields are left as they are.
pub(super) struct SettingsEdit {
    pub clusters: Vec<LedCluster>,
    pub color: Option<String>,
    pub brightness: Option<i32>,
    pub effect: Option<String>,
    pub duration: Option<i32>,
}

impl SettingsEdit {
    /// Apply to `state`, clamping into bounds. Invalid color/effect strings
    /// fail before anything is changed.
    pub(super) fn apply(&self, state: &mut AppState) -> Result<()> {
        let color = self.color.as_deref().map(led::parse_color).transpose()?;
        let effect = self
            .effect
            .as_deref()
            .map(str::parse::<models::AnimationEffect>)
            .transpose()?;

        for &cluster in &self.clusters {
            let s = state.settings_mut(cluster);
            if let Some(c) = color {
                s.color = c;
            }
            if let Some(b) = self.brightness {
                s.brightness = b;
            }
            if let Some(e) = effect {
                s.effect = e;
            }
            if let Some(d) = self.duration {
                s.duration = d;
            }
            s.clamp();
        }
        state.dirty_settings = true;
        state.dirty_hardware = true;
        Ok(())
    }
}

pub(super) fn cmd_set(opts: &GlobalOpts, edit: &SettingsEdit, push: bool) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());
    require_valid(&config)?;
    let settings_path = opts.settings_file(&config)?;
    let mut state = load_state(&config, &settings_path)?;

    edit.apply(&mut state)?;
    if let Some(dir) = settings_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    settings::save_to(&mut state, &settings_path)?;

    let sync = push.then(|| {
        let surface = SysfsSurface::new(&config.control_root);
        let report = led::sync_leds(&mut state, &surface);
        if !report.is_complete() {
            log::warn!("{} control write(s) failed", report.failed.len());
        }
        SyncOutput {
            control_root: config.control_root.clone(),
            written: report.written,
            failed: report.failed,
        }
    });

    if opts.json {
        return print_json(&SetOutput {
            settings_file: settings_path.display().to_string(),
            sync,
            clusters: clusters_json(&state),
        });
    }

    let w = kv_width(&["Saved:", "Synced:"], &[]);
    kv("Saved:", settings_path.display(), w);
    match &sync {
        Some(s) => kv(
            "Synced:",
            format_args!("{} written, {} failed", s.written, s.failed.len()),
            w,
        ),
        None => kv("Synced:", "skipped", w),
    }
    Ok(())
}
