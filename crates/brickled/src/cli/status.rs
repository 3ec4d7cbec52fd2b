//! `status` subcommand — show per-LED settings from the settings file.

use super::{
    GlobalOpts, LedCluster, Result, StatusOutput, clusters_json, kv, kv_indent, kv_width, led,
    load_config, load_state, print_json,
};

pub(super) fn cmd_status(opts: &GlobalOpts) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());
    let settings_path = opts.settings_file(&config)?;
    let exists = settings_path.exists();
    let state = load_state(&config, &settings_path)?;

    if opts.json {
        return print_json(&StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings_file: settings_path.display().to_string(),
            settings_file_exists: exists,
            extended_colors: state.extended_colors_enabled,
            low_battery_indication: state.low_battery_indication_enabled,
            clusters: clusters_json(&state),
        });
    }

    let w = kv_width(
        &["Version:", "Settings:", "Extended colors:", "Low battery LED:"],
        &["Brightness:", "Effect:", "Color:", "Duration:"],
    );
    kv("Version:", env!("CARGO_PKG_VERSION"), w);
    if exists {
        kv("Settings:", settings_path.display(), w);
    } else {
        kv(
            "Settings:",
            format_args!("{} (not found, using defaults)", settings_path.display()),
            w,
        );
    }
    kv("Extended colors:", on_off(state.extended_colors_enabled), w);
    kv("Low battery LED:", on_off(state.low_battery_indication_enabled), w);

    for cluster in LedCluster::ALL {
        let s = state.settings(cluster);
        println!();
        println!("{} [{}]:", cluster.display_name(), cluster.internal_name());
        kv_indent("Brightness:", s.brightness, w);
        kv_indent(
            "Effect:",
            format_args!("{} ({})", s.effect.display_name(), s.effect.ordinal()),
            w,
        );
        kv_indent(
            "Color:",
            format_args!("#{} ({})", led::format_color(s.color), led::color_name(s.color)),
            w,
        );
        kv_indent("Duration:", format_args!("{}ms", s.duration), w);
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
