//! `sync` subcommand — push the settings file to the driver once.

use super::{
    BrickledError, GlobalOpts, Result, SyncOutput, SysfsSurface, kv, kv_width, led, load_config,
    load_state, print_json, require_valid,
};

pub(super) fn cmd_sync(opts: &GlobalOpts) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());
    require_valid(&config)?;
    let settings_path = opts.settings_file(&config)?;
    let mut state = load_state(&config, &settings_path)?;

    let surface = SysfsSurface::new(&config.control_root);
    let report = led::sync_leds(&mut state, &surface);
    if report.written == 0 {
        return Err(BrickledError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no control files written under {}", config.control_root),
        )));
    }

    if opts.json {
        return print_json(&SyncOutput {
            control_root: config.control_root.clone(),
            written: report.written,
            failed: report.failed,
        });
    }

    let w = kv_width(&["Settings:", "Control root:", "Written:", "Failed:"], &[]);
    kv("Settings:", settings_path.display(), w);
    kv("Control root:", &config.control_root, w);
    kv("Written:", report.written, w);
    if !report.failed.is_empty() {
        kv("Failed:", report.failed.join(", "), w);
    }
    Ok(())
}
