//! `config` subcommand — show current configuration and file paths.

use std::path::Path;

use super::{
    ConfigFilesJson, ConfigOutput, GlobalOpts, Result, kv, kv_indent, kv_width, load_config,
    print_json,
};

pub(super) fn cmd_config(opts: &GlobalOpts) -> Result<()> {
    let config = load_config(opts.config_path.as_deref());
    let config_path = opts.config_file();
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());

    let settings_file = opts.settings_file(&config).ok();
    let settings_exists = settings_file.as_ref().is_some_and(|p| p.exists());
    let control_root_exists = Path::new(&config.control_root).is_dir();
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if opts.json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            files: ConfigFilesJson {
                settings_file: settings_file.as_ref().map(|p| p.display().to_string()),
                settings_file_exists: settings_exists,
                control_root_exists,
            },
            problems,
        });
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "control_root:",
            "settings_path:",
            "enable_all_command:",
            "disable_all_command:",
            "install_command:",
            "uninstall_command:",
            "low_battery_on_command:",
            "low_battery_off_command:",
            "command_timeout_secs:",
            "extended_colors:",
            "low_battery_indication:",
            "Settings file:",
            "Control root:",
        ],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    let command_label = |cmd: &str| {
        if cmd.trim().is_empty() {
            "(none)".to_string()
        } else {
            cmd.to_string()
        }
    };
    kv_indent("control_root:", &config.control_root, w);
    kv_indent(
        "settings_path:",
        if config.settings_path.is_empty() {
            "(default)"
        } else {
            config.settings_path.as_str()
        },
        w,
    );
    kv_indent("enable_all_command:", command_label(&config.enable_all_command), w);
    kv_indent("disable_all_command:", command_label(&config.disable_all_command), w);
    kv_indent("install_command:", command_label(&config.install_command), w);
    kv_indent("uninstall_command:", command_label(&config.uninstall_command), w);
    kv_indent("low_battery_on_command:", command_label(&config.low_battery_on_command), w);
    kv_indent("low_battery_off_command:", command_label(&config.low_battery_off_command), w);
    kv_indent("command_timeout_secs:", config.command_timeout_secs, w);
    kv_indent("extended_colors:", config.extended_colors, w);
    kv_indent("low_battery_indication:", config.low_battery_indication, w);
    println!();

    println!("Files:");
    match &settings_file {
        Some(p) => {
            let status = if settings_exists { "present" } else { "not found" };
            kv_indent("Settings file:", format_args!("{} ({status})", p.display()), w);
        }
        None => kv_indent("Settings file:", "(no config directory)", w),
    }
    let status = if control_root_exists { "present" } else { "not found" };
    kv_indent(
        "Control root:",
        format_args!("{} ({status})", config.control_root),
        w,
    );

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}
