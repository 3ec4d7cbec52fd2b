//! Menu action execution — flag toggles and user-configured shell commands.
//!
//! Commands go through the [`CommandRunner`] trait so the menu logic can be
//! exercised without spawning processes.

use std::process::ExitStatus;
use std::time::Duration;

use crate::config::Config;
use crate::error::{BrickledError, Result};
use crate::state::{AppState, MenuAction};

/// Poll interval when waiting for a command to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ── Trait ──

pub trait CommandRunner {
    /// Run `command` to completion. Non-zero exit is an error.
    fn run(&self, command: &str) -> Result<()>;
}

// ── Shell backend ──

/// Runs commands through `sh -c`, killing them after `timeout`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        ShellRunner { timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.command_timeout())
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<()> {
        let status = run_with_timeout(command, self.timeout)
            .map_err(|e| BrickledError::Command(format!("{command}: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(BrickledError::Command(format!("{command}: exited with {status}")))
        }
    }
}

/// Run a shell command with a timeout. Kills the process if it exceeds the deadline.
fn run_with_timeout(command: &str, timeout: Duration) -> std::io::Result<ExitStatus> {
    let mut child = std::process::Command::new("sh")
        .args(["-c", command])
        .spawn()?;

    let max_polls = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1) as u64;
    for _ in 0..max_polls {
        match child.try_wait()? {
            Some(status) => return Ok(status),
            None => std::thread::sleep(POLL_INTERVAL),
        }
    }

    // Timeout — kill and reap
    log::warn!("command timed out after {timeout:?}, killing: {command}");
    let _ = child.kill();
    child.wait() // reap zombie
}

// ── Mock ──

pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Records every command instead of running it. Commands listed in
    /// `fail_commands` return an error (after being recorded).
    #[derive(Default)]
    pub struct RecordingRunner {
        pub commands: RefCell<Vec<String>>,
        pub fail_commands: RefCell<HashSet<String>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(&self, command: &str) {
            self.fail_commands.borrow_mut().insert(command.to_string());
        }

        /// Commands run so far, in order.
        pub fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command: &str) -> Result<()> {
            self.commands.borrow_mut().push(command.to_string());
            if self.fail_commands.borrow().contains(command) {
                return Err(BrickledError::Command(format!("{command}: exited with 1")));
            }
            Ok(())
        }
    }
}

// ── Menu actions ──

/// Run a configured command. Empty commands are skipped.
fn run_configured(runner: &impl CommandRunner, what: &str, command: &str) -> Result<()> {
    let command = command.trim();
    if command.is_empty() {
        log::debug!("no {what} command configured, skipping");
        return Ok(());
    }
    log::info!("running {what} command: {command}");
    runner.run(command).inspect_err(|e| log::warn!("{what} command failed: {e}"))
}

/// Execute a menu action against `state`.
///
/// Flag changes always take effect; toggled flags are mirrored into `config`
/// so the caller can persist them. A failing command is returned after the
/// state has been updated.
pub fn execute_menu_action(
    state: &mut AppState,
    action: MenuAction,
    config: &mut Config,
    runner: &impl CommandRunner,
) -> Result<()> {
    log::debug!("menu action {action:?}");
    match action {
        MenuAction::EnableAll => run_configured(runner, "enable-all", &config.enable_all_command),
        MenuAction::DisableAll => {
            run_configured(runner, "disable-all", &config.disable_all_command)
        }
        MenuAction::ToggleExtendedColors => {
            state.extended_colors_enabled = !state.extended_colors_enabled;
            config.extended_colors = state.extended_colors_enabled;
            Ok(())
        }
        MenuAction::ToggleLowBatteryIndication => {
            state.low_battery_indication_enabled = !state.low_battery_indication_enabled;
            config.low_battery_indication = state.low_battery_indication_enabled;
            if state.low_battery_indication_enabled {
                run_configured(runner, "low-battery-on", &config.low_battery_on_command)
            } else {
                run_configured(runner, "low-battery-off", &config.low_battery_off_command)
            }
        }
        MenuAction::Uninstall => {
            state.should_install_daemon = false;
            state.should_quit = true;
            run_configured(runner, "uninstall", &config.uninstall_command)
        }
        MenuAction::Quit => {
            state.should_quit = true;
            Ok(())
        }
    }
}

/// Run the install command if the daemon should (still) be installed.
pub fn run_install_hook(
    state: &AppState,
    config: &Config,
    runner: &impl CommandRunner,
) -> Result<()> {
    if !state.should_install_daemon {
        log::debug!("daemon install skipped (uninstalled this session)");
        return Ok(());
    }
    run_configured(runner, "install", &config.install_command)
}
