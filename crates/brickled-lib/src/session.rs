//! Event-step session — owns the state and its collaborators.
//!
//! One [`Session::handle`] call processes a single logical input end to end:
//! state machine, mutation or menu action, hardware sync when dirty, settings
//! save when dirty. Frontends feed inputs and render [`Session::screen`].

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{BrickledError, Result};
use crate::hooks::{CommandRunner, execute_menu_action, run_install_hook};
use crate::input::{Dispatch, LogicalInput, handle_input};
use crate::led::{ControlSurface, SyncReport, sync_leds};
use crate::settings;
use crate::state::{AppState, MenuAction};
use crate::view::{Screen, build_screen};

pub struct Session<S, R> {
    state: AppState,
    config: Config,
    /// Where toggled menu flags are persisted. `None` disables persistence.
    config_path: Option<PathBuf>,
    settings_path: PathBuf,
    surface: S,
    runner: R,
}

impl<S: ControlSurface, R: CommandRunner> Session<S, R> {
    /// Create a session with default settings and the menu flags from `config`.
    ///
    /// Call [`load`](Self::load) to overlay the settings file.
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        settings_path: PathBuf,
        surface: S,
        runner: R,
    ) -> Self {
        let state = AppState {
            extended_colors_enabled: config.extended_colors,
            low_battery_indication_enabled: config.low_battery_indication,
            ..AppState::default()
        };
        Session {
            state,
            config,
            config_path,
            settings_path,
            surface,
            runner,
        }
    }

    /// Overlay the settings file onto the current state. `Ok(false)` if it is missing.
    pub fn load(&mut self) -> Result<bool> {
        settings::load_from(&mut self.state, &self.settings_path)
    }

    /// Push the loaded settings so the hardware matches the file.
    pub fn start(&mut self) -> SyncReport {
        sync_leds(&mut self.state, &self.surface)
    }

    /// Process one input. Returns what the state machine decided and the
    /// first error hit along the way (failed command or failed save).
    ///
    /// Errors never leave the session in a half-processed state: the sync and
    /// save steps still run after a failed command.
    pub fn handle(&mut self, input: LogicalInput) -> (Dispatch, Option<BrickledError>) {
        let dispatch = handle_input(&mut self.state, input);
        let mut error = None;

        if let Dispatch::Execute(action) = dispatch {
            if let Err(e) =
                execute_menu_action(&mut self.state, action, &mut self.config, &self.runner)
            {
                error = Some(e);
            }
            if matches!(
                action,
                MenuAction::ToggleExtendedColors | MenuAction::ToggleLowBatteryIndication
            ) {
                self.persist_config();
            }
        }

        if self.state.dirty_hardware {
            let report = sync_leds(&mut self.state, &self.surface);
            if !report.is_complete() {
                log::warn!("{} control write(s) failed", report.failed.len());
            }
        }

        if self.state.dirty_settings
            && let Err(e) = settings::save_to(&mut self.state, &self.settings_path)
        {
            error.get_or_insert(e);
        }

        (dispatch, error)
    }

    /// Save, sync, and run the install hook. Every step runs; the first
    /// failure is returned.
    pub fn shutdown(&mut self) -> Result<()> {
        let saved = settings::save_to(&mut self.state, &self.settings_path);
        sync_leds(&mut self.state, &self.surface);
        let installed = run_install_hook(&self.state, &self.config, &self.runner);
        saved.and(installed)
    }

    /// Best effort: a config that cannot be written only costs the flag next run.
    fn persist_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            log::warn!("failed to save config to {}: {e}", path.display());
        }
    }

    pub fn screen(&self) -> Screen {
        build_screen(&self.state)
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
