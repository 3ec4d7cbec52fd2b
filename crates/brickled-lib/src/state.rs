//! Application state — the single aggregate every operation mutates.

use crate::models::{CLUSTER_COUNT, LedCluster, LedSettings};

/// Number of selectable fields on the config page.
pub const FIELD_COUNT: usize = 6;

/// Number of entries on the menu page.
pub const ACTION_COUNT: usize = 6;

/// Which page currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Config,
    Menu,
}

/// Cursor into [`LedSettings`] on the config page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    /// Pseudo-field: left/right changes the selected cluster.
    SelectedLed,
    Brightness,
    Effect,
    Duration,
    Color,
    /// Action field: confirm copies the selected cluster's color to all clusters.
    MatchColors,
}

impl SettingField {
    pub const ALL: [SettingField; FIELD_COUNT] = [
        SettingField::SelectedLed,
        SettingField::Brightness,
        SettingField::Effect,
        SettingField::Duration,
        SettingField::Color,
        SettingField::MatchColors,
    ];

    /// Field `delta` positions away, wrapping with floor modulo.
    pub fn offset(self, delta: i64) -> SettingField {
        Self::ALL[(self as i64 + delta).rem_euclid(FIELD_COUNT as i64) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingField::SelectedLed => "LED",
            SettingField::Brightness => "Brightness",
            SettingField::Effect => "Effect",
            SettingField::Duration => "Duration",
            SettingField::Color => "Color",
            SettingField::MatchColors => "Sync colors",
        }
    }
}

/// Top-level actions on the menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    EnableAll,
    DisableAll,
    ToggleExtendedColors,
    ToggleLowBatteryIndication,
    Uninstall,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; ACTION_COUNT] = [
        MenuAction::EnableAll,
        MenuAction::DisableAll,
        MenuAction::ToggleExtendedColors,
        MenuAction::ToggleLowBatteryIndication,
        MenuAction::Uninstall,
        MenuAction::Quit,
    ];

    /// Action `delta` positions away, wrapping with floor modulo.
    pub fn offset(self, delta: i64) -> MenuAction {
        Self::ALL[(self as i64 + delta).rem_euclid(ACTION_COUNT as i64) as usize]
    }
}

/// Root aggregate: per-cluster settings, cursors, and loop flags.
///
/// Owned by the event loop and passed by `&mut` into every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub led_settings: [LedSettings; CLUSTER_COUNT],
    pub selected_cluster: LedCluster,
    pub selected_field: SettingField,
    pub selected_menu_action: MenuAction,
    pub current_page: Page,
    /// In-memory settings differ from the settings file.
    pub dirty_settings: bool,
    /// In-memory settings differ from the driver's control files.
    pub dirty_hardware: bool,
    pub should_quit: bool,
    /// Run the install hook on shutdown. Cleared by the uninstall action.
    pub should_install_daemon: bool,
    pub extended_colors_enabled: bool,
    pub low_battery_indication_enabled: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            led_settings: [LedSettings::default(); CLUSTER_COUNT],
            selected_cluster: LedCluster::Front,
            selected_field: SettingField::Brightness,
            selected_menu_action: MenuAction::EnableAll,
            current_page: Page::Config,
            dirty_settings: false,
            dirty_hardware: false,
            should_quit: false,
            should_install_daemon: true,
            extended_colors_enabled: false,
            low_battery_indication_enabled: false,
        }
    }
}

impl AppState {
    pub fn settings(&self, cluster: LedCluster) -> &LedSettings {
        &self.led_settings[cluster.index()]
    }

    pub fn settings_mut(&mut self, cluster: LedCluster) -> &mut LedSettings {
        &mut self.led_settings[cluster.index()]
    }

    /// Settings of the currently selected cluster.
    pub fn selected(&self) -> &LedSettings {
        self.settings(self.selected_cluster)
    }

    pub fn selected_mut(&mut self) -> &mut LedSettings {
        self.settings_mut(self.selected_cluster)
    }
}
