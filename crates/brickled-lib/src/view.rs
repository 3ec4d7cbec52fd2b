//! Display strings for the rendering side, built on demand from [`AppState`].

use std::fmt;

use crate::led::color_name;
use crate::state::{AppState, MenuAction, Page, SettingField};

pub const CARET_LEFT: &str = "<  ";
pub const CARET_RIGHT: &str = "  >";

/// One line of text plus how the renderer should treat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub text: String,
    /// Row under the cursor.
    pub highlighted: bool,
    /// Left/right changes this row's value.
    pub adjustable: bool,
}

impl DisplayRow {
    /// Text with carets added when the row is selected and adjustable.
    pub fn decorated(&self) -> String {
        if self.highlighted && self.adjustable {
            format!("{CARET_LEFT}{}{CARET_RIGHT}", self.text)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decorated())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPageView {
    /// Selected cluster between the shoulder-button hints.
    pub header: String,
    /// One row per [`SettingField`], in field order.
    pub rows: Vec<DisplayRow>,
    /// Color of the selected cluster, for a preview swatch.
    pub swatch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPageView {
    /// One row per [`MenuAction`], in menu order.
    pub rows: Vec<DisplayRow>,
}

/// Everything the renderer needs for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Config(ConfigPageView),
    Menu(MenuPageView),
}

impl Screen {
    pub fn rows(&self) -> &[DisplayRow] {
        match self {
            Screen::Config(v) => &v.rows,
            Screen::Menu(v) => &v.rows,
        }
    }
}

pub fn build_screen(state: &AppState) -> Screen {
    match state.current_page {
        Page::Config => Screen::Config(config_page(state)),
        Page::Menu => Screen::Menu(menu_page(state)),
    }
}

pub fn config_page(state: &AppState) -> ConfigPageView {
    let rows = SettingField::ALL
        .into_iter()
        .map(|field| DisplayRow {
            text: field_text(state, field),
            highlighted: field == state.selected_field,
            adjustable: field != SettingField::MatchColors,
        })
        .collect();
    ConfigPageView {
        header: format!("[ L1 ]  {}  [ R1 ]", state.selected_cluster.display_name()),
        rows,
        swatch: state.selected().color,
    }
}

pub fn menu_page(state: &AppState) -> MenuPageView {
    let rows = MenuAction::ALL
        .into_iter()
        .map(|action| DisplayRow {
            text: menu_label(state, action).to_string(),
            highlighted: action == state.selected_menu_action,
            adjustable: false,
        })
        .collect();
    MenuPageView { rows }
}

fn field_text(state: &AppState, field: SettingField) -> String {
    let s = state.selected();
    match field {
        SettingField::SelectedLed => format!("LED: {}", state.selected_cluster.display_name()),
        SettingField::Brightness => format!("Brightness: {}", s.brightness),
        SettingField::Effect => format!("Effect: {}", s.effect.display_name()),
        SettingField::Duration => format!("Duration: {}ms", s.duration),
        SettingField::Color => format!("Color: {}", color_name(s.color)),
        SettingField::MatchColors => "Sync colors to all LEDs".to_string(),
    }
}

/// Menu label; toggles name the action they would perform.
pub fn menu_label(state: &AppState, action: MenuAction) -> &'static str {
    match action {
        MenuAction::EnableAll => "Turn on all LEDs",
        MenuAction::DisableAll => "Turn off all LEDs",
        MenuAction::ToggleExtendedColors if state.extended_colors_enabled => {
            "Disable Extended Colors"
        }
        MenuAction::ToggleExtendedColors => "Enable Extended Colors",
        MenuAction::ToggleLowBatteryIndication if state.low_battery_indication_enabled => {
            "Disable Low Battery Indicator"
        }
        MenuAction::ToggleLowBatteryIndication => "Enable Low Battery Indicator",
        MenuAction::Uninstall => "Uninstall",
        MenuAction::Quit => "Quit",
    }
}
