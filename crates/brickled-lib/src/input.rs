//! Page/input state machine — route one logical input to navigation or mutation.
//!
//! [`handle_input`] only touches [`AppState`]. Menu actions with side effects
//! are returned as [`Dispatch::Execute`] for the caller to run (see
//! [`crate::hooks::execute_menu_action`]), keeping this module free of I/O.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::models::LedCluster;
use crate::mutator::apply_delta;
use crate::state::{AppState, MenuAction, Page};

/// One abstract input event, already mapped from a physical key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalInput {
    Power,
    Start,
    Select,
    Menu,
    Confirm,
    Cancel,
    Up,
    Down,
    Left,
    Right,
    /// L1, L2 or L3.
    ShoulderLeft,
    /// R1, R2 or R3.
    ShoulderRight,
    X,
    Y,
    Unknown,
}

impl LogicalInput {
    /// Parse an input symbol. Unrecognized symbols map to [`LogicalInput::Unknown`].
    ///
    /// Symbols are case-insensitive kebab-case (`"shoulder-right"`); controller
    /// button names (`"a"`, `"b"`, `"l1"`, `"r2"`) are accepted as aliases.
    pub fn from_symbol(symbol: &str) -> LogicalInput {
        match symbol.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "power" => LogicalInput::Power,
            "start" => LogicalInput::Start,
            "select" => LogicalInput::Select,
            "menu" => LogicalInput::Menu,
            "confirm" | "a" => LogicalInput::Confirm,
            "cancel" | "b" => LogicalInput::Cancel,
            "up" => LogicalInput::Up,
            "down" => LogicalInput::Down,
            "left" => LogicalInput::Left,
            "right" => LogicalInput::Right,
            "shoulder-left" | "l1" | "l2" | "l3" => LogicalInput::ShoulderLeft,
            "shoulder-right" | "r1" | "r2" | "r3" => LogicalInput::ShoulderRight,
            "x" => LogicalInput::X,
            "y" => LogicalInput::Y,
            _ => LogicalInput::Unknown,
        }
    }

    /// Canonical symbol, as accepted by [`from_symbol`](Self::from_symbol).
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalInput::Power => "power",
            LogicalInput::Start => "start",
            LogicalInput::Select => "select",
            LogicalInput::Menu => "menu",
            LogicalInput::Confirm => "confirm",
            LogicalInput::Cancel => "cancel",
            LogicalInput::Up => "up",
            LogicalInput::Down => "down",
            LogicalInput::Left => "left",
            LogicalInput::Right => "right",
            LogicalInput::ShoulderLeft => "shoulder-left",
            LogicalInput::ShoulderRight => "shoulder-right",
            LogicalInput::X => "x",
            LogicalInput::Y => "y",
            LogicalInput::Unknown => "unknown",
        }
    }
}

impl FromStr for LogicalInput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_symbol(s))
    }
}

impl fmt::Display for LogicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What the caller must do after [`handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State was updated (or nothing needed doing).
    Handled,
    /// The input means nothing on the current page.
    Ignored,
    /// Run this menu action.
    Execute(MenuAction),
}

/// Apply one logical input to `state`.
pub fn handle_input(state: &mut AppState, input: LogicalInput) -> Dispatch {
    log::debug!("input {input} on {:?} page", state.current_page);
    match state.current_page {
        Page::Config => handle_config_page(state, input),
        Page::Menu => handle_menu_page(state, input),
    }
}

fn handle_config_page(state: &mut AppState, input: LogicalInput) -> Dispatch {
    match input {
        LogicalInput::Power | LogicalInput::Cancel => state.should_quit = true,
        LogicalInput::Start | LogicalInput::Select => state.current_page = Page::Menu,
        LogicalInput::Confirm => {
            apply_delta(state, 0);
            state.dirty_hardware = true;
            state.dirty_settings = true;
        }
        LogicalInput::Up => state.selected_field = state.selected_field.offset(-1),
        LogicalInput::Down => state.selected_field = state.selected_field.offset(1),
        LogicalInput::Left => {
            apply_delta(state, -1);
            state.dirty_hardware = true;
        }
        LogicalInput::Right => {
            apply_delta(state, 1);
            state.dirty_hardware = true;
        }
        LogicalInput::ShoulderLeft => {
            state.selected_cluster =
                LedCluster::from_index(state.selected_cluster.index() as i64 - 1);
        }
        LogicalInput::ShoulderRight => {
            state.selected_cluster =
                LedCluster::from_index(state.selected_cluster.index() as i64 + 1);
        }
        LogicalInput::Menu | LogicalInput::X | LogicalInput::Y | LogicalInput::Unknown => {
            return Dispatch::Ignored;
        }
    }
    Dispatch::Handled
}

fn handle_menu_page(state: &mut AppState, input: LogicalInput) -> Dispatch {
    match input {
        LogicalInput::Start | LogicalInput::Select | LogicalInput::Cancel => {
            state.current_page = Page::Config;
        }
        LogicalInput::Confirm => return Dispatch::Execute(state.selected_menu_action),
        LogicalInput::Up => state.selected_menu_action = state.selected_menu_action.offset(-1),
        LogicalInput::Down => state.selected_menu_action = state.selected_menu_action.offset(1),
        _ => return Dispatch::Ignored,
    }
    Dispatch::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ACTION_COUNT, FIELD_COUNT, SettingField};

    // ── parsing ──

    #[test]
    fn parse_canonical_symbols_round_trip() {
        let all = [
            LogicalInput::Power,
            LogicalInput::Start,
            LogicalInput::Select,
            LogicalInput::Menu,
            LogicalInput::Confirm,
            LogicalInput::Cancel,
            LogicalInput::Up,
            LogicalInput::Down,
            LogicalInput::Left,
            LogicalInput::Right,
            LogicalInput::ShoulderLeft,
            LogicalInput::ShoulderRight,
            LogicalInput::X,
            LogicalInput::Y,
        ];
        for input in all {
            assert_eq!(LogicalInput::from_symbol(input.symbol()), input);
        }
    }

    #[test]
    fn parse_button_aliases() {
        assert_eq!("A".parse::<LogicalInput>().unwrap(), LogicalInput::Confirm);
        assert_eq!("b".parse::<LogicalInput>().unwrap(), LogicalInput::Cancel);
        assert_eq!(LogicalInput::from_symbol("L3"), LogicalInput::ShoulderLeft);
        assert_eq!(LogicalInput::from_symbol("r2"), LogicalInput::ShoulderRight);
        assert_eq!(LogicalInput::from_symbol(" shoulder_left\n"), LogicalInput::ShoulderLeft);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(LogicalInput::from_symbol("jump"), LogicalInput::Unknown);
        assert_eq!(LogicalInput::from_symbol(""), LogicalInput::Unknown);
    }

    // ── config page ──

    #[test]
    fn power_and_cancel_quit() {
        for input in [LogicalInput::Power, LogicalInput::Cancel] {
            let mut s = AppState::default();
            assert_eq!(handle_input(&mut s, input), Dispatch::Handled);
            assert!(s.should_quit);
            assert_eq!(s.current_page, Page::Config);
        }
    }

    #[test]
    fn start_and_select_open_menu() {
        for input in [LogicalInput::Start, LogicalInput::Select] {
            let mut s = AppState::default();
            handle_input(&mut s, input);
            assert_eq!(s.current_page, Page::Menu);
        }
    }

    #[test]
    fn up_down_move_field_cursor() {
        let mut s = AppState::default();
        handle_input(&mut s, LogicalInput::Up);
        assert_eq!(s.selected_field, SettingField::SelectedLed);
        handle_input(&mut s, LogicalInput::Up);
        assert_eq!(s.selected_field, SettingField::MatchColors);
        handle_input(&mut s, LogicalInput::Down);
        assert_eq!(s.selected_field, SettingField::SelectedLed);
    }

    #[test]
    fn field_navigation_cycles() {
        let mut s = AppState::default();
        let start = s.selected_field;
        for _ in 0..FIELD_COUNT {
            handle_input(&mut s, LogicalInput::Down);
        }
        assert_eq!(s.selected_field, start);
    }

    #[test]
    fn shoulders_cycle_clusters() {
        let mut s = AppState::default();
        handle_input(&mut s, LogicalInput::ShoulderLeft);
        assert_eq!(s.selected_cluster, LedCluster::Back);
        handle_input(&mut s, LogicalInput::ShoulderRight);
        handle_input(&mut s, LogicalInput::ShoulderRight);
        assert_eq!(s.selected_cluster, LedCluster::Top);
        for _ in 0..LedCluster::ALL.len() {
            handle_input(&mut s, LogicalInput::ShoulderRight);
        }
        assert_eq!(s.selected_cluster, LedCluster::Top);
    }

    #[test]
    fn left_right_mutate_and_mark_hardware_dirty() {
        let mut s = AppState::default();
        handle_input(&mut s, LogicalInput::Right);
        assert_eq!(s.selected().brightness, 60);
        assert!(s.dirty_hardware);
        assert!(!s.dirty_settings);

        s.dirty_hardware = false;
        handle_input(&mut s, LogicalInput::Left);
        assert_eq!(s.selected().brightness, 50);
        assert!(s.dirty_hardware);
    }

    #[test]
    fn confirm_marks_both_dirty() {
        let mut s = AppState::default();
        assert_eq!(handle_input(&mut s, LogicalInput::Confirm), Dispatch::Handled);
        assert!(s.dirty_hardware);
        assert!(s.dirty_settings);
        assert_eq!(s.selected().brightness, 50);
    }

    #[test]
    fn confirm_on_match_colors_broadcasts() {
        let mut s = AppState {
            selected_field: SettingField::MatchColors,
            selected_cluster: LedCluster::Back,
            ..AppState::default()
        };
        s.settings_mut(LedCluster::Back).color = 0x00_FF00;
        handle_input(&mut s, LogicalInput::Confirm);
        for c in LedCluster::ALL {
            assert_eq!(s.settings(c).color, 0x00_FF00);
        }
    }

    #[test]
    fn unmapped_inputs_are_ignored_on_config_page() {
        for input in [
            LogicalInput::Menu,
            LogicalInput::X,
            LogicalInput::Y,
            LogicalInput::Unknown,
        ] {
            let mut s = AppState::default();
            assert_eq!(handle_input(&mut s, input), Dispatch::Ignored);
            assert_eq!(s, AppState::default());
        }
    }

    // ── menu page ──

    fn on_menu() -> AppState {
        AppState {
            current_page: Page::Menu,
            ..AppState::default()
        }
    }

    #[test]
    fn menu_back_inputs_return_to_config() {
        for input in [LogicalInput::Start, LogicalInput::Select, LogicalInput::Cancel] {
            let mut s = on_menu();
            handle_input(&mut s, input);
            assert_eq!(s.current_page, Page::Config);
            assert!(!s.should_quit);
        }
    }

    #[test]
    fn menu_navigation_cycles() {
        let mut s = on_menu();
        handle_input(&mut s, LogicalInput::Up);
        assert_eq!(s.selected_menu_action, MenuAction::Quit);
        for _ in 0..ACTION_COUNT {
            handle_input(&mut s, LogicalInput::Down);
        }
        assert_eq!(s.selected_menu_action, MenuAction::Quit);
    }

    #[test]
    fn menu_confirm_dispatches_selected_action() {
        let mut s = on_menu();
        handle_input(&mut s, LogicalInput::Down);
        handle_input(&mut s, LogicalInput::Down);
        assert_eq!(
            handle_input(&mut s, LogicalInput::Confirm),
            Dispatch::Execute(MenuAction::ToggleExtendedColors)
        );
        // Execution is the caller's job.
        assert!(!s.extended_colors_enabled);
    }

    #[test]
    fn menu_ignores_value_inputs() {
        for input in [
            LogicalInput::Left,
            LogicalInput::Right,
            LogicalInput::Power,
            LogicalInput::ShoulderLeft,
            LogicalInput::Unknown,
        ] {
            let mut s = on_menu();
            assert_eq!(handle_input(&mut s, input), Dispatch::Ignored);
            assert_eq!(s, on_menu());
        }
    }
}
