//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::navigable::NavigableNodes;
use super::state::{AppState, InputMode, PopupState};
use crate::view_mode::ViewMode;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Fetch a fresh snapshot now, even when paused.
    Refresh,
}

/// Navigation action for unified scroll/selection dispatch.
enum NavAction {
    Up,
    Down,
    Left,
    Right,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

const PAGE: usize = 10;

/// Modifiers that turn `/` into something other than "focus search".
const SEARCH_BLOCKING: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

/// Dispatches a navigation action to the open popup's scroll or the node selection.
fn dispatch_navigation(state: &mut AppState, action: NavAction) {
    match &mut state.popup {
        PopupState::Help { scroll }
        | PopupState::NodeDetail { scroll, .. }
        | PopupState::Fleet { scroll } => match action {
            NavAction::Up | NavAction::Left => *scroll = scroll.saturating_sub(1),
            NavAction::Down | NavAction::Right => *scroll = scroll.saturating_add(1),
            NavAction::PageUp(n) => *scroll = scroll.saturating_sub(n),
            NavAction::PageDown(n) => *scroll = scroll.saturating_add(n),
            NavAction::Home => *scroll = 0,
            NavAction::End => {} // clamped by the renderer
        },
        PopupState::QuitConfirm => {}
        PopupState::None => {
            let len = state.visible_len();
            let nav = &mut state.list;
            match action {
                NavAction::Up => nav.select_up(),
                NavAction::Down => nav.select_down(len),
                NavAction::Left => nav.select_prev(),
                NavAction::Right => nav.select_next(),
                NavAction::PageUp(n) => nav.page_up(n),
                NavAction::PageDown(n) => nav.page_down(n),
                NavAction::Home => nav.home(),
                NavAction::End => nav.end(),
            }
            state.refresh();
        }
    }
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.popup = PopupState::None;
        return KeyAction::Quit;
    }
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    if state.popup.is_open() {
        return handle_popup(state, key);
    }
    state.status_message = None;
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Search => handle_search_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Keys while the help, node detail or fleet popup is open.
fn handle_popup(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let Some(nav) = navigation(key.code) {
        dispatch_navigation(state, nav);
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Esc => state.popup = PopupState::None,
        KeyCode::Char('?') if matches!(state.popup, PopupState::Help { .. }) => {
            state.popup = PopupState::None
        }
        KeyCode::Char('o') | KeyCode::Char('O')
            if matches!(state.popup, PopupState::Fleet { .. }) =>
        {
            state.popup = PopupState::None
        }
        KeyCode::Enter if matches!(state.popup, PopupState::NodeDetail { .. }) => {
            state.popup = PopupState::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
        KeyCode::Char(' ') => toggle_pause(state),
        _ => {}
    }
    KeyAction::None
}

fn navigation(code: KeyCode) -> Option<NavAction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(NavAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(NavAction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(NavAction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(NavAction::Right),
        KeyCode::PageUp => Some(NavAction::PageUp(PAGE)),
        KeyCode::PageDown => Some(NavAction::PageDown(PAGE)),
        KeyCode::Home => Some(NavAction::Home),
        KeyCode::End => Some(NavAction::End),
        _ => None,
    }
}

fn toggle_pause(state: &mut AppState) {
    if state.is_live {
        state.paused = !state.paused;
    }
}

/// Esc behaviour shared by both modes: clear and blur only when there is
/// something to clear.
fn escape_search(state: &mut AppState) {
    if !state.search_input.is_empty() {
        state.clear_search();
        state.input_mode = InputMode::Normal;
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let Some(nav) = navigation(key.code) {
        dispatch_navigation(state, nav);
        return KeyAction::None;
    }
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }

        // Focus search
        KeyCode::Char('/') => {
            if !key.modifiers.intersects(SEARCH_BLOCKING) {
                state.input_mode = InputMode::Search;
            }
            KeyAction::None
        }
        KeyCode::Esc => {
            escape_search(state);
            KeyAction::None
        }

        // View modes
        KeyCode::Char('v') | KeyCode::Char('V') => {
            state.cycle_view_mode();
            KeyAction::None
        }
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10).unwrap_or(0) as usize;
            if let Some(mode) = ViewMode::from_index(n)
                && !state.select_view_mode(mode)
            {
                state.status_message = Some(format!("{} view needs a wider terminal", mode));
            }
            KeyAction::None
        }

        // Groups
        KeyCode::Char('g') => {
            state.cycle_group(true);
            KeyAction::None
        }
        KeyCode::Char('G') => {
            state.cycle_group(false);
            KeyAction::None
        }

        // Popups
        KeyCode::Enter => {
            if let Some(uuid) = state.selected_uuid() {
                state.popup = PopupState::NodeDetail {
                    uuid: uuid.to_string(),
                    scroll: 0,
                };
            }
            KeyAction::None
        }
        KeyCode::Char('o') | KeyCode::Char('O') => {
            state.popup = PopupState::Fleet { scroll: 0 };
            KeyAction::None
        }
        KeyCode::Char('?') => {
            state.popup = PopupState::Help { scroll: 0 };
            KeyAction::None
        }

        // Refresh control
        KeyCode::Char(' ') => {
            toggle_pause(state);
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Refresh,

        _ => KeyAction::None,
    }
}

/// Handles keys while the search input has focus.
fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            escape_search(state);
            KeyAction::None
        }
        KeyCode::Enter => {
            // Term is already applied; just leave the input.
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.search_pop();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.search_push(c);
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
            if let Some(nav) = navigation(key.code) {
                dispatch_navigation(state, nav);
            }
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
