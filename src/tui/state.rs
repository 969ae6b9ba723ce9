//! Application state management.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::engine::SelectionMemo;
use crate::model::Snapshot;
use crate::settings::Settings;
use crate::shell::{self, EmptyState, Summary};
use crate::view::common::ViewOptions;
use crate::view::{ViewModel, render_view};
use crate::view_mode::ViewMode;

use super::navigable::NavigableNodes;

/// Terminals narrower than this count as mobile.
pub const MOBILE_WIDTH: u16 = 80;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes edit the search term.
    Search,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
    /// Single node detail, keyed by uuid.
    NodeDetail { uuid: String, scroll: usize },
    /// Aggregate fleet monitor.
    Fleet { scroll: usize },
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Selection over the rendered node list.
#[derive(Debug, Default)]
pub struct NodeListState {
    /// Selected position in view order.
    pub selected: usize,
    /// Node to keep selected across refreshes and re-sorts.
    pub tracked_uuid: Option<String>,
    /// Cards per row of the last rendered grid.
    pub columns: usize,
    /// Ratatui table state for table views (enables auto-scrolling).
    pub ratatui_state: RatatuiTableState,
}

impl NodeListState {
    /// Re-anchors the selection on the tracked node, or clamps it by position
    /// when the node disappeared.
    pub fn resolve_selection(&mut self, ids: &[&str]) {
        if let Some(tracked) = &self.tracked_uuid {
            if let Some(idx) = ids.iter().position(|id| id == tracked) {
                self.selected = idx;
            } else {
                self.tracked_uuid = None;
            }
        }

        if !ids.is_empty() {
            self.selected = self.selected.min(ids.len() - 1);
            self.tracked_uuid = Some(ids[self.selected].to_string());
        } else {
            self.selected = 0;
            self.tracked_uuid = None;
        }

        self.ratatui_state.select(Some(self.selected));
    }
}

impl NavigableNodes for NodeListState {
    fn selected(&self) -> usize {
        self.selected
    }
    fn selected_mut(&mut self) -> &mut usize {
        &mut self.selected
    }
    fn clear_tracked(&mut self) {
        self.tracked_uuid = None;
    }
    fn columns(&self) -> usize {
        self.columns
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Current snapshot.
    pub snapshot: Option<Snapshot>,
    /// Input mode.
    pub input_mode: InputMode,
    /// Search term as typed.
    pub search_input: String,
    /// Preferred view mode; the displayed one may differ on mobile.
    pub view_mode: ViewMode,
    /// Selected group as persisted, possibly stale.
    pub selected_group: String,
    /// Distinct groups of the current roster.
    pub groups: Vec<String>,
    memo: SelectionMemo,
    /// View model built from the last refresh.
    pub view: Option<ViewModel>,
    pub summary: Summary,
    pub empty: Option<EmptyState>,
    pub list: NodeListState,
    /// Paused state (ticks do not fetch).
    pub paused: bool,
    /// Is live mode.
    pub is_live: bool,
    /// `Some` when the device context was forced from the command line.
    pub forced_mobile: Option<bool>,
    /// Terminal width, 0 until known.
    pub terminal_width: u16,
    /// Active popup state. Only one popup can be open at a time.
    pub popup: PopupState,
    /// Temporary status message shown in the header.
    pub status_message: Option<String>,
    /// Error from the most recent provider fetch.
    pub provider_error: Option<String>,
    /// Data source description for the header.
    pub source: String,
    /// View mode or group changed since the last save.
    pub settings_dirty: bool,
    /// Switches passed to every view builder.
    pub view_options: ViewOptions,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default(), true)
    }
}

impl AppState {
    pub fn new(settings: Settings, is_live: bool) -> Self {
        Self {
            snapshot: None,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            view_mode: settings.view_mode,
            selected_group: settings.selected_group,
            groups: Vec::new(),
            memo: SelectionMemo::new(),
            view: None,
            summary: Summary::default(),
            empty: None,
            list: NodeListState::default(),
            paused: false,
            is_live,
            forced_mobile: None,
            terminal_width: 0,
            popup: PopupState::None,
            status_message: None,
            provider_error: None,
            source: String::new(),
            settings_dirty: false,
            view_options: ViewOptions::default(),
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.forced_mobile
            .unwrap_or(self.terminal_width > 0 && self.terminal_width < MOBILE_WIDTH)
    }

    /// View mode actually rendered on this device.
    pub fn display_mode(&self) -> ViewMode {
        ViewMode::current_or_first(self.view_mode, self.is_mobile())
    }

    /// Group actually applied to the roster.
    pub fn active_group(&self) -> &str {
        shell::effective_group(&self.selected_group, &self.groups)
    }

    /// Preferences to persist.
    pub fn settings(&self) -> Settings {
        Settings {
            view_mode: self.view_mode,
            selected_group: self.selected_group.clone(),
        }
    }

    pub fn selected_uuid(&self) -> Option<&str> {
        self.list.tracked_uuid.as_deref()
    }

    /// Number of rendered nodes.
    pub fn visible_len(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.len())
    }

    /// Number of times the selection pipeline actually ran.
    pub fn selection_recomputes(&self) -> u64 {
        self.memo.recomputes()
    }

    /// Replaces the snapshot wholesale.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.groups = shell::groups(&snapshot.nodes);
        self.snapshot = Some(snapshot);
        self.refresh();
    }

    pub fn set_terminal_width(&mut self, width: u16) {
        if self.terminal_width != width {
            self.terminal_width = width;
            self.refresh();
        }
    }

    /// Advances to the next view mode usable on this device.
    pub fn cycle_view_mode(&mut self) {
        self.view_mode = ViewMode::next(self.view_mode, self.is_mobile());
        self.settings_dirty = true;
        self.refresh();
    }

    /// Switches to `mode` if this device supports it.
    pub fn select_view_mode(&mut self, mode: ViewMode) -> bool {
        if !mode.is_eligible(self.is_mobile()) {
            return false;
        }
        if self.view_mode != mode {
            self.view_mode = mode;
            self.settings_dirty = true;
            self.refresh();
        }
        true
    }

    /// Moves to the next (or previous) group chip.
    pub fn cycle_group(&mut self, forward: bool) {
        if !shell::show_group_selector(&self.groups) {
            return;
        }
        self.selected_group = shell::cycle_group(self.active_group(), &self.groups, forward);
        self.settings_dirty = true;
        self.refresh();
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        self.refresh();
    }

    pub fn search_pop(&mut self) {
        if self.search_input.pop().is_some() {
            self.refresh();
        }
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.refresh();
    }

    /// Re-runs the pipeline (memoized) and rebuilds the view model.
    pub fn refresh(&mut self) {
        let mode = self.display_mode();
        let Some(snap) = &self.snapshot else {
            self.view = None;
            self.empty = None;
            return;
        };

        let group = shell::effective_group(&self.selected_group, &self.groups);
        self.memo
            .get(&snap.nodes, &snap.live, &self.search_input, group);
        let filtered = self.memo.resolve(&snap.nodes);

        self.summary = Summary::compute(
            &snap.nodes,
            &filtered,
            &snap.live,
            &self.search_input,
            group,
        );
        self.empty = EmptyState::detect(filtered.len(), &self.search_input);

        let view = render_view(mode, &filtered, &snap.live, self.view_options);
        // Card grids set their column count when drawn; lists step one node.
        if !matches!(view, ViewModel::Modern(_) | ViewModel::Classic(_)) {
            self.list.columns = 1;
        }
        self.list.resolve_selection(&view.ids());
        self.view = Some(view);
    }
}
