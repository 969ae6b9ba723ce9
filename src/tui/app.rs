//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::provider::DataProvider;
use crate::settings::{SettingsBackend, SettingsStore};
use crate::view::common::ViewOptions;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    provider: Box<dyn DataProvider>,
    settings: SettingsStore<Box<dyn SettingsBackend>>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App with the given provider and preference store.
    ///
    /// `forced_mobile` pins the device context instead of deriving it from
    /// the terminal width.
    pub fn new(
        provider: Box<dyn DataProvider>,
        settings: SettingsStore<Box<dyn SettingsBackend>>,
        forced_mobile: Option<bool>,
    ) -> Self {
        let is_live = provider.is_live();
        let mut state = AppState::new(settings.load(), is_live);
        state.forced_mobile = forced_mobile;
        state.source = provider.describe();
        Self {
            provider,
            settings,
            state,
            should_quit: false,
        }
    }

    /// Applies rendering switches to every view.
    pub fn with_view_options(mut self, options: ViewOptions) -> Self {
        self.state.view_options = options;
        self.state.refresh();
        self
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        info!(
            source = %self.state.source,
            view_mode = self.state.view_mode.as_str(),
            interval_ms = tick_rate.as_millis() as u64,
            "starting dashboard"
        );

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Device context needs the width before the first frame.
        if let Ok(size) = terminal.size() {
            self.state.set_terminal_width(size.width);
        }

        // Initial data fetch
        self.advance();

        // Main loop
        let result = loop {
            if let Err(e) = terminal.draw(|frame| render(frame, &mut self.state)) {
                break Err(e);
            }

            match events.next() {
                Ok(event) => self.handle_event(event),
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("dashboard stopped");
        result
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => {
                if !self.state.paused {
                    self.advance();
                }
            }
            Event::Key(key) => {
                match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Refresh => self.advance(),
                    KeyAction::None => {}
                }
                self.persist_settings();
            }
            Event::Resize(width) => self.state.set_terminal_width(width),
        }
    }

    /// Fetches the next snapshot from the provider.
    fn advance(&mut self) {
        let snapshot = self.provider.advance().cloned();
        self.state.provider_error = self.provider.last_error().map(|e| e.to_string());
        self.state.source = self.provider.describe();
        if let Some(snapshot) = snapshot {
            debug!(
                nodes = snapshot.nodes.len(),
                online = snapshot.live.online_count(),
                "snapshot applied"
            );
            self.state.set_snapshot(snapshot);
        }
    }

    /// Writes preferences back once a key changed them.
    fn persist_settings(&mut self) {
        if !self.state.settings_dirty {
            return;
        }
        self.state.settings_dirty = false;
        if let Err(e) = self.settings.save(&self.state.settings()) {
            warn!(error = %e, "failed to save settings");
            self.state.status_message = Some("Could not save preferences".to_string());
        }
    }
}
