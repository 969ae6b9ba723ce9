//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::{RowStyleClass, UsageTier};

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Usage tiers
    pub const TIER_NOMINAL: Color = Color::Green;
    pub const TIER_INFO: Color = Color::Blue;
    pub const TIER_WARNING: Color = Color::Yellow;
    pub const TIER_CRITICAL: Color = Color::Red;

    // Tab / chip colors
    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::DarkGray;

    pub const ACCENT: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row / card style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning text (yellow).
    pub fn warning() -> Style {
        Style::default().fg(Theme::TIER_WARNING)
    }

    /// Critical value style (red).
    pub fn critical() -> Style {
        Style::default()
            .fg(Theme::TIER_CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Active tab / chip style.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Inactive tab / chip style.
    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn accent() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Search input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Section header style for popups.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Foreground color for a usage tier.
    pub fn tier_color(tier: UsageTier) -> Color {
        match tier {
            UsageTier::Nominal => Theme::TIER_NOMINAL,
            UsageTier::Info => Theme::TIER_INFO,
            UsageTier::Warning => Theme::TIER_WARNING,
            UsageTier::Critical => Theme::TIER_CRITICAL,
        }
    }

    /// Maps a UI-agnostic [`RowStyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Self::default(),
            RowStyleClass::Nominal => Style::default().fg(Theme::TIER_NOMINAL),
            RowStyleClass::Info => Style::default().fg(Theme::TIER_INFO),
            RowStyleClass::Warning => Self::warning(),
            RowStyleClass::Critical => Self::critical(),
            RowStyleClass::Dimmed => Self::dim(),
            RowStyleClass::Accent => Self::accent(),
        }
    }
}
