//! Header widget showing time, refresh state, data source and status.

use chrono::{DateTime, Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(9),  // LIVE / PAUSED
        Constraint::Min(10),    // Source
        Constraint::Percentage(45),
    ])
    .split(area);

    // Time of the snapshot on screen
    let timestamp = state
        .snapshot
        .as_ref()
        .map(|s| s.timestamp)
        .unwrap_or_else(|| Local::now().timestamp());
    let time_str = Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt: DateTime<Local>| dt.format(" %Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ----".to_string());
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let mode_str = if !state.is_live {
        " STATIC "
    } else if state.paused {
        " PAUSED "
    } else {
        " LIVE "
    };
    frame.render_widget(Paragraph::new(mode_str).style(Styles::header()), chunks[1]);

    let device = if state.is_mobile() { " [mobile]" } else { "" };
    let source = format!("{}{}", state.source, device);
    frame.render_widget(Paragraph::new(source).style(Styles::header()), chunks[2]);

    // Status message wins over the provider error.
    let (right, style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::warning().bg(Theme::HEADER_BG))
    } else if let Some(err) = &state.provider_error {
        (format!("! {}", err), Styles::critical().bg(Theme::HEADER_BG))
    } else {
        (String::new(), Styles::header())
    };
    frame.render_widget(Paragraph::new(right).style(style), chunks[3]);
}
