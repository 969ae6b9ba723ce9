//! Control bar: search input, view mode tabs, group chips and the summary line.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::shell;
use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;
use crate::view_mode::ViewMode;

/// Renders the two toolbar rows.
pub fn render_toolbar(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Row 1: search | modes
    let top = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let search = match state.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(" Search: ", Styles::accent()),
            Span::styled(format!("{}█", state.search_input), Styles::filter_input()),
        ]),
        InputMode::Normal if !state.search_input.is_empty() => Line::from(vec![
            Span::styled(" Search: ", Styles::dim()),
            Span::raw(state.search_input.clone()),
            Span::styled("  (Esc clears)", Styles::dim()),
        ]),
        InputMode::Normal => Line::from(Span::styled(" / search", Styles::dim())),
    };
    frame.render_widget(Paragraph::new(search), top[0]);

    let is_mobile = state.is_mobile();
    let active = state.display_mode();
    let modes: Vec<Span> = ViewMode::ALL
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_eligible(is_mobile))
        .flat_map(|(i, mode)| {
            let style = if *mode == active {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![
                Span::styled(format!(" {}:", i + 1), Styles::dim()),
                Span::styled(format!("{} ", mode.label()), style),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(modes)).alignment(Alignment::Right),
        top[1],
    );

    // Row 2: group chips | summary
    let bottom = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    if shell::show_group_selector(&state.groups) {
        let current = state.active_group();
        let mut chips = vec![Span::styled(" g ", Styles::help_key())];
        for chip in shell::group_chips(&state.groups) {
            let style = if chip == current {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            chips.push(Span::styled(format!(" {} ", chip), style));
            chips.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)), bottom[0]);
    }

    if state.snapshot.is_some() {
        let summary = Paragraph::new(format!("{} ", state.summary.text()))
            .style(Styles::dim())
            .alignment(Alignment::Right);
        frame.render_widget(summary, bottom[1]);
    }
}
