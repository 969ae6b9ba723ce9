//! Help popup: keybindings, search syntax and view modes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::view_mode::{MODE_OPTIONS, ViewMode};

const KEYS: &[(&str, &str)] = &[
    ("/", "Focus search (typing filters immediately)"),
    ("Enter", "Leave search / open node detail"),
    ("Esc", "Clear search, close popup"),
    ("v", "Next view mode"),
    ("1-5", "Pick view mode"),
    ("g / G", "Next / previous group"),
    ("↑↓ jk", "Move selection (one card row in grids)"),
    ("←→ hl", "Previous / next node"),
    ("PgUp/PgDn", "Page"),
    ("Home/End", "First / last node"),
    ("o", "Fleet monitor"),
    ("Space", "Pause / resume refresh"),
    ("r", "Refresh now"),
    ("?", "Toggle this help"),
    ("q", "Quit (asks first)"),
    ("Ctrl-C", "Quit immediately"),
];

fn mode_description(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Modern => "cards with gauges for CPU, RAM, disk and traffic",
        ViewMode::Compact => "one dense row per node",
        ViewMode::Classic => "small cards with bars",
        ViewMode::Detailed => "table with every reported metric",
        ViewMode::Earth => "nodes grouped by region",
    }
}

fn help_content(current: ViewMode, is_mobile: bool) -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default().fg(Color::Cyan);

    let mut lines = vec![Line::from(Span::styled("Keys", heading))];
    for (k, desc) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<11}", k), key),
            Span::raw(desc.to_string()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Search", heading)));
    lines.push(Line::from(
        "  Matches name, OS, architecture, region (flags, country codes and names),",
    ));
    lines.push(Line::from(
        "  price digits, and the words online/offline (also 在线/离线).",
    ));
    lines.push(Line::from(Span::styled(
        "  Case and surrounding spaces are ignored.",
        dim,
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("View modes", heading)));
    for (i, opt) in MODE_OPTIONS.iter().enumerate() {
        let marker = if opt.mode == current { "▶" } else { " " };
        let available = if !is_mobile || opt.mobile_supported {
            Style::default()
        } else {
            dim
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", marker, i + 1), key),
            Span::styled(format!("{:<9}", opt.mode.label()), available),
            Span::styled(mode_description(opt.mode), dim),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Colours", heading)));
    lines.push(Line::from(vec![
        Span::styled("  ≤50% ", Style::default().fg(Color::Green)),
        Span::styled(" >50% ", Style::default().fg(Color::Blue)),
        Span::styled(" >70% ", Style::default().fg(Color::Yellow)),
        Span::styled(" >90% ", Style::default().fg(Color::Red)),
        Span::styled("  offline", dim),
    ]));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(
    frame: &mut Frame,
    area: Rect,
    current: ViewMode,
    is_mobile: bool,
    scroll: &mut usize,
) {
    // 60% width, 80% height, clamped
    let popup_width = (area.width * 60 / 100).clamp(40, 84).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 36).min(area.height);

    let popup_x = area.x + area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.y + area.height.saturating_sub(popup_height) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_content(current, is_mobile);
    let content_lines = content.len();

    let block = Block::default()
        .title(" nodeboard help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let max_scroll = content_lines.saturating_sub(chunks[0].height as usize);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close, ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}
