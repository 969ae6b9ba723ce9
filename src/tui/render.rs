//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::view::ViewModel;

use super::state::{AppState, PopupState};
use super::style::Styles;
use super::widgets::{
    render_card_grid, render_earth, render_fleet, render_header, render_help, render_node_detail,
    render_node_table, render_quit_confirm, render_toolbar,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(2), // Search, modes, groups, summary
        Constraint::Min(3),    // Node list
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_toolbar(frame, chunks[1], state);
    render_content(frame, chunks[2], state);

    // Popups are rendered last to overlay everything. The enum is resolved
    // first so the popup renderers can take `state` mutably.
    enum ActivePopup {
        None,
        Help,
        NodeDetail,
        Fleet,
        QuitConfirm,
    }
    let active = match &state.popup {
        PopupState::None => ActivePopup::None,
        PopupState::Help { .. } => ActivePopup::Help,
        PopupState::NodeDetail { .. } => ActivePopup::NodeDetail,
        PopupState::Fleet { .. } if state.snapshot.is_some() => ActivePopup::Fleet,
        PopupState::QuitConfirm => ActivePopup::QuitConfirm,
        _ => ActivePopup::None,
    };
    match active {
        ActivePopup::Help => {
            let mode = state.display_mode();
            let mobile = state.is_mobile();
            if let PopupState::Help { ref mut scroll } = state.popup {
                render_help(frame, area, mode, mobile, scroll);
            }
        }
        ActivePopup::NodeDetail => render_node_detail(frame, area, state),
        ActivePopup::Fleet => render_fleet(frame, area, state),
        ActivePopup::QuitConfirm => render_quit_confirm(frame, area),
        ActivePopup::None => {}
    }
}

/// Renders the node list in the active view mode, or a placeholder.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    if state.snapshot.is_none() {
        let text = match &state.provider_error {
            Some(err) => Line::from(Span::styled(format!("! {}", err), Styles::critical())),
            None => Line::from(Span::styled("Loading…", Styles::dim())),
        };
        render_placeholder(frame, area, vec![text]);
        return;
    }

    if let Some(empty) = state.empty {
        let mut lines = vec![Line::from(Span::styled(
            empty.title(),
            Styles::section_header(),
        ))];
        if let Some(hint) = empty.hint() {
            lines.push(Line::from(Span::styled(hint, Styles::dim())));
        }
        render_placeholder(frame, area, lines);
        return;
    }

    match &state.view {
        Some(ViewModel::Modern(grid)) | Some(ViewModel::Classic(grid)) => {
            render_card_grid(frame, area, grid, &mut state.list)
        }
        Some(ViewModel::Compact(table)) | Some(ViewModel::Detailed(table)) => {
            render_node_table(frame, area, table, &mut state.list.ratatui_state)
        }
        Some(ViewModel::Earth(earth)) => render_earth(frame, area, earth, state.list.selected),
        None => render_placeholder(frame, area, Vec::new()),
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically centered.
    let top = inner.height.saturating_sub(lines.len() as u16) / 2;
    let rect = Rect::new(
        inner.x,
        inner.y + top,
        inner.width,
        inner.height.saturating_sub(top),
    );
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LiveData, NodeBasicInfo, Record, Snapshot};
    use crate::view_mode::ViewMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn snapshot() -> Snapshot {
        let nodes: Vec<NodeBasicInfo> = ["tokyo-1", "paris-1", "ohio-1"]
            .iter()
            .enumerate()
            .map(|(i, name)| NodeBasicInfo {
                uuid: format!("n{}", i),
                name: name.to_string(),
                region: ["🇯🇵", "🇫🇷", "🇺🇸"][i].to_string(),
                mem_total: 4 << 30,
                disk_total: 40 << 30,
                group: if i == 0 { "prod".into() } else { String::new() },
                ..NodeBasicInfo::default()
            })
            .collect();
        let mut live = LiveData::default();
        for n in &nodes[..2] {
            let mut r = Record::default();
            r.cpu.usage = 42.0;
            r.ram.used = 1 << 30;
            live.data.insert(n.uuid.clone(), r);
            live.online.insert(n.uuid.clone());
        }
        Snapshot::new(0, nodes, live)
    }

    fn draw(state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn every_view_mode_renders() {
        let mut state = AppState::default();
        state.set_terminal_width(120);
        state.set_snapshot(snapshot());
        for mode in ViewMode::ALL {
            assert!(state.select_view_mode(mode));
            let screen = draw(&mut state, 120, 40);
            assert!(screen.contains("tokyo-1"), "{:?} lost the node name", mode);
        }
    }

    #[test]
    fn placeholders_before_data_and_on_no_match() {
        let mut state = AppState::default();
        assert!(draw(&mut state, 80, 20).contains("Loading"));

        state.provider_error = Some("I/O error: nodes.json".into());
        assert!(draw(&mut state, 80, 20).contains("nodes.json"));

        state.set_snapshot(snapshot());
        for c in "nowhere".chars() {
            state.search_push(c);
        }
        assert!(draw(&mut state, 80, 20).contains("No matching nodes"));
    }

    #[test]
    fn popups_render_over_the_list() {
        let mut state = AppState::default();
        state.set_snapshot(snapshot());

        state.popup = PopupState::Help { scroll: 0 };
        assert!(draw(&mut state, 100, 40).contains("nodeboard help"));

        state.popup = PopupState::NodeDetail {
            uuid: "n1".into(),
            scroll: 0,
        };
        assert!(draw(&mut state, 100, 40).contains("paris-1"));

        state.popup = PopupState::Fleet { scroll: 0 };
        assert!(draw(&mut state, 100, 40).contains("Fleet monitor"));

        state.popup = PopupState::QuitConfirm;
        assert!(draw(&mut state, 100, 40).contains("Exit nodeboard"));
    }

    #[test]
    fn list_views_step_one_node_after_a_wide_grid() {
        use crate::tui::input::handle_key;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        let nodes = (0..6)
            .map(|i| NodeBasicInfo {
                uuid: format!("n{}", i),
                name: format!("node-{}", i),
                weight: i,
                ..NodeBasicInfo::default()
            })
            .collect();

        let mut state = AppState::default();
        state.set_terminal_width(200);
        state.set_snapshot(Snapshot::new(0, nodes, LiveData::default()));
        draw(&mut state, 200, 40);
        assert!(state.list.columns > 1);

        for mode in [ViewMode::Compact, ViewMode::Detailed, ViewMode::Earth] {
            assert!(state.select_view_mode(mode));
            handle_key(&mut state, home);
            handle_key(&mut state, down);
            assert_eq!(state.selected_uuid(), Some("n1"), "{:?}", mode);
            draw(&mut state, 200, 40);
        }

        // Back on the grid, Down moves a whole card row again.
        assert!(state.select_view_mode(ViewMode::Modern));
        draw(&mut state, 200, 40);
        handle_key(&mut state, home);
        handle_key(&mut state, down);
        let columns = state.list.columns;
        assert_eq!(state.selected_uuid(), Some(format!("n{}", columns).as_str()));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut state = AppState::default();
        state.set_snapshot(snapshot());
        state.popup = PopupState::Help { scroll: 99 };
        draw(&mut state, 10, 4);
        state.popup = PopupState::QuitConfirm;
        draw(&mut state, 10, 4);
    }
}
