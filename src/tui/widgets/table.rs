//! Table rendering for the compact and detailed views.
//! Thin TUI wrapper over [`TableViewModel`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Row, Table, TableState};

use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

pub fn render_node_table(
    frame: &mut Frame,
    area: Rect,
    vm: &TableViewModel<String>,
    table_state: &mut TableState,
) {
    let header = Row::new(
        vm.headers
            .iter()
            .map(|h| Span::styled(h.clone(), Styles::table_header())),
    )
    .style(Styles::table_header())
    .height(1);

    let selected = table_state.selected();
    let rows: Vec<Row> = vm
        .rows
        .iter()
        .enumerate()
        .map(|(idx, vr)| {
            let base_style = if Some(idx) == selected {
                Styles::selected()
            } else {
                Styles::from_class(vr.style)
            };
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(base_style).height(1)
        })
        .collect();

    // The last column absorbs the remaining width.
    let mut constraints: Vec<Constraint> = vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    if let Some(last) = constraints.last_mut() {
        *last = Constraint::Min(vm.widths.last().copied().unwrap_or(0));
    }

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", vm.title))
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    frame.render_stateful_widget(table, area, table_state);
}
