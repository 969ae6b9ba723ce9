//! Card grid rendering for the modern and classic views.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{bar, truncate};
use crate::tui::state::NodeListState;
use crate::tui::style::Styles;
use crate::view::common::{CardGridViewModel, NodeCard, ViewCell, ViewGauge};

/// Width of the label column inside a card.
const LABEL_WIDTH: usize = 8;

/// Number of card columns that fit into `width`.
pub fn grid_columns(width: u16, min_card_width: u16) -> usize {
    (width / min_card_width.max(1)).max(1) as usize
}

pub fn render_card_grid(
    frame: &mut Frame,
    area: Rect,
    vm: &CardGridViewModel,
    list: &mut NodeListState,
) {
    let block = Block::default()
        .title(format!(" {} ", vm.title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 || vm.cards.is_empty() {
        return;
    }

    let columns = grid_columns(inner.width, vm.min_card_width);
    list.columns = columns;
    let card_width = inner.width / columns as u16;
    let card_height = vm.card_height.clamp(3, inner.height.max(3));
    let visible_rows = ((inner.height / card_height) as usize).max(1);

    // Scroll just far enough to keep the selected card's row on screen.
    let selected_row = list.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (idx, card) in vm.cards.iter().enumerate().skip(first_row * columns) {
        let row = idx / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = idx % columns;
        let rect = Rect::new(
            inner.x + col as u16 * card_width,
            inner.y + row as u16 * card_height,
            card_width,
            card_height.min(inner.height.saturating_sub(row as u16 * card_height)),
        );
        render_card(frame, rect, card, idx == list.selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &NodeCard, selected: bool) {
    let status = Styles::from_class(card.status);
    let border = if selected {
        Styles::accent().add_modifier(Modifier::BOLD)
    } else {
        status
    };
    let marker = if card.online { "●" } else { "○" };
    let title_width = (area.width as usize).saturating_sub(6);
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {} ", marker), status),
            Span::styled(
                format!("{} ", truncate(&card.title, title_width)),
                if selected {
                    Styles::selected()
                } else {
                    Styles::default().add_modifier(Modifier::BOLD)
                },
            ),
        ]))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines = vec![Line::from(Span::styled(
        truncate(&card.subtitle, width),
        Styles::dim(),
    ))];
    if let Some(msg) = &card.message {
        lines.push(Line::from(Span::styled(
            truncate(msg, width),
            Styles::critical(),
        )));
    }
    for gauge in &card.gauges {
        gauge_lines(&mut lines, gauge, width);
    }
    for line in &card.lines {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<w$}", line.label, w = LABEL_WIDTH), Styles::dim()),
            cell_span(&line.value),
        ]));
    }
    lines.push(footer_line(&card.footer));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Label, bar and value on one line; the note, when present, below it.
fn gauge_lines(lines: &mut Vec<Line<'static>>, gauge: &ViewGauge, width: usize) {
    let color = Style::default().fg(Styles::tier_color(gauge.tier));
    let bar_width = width.saturating_sub(LABEL_WIDTH + gauge.value.chars().count() + 1);
    lines.push(Line::from(vec![
        Span::styled(format!("{:<w$}", gauge.label, w = LABEL_WIDTH), Styles::dim()),
        Span::styled(bar(gauge.percent, bar_width), color),
        Span::raw(" "),
        Span::styled(gauge.value.clone(), color),
    ]));
    if !gauge.note.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{:w$}{}", "", gauge.note, w = LABEL_WIDTH),
            Styles::dim(),
        )));
    }
}

fn cell_span(cell: &ViewCell) -> Span<'static> {
    match cell.style {
        Some(s) => Span::styled(cell.text.clone(), Styles::from_class(s)),
        None => Span::raw(cell.text.clone()),
    }
}

fn footer_line(cells: &[ViewCell]) -> Line<'static> {
    let mut spans = Vec::with_capacity(cells.len() * 2);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Styles::dim()));
        }
        spans.push(cell_span(cell));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_the_width() {
        assert_eq!(grid_columns(200, 42), 4);
        assert_eq!(grid_columns(41, 42), 1);
        assert_eq!(grid_columns(0, 0), 1);
    }
}
