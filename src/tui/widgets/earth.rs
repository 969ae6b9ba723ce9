//! Region overview for the earth view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::style::Styles;
use crate::view::common::RowStyleClass;
use crate::view::earth::EarthViewModel;

/// Builds the region listing; returns the lines and the line index of the
/// selected marker.
fn build_lines(vm: &EarthViewModel, selected: usize) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut idx = 0;

    for region in &vm.regions {
        let flag = if region.flag.is_empty() {
            String::new()
        } else {
            format!("{} ", region.flag)
        };
        let counts_style = if region.online == 0 {
            Styles::dim()
        } else {
            Styles::from_class(RowStyleClass::Nominal)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", flag, region.name), Styles::section_header()),
            Span::styled(format!("  {}/{} online", region.online, region.total), counts_style),
        ]));

        for marker in &region.markers {
            let style = Styles::from_class(marker.style());
            let symbol = if marker.online { "●" } else { "○" };
            let name_style = if idx == selected {
                selected_line = lines.len();
                Styles::selected()
            } else {
                Styles::default()
            };
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(format!("{} ", symbol), style),
                Span::styled(marker.name.clone(), name_style),
            ]));
            idx += 1;
        }
        lines.push(Line::from(""));
    }
    (lines, selected_line)
}

pub fn render_earth(frame: &mut Frame, area: Rect, vm: &EarthViewModel, selected: usize) {
    let block = Block::default()
        .title(format!(
            " Regions: {}  ({}/{} online) ",
            vm.regions.len(),
            vm.online,
            vm.total
        ))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner_height = block.inner(area).height as usize;

    let (lines, selected_line) = build_lines(vm, selected);
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LiveData, NodeBasicInfo};
    use crate::view::earth;

    #[test]
    fn selected_marker_maps_to_its_line() {
        let nodes: Vec<NodeBasicInfo> = [("a", "🇺🇸"), ("b", "🇯🇵"), ("c", "🇯🇵")]
            .iter()
            .enumerate()
            .map(|(i, (uuid, region))| NodeBasicInfo {
                uuid: uuid.to_string(),
                name: uuid.to_string(),
                region: region.to_string(),
                weight: i as i64,
                ..NodeBasicInfo::default()
            })
            .collect();
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let vm = earth::render(&refs, &LiveData::default());

        // US header, a, blank, JP header, b, c, blank
        let (lines, line) = build_lines(&vm, 2);
        assert_eq!(lines.len(), 7);
        assert_eq!(line, 5);
    }
}
