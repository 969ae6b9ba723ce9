//! Modern grid: large cards with gauges for CPU, memory, disk and traffic.

use crate::fmt::{FmtStyle, format_load, format_speed, format_uptime};
use crate::model::{LiveData, NodeBasicInfo};

use super::common::{
    CardGridViewModel, NodeCard, RowStyleClass, ViewCell, ViewLine, ViewOptions,
};
use super::metrics::NodeMetrics;
use super::{node_subtitle, presentation_sorted};

const MIN_CARD_WIDTH: u16 = 42;

pub fn render(
    nodes: &[&NodeBasicInfo],
    live: &LiveData,
    options: ViewOptions,
) -> CardGridViewModel {
    let cards: Vec<NodeCard> = presentation_sorted(nodes, live)
        .into_iter()
        .map(|node| card(node, &NodeMetrics::resolve_with(node, live, options)))
        .collect();

    // Border (2) + subtitle + two lines per gauge + text lines + footer.
    let card_height = cards
        .iter()
        .map(|c| 2 + 1 + c.gauges.len() * 2 + c.lines.len() + 1 + usize::from(c.message.is_some()))
        .max()
        .unwrap_or(0) as u16;

    CardGridViewModel {
        title: "Nodes".to_string(),
        min_card_width: MIN_CARD_WIDTH,
        card_height,
        cards,
    }
}

fn card(node: &NodeBasicInfo, m: &NodeMetrics) -> NodeCard {
    let style = FmtStyle::Detail;

    let mut gauges = vec![
        m.cpu_gauge(node),
        m.memory_gauge(node, style),
        m.disk_gauge(node, style),
    ];
    let mut lines = Vec::new();
    match m.traffic_gauge(node, style) {
        Some(g) => gauges.push(g),
        None => lines.push(ViewLine::new("Traffic", ViewCell::plain(m.totals_text(style)))),
    }
    lines.push(ViewLine::new(
        "Speed",
        ViewCell::plain(format!(
            "↑ {}  ↓ {}",
            format_speed(m.record.network.up, style),
            format_speed(m.record.network.down, style)
        )),
    ));

    let footer = if m.online {
        vec![
            ViewCell::plain(format_uptime(m.record.uptime, style)),
            ViewCell::plain(format!("Load: {}", format_load(m.record.load.load1))),
            ViewCell::styled("Active".to_string(), RowStyleClass::Nominal),
        ]
    } else {
        vec![ViewCell::styled("Offline".to_string(), RowStyleClass::Dimmed)]
    };

    NodeCard {
        uuid: node.uuid.clone(),
        title: node.name.clone(),
        subtitle: node_subtitle(node),
        online: m.online,
        status: if m.online {
            m.load_tier().into()
        } else {
            RowStyleClass::Dimmed
        },
        message: m.message().map(str::to_string),
        gauges,
        lines,
        footer,
    }
}
