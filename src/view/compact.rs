//! Compact list: one row per node.

use crate::fmt::{FmtStyle, format_percent, format_speed, format_uptime, truncate};
use crate::model::{LiveData, NodeBasicInfo};

use super::common::{RowStyleClass, TableViewModel, ViewCell, ViewOptions, ViewRow};
use super::metrics::NodeMetrics;
use super::presentation_sorted;

const HEADERS: &[&str] = &[
    "", "NAME", "REGION", "CPU", "RAM", "DISK", "NET ↑/↓", "TRAFFIC", "UPTIME",
];
const WIDTHS: &[u16] = &[1, 20, 12, 6, 6, 6, 18, 18, 8];

pub fn render(
    nodes: &[&NodeBasicInfo],
    live: &LiveData,
    options: ViewOptions,
) -> TableViewModel<String> {
    let rows = presentation_sorted(nodes, live)
        .into_iter()
        .map(|node| row(node, &NodeMetrics::resolve_with(node, live, options)))
        .collect();

    TableViewModel {
        title: "Nodes".to_string(),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        widths: WIDTHS.to_vec(),
        rows,
    }
}

fn row(node: &NodeBasicInfo, m: &NodeMetrics) -> ViewRow<String> {
    let style = FmtStyle::Compact;
    let status = if m.online {
        ViewCell::styled("●".to_string(), RowStyleClass::Nominal)
    } else {
        ViewCell::styled("○".to_string(), RowStyleClass::Dimmed)
    };
    let uptime = if m.online {
        format_uptime(m.record.uptime, style)
    } else {
        "offline".to_string()
    };

    ViewRow {
        id: node.uuid.clone(),
        cells: vec![
            status,
            ViewCell::styled(truncate(&node.name, 20), RowStyleClass::Accent),
            ViewCell::plain(truncate(&node.region, 12)),
            ViewCell::styled(format_percent(m.cpu_percent), m.cpu_tier().into()),
            ViewCell::styled(format_percent(m.memory_percent), m.memory_tier().into()),
            ViewCell::styled(format_percent(m.disk_percent), m.disk_tier().into()),
            ViewCell::plain(format!(
                "{}/{}",
                format_speed(m.record.network.up, style),
                format_speed(m.record.network.down, style)
            )),
            m.traffic_cell(node, style),
            ViewCell::plain(uptime),
        ],
        style: if m.online {
            RowStyleClass::Normal
        } else {
            RowStyleClass::Dimmed
        },
    }
}
