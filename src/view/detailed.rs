//! Detailed table: every value the telemetry carries.

use crate::fmt::{FmtStyle, format_bytes, format_load, format_percent, format_speed, format_uptime};
use crate::model::{LiveData, NodeBasicInfo};

use super::common::{RowStyleClass, TableViewModel, ViewCell, ViewOptions, ViewRow};
use super::metrics::NodeMetrics;
use super::presentation_sorted;

const HEADERS: &[&str] = &[
    "", "NAME", "REGION", "OS/ARCH", "CORES", "CPU", "LOAD", "RAM", "SWAP", "DISK", "NET ↑",
    "NET ↓", "TCP/UDP", "PROC", "TRAFFIC", "UPTIME",
];
const WIDTHS: &[u16] = &[1, 16, 10, 16, 5, 6, 16, 14, 7, 14, 9, 9, 9, 5, 18, 8];

pub fn render(
    nodes: &[&NodeBasicInfo],
    live: &LiveData,
    options: ViewOptions,
) -> TableViewModel<String> {
    TableViewModel {
        title: "Nodes (detailed)".to_string(),
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        widths: WIDTHS.to_vec(),
        rows: presentation_sorted(nodes, live)
            .into_iter()
            .map(|node| row(node, &NodeMetrics::resolve_with(node, live, options)))
            .collect(),
    }
}

fn row(node: &NodeBasicInfo, m: &NodeMetrics) -> ViewRow<String> {
    let style = FmtStyle::Compact;
    let r = &m.record;
    let dash = || "-".to_string();

    let cells = vec![
        if m.online {
            ViewCell::styled("●".to_string(), RowStyleClass::Nominal)
        } else {
            ViewCell::styled("○".to_string(), RowStyleClass::Dimmed)
        },
        ViewCell::styled(node.name.clone(), RowStyleClass::Accent),
        ViewCell::plain(node.region.clone()),
        ViewCell::plain(format!("{} {}", node.os, node.arch).trim().to_string()),
        ViewCell::plain(node.cpu_cores.map(|c| c.to_string()).unwrap_or_else(dash)),
        ViewCell::styled(format_percent(m.cpu_percent), m.cpu_tier().into()),
        ViewCell::plain(format!(
            "{} {} {}",
            format_load(r.load.load1),
            format_load(r.load.load5),
            format_load(r.load.load15)
        )),
        ViewCell::styled(
            format!(
                "{}/{}",
                format_bytes(r.ram.used, style),
                format_bytes(node.mem_total, style)
            ),
            m.memory_tier().into(),
        ),
        ViewCell::plain(format_bytes(r.swap.used, style)),
        ViewCell::styled(
            format!(
                "{}/{}",
                format_bytes(r.disk.used, style),
                format_bytes(node.disk_total, style)
            ),
            m.disk_tier().into(),
        ),
        ViewCell::plain(format_speed(r.network.up, style)),
        ViewCell::plain(format_speed(r.network.down, style)),
        ViewCell::plain(format!("{}/{}", r.connections.tcp, r.connections.udp)),
        ViewCell::plain(r.process.to_string()),
        m.traffic_cell(node, style),
        ViewCell::plain(if m.online {
            format_uptime(r.uptime, style)
        } else {
            "offline".to_string()
        }),
    ];

    ViewRow {
        id: node.uuid.clone(),
        cells,
        style: if m.online {
            RowStyleClass::Normal
        } else {
            RowStyleClass::Dimmed
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::traffic::TrafficLimitType;

    #[test]
    fn detailed_row_carries_every_metric() {
        let nodes = [NodeBasicInfo {
            uuid: "d".into(),
            name: "delta".into(),
            os: "Alpine".into(),
            arch: "arm64".into(),
            cpu_cores: Some(2),
            mem_total: 1024,
            disk_total: 2048,
            traffic_limit: 1024,
            traffic_limit_type: Some(TrafficLimitType::Up),
            ..NodeBasicInfo::default()
        }];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let mut live = LiveData::default();
        let mut r = Record::default();
        r.load.load1 = 0.5;
        r.load.load5 = 0.25;
        r.load.load15 = 0.1;
        r.connections.tcp = 12;
        r.connections.udp = 3;
        r.process = 87;
        r.network.total_up = 512;
        live.data.insert("d".into(), r);
        live.online.insert("d".into());

        let vm = render(&refs, &live, ViewOptions::default());
        assert_eq!(vm.headers.len(), vm.widths.len());
        let cells: Vec<&str> = vm.rows[0].cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[3], "Alpine arm64");
        assert_eq!(cells[4], "2");
        assert_eq!(cells[6], "0.50 0.25 0.10");
        assert_eq!(cells[7], "0B/1.0K");
        assert_eq!(cells[12], "12/3");
        assert_eq!(cells[13], "87");
        assert_eq!(cells[14], "512B/1.0K 50%");
    }

    #[test]
    fn missing_cores_render_as_dash() {
        let nodes = [NodeBasicInfo {
            uuid: "x".into(),
            ..NodeBasicInfo::default()
        }];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let vm = render(&refs, &LiveData::default(), ViewOptions::default());
        assert_eq!(vm.rows[0].cells[4].text, "-");
        assert_eq!(vm.rows[0].cells[15].text, "offline");
    }
}
