//! Single node detail popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::fmt::{FmtStyle, bar, format_bytes, format_load, format_speed, format_uptime};
use crate::model::{LiveData, NodeBasicInfo};
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;
use crate::view::common::ViewGauge;
use crate::view::metrics::NodeMetrics;

use super::popup::{kv, kv_styled, render_popup_frame, section};

const BAR_WIDTH: usize = 24;

fn gauge_line(g: &ViewGauge) -> Line<'static> {
    let color = Style::default().fg(Styles::tier_color(g.tier));
    Line::from(vec![
        Span::styled(format!("{:>16}: ", g.label), Styles::accent()),
        Span::styled(bar(g.percent, BAR_WIDTH), color),
        Span::styled(format!(" {:>6}", g.value), color),
        Span::styled(format!("  {}", g.note), Styles::dim()),
    ])
}

/// Detail lines for one node.
pub(crate) fn build_content(node: &NodeBasicInfo, live: &LiveData) -> Vec<Line<'static>> {
    let style = FmtStyle::Detail;
    let m = NodeMetrics::resolve(node, live);
    let r = &m.record;
    let mut lines = Vec::new();

    lines.push(section("Node"));
    lines.push(kv("Name", &node.name));
    lines.push(kv("UUID", &node.uuid));
    lines.push(if m.online {
        kv_styled("Status", "online", Styles::from_class(m.load_tier().into()))
    } else {
        kv_styled("Status", "offline", Styles::dim())
    });
    if let Some(msg) = m.message() {
        lines.push(kv_styled("Message", msg, Styles::critical()));
    }
    lines.push(kv("Region", &node.region));
    lines.push(kv("Group", node.group_label().unwrap_or("-")));
    lines.push(kv("OS", format!("{} {}", node.os, node.arch).trim()));
    let cores = node
        .cpu_cores
        .map(|c| format!(" ({} cores)", c))
        .unwrap_or_default();
    lines.push(kv("CPU", &format!("{}{}", node.cpu_name, cores)));
    if node.price != 0.0 {
        lines.push(kv("Price", &node.price_text()));
    }
    lines.push(kv("Weight", &node.weight.to_string()));

    lines.push(Line::from(""));
    lines.push(section("Usage"));
    lines.push(gauge_line(&m.cpu_gauge(node)));
    lines.push(gauge_line(&m.memory_gauge(node, style)));
    lines.push(gauge_line(&m.disk_gauge(node, style)));
    lines.push(kv("Swap", &format_bytes(r.swap.used, style)));
    lines.push(kv(
        "Load",
        &format!(
            "{} {} {}",
            format_load(r.load.load1),
            format_load(r.load.load5),
            format_load(r.load.load15)
        ),
    ));
    lines.push(kv("Processes", &r.process.to_string()));
    lines.push(kv(
        "Connections",
        &format!("TCP {}  UDP {}", r.connections.tcp, r.connections.udp),
    ));
    lines.push(kv(
        "Uptime",
        &if m.online {
            format_uptime(r.uptime, style)
        } else {
            "-".to_string()
        },
    ));

    lines.push(Line::from(""));
    lines.push(section("Network"));
    lines.push(kv(
        "Speed",
        &format!(
            "↑ {}  ↓ {}",
            format_speed(r.network.up, style),
            format_speed(r.network.down, style)
        ),
    ));
    lines.push(kv("Totals", &m.totals_text(style)));
    match m.traffic_gauge(node, style) {
        Some(g) => {
            lines.push(gauge_line(&g));
            if let Some(policy) = node.traffic_limit_type {
                lines.push(kv("Quota policy", policy.label()));
            }
        }
        None => lines.push(kv("Quota", "unlimited")),
    }
    lines
}

pub fn render_node_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let PopupState::NodeDetail { uuid, scroll } = &mut state.popup else {
        return;
    };
    let node = state
        .snapshot
        .as_ref()
        .and_then(|s| s.nodes.iter().find(|n| n.uuid == *uuid).map(|n| (n, &s.live)));

    let (title, content) = match node {
        Some((node, live)) => (node.name.clone(), build_content(node, live)),
        None => (
            uuid.clone(),
            vec![Line::from(Span::styled(
                "Node is no longer in the roster",
                Styles::dim(),
            ))],
        ),
    };
    render_popup_frame(frame, area, &title, content, scroll, "Esc");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn detail_shows_status_message_and_quota() {
        let node = NodeBasicInfo {
            uuid: "n1".into(),
            name: "tokyo-1".into(),
            group: "prod".into(),
            ..NodeBasicInfo::default()
        };
        let mut live = LiveData::default();
        let mut r = Record::default();
        r.message = "disk full".into();
        live.data.insert("n1".into(), r);
        live.online.insert("n1".into());

        let out = text(&build_content(&node, &live));
        assert!(out.contains("online"));
        assert!(out.contains("disk full"));
        assert!(out.contains("prod"));
        assert!(out.contains("unlimited"));
        assert!(!out.contains("Price"));
    }
}
