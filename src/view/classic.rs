//! Classic grid: small cards, bars only, one network line.

use crate::fmt::{FmtStyle, format_speed, format_uptime};
use crate::model::{LiveData, NodeBasicInfo};

use super::common::{CardGridViewModel, NodeCard, RowStyleClass, ViewCell, ViewGauge, ViewLine};
use super::metrics::NodeMetrics;
use super::presentation_sorted;
use crate::region::region_display_name;

const MIN_CARD_WIDTH: u16 = 30;
// Border, subtitle, three bars, network line, footer.
const CARD_HEIGHT: u16 = 2 + 1 + 3 + 1 + 1;

pub fn render(nodes: &[&NodeBasicInfo], live: &LiveData) -> CardGridViewModel {
    CardGridViewModel {
        title: "Nodes".to_string(),
        min_card_width: MIN_CARD_WIDTH,
        card_height: CARD_HEIGHT,
        cards: presentation_sorted(nodes, live)
            .into_iter()
            .map(|node| card(node, &NodeMetrics::resolve(node, live)))
            .collect(),
    }
}

/// Gauge without the secondary note; classic bars are one line each.
fn bare(mut gauge: ViewGauge) -> ViewGauge {
    gauge.note.clear();
    gauge
}

fn card(node: &NodeBasicInfo, m: &NodeMetrics) -> NodeCard {
    let style = FmtStyle::Compact;
    let net = format!(
        "↑{} ↓{}",
        format_speed(m.record.network.up, style),
        format_speed(m.record.network.down, style)
    );

    NodeCard {
        uuid: node.uuid.clone(),
        title: node.name.clone(),
        subtitle: region_display_name(&node.region),
        online: m.online,
        status: if m.online {
            RowStyleClass::Nominal
        } else {
            RowStyleClass::Dimmed
        },
        message: None,
        gauges: vec![
            bare(m.cpu_gauge(node)),
            bare(m.memory_gauge(node, style)),
            bare(m.disk_gauge(node, style)),
        ],
        lines: vec![ViewLine::new("Net", ViewCell::plain(net))],
        footer: vec![if m.online {
            ViewCell::plain(format_uptime(m.record.uptime, style))
        } else {
            ViewCell::styled("Offline".to_string(), RowStyleClass::Dimmed)
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn cards_are_compact_and_uniform() {
        let nodes = [
            NodeBasicInfo {
                uuid: "a".into(),
                name: "alpha".into(),
                region: "🇸🇬".into(),
                mem_total: 100,
                ..NodeBasicInfo::default()
            },
            NodeBasicInfo {
                uuid: "b".into(),
                name: "beta".into(),
                ..NodeBasicInfo::default()
            },
        ];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let mut live = LiveData::default();
        let mut r = Record::default();
        r.ram.used = 80;
        r.network.up = 2048;
        r.uptime = 3700;
        live.data.insert("a".into(), r);
        live.online.insert("a".into());

        let vm = render(&refs, &live);
        assert_eq!(vm.card_height, 8);
        let a = &vm.cards[0];
        assert_eq!(a.subtitle, "Singapore");
        assert!(a.gauges.iter().all(|g| g.note.is_empty()));
        assert_eq!(a.gauges[1].tier, crate::view::common::UsageTier::Warning);
        assert_eq!(a.lines[0].value.text, "↑2.0K/s ↓0B/s");
        assert_eq!(a.footer[0].text, "1h1m");

        assert_eq!(vm.cards[1].footer[0].text, "Offline");
    }
}
