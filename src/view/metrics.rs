//! Per-node derived metrics shared by every view variant.

use crate::fmt::{FmtStyle, format_bytes};
use crate::model::{LiveData, NodeBasicInfo, Record};
use crate::traffic::{TrafficStats, get_traffic_stats};

use super::common::{UsageTier, ViewCell, ViewGauge, ViewOptions};

/// Everything a renderer needs for one node, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMetrics {
    pub online: bool,
    /// Telemetry, or the all-zero record when none arrived.
    pub record: Record,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub traffic: TrafficStats,
    /// True when the node has a quota and a policy to measure it with.
    pub has_quota: bool,
    /// Show cumulative totals even when a quota exists.
    pub force_traffic_text: bool,
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

impl NodeMetrics {
    pub fn resolve(node: &NodeBasicInfo, live: &LiveData) -> Self {
        let record = live.record_or_default(&node.uuid);
        let traffic = get_traffic_stats(
            record.network.total_up,
            record.network.total_down,
            node.traffic_limit,
            node.traffic_limit_type,
        );
        Self {
            online: live.is_online(&node.uuid),
            cpu_percent: record.cpu.usage,
            memory_percent: percent_of(record.ram.used, node.mem_total),
            disk_percent: percent_of(record.disk.used, node.disk_total),
            traffic,
            has_quota: node.has_traffic_quota(),
            force_traffic_text: false,
            record,
        }
    }

    pub fn resolve_with(node: &NodeBasicInfo, live: &LiveData, options: ViewOptions) -> Self {
        Self {
            force_traffic_text: options.force_traffic_text,
            ..Self::resolve(node, live)
        }
    }

    /// Quota usage is rendered instead of cumulative totals.
    pub fn shows_quota(&self) -> bool {
        self.has_quota && !self.force_traffic_text
    }

    pub fn cpu_tier(&self) -> UsageTier {
        UsageTier::from_percent(self.cpu_percent)
    }

    pub fn memory_tier(&self) -> UsageTier {
        UsageTier::from_percent(self.memory_percent)
    }

    pub fn disk_tier(&self) -> UsageTier {
        UsageTier::from_percent(self.disk_percent)
    }

    pub fn traffic_tier(&self) -> UsageTier {
        UsageTier::from_percent(self.traffic.percentage)
    }

    /// Worst of CPU and memory; drives card status colouring.
    ///
    /// Status has three levels only: anything up to 70% is nominal.
    pub fn load_tier(&self) -> UsageTier {
        match self.cpu_tier().max(self.memory_tier()) {
            UsageTier::Info => UsageTier::Nominal,
            tier => tier,
        }
    }

    /// Agent-reported error, trimmed. `None` when healthy.
    pub fn message(&self) -> Option<&str> {
        let m = self.record.message.trim();
        if m.is_empty() { None } else { Some(m) }
    }

    pub fn cpu_gauge(&self, node: &NodeBasicInfo) -> ViewGauge {
        let note = node
            .cpu_cores
            .map(|c| format!("{} cores", c))
            .unwrap_or_default();
        ViewGauge::new(
            "CPU",
            self.cpu_percent,
            format!("{:.1}%", self.cpu_percent),
            note,
        )
    }

    pub fn memory_gauge(&self, node: &NodeBasicInfo, style: FmtStyle) -> ViewGauge {
        ViewGauge::new(
            "RAM",
            self.memory_percent,
            format!("{:.1}%", self.memory_percent),
            format!(
                "{} / {}",
                format_bytes(self.record.ram.used, style),
                format_bytes(node.mem_total, style)
            ),
        )
    }

    pub fn disk_gauge(&self, node: &NodeBasicInfo, style: FmtStyle) -> ViewGauge {
        ViewGauge::new(
            "Disk",
            self.disk_percent,
            format!("{:.1}%", self.disk_percent),
            format!(
                "{} / {}",
                format_bytes(self.record.disk.used, style),
                format_bytes(node.disk_total, style)
            ),
        )
    }

    /// Traffic quota gauge; `None` when the node has no quota or totals are
    /// forced.
    pub fn traffic_gauge(&self, node: &NodeBasicInfo, style: FmtStyle) -> Option<ViewGauge> {
        if !self.shows_quota() {
            return None;
        }
        Some(ViewGauge::new(
            "Traffic",
            self.traffic.percentage,
            format!("{:.1}%", self.traffic.percentage),
            format!(
                "{} / {}",
                format_bytes(self.traffic.usage, style),
                format_bytes(node.traffic_limit, style)
            ),
        ))
    }

    /// Cumulative totals: `↑1.2G ↓3.4G` (compact) or `↑ 1.2 GiB ↓ 3.4 GiB`.
    pub fn totals_text(&self, style: FmtStyle) -> String {
        let sep = match style {
            FmtStyle::Compact => "",
            FmtStyle::Detail => " ",
        };
        format!(
            "↑{sep}{} ↓{sep}{}",
            format_bytes(self.record.network.total_up, style),
            format_bytes(self.record.network.total_down, style)
        )
    }

    /// Traffic cell: quota usage when a quota exists, totals otherwise.
    pub fn traffic_cell(&self, node: &NodeBasicInfo, style: FmtStyle) -> ViewCell {
        if self.shows_quota() {
            ViewCell::styled(
                format!(
                    "{}/{} {:.0}%",
                    format_bytes(self.traffic.usage, FmtStyle::Compact),
                    format_bytes(node.traffic_limit, FmtStyle::Compact),
                    self.traffic.percentage
                ),
                self.traffic_tier().into(),
            )
        } else {
            ViewCell::plain(self.totals_text(style))
        }
    }
}
