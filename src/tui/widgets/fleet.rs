//! Fleet monitor popup: aggregate usage over every node in the roster.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::fmt::{FmtStyle, bar, format_bytes, format_speed};
use crate::shell::{FleetBucket, FleetStats};
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;
use crate::view::common::UsageTier;

use super::popup::{kv, kv_styled, render_popup_frame, section};

fn usage_line(label: &str, used: u64, total: u64) -> Line<'static> {
    let pct = if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    };
    let color = Style::default().fg(Styles::tier_color(UsageTier::from_percent(pct)));
    Line::from(vec![
        Span::styled(format!("{:>16}: ", label), Styles::accent()),
        Span::styled(bar(pct, 20), color),
        Span::styled(format!(" {:>5.1}%", pct), color),
        Span::styled(
            format!(
                "  {} / {}",
                format_bytes(used, FmtStyle::Detail),
                format_bytes(total, FmtStyle::Detail)
            ),
            Styles::dim(),
        ),
    ])
}

fn bucket_line(b: &FleetBucket) -> Line<'static> {
    let style = if b.online == 0 {
        Styles::dim()
    } else {
        Style::default()
    };
    kv_styled(&b.label, &format!("{}/{} online", b.online, b.total), style)
}

pub(crate) fn build_content(stats: &FleetStats) -> Vec<Line<'static>> {
    let style = FmtStyle::Detail;
    let mut lines = vec![section("Fleet")];
    lines.push(kv("Nodes", &stats.total.to_string()));
    lines.push(kv_styled(
        "Online",
        &stats.online.to_string(),
        Styles::from_class(UsageTier::Nominal.into()),
    ));
    lines.push(kv_styled(
        "Offline",
        &stats.offline().to_string(),
        if stats.offline() > 0 {
            Styles::critical()
        } else {
            Styles::dim()
        },
    ));
    if stats.with_message > 0 {
        lines.push(kv_styled(
            "Agent errors",
            &stats.with_message.to_string(),
            Styles::warning(),
        ));
    }

    lines.push(Line::from(""));
    lines.push(section("Usage (online nodes)"));
    lines.push(kv_styled(
        "Avg CPU",
        &format!("{:.1}%", stats.avg_cpu),
        Style::default().fg(Styles::tier_color(UsageTier::from_percent(stats.avg_cpu))),
    ));
    lines.push(usage_line("RAM", stats.mem_used, stats.mem_total));
    lines.push(usage_line("Disk", stats.disk_used, stats.disk_total));
    lines.push(kv(
        "Speed",
        &format!(
            "↑ {}  ↓ {}",
            format_speed(stats.net_up, style),
            format_speed(stats.net_down, style)
        ),
    ));
    lines.push(kv(
        "Traffic",
        &format!(
            "↑ {}  ↓ {}",
            format_bytes(stats.traffic_up, style),
            format_bytes(stats.traffic_down, style)
        ),
    ));

    if !stats.regions.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Regions"));
        lines.extend(stats.regions.iter().map(bucket_line));
    }
    if !stats.groups.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Groups"));
        lines.extend(stats.groups.iter().map(bucket_line));
    }
    lines
}

pub fn render_fleet(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let PopupState::Fleet { scroll } = &mut state.popup else {
        return;
    };
    let stats = state
        .snapshot
        .as_ref()
        .map(|s| FleetStats::compute(&s.nodes, &s.live))
        .unwrap_or_default();
    render_popup_frame(
        frame,
        area,
        "Fleet monitor",
        build_content(&stats),
        scroll,
        "o/Esc",
    );
}
