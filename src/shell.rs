//! Dashboard composition around the node view: group chips, the result
//! summary line and the empty-state message.

use std::collections::BTreeSet;

use crate::engine::{ALL_GROUPS, normalize_term};
use crate::model::{LiveData, NodeBasicInfo};

/// Sorted distinct non-blank group labels.
pub fn groups(nodes: &[NodeBasicInfo]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| n.group_label())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The group selector is shown once at least one group exists.
pub fn show_group_selector(groups: &[String]) -> bool {
    !groups.is_empty()
}

/// Chip labels in selector order: `"all"` first, then the groups.
pub fn group_chips(groups: &[String]) -> Vec<&str> {
    std::iter::once(ALL_GROUPS)
        .chain(groups.iter().map(String::as_str))
        .collect()
}

/// Group actually applied: a persisted group that no longer exists shows as
/// `"all"`.
pub fn effective_group<'a>(selected: &'a str, groups: &[String]) -> &'a str {
    if selected == ALL_GROUPS || groups.iter().any(|g| g == selected) {
        selected
    } else {
        ALL_GROUPS
    }
}

/// Next (or previous) chip after `current`, wrapping.
pub fn cycle_group(current: &str, groups: &[String], forward: bool) -> String {
    let chips = group_chips(groups);
    let pos = chips.iter().position(|c| *c == current).unwrap_or(0);
    let len = chips.len();
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    chips[next].to_string()
}

/// Counts behind the summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// All nodes in the roster.
    pub total: usize,
    /// Size of the telemetry online set.
    pub online: usize,
    /// Nodes in the selected group (or all nodes).
    pub total_in_scope: usize,
    /// Nodes the pipeline returned.
    pub filtered: usize,
    /// Online nodes among the filtered ones.
    pub online_in_filtered: usize,
    pub searching: bool,
    pub group: String,
}

impl Summary {
    pub fn compute(
        nodes: &[NodeBasicInfo],
        filtered: &[&NodeBasicInfo],
        live: &LiveData,
        search_term: &str,
        group: &str,
    ) -> Self {
        let total_in_scope = if group == ALL_GROUPS {
            nodes.len()
        } else {
            nodes.iter().filter(|n| n.group == group).count()
        };
        Self {
            total: nodes.len(),
            online: live.online_count(),
            total_in_scope,
            filtered: filtered.len(),
            online_in_filtered: filtered.iter().filter(|n| live.is_online(&n.uuid)).count(),
            searching: !normalize_term(search_term).is_empty(),
            group: group.to_string(),
        }
    }

    pub fn text(&self) -> String {
        if self.searching {
            format!(
                "Found {} nodes, {} total",
                self.filtered, self.total_in_scope
            )
        } else if self.group == ALL_GROUPS {
            format!("{} nodes, {} online", self.total, self.online)
        } else {
            format!(
                "{}: {} nodes, {} online",
                self.group, self.filtered, self.online_in_filtered
            )
        }
    }
}

/// What to show instead of the view when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoNodes,
    NoMatches,
}

impl EmptyState {
    /// `None` when there is something to render.
    pub fn detect(filtered_len: usize, search_term: &str) -> Option<Self> {
        if filtered_len > 0 {
            None
        } else if normalize_term(search_term).is_empty() {
            Some(EmptyState::NoNodes)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoNodes => "No node data",
            EmptyState::NoMatches => "No matching nodes",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            EmptyState::NoNodes => None,
            EmptyState::NoMatches => Some("Try a different search term"),
        }
    }
}

/// One row of the fleet breakdown (a region or a group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetBucket {
    pub label: String,
    pub online: usize,
    pub total: usize,
}

/// Aggregate telemetry behind the fleet monitor popup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetStats {
    pub total: usize,
    pub online: usize,
    /// Mean CPU usage over online nodes.
    pub avg_cpu: f64,
    pub mem_used: u64,
    pub mem_total: u64,
    pub disk_used: u64,
    pub disk_total: u64,
    /// Instantaneous, bytes/s.
    pub net_up: u64,
    pub net_down: u64,
    /// Cumulative, bytes.
    pub traffic_up: u64,
    pub traffic_down: u64,
    /// Online nodes reporting an agent error.
    pub with_message: usize,
    pub regions: Vec<FleetBucket>,
    pub groups: Vec<FleetBucket>,
}

impl FleetStats {
    /// Totals over `nodes`. Capacity figures count every node; usage only
    /// online ones.
    pub fn compute(nodes: &[NodeBasicInfo], live: &LiveData) -> Self {
        let mut stats = FleetStats {
            total: nodes.len(),
            ..FleetStats::default()
        };
        let mut cpu_sum = 0.0;
        for node in nodes {
            stats.mem_total += node.mem_total;
            stats.disk_total += node.disk_total;
            let online = live.is_online(&node.uuid);

            let region = node.region.trim();
            bump(
                &mut stats.regions,
                if region.is_empty() { "Unknown" } else { region },
                online,
            );
            bump(
                &mut stats.groups,
                node.group_label().unwrap_or("ungrouped"),
                online,
            );

            if !online {
                continue;
            }
            stats.online += 1;
            let Some(r) = live.record(&node.uuid) else {
                continue;
            };
            cpu_sum += r.cpu.usage;
            stats.mem_used += r.ram.used;
            stats.disk_used += r.disk.used;
            stats.net_up += r.network.up;
            stats.net_down += r.network.down;
            stats.traffic_up += r.network.total_up;
            stats.traffic_down += r.network.total_down;
            if !r.message.is_empty() {
                stats.with_message += 1;
            }
        }
        if stats.online > 0 {
            stats.avg_cpu = cpu_sum / stats.online as f64;
        }
        stats.regions.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
        stats.groups.sort_by(|a, b| a.label.cmp(&b.label));
        stats
    }

    pub fn offline(&self) -> usize {
        self.total - self.online
    }
}

fn bump(buckets: &mut Vec<FleetBucket>, label: &str, online: bool) {
    let idx = match buckets.iter().position(|b| b.label == label) {
        Some(idx) => idx,
        None => {
            buckets.push(FleetBucket {
                label: label.to_string(),
                online: 0,
                total: 0,
            });
            buckets.len() - 1
        }
    };
    buckets[idx].total += 1;
    if online {
        buckets[idx].online += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::select;

    fn node(uuid: &str, group: &str) -> NodeBasicInfo {
        NodeBasicInfo {
            uuid: uuid.into(),
            name: uuid.into(),
            group: group.into(),
            ..NodeBasicInfo::default()
        }
    }

    fn roster() -> (Vec<NodeBasicInfo>, LiveData) {
        let nodes = vec![
            node("web1", "prod"),
            node("web2", "prod"),
            node("db1", "db"),
            node("lab", " "),
            node("misc", ""),
        ];
        let mut live = LiveData::default();
        live.online.insert("web1".into());
        live.online.insert("db1".into());
        (nodes, live)
    }

    #[test]
    fn groups_are_sorted_distinct_and_non_blank() {
        let (nodes, _) = roster();
        let g = groups(&nodes);
        assert_eq!(g, vec!["db", "prod"]);
        assert!(show_group_selector(&g));
        assert_eq!(group_chips(&g), vec!["all", "db", "prod"]);
        assert!(!show_group_selector(&groups(&[node("x", "")])));
    }

    #[test]
    fn group_cycling_wraps_both_ways() {
        let g = vec!["db".to_string(), "prod".to_string()];
        assert_eq!(cycle_group("all", &g, true), "db");
        assert_eq!(cycle_group("prod", &g, true), "all");
        assert_eq!(cycle_group("all", &g, false), "prod");
        assert_eq!(cycle_group("gone", &g, true), "db");
        assert_eq!(cycle_group("all", &[], true), "all");
    }

    #[test]
    fn stale_group_falls_back_to_all() {
        let g = vec!["prod".to_string()];
        assert_eq!(effective_group("prod", &g), "prod");
        assert_eq!(effective_group("staging", &g), "all");
    }

    #[test]
    fn summary_texts() {
        let (nodes, live) = roster();

        let filtered = select(&nodes, &live, "", ALL_GROUPS);
        let s = Summary::compute(&nodes, &filtered, &live, "", ALL_GROUPS);
        assert_eq!(s.text(), "5 nodes, 2 online");

        let filtered = select(&nodes, &live, "", "prod");
        let s = Summary::compute(&nodes, &filtered, &live, "", "prod");
        assert_eq!(s.text(), "prod: 2 nodes, 1 online");

        let filtered = select(&nodes, &live, "web", "prod");
        let s = Summary::compute(&nodes, &filtered, &live, "web", "prod");
        assert_eq!(s.text(), "Found 2 nodes, 2 total");

        let filtered = select(&nodes, &live, "db", ALL_GROUPS);
        let s = Summary::compute(&nodes, &filtered, &live, " db ", ALL_GROUPS);
        assert_eq!(s.text(), "Found 1 nodes, 5 total");
    }

    #[test]
    fn fleet_stats_sum_online_usage_and_all_capacity() {
        let (mut nodes, mut live) = roster();
        nodes[0].region = "🇯🇵 Tokyo".into();
        nodes[2].region = "🇯🇵 Tokyo".into();
        for n in &mut nodes {
            n.mem_total = 100;
        }
        let mut r = crate::model::Record::default();
        r.cpu.usage = 40.0;
        r.ram.used = 30;
        r.network.up = 5;
        live.data.insert("web1".into(), r.clone());
        r.cpu.usage = 20.0;
        r.message = "disk full".into();
        live.data.insert("db1".into(), r.clone());
        // Offline nodes do not contribute usage.
        live.data.insert("web2".into(), r);

        let f = FleetStats::compute(&nodes, &live);
        assert_eq!((f.total, f.online, f.offline()), (5, 2, 3));
        assert_eq!(f.avg_cpu, 30.0);
        assert_eq!((f.mem_used, f.mem_total), (60, 500));
        assert_eq!(f.net_up, 10);
        assert_eq!(f.with_message, 1);
        assert_eq!(
            f.regions[0],
            FleetBucket {
                label: "Unknown".into(),
                online: 0,
                total: 3
            }
        );
        assert_eq!((f.regions[1].online, f.regions[1].total), (2, 2));
        let groups: Vec<&str> = f.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(groups, vec!["db", "prod", "ungrouped"]);
    }

    #[test]
    fn fleet_stats_of_empty_roster() {
        let f = FleetStats::compute(&[], &LiveData::default());
        assert_eq!(f.total, 0);
        assert_eq!(f.avg_cpu, 0.0);
        assert!(f.regions.is_empty());
    }

    #[test]
    fn empty_state_distinguishes_no_data_from_no_match() {
        assert_eq!(EmptyState::detect(3, "x"), None);
        assert_eq!(EmptyState::detect(0, ""), Some(EmptyState::NoNodes));
        assert_eq!(EmptyState::detect(0, "   "), Some(EmptyState::NoNodes));
        let miss = EmptyState::detect(0, "zzz").unwrap();
        assert_eq!(miss.title(), "No matching nodes");
        assert_eq!(miss.hint(), Some("Try a different search term"));
        assert_eq!(EmptyState::NoNodes.title(), "No node data");
    }
}
