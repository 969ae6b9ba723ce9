//! Node filter/sort pipeline.
//!
//! `select` is a pure function of the roster, the telemetry snapshot, the
//! search term and the selected group. [`SelectionMemo`] caches its output
//! keyed by value fingerprints so re-renders with unchanged inputs are free.

use std::cmp::Ordering;

use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

use crate::model::{LiveData, NodeBasicInfo};
use crate::region::is_region_match;

/// Sentinel group value meaning "no group filter".
pub const ALL_GROUPS: &str = "all";

const ONLINE_KEYWORDS: &[&str] = &["online", "在线"];
const OFFLINE_KEYWORDS: &[&str] = &["offline", "离线"];

/// Stage 1: keeps nodes whose group equals `selected_group` exactly.
/// `"all"` passes everything through in input order.
pub fn filter_by_group<'a>(nodes: &'a [NodeBasicInfo], selected_group: &str) -> Vec<&'a NodeBasicInfo> {
    nodes.iter().filter(|n| in_group(n, selected_group)).collect()
}

/// Stage 1 predicate: exact, case-sensitive group match.
pub fn in_group(node: &NodeBasicInfo, selected_group: &str) -> bool {
    selected_group == ALL_GROUPS || node.group == selected_group
}

/// Normalized search term: trimmed and lowercased. Empty means "no search".
pub fn normalize_term(search_term: &str) -> String {
    search_term.trim().to_lowercase()
}

/// Stage 2 predicate. `term` must already be normalized and non-empty.
pub fn matches_search(node: &NodeBasicInfo, live: &LiveData, term: &str) -> bool {
    let basic = node.name.to_lowercase().contains(term)
        || node.os.to_lowercase().contains(term)
        || node.arch.to_lowercase().contains(term);
    if basic {
        return true;
    }

    if is_region_match(&node.region, term) {
        return true;
    }

    // Numeric terms match the price text by substring: "9" matches 19.99.
    if term.parse::<f64>().is_ok_and(f64::is_finite) && node.price_text().contains(term) {
        return true;
    }

    let online = live.is_online(&node.uuid);
    (online && ONLINE_KEYWORDS.contains(&term)) || (!online && OFFLINE_KEYWORDS.contains(&term))
}

/// Presentation order: online before offline, then weight ascending.
pub fn presentation_order(a: &NodeBasicInfo, b: &NodeBasicInfo, live: &LiveData) -> Ordering {
    let a_online = live.is_online(&a.uuid);
    let b_online = live.is_online(&b.uuid);
    b_online
        .cmp(&a_online)
        .then_with(|| a.weight.cmp(&b.weight))
}

/// Stable sort by [`presentation_order`]; equal keys keep their input order.
pub fn sort_nodes(nodes: &mut [&NodeBasicInfo], live: &LiveData) {
    nodes.sort_by(|a, b| presentation_order(a, b, live));
}

/// Full pipeline: group filter, text filter, stable presentation sort.
pub fn select<'a>(
    nodes: &'a [NodeBasicInfo],
    live: &LiveData,
    search_term: &str,
    selected_group: &str,
) -> Vec<&'a NodeBasicInfo> {
    select_indices(nodes, live, search_term, selected_group)
        .into_iter()
        .map(|i| &nodes[i])
        .collect()
}

/// [`select`] expressed as indices into `nodes`.
pub fn select_indices(
    nodes: &[NodeBasicInfo],
    live: &LiveData,
    search_term: &str,
    selected_group: &str,
) -> Vec<usize> {
    let term = normalize_term(search_term);
    let mut indices: Vec<usize> = (0..nodes.len())
        .filter(|&i| in_group(&nodes[i], selected_group))
        .filter(|&i| term.is_empty() || matches_search(&nodes[i], live, &term))
        .collect();
    indices.sort_by(|&a, &b| presentation_order(&nodes[a], &nodes[b], live));
    indices
}

/// Fingerprint of every roster field the pipeline reads.
pub fn nodes_fingerprint(nodes: &[NodeBasicInfo]) -> u64 {
    let mut h = Xxh3::new();
    h.update(&(nodes.len() as u64).to_le_bytes());
    for n in nodes {
        for field in [&n.uuid, &n.name, &n.os, &n.arch, &n.region, &n.group] {
            h.update(field.as_bytes());
            h.update(&[0]);
        }
        h.update(&n.weight.to_le_bytes());
        h.update(&n.price.to_bits().to_le_bytes());
    }
    h.digest()
}

/// Fingerprint of a telemetry snapshot: the online set plus each record's
/// `updated_at`. Independent of hash-map iteration order.
pub fn live_fingerprint(live: &LiveData) -> u64 {
    let mut online: Vec<&str> = live.online.iter().map(String::as_str).collect();
    online.sort_unstable();
    let mut records: Vec<(&str, &str)> = live
        .data
        .iter()
        .map(|(uuid, r)| (uuid.as_str(), r.updated_at.as_str()))
        .collect();
    records.sort_unstable();

    let mut h = Xxh3::new();
    for uuid in online {
        h.update(uuid.as_bytes());
        h.update(&[0]);
    }
    h.update(&[0xff]);
    for (uuid, updated_at) in records {
        h.update(uuid.as_bytes());
        h.update(&[0]);
        h.update(updated_at.as_bytes());
        h.update(&[0]);
    }
    h.digest()
}

/// Composite memo key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKey {
    pub nodes: u64,
    pub live: u64,
    pub term: String,
    pub group: String,
}

impl SelectionKey {
    pub fn new(nodes: &[NodeBasicInfo], live: &LiveData, search_term: &str, group: &str) -> Self {
        Self {
            nodes: nodes_fingerprint(nodes),
            live: live_fingerprint(live),
            term: normalize_term(search_term),
            group: group.to_string(),
        }
    }
}

/// Last-result cache for [`select`].
///
/// Stores indices into the roster; valid because the key covers the roster
/// fingerprint.
#[derive(Debug, Default)]
pub struct SelectionMemo {
    key: Option<SelectionKey>,
    indices: Vec<usize>,
    recomputes: u64,
}

impl SelectionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected roster indices, recomputing only on key change.
    pub fn get(
        &mut self,
        nodes: &[NodeBasicInfo],
        live: &LiveData,
        search_term: &str,
        selected_group: &str,
    ) -> &[usize] {
        let key = SelectionKey::new(nodes, live, search_term, selected_group);
        if self.key.as_ref() != Some(&key) {
            self.indices = select_indices(nodes, live, search_term, selected_group);
            self.recomputes += 1;
            debug!(
                nodes = nodes.len(),
                selected = self.indices.len(),
                term = %key.term,
                group = %key.group,
                "node selection recomputed"
            );
            self.key = Some(key);
        }
        &self.indices
    }

    /// Resolves cached indices against the roster they were computed for.
    pub fn resolve<'a>(&self, nodes: &'a [NodeBasicInfo]) -> Vec<&'a NodeBasicInfo> {
        self.indices.iter().filter_map(|&i| nodes.get(i)).collect()
    }

    /// Number of recomputations so far.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn node(uuid: &str, weight: i64) -> NodeBasicInfo {
        NodeBasicInfo {
            uuid: uuid.to_string(),
            name: uuid.to_string(),
            weight,
            ..NodeBasicInfo::default()
        }
    }

    fn live_with(online: &[&str]) -> LiveData {
        LiveData {
            online: online.iter().map(|s| s.to_string()).collect(),
            ..LiveData::default()
        }
    }

    fn uuids(nodes: &[&NodeBasicInfo]) -> Vec<String> {
        nodes.iter().map(|n| n.uuid.clone()).collect()
    }

    #[test]
    fn group_filter_is_exact_subset_in_order() {
        let mut nodes = vec![node("a", 0), node("b", 0), node("c", 0), node("d", 0)];
        nodes[0].group = "prod".into();
        nodes[1].group = "Prod".into();
        nodes[2].group = "prod".into();

        assert_eq!(uuids(&filter_by_group(&nodes, "prod")), vec!["a", "c"]);
        assert_eq!(uuids(&filter_by_group(&nodes, ALL_GROUPS)), vec!["a", "b", "c", "d"]);
        assert!(filter_by_group(&nodes, "staging").is_empty());
    }

    #[test]
    fn select_matches_groups_case_sensitively() {
        let mut nodes = vec![node("a", 0), node("b", 0), node("c", 0)];
        nodes[0].group = "prod".into();
        nodes[1].group = "Prod".into();
        let live = LiveData::default();

        let picked = |group: &str| -> Vec<String> {
            select(&nodes, &live, "", group)
                .into_iter()
                .map(|n| n.uuid.clone())
                .collect()
        };
        assert_eq!(picked("prod"), vec!["a"]);
        assert_eq!(picked("Prod"), vec!["b"]);
        assert_eq!(picked(ALL_GROUPS).len(), 3);
        for group in ["prod", "Prod", ALL_GROUPS] {
            assert_eq!(picked(group), uuids(&filter_by_group(&nodes, group)));
        }
    }

    #[test]
    fn empty_term_filters_nothing() {
        let nodes = vec![node("a", 2), node("b", 1)];
        let live = LiveData::default();
        assert_eq!(select(&nodes, &live, "", ALL_GROUPS).len(), 2);
        assert_eq!(select(&nodes, &live, "   ", ALL_GROUPS).len(), 2);
    }

    #[test]
    fn term_is_trimmed_and_case_folded() {
        let mut nodes = vec![node("a", 0), node("b", 0)];
        nodes[0].os = "Ubuntu 22.04".into();
        let live = live_with(&["b"]);

        assert_eq!(
            select(&nodes, &live, "  ONLINE  ", ALL_GROUPS),
            select(&nodes, &live, "online", ALL_GROUPS)
        );
        assert_eq!(uuids(&select(&nodes, &live, "UBUNTU", ALL_GROUPS)), vec!["a"]);
    }

    #[test]
    fn status_keywords_match_exactly() {
        let nodes = vec![node("up", 0), node("down", 0)];
        let live = live_with(&["up"]);

        assert_eq!(uuids(&select(&nodes, &live, "online", ALL_GROUPS)), vec!["up"]);
        assert_eq!(uuids(&select(&nodes, &live, "在线", ALL_GROUPS)), vec!["up"]);
        assert_eq!(uuids(&select(&nodes, &live, "offline", ALL_GROUPS)), vec!["down"]);
        assert_eq!(uuids(&select(&nodes, &live, "离线", ALL_GROUPS)), vec!["down"]);
        assert!(select(&nodes, &live, "onlin", ALL_GROUPS).is_empty());
    }

    #[test]
    fn numeric_term_matches_price_substring() {
        let mut nodes = vec![node("x", 0), node("y", 0)];
        nodes[0].price = 19.99;
        nodes[1].price = 5.0;
        let live = LiveData::default();

        assert_eq!(uuids(&select(&nodes, &live, "9", ALL_GROUPS)), vec!["x"]);
        assert_eq!(uuids(&select(&nodes, &live, "5", ALL_GROUPS)), vec!["y"]);
        assert!(select(&nodes, &live, "inf", ALL_GROUPS).is_empty());
    }

    #[test]
    fn region_aliases_match() {
        let mut nodes = vec![node("n1", 0), node("n2", 0)];
        nodes[0].region = "🇯🇵".into();
        nodes[1].region = "🇩🇪 Frankfurt".into();
        let live = LiveData::default();

        assert_eq!(uuids(&select(&nodes, &live, "Japan", ALL_GROUPS)), vec!["n1"]);
        assert_eq!(uuids(&select(&nodes, &live, "de", ALL_GROUPS)), vec!["n2"]);
    }

    #[test]
    fn online_nodes_come_first_then_weight() {
        let mut a = node("a", 1);
        a.region = "us".into();
        let mut b = node("b", 0);
        b.region = "eu".into();
        let nodes = vec![a, b];

        let live = live_with(&["b"]);
        assert_eq!(uuids(&select(&nodes, &live, "", ALL_GROUPS)), vec!["b", "a"]);

        let live = live_with(&["a"]);
        assert_eq!(uuids(&select(&nodes, &live, "", ALL_GROUPS)), vec!["a", "b"]);

        let live = live_with(&["a", "b"]);
        assert_eq!(uuids(&select(&nodes, &live, "", ALL_GROUPS)), vec!["b", "a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let nodes = vec![node("p", 5), node("q", 5), node("r", 1), node("s", 5)];
        let live = live_with(&["p", "q", "r", "s"]);
        assert_eq!(
            uuids(&select(&nodes, &live, "", ALL_GROUPS)),
            vec!["r", "p", "q", "s"]
        );

        let mut refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        sort_nodes(&mut refs, &live);
        sort_nodes(&mut refs, &live);
        assert_eq!(uuids(&refs), vec!["r", "p", "q", "s"]);
    }

    #[test]
    fn selection_is_subset_of_group_filter() {
        let mut nodes = vec![node("a", 0), node("b", 0), node("c", 0)];
        nodes[0].group = "g".into();
        nodes[2].group = "g".into();
        let live = live_with(&["c"]);
        let selected = select(&nodes, &live, "", "g");
        assert_eq!(uuids(&selected), vec!["c", "a"]);
        assert!(selected.iter().all(|n| n.group == "g"));
    }

    #[test]
    fn memo_reuses_result_until_inputs_change() {
        let nodes = vec![node("a", 1), node("b", 0)];
        let mut live = live_with(&["a"]);
        let mut memo = SelectionMemo::new();

        assert_eq!(memo.get(&nodes, &live, "", ALL_GROUPS), &[0, 1]);
        assert_eq!(memo.get(&nodes, &live, "", ALL_GROUPS), &[0, 1]);
        assert_eq!(memo.recomputes(), 1);

        // Whitespace-only differences normalize to the same key.
        memo.get(&nodes, &live, "  ", ALL_GROUPS);
        assert_eq!(memo.recomputes(), 1);

        live.data.insert(
            "a".into(),
            Record {
                updated_at: "2026-01-01T00:00:00Z".into(),
                ..Record::default()
            },
        );
        memo.get(&nodes, &live, "", ALL_GROUPS);
        assert_eq!(memo.recomputes(), 2);

        live.online.insert("b".into());
        assert_eq!(memo.get(&nodes, &live, "", ALL_GROUPS), &[1, 0]);
        assert_eq!(uuids(&memo.resolve(&nodes)), vec!["b", "a"]);
        assert_eq!(memo.recomputes(), 3);

        memo.invalidate();
        memo.get(&nodes, &live, "", ALL_GROUPS);
        assert_eq!(memo.recomputes(), 4);
    }

    #[test]
    fn live_fingerprint_ignores_insertion_order() {
        let a = live_with(&["x", "y", "z"]);
        let b = live_with(&["z", "y", "x"]);
        assert_eq!(live_fingerprint(&a), live_fingerprint(&b));
        assert_ne!(live_fingerprint(&a), live_fingerprint(&live_with(&["x"])));
    }
}
