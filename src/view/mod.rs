//! UI-agnostic view models.
//!
//! Each variant module builds a view model from the selected nodes and the
//! telemetry snapshot. [`render_view`] is the single dispatch point from a
//! [`ViewMode`] to its builder. The TUI then maps the view model to ratatui
//! widgets.
//!
//! Every builder re-sorts its input with [`engine::sort_nodes`], so callers
//! may pass nodes in any order.

pub mod classic;
pub mod common;
pub mod compact;
pub mod detailed;
pub mod earth;
pub mod metrics;
pub mod modern;

use crate::engine;
use crate::model::{LiveData, NodeBasicInfo};
use crate::view_mode::ViewMode;

use common::{CardGridViewModel, TableViewModel, ViewOptions};
use earth::EarthViewModel;

/// Output of one view variant.
#[derive(Debug, Clone)]
pub enum ViewModel {
    Modern(CardGridViewModel),
    Compact(TableViewModel<String>),
    Classic(CardGridViewModel),
    Detailed(TableViewModel<String>),
    Earth(EarthViewModel),
}

impl ViewModel {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewModel::Modern(_) => ViewMode::Modern,
            ViewModel::Compact(_) => ViewMode::Compact,
            ViewModel::Classic(_) => ViewMode::Classic,
            ViewModel::Detailed(_) => ViewMode::Detailed,
            ViewModel::Earth(_) => ViewMode::Earth,
        }
    }

    /// Node uuids in display order. Selection indices refer to this order.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            ViewModel::Modern(grid) | ViewModel::Classic(grid) => {
                grid.cards.iter().map(|c| c.uuid.as_str()).collect()
            }
            ViewModel::Compact(table) | ViewModel::Detailed(table) => {
                table.rows.iter().map(|r| r.id.as_str()).collect()
            }
            ViewModel::Earth(earth) => earth
                .regions
                .iter()
                .flat_map(|r| r.markers.iter().map(|m| m.uuid.as_str()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ViewModel::Modern(grid) | ViewModel::Classic(grid) => grid.cards.len(),
            ViewModel::Compact(table) | ViewModel::Detailed(table) => table.rows.len(),
            ViewModel::Earth(earth) => earth.regions.iter().map(|r| r.markers.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the view model for `mode`.
pub fn render_view(
    mode: ViewMode,
    nodes: &[&NodeBasicInfo],
    live: &LiveData,
    options: ViewOptions,
) -> ViewModel {
    match mode {
        ViewMode::Modern => ViewModel::Modern(modern::render(nodes, live, options)),
        ViewMode::Compact => ViewModel::Compact(compact::render(nodes, live, options)),
        ViewMode::Classic => ViewModel::Classic(classic::render(nodes, live)),
        ViewMode::Detailed => ViewModel::Detailed(detailed::render(nodes, live, options)),
        ViewMode::Earth => ViewModel::Earth(earth::render(nodes, live)),
    }
}

/// Copy of `nodes` in presentation order.
pub(crate) fn presentation_sorted<'a>(
    nodes: &[&'a NodeBasicInfo],
    live: &LiveData,
) -> Vec<&'a NodeBasicInfo> {
    let mut sorted = nodes.to_vec();
    engine::sort_nodes(&mut sorted, live);
    sorted
}

/// "🇯🇵 Tokyo · Debian 12 amd64", skipping blank parts.
pub(crate) fn node_subtitle(node: &NodeBasicInfo) -> String {
    let os = [node.os.trim(), node.arch.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    [node.region.trim(), os.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(uuid: &str, weight: i64) -> NodeBasicInfo {
        NodeBasicInfo {
            uuid: uuid.to_string(),
            name: uuid.to_uppercase(),
            region: "🇩🇪".to_string(),
            weight,
            ..NodeBasicInfo::default()
        }
    }

    #[test]
    fn every_mode_dispatches_to_its_variant() {
        let nodes = [node("a", 0)];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let live = LiveData::default();
        for mode in ViewMode::ALL {
            let vm = render_view(mode, &refs, &live, ViewOptions::default());
            assert_eq!(vm.mode(), mode);
            assert_eq!(vm.ids(), vec!["a"]);
        }
    }

    #[test]
    fn variants_resort_unsorted_input() {
        let nodes = [node("heavy", 9), node("light", 1), node("online", 50)];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let mut live = LiveData::default();
        live.online.insert("online".into());

        for mode in ViewMode::ALL {
            let vm = render_view(mode, &refs, &live, ViewOptions::default());
            assert_eq!(vm.ids(), vec!["online", "light", "heavy"], "{:?}", mode);
        }
    }

    #[test]
    fn empty_input_gives_empty_model() {
        let live = LiveData::default();
        for mode in ViewMode::ALL {
            assert!(render_view(mode, &[], &live, ViewOptions::default()).is_empty());
        }
    }

    #[test]
    fn subtitle_skips_blank_parts() {
        let mut n = node("a", 0);
        n.os = "Debian".into();
        assert_eq!(node_subtitle(&n), "🇩🇪 · Debian");
        n.region.clear();
        n.arch = "arm64".into();
        assert_eq!(node_subtitle(&n), "Debian arm64");
    }
}
