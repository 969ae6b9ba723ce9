//! Earth view: nodes grouped by region.
//!
//! Regions appear in the order of their first node in presentation order, so
//! the region holding the best-ranked node comes first.

use crate::model::{LiveData, NodeBasicInfo};
use crate::region::{flag_codes, flag_for_code, region_display_name};

use super::common::{RowStyleClass, UsageTier};
use super::metrics::NodeMetrics;
use super::presentation_sorted;

const UNKNOWN_REGION: &str = "Unknown";

/// One node marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthMarker {
    pub uuid: String,
    pub name: String,
    pub online: bool,
    pub tier: UsageTier,
}

impl EarthMarker {
    pub fn style(&self) -> RowStyleClass {
        if self.online {
            self.tier.into()
        } else {
            RowStyleClass::Dimmed
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    /// Region label as reported by the nodes.
    pub key: String,
    /// Flag emoji, empty when the label carries none.
    pub flag: String,
    pub name: String,
    pub online: usize,
    pub total: usize,
    pub markers: Vec<EarthMarker>,
}

#[derive(Debug, Clone, Default)]
pub struct EarthViewModel {
    pub regions: Vec<RegionGroup>,
    pub online: usize,
    pub total: usize,
}

pub fn render(nodes: &[&NodeBasicInfo], live: &LiveData) -> EarthViewModel {
    let mut vm = EarthViewModel::default();

    for node in presentation_sorted(nodes, live) {
        let m = NodeMetrics::resolve(node, live);
        let key = node.region.trim();
        let key = if key.is_empty() { UNKNOWN_REGION } else { key };

        let pos = match vm.regions.iter().position(|r| r.key == key) {
            Some(pos) => pos,
            None => {
                vm.regions.push(region_group(key));
                vm.regions.len() - 1
            }
        };
        let group = &mut vm.regions[pos];
        group.total += 1;
        if m.online {
            group.online += 1;
        }
        group.markers.push(EarthMarker {
            uuid: node.uuid.clone(),
            name: node.name.clone(),
            online: m.online,
            tier: m.load_tier(),
        });

        vm.total += 1;
        if m.online {
            vm.online += 1;
        }
    }
    vm
}

fn region_group(key: &str) -> RegionGroup {
    let flag = flag_codes(key)
        .first()
        .and_then(|code| flag_for_code(code))
        .unwrap_or_default();
    let mut name = region_display_name(key);
    // "🇯🇵 Tokyo" keeps its text; the flag is shown separately.
    if !flag.is_empty() {
        name = name.trim_start_matches(flag.as_str()).trim().to_string();
    }
    RegionGroup {
        key: key.to_string(),
        flag,
        name: if name.is_empty() { key.to_string() } else { name },
        online: 0,
        total: 0,
        markers: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(uuid: &str, region: &str, weight: i64) -> NodeBasicInfo {
        NodeBasicInfo {
            uuid: uuid.into(),
            name: uuid.into(),
            region: region.into(),
            weight,
            ..NodeBasicInfo::default()
        }
    }

    #[test]
    fn groups_by_region_in_first_node_order() {
        let nodes = [
            node("a", "🇺🇸", 0),
            node("b", "🇯🇵 Tokyo", 1),
            node("c", "🇺🇸", 2),
            node("d", "", 3),
        ];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let mut live = LiveData::default();
        live.online.insert("b".into());
        live.online.insert("c".into());

        let vm = render(&refs, &live);
        let keys: Vec<&str> = vm.regions.iter().map(|r| r.key.as_str()).collect();
        // b and c are online, so Tokyo's b leads, then the US via c.
        assert_eq!(keys, vec!["🇯🇵 Tokyo", "🇺🇸", "Unknown"]);

        let us = &vm.regions[1];
        assert_eq!(us.name, "United States");
        assert_eq!(us.flag, "🇺🇸");
        assert_eq!((us.online, us.total), (1, 2));
        let us_ids: Vec<&str> = us.markers.iter().map(|m| m.uuid.as_str()).collect();
        assert_eq!(us_ids, vec!["c", "a"]);

        assert_eq!(vm.regions[0].name, "Tokyo");
        assert_eq!(vm.regions[0].flag, "🇯🇵");
        assert_eq!(vm.regions[2].flag, "");
        assert_eq!((vm.online, vm.total), (2, 4));
    }

    #[test]
    fn offline_markers_are_dimmed() {
        let nodes = [node("x", "Mars", 0)];
        let refs: Vec<&NodeBasicInfo> = nodes.iter().collect();
        let vm = render(&refs, &LiveData::default());
        assert_eq!(vm.regions[0].name, "Mars");
        assert_eq!(vm.regions[0].markers[0].style(), RowStyleClass::Dimmed);
    }
}
