use serde::{Deserialize, Serialize};

use crate::traffic::TrafficLimitType;

/// Static descriptor of a monitored node.
///
/// `uuid` is unique within a roster. List order carries no meaning; the
/// engine applies its own ordering.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NodeBasicInfo {
    pub uuid: String,
    pub name: String,
    pub cpu_name: String,
    pub os: String,
    pub arch: String,
    /// Region label, often prefixed with a flag emoji ("🇯🇵 Tokyo").
    pub region: String,
    /// Blank means ungrouped.
    pub group: String,
    /// Ascending sort priority among nodes with the same online status.
    pub weight: i64,
    pub price: f64,
    /// Bytes.
    pub mem_total: u64,
    /// Bytes.
    pub disk_total: u64,
    /// Bytes; 0 means unlimited.
    pub traffic_limit: u64,
    #[serde(deserialize_with = "crate::traffic::deserialize_limit_type")]
    pub traffic_limit_type: Option<TrafficLimitType>,
    pub cpu_cores: Option<u32>,
}

impl NodeBasicInfo {
    /// Group label, `None` when blank.
    pub fn group_label(&self) -> Option<&str> {
        let g = self.group.trim();
        if g.is_empty() { None } else { Some(&self.group) }
    }

    /// Price rendered the way the search engine matches it: `19.99`, `5`, `100`.
    pub fn price_text(&self) -> String {
        format!("{}", self.price)
    }

    /// True when a quota is configured and a policy selects how to measure it.
    pub fn has_traffic_quota(&self) -> bool {
        self.traffic_limit > 0 && self.traffic_limit_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_document_with_missing_fields() {
        let json = r#"{
            "uuid": "n1",
            "name": "tokyo-1",
            "os": "Debian 12",
            "arch": "amd64",
            "region": "🇯🇵",
            "weight": 3,
            "price": 19.99,
            "mem_total": 2147483648,
            "traffic_limit_type": "sum"
        }"#;
        let node: NodeBasicInfo = serde_json::from_str(json).unwrap();
        assert_eq!(node.uuid, "n1");
        assert_eq!(node.group, "");
        assert_eq!(node.disk_total, 0);
        assert_eq!(node.traffic_limit_type, Some(TrafficLimitType::Sum));
        assert_eq!(node.cpu_cores, None);
        assert!(!node.has_traffic_quota());
    }

    #[test]
    fn unknown_limit_type_does_not_reject_node() {
        let json = r#"{"uuid": "n2", "traffic_limit": 100, "traffic_limit_type": ""}"#;
        let node: NodeBasicInfo = serde_json::from_str(json).unwrap();
        assert_eq!(node.traffic_limit_type, None);
        assert!(!node.has_traffic_quota());
    }

    #[test]
    fn price_text_drops_trailing_zero_fraction() {
        let mut node = NodeBasicInfo {
            price: 19.99,
            ..NodeBasicInfo::default()
        };
        assert_eq!(node.price_text(), "19.99");
        node.price = 5.0;
        assert_eq!(node.price_text(), "5");
        node.price = 100.0;
        assert_eq!(node.price_text(), "100");
    }

    #[test]
    fn blank_group_is_ungrouped() {
        let node = NodeBasicInfo {
            group: "   ".to_string(),
            ..NodeBasicInfo::default()
        };
        assert_eq!(node.group_label(), None);
    }
}
