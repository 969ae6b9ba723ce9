//! Traffic quota evaluation.

use serde::{Deserialize, Deserializer, Serialize};

/// Policy selecting how cumulative traffic is measured against a node's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLimitType {
    /// Upload + download.
    Sum,
    /// The larger direction.
    Max,
    /// The smaller direction.
    Min,
    /// Upload only.
    Up,
    /// Download only.
    Down,
}

impl TrafficLimitType {
    /// Parses a policy tag; unknown or empty tags yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Some(Self::Sum),
            "max" => Some(Self::Max),
            "min" => Some(Self::Min),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Min => "min",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Lenient field deserializer: `null`, `""` and unknown tags become `None`
/// instead of rejecting the whole roster.
pub fn deserialize_limit_type<'de, D>(deserializer: D) -> Result<Option<TrafficLimitType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(TrafficLimitType::parse))
}

/// Quota usage for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficStats {
    /// Bytes counted against the limit.
    pub usage: u64,
    /// Raw `usage / limit * 100`; may exceed 100. Zero when unlimited.
    pub percentage: f64,
}

impl TrafficStats {
    /// Percentage to feed a progress indicator, always within `[0, 100]`.
    pub fn bar_percent(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }
}

/// Evaluates cumulative counters against `limit` under `limit_type`.
///
/// Without a policy the combined total is reported. A zero limit means
/// unlimited and yields a zero percentage.
pub fn get_traffic_stats(
    total_up: u64,
    total_down: u64,
    limit: u64,
    limit_type: Option<TrafficLimitType>,
) -> TrafficStats {
    let usage = match limit_type.unwrap_or(TrafficLimitType::Sum) {
        TrafficLimitType::Sum => total_up.saturating_add(total_down),
        TrafficLimitType::Max => total_up.max(total_down),
        TrafficLimitType::Min => total_up.min(total_down),
        TrafficLimitType::Up => total_up,
        TrafficLimitType::Down => total_down,
    };
    let percentage = if limit > 0 {
        usage as f64 / limit as f64 * 100.0
    } else {
        0.0
    };
    TrafficStats { usage, percentage }
}
