use serde::{Deserialize, Serialize};

use super::{LiveData, NodeBasicInfo};

/// One refresh tick worth of data: the roster and the telemetry that goes
/// with it. Providers replace the whole snapshot on every tick.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Unix seconds at which the snapshot was produced.
    pub timestamp: i64,
    pub nodes: Vec<NodeBasicInfo>,
    pub live: LiveData,
}

impl Snapshot {
    pub fn new(timestamp: i64, nodes: Vec<NodeBasicInfo>, live: LiveData) -> Self {
        Self {
            timestamp,
            nodes,
            live,
        }
    }
}
