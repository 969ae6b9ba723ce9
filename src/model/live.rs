use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CpuInfo {
    /// Percent, 0..=100.
    pub usage: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RamInfo {
    pub used: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SwapInfo {
    pub used: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DiskInfo {
    pub used: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LoadInfo {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkInfo {
    /// Instantaneous upload, bytes/s.
    pub up: u64,
    /// Instantaneous download, bytes/s.
    pub down: u64,
    /// Cumulative upload, bytes.
    #[serde(rename = "totalUp")]
    pub total_up: u64,
    /// Cumulative download, bytes.
    #[serde(rename = "totalDown")]
    pub total_down: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionsInfo {
    pub tcp: u64,
    pub udp: u64,
}

/// Latest metrics for one node.
///
/// `Record::default()` is the all-zero record substituted for nodes without
/// telemetry.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Record {
    pub cpu: CpuInfo,
    pub ram: RamInfo,
    pub swap: SwapInfo,
    pub load: LoadInfo,
    pub disk: DiskInfo,
    pub network: NetworkInfo,
    pub connections: ConnectionsInfo,
    /// Seconds.
    pub uptime: u64,
    pub process: u64,
    /// Agent-reported error, empty when healthy.
    pub message: String,
    /// Change-detection key; opaque to the dashboard.
    pub updated_at: String,
}

/// Telemetry snapshot keyed by node uuid.
///
/// Nodes missing from `online` are offline; nodes missing from `data` get
/// the default record.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct LiveData {
    pub online: HashSet<String>,
    pub data: HashMap<String, Record>,
}

impl LiveData {
    pub fn is_online(&self, uuid: &str) -> bool {
        self.online.contains(uuid)
    }

    pub fn record(&self, uuid: &str) -> Option<&Record> {
        self.data.get(uuid)
    }

    /// Record for `uuid`, or the all-zero record when telemetry is missing.
    pub fn record_or_default(&self, uuid: &str) -> Record {
        self.data.get(uuid).cloned().unwrap_or_default()
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }
}
