//! Generated demo fleet.
//!
//! Every value is derived from the node index and the tick counter through
//! xxh3, so two providers advanced the same number of times produce the same
//! telemetry.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use super::{DataProvider, ProviderError};
use crate::model::{LiveData, NodeBasicInfo, Record, Snapshot};
use crate::traffic::TrafficLimitType;

const GIB: u64 = 1024 * 1024 * 1024;

const REGIONS: &[&str] = &[
    "🇺🇸 Los Angeles",
    "🇯🇵 Tokyo",
    "🇩🇪 Frankfurt",
    "🇸🇬",
    "🇭🇰 Hong Kong",
    "🇬🇧 London",
    "🇳🇱",
    "",
];

const GROUPS: &[&str] = &["prod", "prod", "edge", "lab", ""];

const OS: &[(&str, &str)] = &[
    ("Debian GNU/Linux 12", "amd64"),
    ("Ubuntu 24.04 LTS", "amd64"),
    ("Alpine Linux", "arm64"),
    ("Rocky Linux 9", "amd64"),
];

/// Deterministic pseudo-random value in `[0, 1)`.
fn noise(index: usize, salt: &str, tick: u64) -> f64 {
    let h = xxh3_64_with_seed(format!("{}:{}", index, salt).as_bytes(), tick);
    (h >> 11) as f64 / (1u64 << 53) as f64
}

fn demo_node(i: usize) -> NodeBasicInfo {
    let (os, arch) = OS[i % OS.len()];
    let mem_total = [1, 2, 4, 8, 16][i % 5] * GIB;
    let limit = if i % 3 == 0 { (500 + 500 * (i as u64 % 4)) * GIB } else { 0 };
    NodeBasicInfo {
        uuid: format!("demo-{:03}", i),
        name: format!("node-{:02}", i + 1),
        cpu_name: "Virtual CPU".to_string(),
        os: os.to_string(),
        arch: arch.to_string(),
        region: REGIONS[i % REGIONS.len()].to_string(),
        group: GROUPS[i % GROUPS.len()].to_string(),
        weight: (i % 4) as i64,
        price: [0.0, 4.99, 5.0, 19.99, 100.0][i % 5],
        mem_total,
        disk_total: mem_total * 10,
        traffic_limit: limit,
        traffic_limit_type: (limit > 0).then_some(TrafficLimitType::Sum),
        cpu_cores: Some([1, 2, 4, 8][i % 4]),
    }
}

/// Demo data provider.
pub struct DemoProvider {
    nodes: Vec<NodeBasicInfo>,
    tick: u64,
    current: Option<Snapshot>,
}

impl DemoProvider {
    pub fn new(count: usize) -> Self {
        Self {
            nodes: (0..count).map(demo_node).collect(),
            tick: 0,
            current: None,
        }
    }

    fn live_at(&self, tick: u64) -> LiveData {
        let mut online = HashSet::new();
        let mut data = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            // Availability flips slowly: re-rolled every 30 ticks.
            if noise(i, "down", tick / 30) < 0.12 {
                continue;
            }
            online.insert(node.uuid.clone());

            let busy = noise(i, "profile", 0);
            let cpu = (busy * 70.0 + noise(i, "cpu", tick) * 35.0).min(100.0);
            let ram = ((busy * 0.6 + noise(i, "ram", tick / 5) * 0.35) * node.mem_total as f64) as u64;
            let disk = ((0.2 + noise(i, "disk", 0) * 0.75) * node.disk_total as f64) as u64;
            let up = (noise(i, "up", tick) * 4_000_000.0) as u64;
            let down = (noise(i, "down_rate", tick) * 12_000_000.0) as u64;

            let mut r = Record::default();
            r.cpu.usage = (cpu * 10.0).round() / 10.0;
            r.ram.used = ram.min(node.mem_total);
            r.swap.used = (noise(i, "swap", tick / 10) * 256.0 * 1024.0 * 1024.0) as u64;
            r.disk.used = disk;
            r.load.load1 = cpu / 25.0;
            r.load.load5 = cpu / 30.0;
            r.load.load15 = cpu / 35.0;
            r.network.up = up;
            r.network.down = down;
            r.network.total_up = (noise(i, "tu", 0) * 300.0 * GIB as f64) as u64 + up * tick;
            r.network.total_down = (noise(i, "td", 0) * 900.0 * GIB as f64) as u64 + down * tick;
            r.connections.tcp = (noise(i, "tcp", tick) * 400.0) as u64;
            r.connections.udp = (noise(i, "udp", tick) * 40.0) as u64;
            r.process = 80 + (noise(i, "proc", tick / 5) * 200.0) as u64;
            r.uptime = 3600 + (noise(i, "boot", 0) * 90.0 * 86400.0) as u64 + tick;
            if noise(i, "agent", tick / 60) > 0.97 {
                r.message = "agent reconnecting".to_string();
            }
            r.updated_at = format!("tick-{}", tick);
            data.insert(node.uuid.clone(), r);
        }
        LiveData { online, data }
    }
}

impl DataProvider for DemoProvider {
    fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> Option<&Snapshot> {
        let live = self.live_at(self.tick);
        self.tick += 1;
        self.current = Some(Snapshot::new(
            Utc::now().timestamp(),
            self.nodes.clone(),
            live,
        ));
        self.current.as_ref()
    }

    fn is_live(&self) -> bool {
        true
    }

    fn last_error(&self) -> Option<&ProviderError> {
        None
    }

    fn describe(&self) -> String {
        format!("demo ({} nodes)", self.nodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tick_count_yields_same_telemetry() {
        let mut a = DemoProvider::new(12);
        let mut b = DemoProvider::new(12);
        for _ in 0..5 {
            a.advance();
            b.advance();
        }
        let (sa, sb) = (a.current().unwrap(), b.current().unwrap());
        assert_eq!(sa.nodes, sb.nodes);
        assert_eq!(sa.live, sb.live);
    }

    #[test]
    fn fleet_is_well_formed() {
        let mut p = DemoProvider::new(20);
        let snap = p.advance().unwrap().clone();
        assert_eq!(snap.nodes.len(), 20);

        let uuids: HashSet<&str> = snap.nodes.iter().map(|n| n.uuid.as_str()).collect();
        assert_eq!(uuids.len(), 20);

        for uuid in &snap.live.online {
            let r = snap.live.record(uuid).unwrap();
            assert!((0.0..=100.0).contains(&r.cpu.usage));
            let node = snap.nodes.iter().find(|n| &n.uuid == uuid).unwrap();
            assert!(r.ram.used <= node.mem_total);
        }
        assert!(snap.nodes.iter().any(|n| n.has_traffic_quota()));
        assert!(snap.nodes.iter().any(|n| n.group_label().is_none()));
    }

    #[test]
    fn telemetry_changes_between_ticks() {
        let mut p = DemoProvider::new(8);
        let first = p.advance().unwrap().live.clone();
        let second = p.advance().unwrap().live.clone();
        assert_ne!(first, second);
        assert!(p.last_error().is_none());
    }
}
