//! Wire types for the node roster and live telemetry.
//!
//! Field names follow the JSON emitted by the monitoring backend, so both the
//! file provider and tests can feed documents straight into these types.

mod live;
mod node;
mod snapshot;

pub use live::{
    ConnectionsInfo, CpuInfo, DiskInfo, LiveData, LoadInfo, NetworkInfo, RamInfo, Record,
    SwapInfo,
};
pub use node::NodeBasicInfo;
pub use snapshot::Snapshot;
