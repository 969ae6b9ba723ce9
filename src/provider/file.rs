//! File-backed provider.
//!
//! Reads the node roster and the live telemetry from JSON documents on every
//! advance, so an external poller can keep rewriting them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{DataProvider, ProviderError};
use crate::model::{LiveData, NodeBasicInfo, Snapshot};

/// Documents may come wrapped the way the backend API returns them:
/// `{"status": "success", "data": ...}`. Both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped {
        #[allow(dead_code)]
        status: String,
        data: T,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data, .. } => data,
            Envelope::Bare(t) => t,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ProviderError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ProviderError::Io(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str::<Envelope<T>>(&content)
        .map(Envelope::into_inner)
        .map_err(|e| ProviderError::Parse(format!("{}: {}", path.display(), e)))
}

/// Provider reading `nodes` and `live` JSON files.
pub struct FileProvider {
    nodes_path: PathBuf,
    live_path: Option<PathBuf>,
    current: Option<Snapshot>,
    last_error: Option<ProviderError>,
}

impl FileProvider {
    pub fn new(nodes_path: impl Into<PathBuf>, live_path: Option<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            live_path,
            current: None,
            last_error: None,
        }
    }

    fn load(&self) -> Result<Snapshot, ProviderError> {
        let nodes: Vec<NodeBasicInfo> = read_json(&self.nodes_path)?;
        let live = match &self.live_path {
            Some(path) => match read_json::<LiveData>(path) {
                Ok(live) => live,
                // Not written yet: everyone is offline.
                Err(ProviderError::Io(msg)) if !path.exists() => {
                    debug!(%msg, "live data file missing");
                    LiveData::default()
                }
                Err(e) => return Err(e),
            },
            None => LiveData::default(),
        };
        Ok(Snapshot::new(Utc::now().timestamp(), nodes, live))
    }
}

impl DataProvider for FileProvider {
    fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> Option<&Snapshot> {
        match self.load() {
            Ok(snapshot) => {
                debug!(
                    nodes = snapshot.nodes.len(),
                    online = snapshot.live.online_count(),
                    "snapshot loaded"
                );
                self.current = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load snapshot, keeping previous");
                self.last_error = Some(e);
            }
        }
        self.current.as_ref()
    }

    fn is_live(&self) -> bool {
        true
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    fn describe(&self) -> String {
        self.nodes_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.nodes_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const NODES: &str = r#"[
        {"uuid": "a", "name": "alpha", "region": "🇯🇵", "weight": 1},
        {"uuid": "b", "name": "beta", "weight": 0}
    ]"#;

    #[test]
    fn reads_bare_and_wrapped_documents() {
        let dir = tempdir().unwrap();
        let nodes = dir.path().join("nodes.json");
        let live = dir.path().join("live.json");
        fs::write(&nodes, format!(r#"{{"status": "success", "data": {}}}"#, NODES)).unwrap();
        // Bare telemetry has its own `data` key; only `status` marks the wrapper.
        fs::write(
            &live,
            r#"{"online": ["a"], "data": {"a": {"cpu": {"usage": 12.5}, "updated_at": "t1"}}}"#,
        )
        .unwrap();

        let mut provider = FileProvider::new(&nodes, Some(live));
        let snap = provider.advance().unwrap();
        assert_eq!(snap.nodes.len(), 2);
        assert!(snap.live.is_online("a"));
        assert_eq!(snap.live.record("a").unwrap().cpu.usage, 12.5);
        assert!(provider.last_error().is_none());
        assert_eq!(provider.describe(), "nodes.json");
    }

    #[test]
    fn missing_live_file_means_all_offline() {
        let dir = tempdir().unwrap();
        let nodes = dir.path().join("nodes.json");
        fs::write(&nodes, NODES).unwrap();

        let mut provider = FileProvider::new(&nodes, Some(dir.path().join("absent.json")));
        let snap = provider.advance().unwrap();
        assert_eq!(snap.live.online_count(), 0);
        assert!(provider.last_error().is_none());
    }

    #[test]
    fn keeps_previous_snapshot_on_error() {
        let dir = tempdir().unwrap();
        let nodes = dir.path().join("nodes.json");
        fs::write(&nodes, NODES).unwrap();

        let mut provider = FileProvider::new(&nodes, None);
        assert_eq!(provider.advance().unwrap().nodes.len(), 2);

        fs::write(&nodes, "[{").unwrap();
        let snap = provider.advance().unwrap();
        assert_eq!(snap.nodes.len(), 2);
        assert!(matches!(provider.last_error(), Some(ProviderError::Parse(_))));

        fs::write(&nodes, "[]").unwrap();
        assert!(provider.advance().unwrap().nodes.is_empty());
        assert!(provider.last_error().is_none());
    }

    #[test]
    fn missing_roster_is_an_io_error() {
        let dir = tempdir().unwrap();
        let mut provider = FileProvider::new(dir.path().join("nope.json"), None);
        assert!(provider.advance().is_none());
        assert!(matches!(provider.last_error(), Some(ProviderError::Io(_))));
        assert!(provider.current().is_none());
    }
}
