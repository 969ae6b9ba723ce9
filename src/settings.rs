//! Persisted UI preferences: the selected view mode and group.
//!
//! Values are validated on every load. An unknown view mode or an unreadable
//! file never fails the dashboard; it yields defaults and a warning.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::ALL_GROUPS;
use crate::view_mode::ViewMode;

pub const VIEW_MODE_KEY: &str = "nodeViewMode";
pub const SELECTED_GROUP_KEY: &str = "nodeSelectedGroup";

/// Validated preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub view_mode: ViewMode,
    pub selected_group: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Modern,
            selected_group: ALL_GROUPS.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(String),
    NoConfigDir,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Parse(msg) => write!(f, "settings parse error: {}", msg),
            SettingsError::NoConfigDir => write!(f, "could not determine config directory"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

/// Raw key/value storage behind [`SettingsStore`].
pub trait SettingsBackend {
    /// All stored pairs. A store that has never been written is empty.
    fn read(&self) -> Result<BTreeMap<String, String>, SettingsError>;
    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError>;
}

impl<B: SettingsBackend + ?Sized> SettingsBackend for Box<B> {
    fn read(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        (**self).read()
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        (**self).write(values)
    }
}

/// JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/nodeboard/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        path.push("nodeboard");
        path.push("settings.json");
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        let value: Value =
            serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(SettingsError::Parse("expected a JSON object".to_string()));
        };
        // Non-string values are ignored rather than rejected.
        Ok(map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect())
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(values).map_err(|e| SettingsError::Parse(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-process storage. Used by tests and when no config directory exists.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RefCell::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        Ok(self.values.borrow().clone())
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        *self.values.borrow_mut() = values.clone();
        Ok(())
    }
}

/// Typed access to the preference keys over some backend.
pub struct SettingsStore<B: SettingsBackend> {
    backend: B,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads and validates preferences. Never fails: storage errors and
    /// unknown values fall back to defaults.
    pub fn load(&self) -> Settings {
        let values = match self.backend.read() {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };

        let view_mode = match values.get(VIEW_MODE_KEY) {
            Some(raw) => {
                let mode = ViewMode::from_stored(raw);
                if mode.as_str() != raw.as_str() {
                    debug!(stored = %raw, "unknown view mode, using {}", mode.as_str());
                }
                mode
            }
            None => ViewMode::default(),
        };
        let selected_group = values
            .get(SELECTED_GROUP_KEY)
            .filter(|g| !g.is_empty())
            .cloned()
            .unwrap_or_else(|| ALL_GROUPS.to_string());

        Settings {
            view_mode,
            selected_group,
        }
    }

    /// Persists both keys, preserving any other keys the backend holds.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut values = self.backend.read().unwrap_or_default();
        values.insert(VIEW_MODE_KEY.to_string(), settings.view_mode.as_str().to_string());
        values.insert(SELECTED_GROUP_KEY.to_string(), settings.selected_group.clone());
        self.backend.write(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_store_yields_defaults() {
        let store = SettingsStore::new(MemoryBackend::new());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn stored_compact_round_trips() {
        let store = SettingsStore::new(MemoryBackend::new());
        let settings = Settings {
            view_mode: ViewMode::Compact,
            selected_group: "prod".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn unknown_view_mode_falls_back_to_modern() {
        let store = SettingsStore::new(MemoryBackend::with_values([
            (VIEW_MODE_KEY, "xyz"),
            (SELECTED_GROUP_KEY, ""),
        ]));
        let loaded = store.load();
        assert_eq!(loaded.view_mode, ViewMode::Modern);
        assert_eq!(loaded.selected_group, ALL_GROUPS);
    }

    #[test]
    fn file_backend_round_trip_uses_fixed_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = SettingsStore::new(FileBackend::new(&path));

        store
            .save(&Settings {
                view_mode: ViewMode::Earth,
                selected_group: "edge".to_string(),
            })
            .unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[VIEW_MODE_KEY], "earth");
        assert_eq!(raw[SELECTED_GROUP_KEY], "edge");
        assert_eq!(store.load().view_mode, ViewMode::Earth);
    }

    #[test]
    fn corrupt_file_loads_defaults_and_save_repairs_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let store = SettingsStore::new(FileBackend::new(&path));

        assert_eq!(store.load(), Settings::default());
        assert!(matches!(store.backend().read(), Err(SettingsError::Parse(_))));

        store
            .save(&Settings {
                view_mode: ViewMode::Classic,
                selected_group: ALL_GROUPS.to_string(),
            })
            .unwrap();
        assert_eq!(store.load().view_mode, ViewMode::Classic);
    }

    #[test]
    fn save_preserves_unrelated_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme": "dark", "nodeViewMode": 3}"#).unwrap();
        let store = SettingsStore::new(FileBackend::new(&path));

        assert_eq!(store.load().view_mode, ViewMode::Modern);
        store.save(&Settings::default()).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[VIEW_MODE_KEY], "modern");
    }
}
