//! Provider abstraction for snapshot data sources.
//!
//! This module defines the `DataProvider` trait that lets the TUI work with
//! different sources of node rosters and telemetry (JSON files written by the
//! monitoring backend, or a generated demo fleet) through one interface.

mod demo;
mod file;

pub use demo::DemoProvider;
pub use file::FileProvider;

use crate::model::Snapshot;

/// Error types that can occur while loading a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// I/O error while reading source data.
    Io(String),
    /// Source data is not valid JSON of the expected shape.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Abstraction for snapshot data sources.
///
/// - `FileProvider`: roster and telemetry re-read from JSON files
/// - `DemoProvider`: deterministic generated fleet
///
/// The trait is object-safe and designed to be used with `Box<dyn DataProvider>`.
pub trait DataProvider {
    /// Returns the current snapshot, if one has been loaded.
    fn current(&self) -> Option<&Snapshot>;

    /// Loads the next snapshot.
    ///
    /// On failure the previous snapshot stays current and is returned again;
    /// `last_error()` describes what went wrong. Returns `None` only when no
    /// snapshot was ever loaded.
    fn advance(&mut self) -> Option<&Snapshot>;

    /// Returns `true` if the data changes between ticks.
    fn is_live(&self) -> bool;

    /// Returns the error from the most recent `advance()`, if it failed.
    fn last_error(&self) -> Option<&ProviderError>;

    /// Short human-readable description of the source, for the header.
    fn describe(&self) -> String;
}
