//! nodeboard - terminal dashboard for a fleet of monitored nodes.
//!
//! Provides:
//! - `model`: node descriptors and live telemetry (wire types)
//! - `fmt`, `traffic`, `region`: formatting, quota and region helpers
//! - `engine`: node filter/sort pipeline and its memo table
//! - `view_mode`: ordered view modes and cycling rules
//! - `view`: UI-agnostic view models for the five layouts
//! - `shell`: dashboard composition (groups, summary, empty state)
//! - `settings`: persisted UI preferences
//! - `provider`: snapshot sources (file, demo)
//! - `tui`: ratatui/crossterm front-end

pub mod engine;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod region;
pub mod settings;
pub mod shell;
pub mod traffic;
pub mod tui;
pub mod view;
pub mod view_mode;
