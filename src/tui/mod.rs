//! Terminal User Interface for nodeboard.
//!
//! The dashboard shows the node roster in one of five layouts, with search,
//! group chips and popups for node detail and fleet totals.

mod app;
mod event;
mod input;
mod navigable;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, MOBILE_WIDTH, PopupState};
