//! TUI widgets for nodeboard.

mod cards;
mod earth;
mod fleet;
mod header;
mod help;
mod node_detail;
mod popup;
mod quit_confirm;
mod table;
mod toolbar;

pub use cards::render_card_grid;
pub use earth::render_earth;
pub use fleet::render_fleet;
pub use header::render_header;
pub use help::render_help;
pub use node_detail::render_node_detail;
pub use quit_confirm::render_quit_confirm;
pub use table::render_node_table;
pub use toolbar::render_toolbar;
