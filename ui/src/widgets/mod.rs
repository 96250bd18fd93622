mod line_items;
mod status_bar;

pub use line_items::{RowClick, line_items_panel};
pub use status_bar::status_bar;
