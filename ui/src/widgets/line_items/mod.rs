//! The line items table widget.

mod panel;
mod table;

pub use panel::line_items_panel;
pub use table::row::RowClick;
