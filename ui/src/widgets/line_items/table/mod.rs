//! Table components for the line items panel.
//!
//! - `columns`: column widths per column kind
//! - `header`: header row
//! - `row`: one line item row
//! - `cells`: cell rendering per cell kind

mod cells;
pub mod columns;
pub mod header;
pub mod row;
