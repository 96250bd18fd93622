//! Table header rendering for the line items table.

use egui_extras::TableRow;
use lineitems_business::HeaderView;

use super::cells::aligned;

/// Renders the header row with bold labels, aligned like their columns.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>, headers: &[HeaderView]) {
    for column in headers {
        header.col(|ui| {
            aligned(ui, column.alignment, |ui| {
                ui.strong(&column.label);
            });
        });
    }
}
