//! Row rendering for the line items table.

use egui::{Stroke, Ui};
use egui_extras::TableRow;
use lineitems_business::{CellView, LineItemRow, RowActionId, RowView};

use super::cells::{ActionCell, render_action_cell, render_value_cell};

/// A row action button the user clicked this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClick {
    pub action: RowActionId,
    pub row: LineItemRow,
}

/// Renders one line item, a cell per column.
///
/// Returns the clicked action, if any. Dispatching it is left to the caller so the
/// table body is not borrowed while commands run.
#[inline]
pub fn render_line_item_row(row: &mut TableRow<'_, '_>, view: &RowView) -> Option<RowClick> {
    let mut click = None;

    for cell in &view.cells {
        row.col(|ui| {
            match cell {
                CellView::Value {
                    text,
                    alignment,
                    highlighted,
                    ..
                } => render_value_cell(ui, text, *alignment, *highlighted),
                CellView::Action {
                    action,
                    caption,
                    icon,
                    title,
                    variant,
                    enabled,
                } => {
                    let cell = ActionCell {
                        action: *action,
                        caption: caption.as_deref(),
                        icon,
                        title,
                        variant: *variant,
                        enabled: *enabled,
                    };
                    if render_action_cell(ui, &cell) {
                        click = Some(RowClick {
                            action: *action,
                            row: view.row.clone(),
                        });
                    }
                }
            }
            draw_cell_bottom_border(ui);
        });
    }

    click
}

/// Draws a bottom border line for a cell.
#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.max_rect();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
