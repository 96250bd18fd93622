//! Column definitions for the line items table.

use egui_extras::Column;
use lineitems_business::{ColumnKind, HeaderView};

pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

const TEXT_MIN_WIDTH: f32 = 160.0;
const NUMBER_WIDTH: f32 = 110.0;
const BUTTON_WIDTH: f32 = 140.0;
const ICON_BUTTON_WIDTH: f32 = 48.0;

/// One column per header, sized by what the column shows.
#[inline]
pub fn table_columns(headers: &[HeaderView]) -> Vec<Column> {
    headers
        .iter()
        .map(|header| match header.kind {
            ColumnKind::Text => Column::remainder().at_least(TEXT_MIN_WIDTH),
            ColumnKind::Currency | ColumnKind::Number => Column::exact(NUMBER_WIDTH),
            ColumnKind::Button => Column::exact(BUTTON_WIDTH),
            ColumnKind::ButtonIcon => Column::exact(ICON_BUTTON_WIDTH),
        })
        .collect()
}
