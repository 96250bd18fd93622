//! Pure projection of the table state into what the widget draws.

use rust_decimal::Decimal;

use crate::{
    Alignment, ButtonVariant, ColumnDescriptor, ColumnKind, ColumnSchema, Labels, LineItemRow,
    LineItemTable, RowActionId, RowData, RowField,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub body: TableBody,
    /// Low-stock banner text, present only while the warning is active.
    pub warning: Option<String>,
    pub refresh_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub label: String,
    pub kind: ColumnKind,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Nothing fetched yet.
    Loading,
    Error(String),
    NoData(String),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row: LineItemRow,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Value {
        text: String,
        alignment: Alignment,
        class: Option<String>,
        highlighted: bool,
    },
    Action {
        action: RowActionId,
        caption: Option<String>,
        icon: &'static str,
        title: String,
        variant: ButtonVariant,
        enabled: bool,
    },
}

pub fn render(table: &LineItemTable, schema: &ColumnSchema, labels: &Labels) -> TableView {
    let headers = schema
        .columns()
        .iter()
        .map(|column| HeaderView {
            label: column.label.clone(),
            kind: column.kind,
            alignment: column.style.alignment,
        })
        .collect();

    let body = match (table.last_error(), table.rows()) {
        (Some(err), _) => TableBody::Error(err.to_string()),
        (None, RowData::Unset) => TableBody::Loading,
        (None, RowData::Empty) => TableBody::NoData(labels.no_product_message.clone()),
        (None, RowData::Populated(rows)) => TableBody::Rows(
            rows.iter()
                .map(|row| RowView {
                    row: row.clone(),
                    cells: schema
                        .columns()
                        .iter()
                        .map(|column| render_cell(table, column, row))
                        .collect(),
                })
                .collect(),
        ),
    };

    TableView {
        headers,
        body,
        warning: table
            .warning_active()
            .then(|| labels.warning_quantity_message.clone()),
        refresh_label: labels.refresh.clone(),
    }
}

fn render_cell(table: &LineItemTable, column: &ColumnDescriptor, row: &LineItemRow) -> CellView {
    if let Some(button) = &column.button {
        let enabled = match button.action {
            RowActionId::DeleteRow => !table.is_deleting(row.line_item_id),
            RowActionId::ViewProduct => true,
        };
        return CellView::Action {
            action: button.action,
            caption: button.caption.clone(),
            icon: button.icon,
            title: button.title.clone(),
            variant: button.variant,
            enabled,
        };
    }

    let class = column.style.class_for(row);
    CellView::Value {
        text: column
            .field
            .map(|field| format_field(column.kind, field, row))
            .unwrap_or_default(),
        alignment: column.style.alignment,
        highlighted: class.is_some() && row.is_low_stock(),
        class: class.map(str::to_owned),
    }
}

fn format_field(kind: ColumnKind, field: RowField, row: &LineItemRow) -> String {
    match field {
        RowField::ProductName => row.product_name.clone(),
        RowField::UnitPrice => format_decimal(kind, row.unit_price),
        RowField::TotalPrice => format_decimal(kind, row.total_price),
        RowField::Quantity => row.quantity.to_string(),
        RowField::QuantityInStock => row.quantity_in_stock.to_string(),
    }
}

fn format_decimal(kind: ColumnKind, value: Decimal) -> String {
    match kind {
        ColumnKind::Currency => format!("{:.2}", value.round_dp(2)),
        _ => value.normalize().to_string(),
    }
}
