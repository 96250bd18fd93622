//! Column schema of the line items table.
//!
//! The schema is never edited in place. [`build_schema`] derives it from the base column
//! set and the viewer's admin flag, so resolving the profile any number of times yields the
//! same columns.

use std::any::Any;
use std::str::FromStr;

use lineitems_states::State;

use crate::{Labels, LineItemRow, UnknownRowAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Currency,
    Number,
    Button,
    ButtonIcon,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Currency => "currency",
            Self::Number => "number",
            Self::Button => "button",
            Self::ButtonIcon => "button-icon",
        }
    }

    pub fn is_action(self) -> bool {
        matches!(self, Self::Button | Self::ButtonIcon)
    }
}

/// Row field a data column is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    ProductName,
    UnitPrice,
    TotalPrice,
    Quantity,
    QuantityInStock,
}

impl RowField {
    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProductName => "productName",
            Self::UnitPrice => "unitPrice",
            Self::TotalPrice => "totalPrice",
            Self::Quantity => "quantity",
            Self::QuantityInStock => "quantityInStock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Per-cell styling. `class_from_row` styles the cell with the row's
/// `quantity_indicator_class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub alignment: Alignment,
    pub class_from_row: bool,
}

impl CellStyle {
    /// The CSS-like class tag to apply to `row`'s cell, if any.
    pub fn class_for<'a>(&self, row: &'a LineItemRow) -> Option<&'a str> {
        self.class_from_row
            .then_some(row.quantity_indicator_class.as_str())
            .filter(|class| !class.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowActionId {
    DeleteRow,
    ViewProduct,
}

impl RowActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeleteRow => "deleteRow",
            Self::ViewProduct => "viewProduct",
        }
    }
}

impl FromStr for RowActionId {
    type Err = UnknownRowAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deleteRow" => Ok(Self::DeleteRow),
            "viewProduct" => Ok(Self::ViewProduct),
            other => Err(UnknownRowAction(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Neutral,
    Brand,
}

/// The clickable part of an action column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: RowActionId,
    pub icon: &'static str,
    /// Visible caption; icon-only buttons have none.
    pub caption: Option<String>,
    pub alternative_text: String,
    pub title: String,
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub label: String,
    pub kind: ColumnKind,
    pub field: Option<RowField>,
    pub style: CellStyle,
    pub button: Option<ActionButton>,
}

impl ColumnDescriptor {
    pub fn data(label: &str, kind: ColumnKind, field: RowField) -> Self {
        Self {
            label: label.to_owned(),
            kind,
            field: Some(field),
            style: CellStyle::default(),
            button: None,
        }
    }

    pub fn action(label: &str, kind: ColumnKind, button: ActionButton) -> Self {
        Self {
            label: label.to_owned(),
            kind,
            field: None,
            style: CellStyle::default(),
            button: Some(button),
        }
    }

    pub fn styled_by_row(mut self) -> Self {
        self.style.class_from_row = true;
        self
    }

    pub fn action_id(&self) -> Option<RowActionId> {
        self.button.as_ref().map(|button| button.action)
    }
}

/// Base columns plus the admin-only column, as configured for one label catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    pub base: Vec<ColumnDescriptor>,
    pub admin: ColumnDescriptor,
}

impl ColumnSet {
    pub fn from_labels(labels: &Labels) -> Self {
        let base = vec![
            ColumnDescriptor::data(&labels.product_name, ColumnKind::Text, RowField::ProductName),
            ColumnDescriptor::data(&labels.unit_price, ColumnKind::Currency, RowField::UnitPrice),
            ColumnDescriptor::data(
                &labels.total_price,
                ColumnKind::Currency,
                RowField::TotalPrice,
            ),
            ColumnDescriptor::data(&labels.quantity, ColumnKind::Number, RowField::Quantity)
                .styled_by_row(),
            ColumnDescriptor::data(
                &labels.quantity_stock,
                ColumnKind::Number,
                RowField::QuantityInStock,
            ),
            ColumnDescriptor::action(
                &labels.delete_label,
                ColumnKind::ButtonIcon,
                ActionButton {
                    action: RowActionId::DeleteRow,
                    icon: "utility:delete",
                    caption: None,
                    alternative_text: labels.delete_label.clone(),
                    title: labels.delete_label.clone(),
                    variant: ButtonVariant::Neutral,
                },
            ),
        ];

        let admin = ColumnDescriptor::action(
            &labels.view_product,
            ColumnKind::Button,
            ActionButton {
                action: RowActionId::ViewProduct,
                icon: "utility:preview",
                caption: Some(labels.view_product.clone()),
                alternative_text: labels.view_product.clone(),
                title: labels.view_product.clone(),
                variant: ButtonVariant::Brand,
            },
        );

        Self { base, admin }
    }
}

/// Ordered column descriptors as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSchema {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// How many columns dispatch `action`.
    pub fn action_count(&self, action: RowActionId) -> usize {
        self.columns
            .iter()
            .filter(|column| column.action_id() == Some(action))
            .count()
    }

    pub fn has_action(&self, action: RowActionId) -> bool {
        self.action_count(action) > 0
    }
}

impl State for ColumnSchema {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Derive the schema from the column set and whether the viewer is an admin.
///
/// The admin column appears exactly once for admins and never otherwise, regardless of
/// what `set.base` contains.
pub fn build_schema(set: &ColumnSet, is_admin: bool) -> ColumnSchema {
    let admin_action = set.admin.action_id();
    let mut columns: Vec<ColumnDescriptor> = set
        .base
        .iter()
        .filter(|column| admin_action.is_none() || column.action_id() != admin_action)
        .cloned()
        .collect();
    if is_admin {
        columns.push(set.admin.clone());
    }
    ColumnSchema { columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ColumnSet {
        ColumnSet::from_labels(&Labels::default())
    }

    #[test]
    fn base_schema_matches_record_page_layout() {
        let schema = build_schema(&set(), false);
        let kinds: Vec<_> = schema.columns().iter().map(|c| c.kind.as_str()).collect();

        assert_eq!(
            kinds,
            ["text", "currency", "currency", "number", "number", "button-icon"]
        );
        assert!(schema.has_action(RowActionId::DeleteRow));
        assert!(!schema.has_action(RowActionId::ViewProduct));
        assert!(
            schema
                .columns()
                .iter()
                .all(|c| c.style.alignment == Alignment::Left)
        );
    }

    #[test]
    fn only_quantity_is_styled_by_row() {
        let schema = build_schema(&set(), false);
        let styled: Vec<_> = schema
            .columns()
            .iter()
            .filter(|c| c.style.class_from_row)
            .filter_map(|c| c.field)
            .collect();
        assert_eq!(styled, [RowField::Quantity]);
    }

    #[test]
    fn admin_column_is_appended_once() {
        let set = set();
        let first = build_schema(&set, true);
        let second = build_schema(&set, true);

        assert_eq!(first, second);
        assert_eq!(first.action_count(RowActionId::ViewProduct), 1);
        let last = first.columns().last().expect("admin column present");
        assert_eq!(last.kind, ColumnKind::Button);
        let button = last.button.as_ref().expect("admin column is an action");
        assert_eq!(button.variant, ButtonVariant::Brand);
        assert_eq!(button.icon, "utility:preview");
    }

    #[test]
    fn admin_column_in_base_is_not_duplicated() {
        let mut set = set();
        set.base.push(set.admin.clone());

        assert_eq!(
            build_schema(&set, true).action_count(RowActionId::ViewProduct),
            1
        );
        assert_eq!(
            build_schema(&set, false).action_count(RowActionId::ViewProduct),
            0
        );
    }

    #[test]
    fn action_ids_round_trip_their_wire_names() {
        for action in [RowActionId::DeleteRow, RowActionId::ViewProduct] {
            assert_eq!(action.as_str().parse::<RowActionId>(), Ok(action));
        }
        assert_eq!(
            "editRow".parse::<RowActionId>(),
            Err(UnknownRowAction("editRow".to_owned()))
        );
    }
}
