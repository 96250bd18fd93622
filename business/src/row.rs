//! The line item row as delivered by a [`RowDataSource`](crate::RowDataSource).

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LineItemId, ProductId, RowError};

/// Substring of `quantity_indicator_class` that flags critically low stock.
pub const LOW_STOCK_MARKER: &str = "slds-text-color_error";

/// One line item. Price and stock fields are computed upstream and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRow {
    pub product_id: ProductId,
    #[serde(alias = "opportunityLineItemId")]
    pub line_item_id: LineItemId,
    #[serde(default)]
    pub product_name: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub quantity: i64,
    pub quantity_in_stock: i64,
    /// Styling tag for the quantity cell.
    #[serde(alias = "colorQuantity", default)]
    pub quantity_indicator_class: String,
}

impl LineItemRow {
    pub fn is_low_stock(&self) -> bool {
        self.quantity_indicator_class.contains(LOW_STOCK_MARKER)
    }
}

/// Check a freshly fetched batch before it reaches the table.
pub fn validate_rows(rows: &[LineItemRow]) -> Result<(), RowError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        if row.line_item_id.is_blank() {
            return Err(RowError::MissingLineItemId { position });
        }
        if row.product_id.is_blank() {
            return Err(RowError::MissingProductId {
                line_item: row.line_item_id,
            });
        }
        if !seen.insert(row.line_item_id) {
            return Err(RowError::DuplicateLineItem {
                line_item: row.line_item_id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn row(id: &str, quantity: i64, class: &str) -> LineItemRow {
        LineItemRow {
            product_id: ProductId::new(&format!("01t-{id}")),
            line_item_id: LineItemId::new(id),
            product_name: format!("Product {id}"),
            unit_price: Decimal::new(1250, 2),
            total_price: Decimal::new(1250, 2) * Decimal::from(quantity),
            quantity,
            quantity_in_stock: quantity * 10,
            quantity_indicator_class: class.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;

    #[test]
    fn low_stock_is_a_substring_match() {
        assert!(row("1", 0, "slds-text-color_error").is_low_stock());
        assert!(row("1", 0, "bold slds-text-color_error wide").is_low_stock());
        assert!(!row("1", 2, "ok").is_low_stock());
        assert!(!row("1", 2, "").is_low_stock());
    }

    #[test]
    fn decodes_wire_aliases_and_numeric_prices() {
        let json = r#"{
            "productId": "01t1",
            "opportunityLineItemId": "00k1",
            "productName": "Widget",
            "unitPrice": 12.5,
            "totalPrice": "25.00",
            "quantity": 2,
            "quantityInStock": 40,
            "colorQuantity": "slds-text-color_success"
        }"#;

        let row: LineItemRow = serde_json::from_str(json).expect("row should decode");
        assert_eq!(row.line_item_id, LineItemId::new("00k1"));
        assert_eq!(row.unit_price, Decimal::new(125, 1));
        assert_eq!(row.total_price, Decimal::new(2500, 2));
        assert_eq!(row.quantity_indicator_class, "slds-text-color_success");
        assert!(!row.is_low_stock());
    }

    #[test]
    fn validation_rejects_blank_ids_and_duplicates() {
        let mut blank = row("1", 1, "ok");
        blank.line_item_id = LineItemId::new("");
        assert_eq!(
            validate_rows(&[row("0", 1, "ok"), blank]),
            Err(RowError::MissingLineItemId { position: 1 })
        );

        assert_eq!(
            validate_rows(&[row("1", 1, "ok"), row("1", 3, "ok")]),
            Err(RowError::DuplicateLineItem {
                line_item: LineItemId::new("1")
            })
        );

        assert!(validate_rows(&[]).is_ok());
        assert!(validate_rows(&[row("1", 0, "ok"), row("2", 5, "ok")]).is_ok());
    }

    #[test]
    fn validation_leaves_quantities_alone() {
        let mut negative = row("7", 1, "ok");
        negative.quantity = -1;
        assert_eq!(validate_rows(&[row("1", 0, LOW_STOCK_MARKER), negative]), Ok(()));
    }
}
