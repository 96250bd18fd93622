//! Localized label catalog, loaded once at startup.

use std::any::Any;
use std::path::Path;

use lineitems_states::State;
use log::info;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Display strings for the line items table.
///
/// Missing keys in a catalog file fall back to the built-in English text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub product_name: String,
    pub unit_price: String,
    pub total_price: String,
    pub quantity: String,
    pub quantity_stock: String,
    pub delete_label: String,
    pub view_product: String,
    pub no_product_message: String,
    pub warning_quantity_message: String,
    pub refresh: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            product_name: "Product Name".to_owned(),
            unit_price: "Unit Price".to_owned(),
            total_price: "Total Price".to_owned(),
            quantity: "Quantity".to_owned(),
            quantity_stock: "Quantity In Stock".to_owned(),
            delete_label: "Delete".to_owned(),
            view_product: "View Product".to_owned(),
            no_product_message: "No products on this record yet.".to_owned(),
            warning_quantity_message:
                "Some products are low on stock. Check the highlighted quantities.".to_owned(),
            refresh: "Refresh".to_owned(),
        }
    }
}

impl Labels {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading label catalog from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadLabels {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl State for Labels {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
