use thiserror::Error;

use crate::LineItemId;

/// A row batch that failed validation at the data-source boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row {position} has no line item id")]
    MissingLineItemId { position: usize },
    #[error("line item {line_item} has no product id")]
    MissingProductId { line_item: LineItemId },
    #[error("line item {line_item} appears more than once")]
    DuplicateLineItem { line_item: LineItemId },
}

/// Row data or viewer profile could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid row data: {0}")]
    InvalidRow(#[from] RowError),
    #[error("{0}")]
    Other(String),
}

/// A line item could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("line item {0} no longer exists")]
    NotFound(LineItemId),
    #[error("{0}")]
    Other(String),
}

/// The error surfaced in the table's rendered state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Failed to load line items: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to delete line item: {0}")]
    Delete(#[from] DeleteError),
}

/// A row action id with no defined behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown row action `{0}`")]
pub struct UnknownRowAction(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read label catalog {path}: {source}")]
    ReadLabels {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse label catalog: {0}")]
    ParseLabels(#[from] serde_json::Error),
}
