//! Line items of a parent record: the table controller, the admin-gated column schema and
//! the adapters it talks to.

mod config;
mod error;
mod http;
mod ids;
mod labels;
mod line_items;
mod memory;
mod navigation;
mod profile;
mod row;
mod schema;
mod source;

pub use config::{AppConfig, Backend};
pub use error::{ConfigError, DeleteError, FetchError, RowError, TableError, UnknownRowAction};
pub use http::HttpLineItemApi;
pub use ids::{LineItemId, ParentRecordId, ProductId, ViewerId};
pub use labels::Labels;
pub use line_items::{
    BindParentRecordCommand, CellView, HeaderView, LineItemTable, RefreshLineItemsCommand,
    RowActionCommand, RowData, RowEffect, RowSubscription, RowView, TableBody, TablePhase,
    TableView, UnbindParentRecordCommand, install, mount, render, snapshot,
};
pub use memory::{MemoryLineItemStore, StaticProfileSource};
pub use navigation::{ChannelNavigator, NavigationIntent, NavigationMode, Navigator, TargetType};
pub use profile::{
    ADMIN_PROFILE_MARKER, ProfileResolution, ProfileState, ResolveViewerProfileCommand,
    ViewerProfile, default_schema,
};
pub use row::{LOW_STOCK_MARKER, LineItemRow, validate_rows};
pub use schema::{
    ActionButton, Alignment, ButtonVariant, CellStyle, ColumnDescriptor, ColumnKind, ColumnSchema,
    ColumnSet, RowActionId, RowField, build_schema,
};
pub use source::{
    CachePolicy, LineItemDeleter, LineItemServices, RowDataSource, ViewerProfileSource,
};
