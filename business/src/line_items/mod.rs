//! The line items table: controller, subscription, commands and rendering.

mod commands;
mod subscription;
mod table;
mod view;

pub use commands::{
    BindParentRecordCommand, RefreshLineItemsCommand, RowActionCommand, UnbindParentRecordCommand,
};
pub use subscription::RowSubscription;
pub use table::{LineItemTable, RowData, RowEffect, TablePhase};
pub use view::{CellView, HeaderView, RowView, TableBody, TableView, render};

use lineitems_states::StateCtx;

use crate::{
    ColumnSchema, Labels, LineItemServices, ParentRecordId, ProfileState,
    ResolveViewerProfileCommand, ViewerId, default_schema,
};

/// Register every state the line items page needs on `ctx`.
pub fn install(ctx: &mut StateCtx, services: LineItemServices, labels: Labels) {
    ctx.add_state(default_schema(&labels));
    ctx.add_state(labels);
    ctx.add_state(services);
    ctx.add_state(ProfileState::default());
    ctx.add_state(LineItemTable::default());
}

/// Install the page and kick off both subscriptions for `parent` as seen by `viewer`.
pub fn mount(
    ctx: &mut StateCtx,
    services: LineItemServices,
    labels: Labels,
    parent: ParentRecordId,
    viewer: ViewerId,
) {
    install(ctx, services, labels);
    ctx.dispatch(ResolveViewerProfileCommand { viewer });
    ctx.dispatch(BindParentRecordCommand { parent });
}

/// The current table as the widget should draw it.
pub fn snapshot(ctx: &StateCtx) -> Option<TableView> {
    let table = ctx.try_state::<LineItemTable>().ok()?;
    let schema = ctx.try_state::<ColumnSchema>().ok()?;
    let labels = ctx.try_state::<Labels>().ok()?;
    Some(render(table, schema, labels))
}
