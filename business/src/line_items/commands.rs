use lineitems_states::{Command, StateCtx};
use log::{debug, error, info, warn};

use crate::{
    ColumnSchema, LineItemRow, LineItemServices, LineItemTable, ParentRecordId, RowEffect,
    RowSubscription,
};

/// Bind the table to `parent` and start its row subscription.
///
/// Binding to the record the table already follows is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct BindParentRecordCommand {
    pub parent: ParentRecordId,
}

impl Command for BindParentRecordCommand {
    fn run(self, ctx: &mut StateCtx) {
        let Ok(source) = ctx
            .try_state::<LineItemServices>()
            .map(|services| services.rows.clone())
        else {
            warn!("No line item services registered, cannot bind {}", self.parent);
            return;
        };

        match ctx.try_state_mut::<LineItemTable>() {
            Ok(table) => {
                if !table.bind(self.parent) {
                    debug!("Table already bound to {}", self.parent);
                    return;
                }
            }
            Err(err) => {
                warn!("Cannot bind {}: {err}", self.parent);
                return;
            }
        }

        let subscription = RowSubscription::start(ctx, self.parent, source);
        ctx.state_mut::<LineItemTable>().attach(subscription);
    }
}

/// Cancel the row subscription and forget the parent record.
#[derive(Debug, Clone, Copy)]
pub struct UnbindParentRecordCommand;

impl Command for UnbindParentRecordCommand {
    fn run(self, ctx: &mut StateCtx) {
        ctx.update::<LineItemTable>(LineItemTable::unbind);
    }
}

/// Re-fetch the rows, bypassing any cache.
#[derive(Debug, Clone, Copy)]
pub struct RefreshLineItemsCommand;

impl Command for RefreshLineItemsCommand {
    fn run(self, ctx: &mut StateCtx) {
        match ctx.try_state::<LineItemTable>() {
            Ok(table) => {
                if !table.refresh() {
                    warn!("Refresh ignored: table is not bound to a live subscription");
                }
            }
            Err(err) => warn!("Cannot refresh: {err}"),
        }
    }
}

/// A row button was clicked.
#[derive(Debug, Clone)]
pub struct RowActionCommand {
    pub action: String,
    pub row: LineItemRow,
}

impl RowActionCommand {
    pub fn new(action: &str, row: LineItemRow) -> Self {
        Self {
            action: action.to_owned(),
            row,
        }
    }
}

impl Command for RowActionCommand {
    fn run(self, ctx: &mut StateCtx) {
        let Ok(services) = ctx.try_state::<LineItemServices>().cloned() else {
            warn!("No line item services registered, ignoring {}", self.action);
            return;
        };
        let schema = ctx.try_state::<ColumnSchema>().cloned().unwrap_or_default();

        let (effect, origin) = match ctx.try_state_mut::<LineItemTable>() {
            Ok(table) => (
                table.on_row_action(&self.action, &self.row, &schema),
                table.subscription_id(),
            ),
            Err(err) => {
                warn!("Cannot run {}: {err}", self.action);
                return;
            }
        };

        match effect {
            RowEffect::Delete(line_item) => {
                info!("Deleting line item {line_item}");
                let deleter = services.deleter;
                let updater = ctx.updater();
                ctx.spawn::<LineItemTable, _, _>(move |_task| async move {
                    let result = deleter.delete(line_item).await;
                    if let Err(err) = &result {
                        error!("Failed to delete line item {line_item}: {err}");
                    }
                    updater.update::<LineItemTable>(move |table| {
                        if table.on_delete_finished(origin, line_item, result) == RowEffect::Refresh
                            && !table.refresh()
                        {
                            warn!("Deleted {line_item} but the table has no live subscription");
                        }
                    });
                });
            }
            RowEffect::Navigate(intent) => {
                info!("Navigating to {}", intent.record_path());
                services.navigator.navigate(intent);
            }
            RowEffect::Refresh => {
                ctx.dispatch(RefreshLineItemsCommand);
            }
            RowEffect::None => {}
        }
    }
}
