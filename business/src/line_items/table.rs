//! The line items table state machine.
//!
//! Every transition is a plain method on [`LineItemTable`] that returns the side effect the
//! caller has to perform, if any. Commands own the IO; this file owns the rules.

use std::any::Any;
use std::collections::HashSet;

use lineitems_states::{State, TaskId};
use log::{debug, info, warn};

use crate::{
    ColumnSchema, DeleteError, FetchError, LineItemId, LineItemRow, NavigationIntent,
    ParentRecordId, RowActionId, RowSubscription, TableError,
};

/// Row payload of the table. `Empty` is a successful fetch with no rows and is distinct
/// from `Unset`, which means nothing usable has been loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowData {
    #[default]
    Unset,
    Empty,
    Populated(Vec<LineItemRow>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    Unset,
    Empty,
    Populated,
    Failed,
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEffect {
    None,
    Delete(LineItemId),
    Navigate(NavigationIntent),
    Refresh,
}

#[derive(Debug, Default)]
pub struct LineItemTable {
    parent: Option<ParentRecordId>,
    rows: RowData,
    last_error: Option<TableError>,
    warning_active: bool,
    subscription: Option<RowSubscription>,
    deleting: HashSet<LineItemId>,
}

impl LineItemTable {
    pub fn parent(&self) -> Option<ParentRecordId> {
        self.parent
    }

    pub fn rows(&self) -> &RowData {
        &self.rows
    }

    /// The rows currently shown; empty unless populated.
    pub fn row_slice(&self) -> &[LineItemRow] {
        match &self.rows {
            RowData::Populated(rows) => rows,
            RowData::Unset | RowData::Empty => &[],
        }
    }

    pub fn last_error(&self) -> Option<&TableError> {
        self.last_error.as_ref()
    }

    pub fn warning_active(&self) -> bool {
        self.warning_active
    }

    pub fn phase(&self) -> TablePhase {
        if self.last_error.is_some() {
            return TablePhase::Failed;
        }
        match self.rows {
            RowData::Unset => TablePhase::Unset,
            RowData::Empty => TablePhase::Empty,
            RowData::Populated(_) => TablePhase::Populated,
        }
    }

    pub fn is_deleting(&self, line_item: LineItemId) -> bool {
        self.deleting.contains(&line_item)
    }

    pub fn subscription_id(&self) -> Option<TaskId> {
        self.subscription.as_ref().map(RowSubscription::id)
    }

    /// Point the table at `parent`, dropping everything loaded for the previous record.
    ///
    /// Returns `false` when the table is already bound to `parent` with a live subscription.
    pub fn bind(&mut self, parent: ParentRecordId) -> bool {
        if self.parent == Some(parent) && self.subscription.is_some() {
            return false;
        }
        info!("Binding line items table to record {parent}");
        self.reset();
        self.parent = Some(parent);
        true
    }

    /// Install the subscription feeding this table. The previous one is cancelled.
    pub fn attach(&mut self, subscription: RowSubscription) {
        debug!("Attaching row subscription {:?}", subscription.id());
        self.subscription = Some(subscription);
    }

    /// Tear down the subscription and forget the parent record.
    pub fn unbind(&mut self) {
        if let Some(parent) = self.parent {
            info!("Unbinding line items table from record {parent}");
        }
        self.reset();
        self.parent = None;
    }

    fn reset(&mut self) {
        self.subscription = None;
        self.rows = RowData::Unset;
        self.last_error = None;
        self.warning_active = false;
        self.deleting.clear();
    }

    /// Apply a fetch result.
    pub fn on_rows_updated(&mut self, result: Result<Vec<LineItemRow>, FetchError>) {
        match result {
            Ok(rows) if rows.is_empty() => {
                self.rows = RowData::Empty;
                self.last_error = None;
                self.warning_active = false;
            }
            Ok(rows) => {
                self.warning_active = rows.iter().any(LineItemRow::is_low_stock);
                self.rows = RowData::Populated(rows);
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err.into());
                self.rows = RowData::Unset;
                self.warning_active = false;
            }
        }
    }

    /// Apply a fetch result delivered by subscription `task`. Results of a subscription that
    /// is no longer attached are dropped. Returns whether the result was applied.
    pub fn on_subscription_rows(
        &mut self,
        task: TaskId,
        result: Result<Vec<LineItemRow>, FetchError>,
    ) -> bool {
        if self.subscription_id() != Some(task) {
            debug!("Dropping rows from stale subscription {task:?}");
            return false;
        }
        self.on_rows_updated(result);
        true
    }

    /// Dispatch the row action named `action` on `row`.
    ///
    /// Unknown names are logged and ignored.
    pub fn on_row_action(
        &mut self,
        action: &str,
        row: &LineItemRow,
        schema: &ColumnSchema,
    ) -> RowEffect {
        match action.parse::<RowActionId>() {
            Ok(action) => self.on_action(action, row, schema),
            Err(err) => {
                warn!("Ignoring row action on {}: {err}", row.line_item_id);
                RowEffect::None
            }
        }
    }

    pub fn on_action(
        &mut self,
        action: RowActionId,
        row: &LineItemRow,
        schema: &ColumnSchema,
    ) -> RowEffect {
        match action {
            RowActionId::DeleteRow => {
                if !self.deleting.insert(row.line_item_id) {
                    debug!("Delete of {} already in flight", row.line_item_id);
                    return RowEffect::None;
                }
                RowEffect::Delete(row.line_item_id)
            }
            RowActionId::ViewProduct => {
                if !schema.has_action(RowActionId::ViewProduct) {
                    warn!(
                        "Ignoring viewProduct on {}: column not available to this viewer",
                        row.line_item_id
                    );
                    return RowEffect::None;
                }
                RowEffect::Navigate(NavigationIntent::view_product(row.product_id))
            }
        }
    }

    /// Apply the outcome of a delete started by [`RowEffect::Delete`] while subscription
    /// `origin` was attached. Outcomes from an earlier binding are dropped.
    ///
    /// Success asks for exactly one refresh. Failure clears the rows and records the error.
    pub fn on_delete_finished(
        &mut self,
        origin: Option<TaskId>,
        line_item: LineItemId,
        result: Result<(), DeleteError>,
    ) -> RowEffect {
        if self.subscription_id() != origin {
            debug!("Dropping delete result for {line_item} from a previous binding");
            return RowEffect::None;
        }
        self.deleting.remove(&line_item);
        match result {
            Ok(()) => RowEffect::Refresh,
            Err(err) => {
                self.last_error = Some(err.into());
                self.rows = RowData::Unset;
                self.warning_active = false;
                RowEffect::None
            }
        }
    }

    /// Ask the attached subscription for a cache-bypassing re-fetch.
    ///
    /// Returns `false` when nothing is attached.
    pub fn refresh(&self) -> bool {
        match &self.subscription {
            Some(subscription) => subscription.refresh(),
            None => {
                debug!("Refresh requested without a row subscription");
                false
            }
        }
    }
}

impl State for LineItemTable {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
