//! Push subscription that keeps a [`LineItemTable`] in sync with its parent record.
//!
//! The subscription task fetches once on start, then again whenever
//! - a refresh is triggered (cache bypassed), or
//! - the source's change feed ticks.
//!
//! Results are posted through the [`Updater`] tagged with the task id, so results of a
//! subscription that was replaced in the meantime never reach the table.

use std::sync::Arc;

use flume::{Receiver, Sender};
use lineitems_states::{StateCtx, TaskHandle, TaskId, Updater};
use log::{debug, error, info};

use crate::{
    CachePolicy, FetchError, LineItemRow, LineItemTable, ParentRecordId, RowDataSource,
    validate_rows,
};

/// Handle to a running row subscription. Dropping it cancels the task.
#[derive(Debug)]
pub struct RowSubscription {
    task: TaskHandle,
    refresh: Sender<()>,
}

impl RowSubscription {
    /// Spawn the subscription task for `parent` on `ctx`.
    pub fn start(
        ctx: &mut StateCtx,
        parent: ParentRecordId,
        source: Arc<dyn RowDataSource>,
    ) -> Self {
        let (refresh, refresh_recv) = flume::unbounded();
        let changes = source.changes(parent);
        let updater = ctx.updater();

        let task = ctx.spawn::<LineItemTable, _, _>(move |task| {
            run(task, parent, source, refresh_recv, changes, updater)
        });
        info!("Started row subscription {:?} for record {parent}", task.id());

        Self { task, refresh }
    }

    pub fn id(&self) -> TaskId {
        self.task.id()
    }

    /// Trigger a cache-bypassing re-fetch. Returns `false` once the task has stopped.
    pub fn refresh(&self) -> bool {
        self.refresh.send(()).is_ok()
    }
}

impl Drop for RowSubscription {
    fn drop(&mut self) {
        debug!("Cancelling row subscription {:?}", self.task.id());
        self.task.cancel();
    }
}

enum Wake {
    Cancelled,
    Refresh,
    Changed,
    FeedClosed,
}

async fn run(
    task: TaskHandle,
    parent: ParentRecordId,
    source: Arc<dyn RowDataSource>,
    refresh: Receiver<()>,
    mut changes: Option<Receiver<()>>,
    updater: Updater,
) {
    let id = task.id();
    let mut policy = CachePolicy::Cached;

    loop {
        let result = tokio::select! {
            biased;
            _ = task.cancelled() => break,
            result = fetch(source.as_ref(), parent, policy) => result,
        };
        if let Err(err) = &result {
            error!("Failed to fetch line items of {parent}: {err}");
        }
        updater.update::<LineItemTable>(move |table| {
            table.on_subscription_rows(id, result);
        });

        loop {
            let wake = tokio::select! {
                biased;
                _ = task.cancelled() => Wake::Cancelled,
                next = refresh.recv_async() => match next {
                    Ok(()) => Wake::Refresh,
                    Err(_) => Wake::Cancelled,
                },
                wake = next_change(changes.as_ref()) => wake,
            };
            match wake {
                Wake::Cancelled => {
                    debug!("Row subscription {id:?} stopped");
                    return;
                }
                Wake::Refresh => {
                    // Collapse refreshes queued while the previous fetch was running.
                    refresh.drain().for_each(drop);
                    policy = CachePolicy::Bypass;
                    break;
                }
                Wake::Changed => {
                    policy = CachePolicy::Cached;
                    break;
                }
                Wake::FeedClosed => {
                    debug!("Change feed of {parent} closed");
                    changes = None;
                }
            }
        }
    }
    debug!("Row subscription {id:?} stopped");
}

async fn fetch(
    source: &dyn RowDataSource,
    parent: ParentRecordId,
    policy: CachePolicy,
) -> Result<Vec<LineItemRow>, FetchError> {
    debug!("Fetching line items of {parent} ({policy:?})");
    let rows = source.fetch(parent, policy).await?;
    validate_rows(&rows)?;
    Ok(rows)
}

async fn next_change(changes: Option<&Receiver<()>>) -> Wake {
    match changes {
        Some(changes) => match changes.recv_async().await {
            Ok(()) => {
                changes.drain().for_each(drop);
                Wake::Changed
            }
            Err(_) => Wake::FeedClosed,
        },
        None => std::future::pending().await,
    }
}
