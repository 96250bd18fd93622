//! In-process adapters: the demo backend and the test double.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use flume::{Receiver, Sender};
use log::{debug, info};
use rust_decimal::Decimal;

use crate::{
    CachePolicy, DeleteError, FetchError, LOW_STOCK_MARKER, LineItemDeleter, LineItemId,
    LineItemRow, ParentRecordId, ProductId, RowDataSource, ViewerId, ViewerProfile,
    ViewerProfileSource,
};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<ParentRecordId, Vec<LineItemRow>>,
    watchers: BTreeMap<ParentRecordId, Vec<Sender<()>>>,
    fetch_failures: VecDeque<FetchError>,
    delete_failures: VecDeque<DeleteError>,
    cached_fetches: usize,
    bypass_fetches: usize,
    deleted: Vec<LineItemId>,
}

impl Inner {
    fn notify(&mut self, parent: ParentRecordId) {
        if let Some(watchers) = self.watchers.get_mut(&parent) {
            watchers.retain(|watcher| watcher.send(()).is_ok());
        }
    }
}

/// Line items held in memory, keyed by parent record.
///
/// Edits made elsewhere ([`set_rows`](Self::set_rows)) tick the change feeds of the
/// affected record. Deletes do not: the table that asked for one refreshes on its own.
/// Failures can be scripted ahead of time and are consumed in order.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineItemStore {
    inner: Arc<Mutex<Inner>>,
    latency: Option<Duration>,
}

impl MemoryLineItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch and delete by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_rows(self, parent: ParentRecordId, rows: Vec<LineItemRow>) -> Self {
        self.lock().records.insert(parent, rows);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace `parent`'s rows, as if edited elsewhere.
    pub fn set_rows(&self, parent: ParentRecordId, rows: Vec<LineItemRow>) {
        let mut inner = self.lock();
        inner.records.insert(parent, rows);
        inner.notify(parent);
    }

    pub fn rows(&self, parent: ParentRecordId) -> Vec<LineItemRow> {
        self.lock().records.get(&parent).cloned().unwrap_or_default()
    }

    pub fn fail_next_fetch(&self, err: FetchError) {
        self.lock().fetch_failures.push_back(err);
    }

    pub fn fail_next_delete(&self, err: DeleteError) {
        self.lock().delete_failures.push_back(err);
    }

    pub fn fetch_count(&self, policy: CachePolicy) -> usize {
        let inner = self.lock();
        match policy {
            CachePolicy::Cached => inner.cached_fetches,
            CachePolicy::Bypass => inner.bypass_fetches,
        }
    }

    /// Line items deleted so far, in order.
    pub fn deleted(&self) -> Vec<LineItemId> {
        self.lock().deleted.clone()
    }

    pub fn watcher_count(&self, parent: ParentRecordId) -> usize {
        let mut inner = self.lock();
        match inner.watchers.get_mut(&parent) {
            Some(watchers) => {
                watchers.retain(|watcher| !watcher.is_disconnected());
                watchers.len()
            }
            None => 0,
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// A store pre-filled with one record whose line items include a low-stock product.
    pub fn demo() -> (Self, ParentRecordId) {
        let parent = ParentRecordId::new("006DEMO000001");
        let rows = [
            ("00kDEMO01", "01tDEMO01", "Espresso Machine", 54_900, 2, 12, ""),
            ("00kDEMO02", "01tDEMO02", "Burr Grinder", 18_950, 1, 3, "slds-text-color_success"),
            ("00kDEMO03", "01tDEMO03", "Milk Frother", 4_500, 4, 1, LOW_STOCK_MARKER),
            ("00kDEMO04", "01tDEMO04", "Descaling Kit", 1_299, 6, 40, ""),
        ]
        .into_iter()
        .map(
            |(line_item, product, name, cents, quantity, stock, class)| {
                let unit_price = Decimal::new(cents, 2);
                LineItemRow {
                    product_id: ProductId::new(product),
                    line_item_id: LineItemId::new(line_item),
                    product_name: name.to_owned(),
                    unit_price,
                    total_price: unit_price * Decimal::from(quantity),
                    quantity,
                    quantity_in_stock: stock,
                    quantity_indicator_class: class.to_owned(),
                }
            },
        )
        .collect();

        (Self::new().with_rows(parent, rows), parent)
    }
}

#[async_trait]
impl RowDataSource for MemoryLineItemStore {
    async fn fetch(
        &self,
        parent: ParentRecordId,
        policy: CachePolicy,
    ) -> Result<Vec<LineItemRow>, FetchError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        match policy {
            CachePolicy::Cached => inner.cached_fetches += 1,
            CachePolicy::Bypass => inner.bypass_fetches += 1,
        }
        if let Some(err) = inner.fetch_failures.pop_front() {
            debug!("Scripted fetch failure for {parent}: {err}");
            return Err(err);
        }
        Ok(inner.records.get(&parent).cloned().unwrap_or_default())
    }

    fn changes(&self, parent: ParentRecordId) -> Option<Receiver<()>> {
        let (send, recv) = flume::unbounded();
        self.lock().watchers.entry(parent).or_default().push(send);
        Some(recv)
    }
}

#[async_trait]
impl LineItemDeleter for MemoryLineItemStore {
    async fn delete(&self, line_item: LineItemId) -> Result<(), DeleteError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        if let Some(err) = inner.delete_failures.pop_front() {
            debug!("Scripted delete failure for {line_item}: {err}");
            return Err(err);
        }

        let owner = inner.records.iter_mut().find_map(|(parent, rows)| {
            let position = rows.iter().position(|row| row.line_item_id == line_item)?;
            rows.remove(position);
            Some(*parent)
        });
        let Some(parent) = owner else {
            return Err(DeleteError::NotFound(line_item));
        };

        info!("Deleted line item {line_item} of {parent}");
        inner.deleted.push(line_item);
        Ok(())
    }
}

/// A profile source with fixed answers: one per listed viewer, a default for everyone else.
#[derive(Debug)]
pub struct StaticProfileSource {
    result: Result<ViewerProfile, FetchError>,
    per_viewer: BTreeMap<ViewerId, Result<ViewerProfile, FetchError>>,
    calls: AtomicUsize,
}

impl StaticProfileSource {
    pub fn new(profile_name: &str) -> Self {
        Self::with_result(Ok(ViewerProfile::new(profile_name)))
    }

    pub fn failing(err: FetchError) -> Self {
        Self::with_result(Err(err))
    }

    pub fn with_result(result: Result<ViewerProfile, FetchError>) -> Self {
        Self {
            result,
            per_viewer: BTreeMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer `viewer` with `result` instead of the default.
    pub fn with_viewer(
        mut self,
        viewer: ViewerId,
        result: Result<ViewerProfile, FetchError>,
    ) -> Self {
        self.per_viewer.insert(viewer, result);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViewerProfileSource for StaticProfileSource {
    async fn fetch(&self, viewer: ViewerId) -> Result<ViewerProfile, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("Static profile lookup for {viewer}");
        self.per_viewer
            .get(&viewer)
            .unwrap_or(&self.result)
            .clone()
    }
}
