//! Shared setup for the line items integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use flume::Receiver;
use lineitems_business::{
    ChannelNavigator, FetchError, Labels, LineItemId, LineItemRow, LineItemServices,
    MemoryLineItemStore, NavigationIntent, ParentRecordId, ProductId, StaticProfileSource,
    ViewerId, mount,
};
use lineitems_states::StateCtx;
use rust_decimal::Decimal;

pub const LOW_STOCK: &str = "slds-text-color_error";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn parent() -> ParentRecordId {
    ParentRecordId::new("006TEST0001")
}

pub fn viewer() -> ViewerId {
    ViewerId::new("005TEST0001")
}

pub fn row(id: &str, quantity: i64, class: &str) -> LineItemRow {
    let unit_price = Decimal::new(999, 2);
    LineItemRow {
        product_id: ProductId::new(&format!("01t{id}")),
        line_item_id: LineItemId::new(&format!("00k{id}")),
        product_name: format!("Product {id}"),
        unit_price,
        total_price: unit_price * Decimal::from(quantity),
        quantity,
        quantity_in_stock: quantity + 3,
        quantity_indicator_class: class.to_owned(),
    }
}

/// A mounted line items page backed by the in-memory store.
pub struct Page {
    pub ctx: StateCtx,
    pub store: MemoryLineItemStore,
    pub profiles: Arc<StaticProfileSource>,
    pub intents: Receiver<NavigationIntent>,
}

impl Page {
    pub fn mount(rows: Vec<LineItemRow>, profile: Result<&str, FetchError>) -> Self {
        Self::mount_store(MemoryLineItemStore::new().with_rows(parent(), rows), profile)
    }

    pub fn mount_store(store: MemoryLineItemStore, profile: Result<&str, FetchError>) -> Self {
        let profiles = match profile {
            Ok(name) => StaticProfileSource::new(name),
            Err(err) => StaticProfileSource::failing(err),
        };
        Self::mount_with(store, profiles)
    }

    pub fn mount_with(store: MemoryLineItemStore, profiles: StaticProfileSource) -> Self {
        init_logging();
        let profiles = Arc::new(profiles);
        let (navigator, intents) = ChannelNavigator::new();
        let shared = Arc::new(store.clone());
        let services =
            LineItemServices::new(shared.clone(), shared, profiles.clone(), Arc::new(navigator));

        let mut ctx = StateCtx::new();
        mount(&mut ctx, services, Labels::default(), parent(), viewer());

        Self {
            ctx,
            store,
            profiles,
            intents,
        }
    }

    /// Sync until `done` holds, failing the test after two seconds.
    pub async fn wait_until(&mut self, what: &str, mut done: impl FnMut(&StateCtx) -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            self.ctx.sync();
            if done(&self.ctx) {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "timed out waiting for {what}"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Give in-flight tasks a moment, syncing along the way.
    pub async fn settle(&mut self) {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.ctx.sync();
        }
    }
}
