//! Shared setup for the UI integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use egui_kittest::Harness;
use lineitems_business::{
    ChannelNavigator, Labels, LineItemId, LineItemRow, LineItemServices, MemoryLineItemStore,
    ParentRecordId, ProductId, StaticProfileSource, ViewerId,
};
use lineitems_ui::state::State;
use lineitems_ui::widgets::line_items_panel;
use rust_decimal::Decimal;

pub const ADMIN: &str = "System Administrator";
pub const STANDARD: &str = "Standard User";

pub fn parent() -> ParentRecordId {
    ParentRecordId::new("006TEST0001")
}

pub fn row(id: &str, quantity: i64, class: &str) -> LineItemRow {
    let unit_price = Decimal::new(1250, 2);
    LineItemRow {
        product_id: ProductId::new(&format!("01t{id}")),
        line_item_id: LineItemId::new(&format!("00k{id}")),
        product_name: format!("Product {id}"),
        unit_price,
        total_price: unit_price * Decimal::from(quantity),
        quantity,
        quantity_in_stock: quantity * 10,
        quantity_indicator_class: class.to_owned(),
    }
}

/// A `State` mounted on `store` with a fixed viewer profile.
pub fn mounted_state(store: &MemoryLineItemStore, profile_name: &str) -> State {
    let _ = env_logger::builder().is_test(true).try_init();

    let (navigator, navigation) = ChannelNavigator::new();
    let shared = Arc::new(store.clone());
    let services = LineItemServices::new(
        shared.clone(),
        shared,
        Arc::new(StaticProfileSource::new(profile_name)),
        Arc::new(navigator),
    );

    State::mounted(
        services,
        Labels::default(),
        parent(),
        ViewerId::new("005TEST0001"),
        navigation,
    )
}

/// A harness drawing only the line items panel, syncing the state every frame.
pub fn panel_harness<'a>(state: State) -> Harness<'a, State> {
    Harness::new_ui_state(
        |ui, state: &mut State| {
            state.sync();
            line_items_panel(&mut state.ctx, ui);
        },
        state,
    )
}

/// Step the harness until `done` holds, failing the test after two seconds.
///
/// Sleeping between frames lets the spawned fetch, delete and profile tasks run.
pub async fn step_until<'a, T>(
    harness: &mut Harness<'a, T>,
    what: &str,
    mut done: impl FnMut(&Harness<'a, T>) -> bool,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        harness.step();
        if done(harness) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {what}"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
