//! Integration tests for the line items panel.

mod common;

use common::{ADMIN, STANDARD, mounted_state, panel_harness, parent, row, step_until};
use kittest::Queryable;
use lineitems_business::{
    CachePolicy, FetchError, LOW_STOCK_MARKER, LineItemId, MemoryLineItemStore, ProfileState,
};

#[tokio::test]
async fn test_rows_and_headers_are_rendered() {
    let store = MemoryLineItemStore::new()
        .with_rows(parent(), vec![row("1", 2, "ok"), row("2", 5, "ok")]);
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "rows", |h| h.query_by_label("Product 2").is_some()).await;

    for header in [
        "Product Name",
        "Unit Price",
        "Total Price",
        "Quantity",
        "Quantity In Stock",
        "Delete",
    ] {
        assert!(
            harness.query_by_label(header).is_some(),
            "missing header {header}"
        );
    }
    assert!(harness.query_by_label("Product 1").is_some());
    assert!(harness.query_by_label("25.00").is_some());
    assert!(harness.query_by_label_contains("low on stock").is_none());
    assert_eq!(harness.query_all_by_label("🗑").count(), 2);
}

#[tokio::test]
async fn test_low_stock_row_shows_warning_banner() {
    let store = MemoryLineItemStore::new().with_rows(
        parent(),
        vec![row("1", 2, "ok"), row("2", 0, LOW_STOCK_MARKER)],
    );
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "warning banner", |h| {
        h.query_by_label_contains("low on stock").is_some()
    })
    .await;
    assert!(harness.query_by_label("Product 2").is_some());
}

#[tokio::test]
async fn test_empty_record_shows_no_data_message() {
    let store = MemoryLineItemStore::new().with_rows(parent(), Vec::new());
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "no data message", |h| {
        h.query_by_label("No products on this record yet.").is_some()
    })
    .await;
    assert!(harness.query_by_label("Product Name").is_none());
}

#[tokio::test]
async fn test_fetch_failure_shows_error() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 1, "ok")]);
    store.fail_next_fetch(FetchError::Status(500));
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "error message", |h| {
        h.query_by_label("Failed to load line items: server returned status 500")
            .is_some()
    })
    .await;
    assert!(harness.query_by_label("Product 1").is_none());
}

#[tokio::test]
async fn test_refresh_button_refetches_bypassing_cache() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 1, "ok")]);
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "rows", |h| h.query_by_label("Product 1").is_some()).await;
    assert_eq!(store.fetch_count(CachePolicy::Bypass), 0);

    harness.get_by_label("Refresh").click();
    step_until(&mut harness, "refresh fetch", |_| {
        store.fetch_count(CachePolicy::Bypass) == 1
    })
    .await;
}

#[tokio::test]
async fn test_delete_click_removes_row() {
    let store = MemoryLineItemStore::new()
        .with_rows(parent(), vec![row("1", 1, "ok"), row("2", 1, "ok")]);
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "rows", |h| h.query_by_label("Product 1").is_some()).await;

    harness
        .query_all_by_label("🗑")
        .next()
        .expect("delete button for the first row")
        .click();
    step_until(&mut harness, "row removal", |h| {
        h.query_by_label("Product 1").is_none()
    })
    .await;

    assert!(harness.query_by_label("Product 2").is_some());
    assert_eq!(store.deleted(), [LineItemId::new("00k1")]);
}

#[tokio::test]
async fn test_view_product_is_admin_only() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 1, "ok")]);
    let mut harness = panel_harness(mounted_state(&store, STANDARD));

    step_until(&mut harness, "resolved profile and rows", |h| {
        h.state().ctx.state::<ProfileState>().profile().is_some()
            && h.query_by_label("Product 1").is_some()
    })
    .await;
    harness.step();

    assert!(harness.query_by_label("View Product").is_none());
    assert!(harness.query_by_label("👁 View Product").is_none());
}

#[tokio::test]
async fn test_admin_view_product_emits_navigation() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 1, "ok")]);
    let mut harness = panel_harness(mounted_state(&store, ADMIN));

    step_until(&mut harness, "view product button", |h| {
        h.query_by_label("👁 View Product").is_some()
    })
    .await;
    assert!(harness.query_by_label("View Product").is_some());

    harness.get_by_label("👁 View Product").click();
    step_until(&mut harness, "navigation intent", |h| {
        h.state().last_navigation.is_some()
    })
    .await;

    let intent = harness.state().last_navigation.expect("navigation intent");
    assert_eq!(intent.record_path(), "/lightning/r/Product2/01t1/view");
    assert!(store.deleted().is_empty());
}
