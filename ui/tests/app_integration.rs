//! Tests for the whole window: heading, table and status bar.

mod common;

use common::{ADMIN, mounted_state, parent, row, step_until};
use egui_kittest::Harness;
use kittest::Queryable;
use lineitems_business::MemoryLineItemStore;
use lineitems_ui::LineItemsApp;

#[tokio::test]
async fn test_app_renders_heading_table_and_status() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 3, "ok")]);
    let state = mounted_state(&store, ADMIN);
    let app = LineItemsApp::builder().state(state).build();
    let mut harness = Harness::new_eframe(|_| app);

    step_until(&mut harness, "rows", |h| h.query_by_label("Product 1").is_some()).await;

    assert!(harness.query_by_label("Line Items").is_some());
    assert!(harness.query_by_label("Record 006TEST0001").is_some());
    step_until(&mut harness, "profile in status bar", |h| {
        h.query_by_label("Profile: System Administrator").is_some()
    })
    .await;
}

#[tokio::test]
async fn test_app_reports_opened_record_page() {
    let store = MemoryLineItemStore::new().with_rows(parent(), vec![row("1", 3, "ok")]);
    let mut state = mounted_state(&store, ADMIN);
    state.record_page_base_url = Some("https://example.my.site.com/".to_owned());
    let app = LineItemsApp::builder()
        .state(state)
        .poll_interval(std::time::Duration::from_millis(10))
        .build();
    let mut harness = Harness::new_eframe(|_| app);

    step_until(&mut harness, "view product button", |h| {
        h.query_by_label("👁 View Product").is_some()
    })
    .await;
    harness.get_by_label("👁 View Product").click();

    step_until(&mut harness, "opened url in status bar", |h| {
        h.query_by_label("Opened https://example.my.site.com/lightning/r/Product2/01t1/view")
            .is_some()
    })
    .await;
}
