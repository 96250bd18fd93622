#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use lineitems_business::AppConfig;
use lineitems_ui::LineItemsApp;
use lineitems_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;
    let _guard = runtime.enter();

    let config = AppConfig::init()?;
    let state = State::from_config(&config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 480.0])
            .with_min_inner_size([640.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Line Items",
        native_options,
        Box::new(move |_cc| Ok(Box::new(LineItemsApp::builder().state(state).build()))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}
