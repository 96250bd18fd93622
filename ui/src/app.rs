use std::time::Duration;

use log::info;

use crate::{state::State, widgets};

/// The line items window.
///
/// Async results arrive through the state context's channel, so the app keeps repainting
/// at `poll_interval` while any task is alive.
#[derive(bon::Builder)]
pub struct LineItemsApp {
    state: State,
    #[builder(default = Duration::from_millis(100))]
    poll_interval: Duration,
}

impl LineItemsApp {
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for LineItemsApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for intent in self.state.sync() {
            match self.state.navigation_url(&intent) {
                Some(url) => {
                    info!("Opening {url}");
                    ctx.open_url(egui::OpenUrl::new_tab(url));
                }
                None => info!(
                    "RECORD_PAGE_BASE_URL not set, not opening {}",
                    intent.record_path()
                ),
            }
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Line Items");
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            widgets::status_bar(&self.state, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::line_items_panel(&mut self.state.ctx, ui);
        });

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(self.poll_interval);
        }
    }
}
