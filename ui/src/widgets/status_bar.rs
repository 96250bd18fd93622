use egui::{Response, Ui};
use lineitems_business::{LineItemTable, ProfileResolution, ProfileState};

use crate::state::State;
use crate::utils::colors::COLOR_RED;

/// Bound record, viewer profile and the last navigation request.
pub fn status_bar(state: &State, ui: &mut Ui) -> Response {
    ui.horizontal(|ui| {
        if let Ok(table) = state.ctx.try_state::<LineItemTable>() {
            match table.parent() {
                Some(parent) => ui.label(format!("Record {parent}")),
                None => ui.label("No record"),
            };
        }

        if let Ok(profile) = state.ctx.try_state::<ProfileState>() {
            ui.separator();
            match profile.resolution() {
                ProfileResolution::Idle => {}
                ProfileResolution::Resolving(_) => {
                    ui.spinner();
                }
                ProfileResolution::Resolved { profile, .. } => {
                    ui.label(format!("Profile: {}", profile.profile_name));
                }
                ProfileResolution::Failed { error, .. } => {
                    ui.colored_label(COLOR_RED, format!("Profile unavailable: {error}"));
                }
            }
        }

        if let Some(intent) = &state.last_navigation {
            ui.separator();
            match state.navigation_url(intent) {
                Some(url) => ui.label(format!("Opened {url}")),
                None => ui.label(format!("Navigate to {}", intent.record_path())),
            };
        }
    })
    .response
}
