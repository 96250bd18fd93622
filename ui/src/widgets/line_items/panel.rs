//! Line items panel: toolbar, low-stock banner and the table itself.

use egui::{Frame, Margin, Response, RichText, Stroke, Ui};
use egui_extras::TableBuilder;
use lineitems_business::{RefreshLineItemsCommand, RowActionCommand, TableBody, TableView, snapshot};
use lineitems_states::StateCtx;
use log::debug;

use super::table::columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use super::table::header::render_table_header;
use super::table::row::{RowClick, render_line_item_row};
use crate::utils::colors::{COLOR_AMBER, COLOR_RED, TABLE_BORDER_COLOR};

/// Displays the line items of the bound record.
///
/// Row actions and refresh clicks are dispatched as commands after the frame's table is
/// drawn; their results show up once the state context syncs.
pub fn line_items_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let Some(view) = snapshot(state_ctx) else {
        return ui.label("Line items are not mounted");
    };

    let inner = ui.vertical(|ui| {
        let refresh = ui.horizontal(|ui| ui.button(&view.refresh_label).clicked()).inner;

        if let Some(warning) = &view.warning {
            Frame::NONE
                .stroke(Stroke::new(1.0, COLOR_AMBER))
                .inner_margin(Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("⚠ {warning}")).color(COLOR_AMBER));
                });
        }

        ui.add_space(8.0);

        let click = match &view.body {
            TableBody::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading…");
                });
                None
            }
            TableBody::Error(error) => {
                ui.colored_label(COLOR_RED, error);
                None
            }
            TableBody::NoData(message) => {
                ui.label(message);
                None
            }
            TableBody::Rows(_) => render_table(ui, &view),
        };

        (refresh, click)
    });

    let (refresh, click) = inner.inner;
    if refresh {
        debug!("Refresh requested");
        state_ctx.dispatch(RefreshLineItemsCommand);
    }
    if let Some(RowClick { action, row }) = click {
        debug!("Row action {} on {}", action.as_str(), row.line_item_id);
        state_ctx.dispatch(RowActionCommand::new(action.as_str(), row));
    }

    inner.response
}

fn render_table(ui: &mut Ui, view: &TableView) -> Option<RowClick> {
    let TableBody::Rows(rows) = &view.body else {
        return None;
    };

    let mut click = None;
    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui).striped(true).resizable(false);
            for column in table_columns(&view.headers) {
                builder = builder.column(column);
            }

            builder
                .header(HEADER_HEIGHT, |mut header| {
                    render_table_header(&mut header, &view.headers);
                })
                .body(|mut body| {
                    for row_view in rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            if let Some(clicked) = render_line_item_row(&mut row, row_view) {
                                click = Some(clicked);
                            }
                        });
                    }
                });
        });

    click
}
