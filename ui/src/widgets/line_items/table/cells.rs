//! Cell rendering for the line items table.

use egui::{Align, Button, Layout, RichText, Ui};
use lineitems_business::{Alignment, ButtonVariant, RowActionId};

use crate::utils::colors::COLOR_RED;

/// Lays out `add_contents` according to a column's alignment.
#[inline]
pub fn aligned<R>(ui: &mut Ui, alignment: Alignment, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    match alignment {
        Alignment::Left => {
            ui.with_layout(Layout::left_to_right(Align::Center), add_contents)
                .inner
        }
        Alignment::Center => ui.centered_and_justified(add_contents).inner,
        Alignment::Right => {
            ui.with_layout(Layout::right_to_left(Align::Center), add_contents)
                .inner
        }
    }
}

/// Renders a text, currency or number cell. Highlighted cells are drawn in red.
#[inline]
pub fn render_value_cell(ui: &mut Ui, text: &str, alignment: Alignment, highlighted: bool) {
    aligned(ui, alignment, |ui| {
        if highlighted {
            ui.label(RichText::new(text).strong().color(COLOR_RED));
        } else {
            ui.label(text);
        }
    });
}

/// Parameters of a row action button.
pub struct ActionCell<'a> {
    pub action: RowActionId,
    pub caption: Option<&'a str>,
    pub icon: &'a str,
    pub title: &'a str,
    pub variant: ButtonVariant,
    pub enabled: bool,
}

/// Renders a row action button.
///
/// Returns `true` if the button was clicked.
#[inline]
pub fn render_action_cell(ui: &mut Ui, cell: &ActionCell<'_>) -> bool {
    let glyph = icon_glyph(cell.icon);
    let text = match cell.caption {
        Some(caption) => RichText::new(format!("{glyph} {caption}")),
        None => RichText::new(glyph),
    };

    let mut button = Button::new(text);
    if cell.variant == ButtonVariant::Brand {
        button = button.fill(ui.visuals().selection.bg_fill);
    }

    ui.centered_and_justified(|ui| {
        ui.add_enabled(cell.enabled, button)
            .on_hover_text(cell.title)
            .on_disabled_hover_text(format!("{} in progress", cell.action.as_str()))
            .clicked()
    })
    .inner
}

/// Glyph drawn for a design-system icon name.
#[inline]
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "utility:delete" => "🗑",
        "utility:preview" => "👁",
        _ => "•",
    }
}
