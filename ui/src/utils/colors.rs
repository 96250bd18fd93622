//! Shared color constants for the UI.

use egui::Color32;

/// Red for low-stock quantities and failures.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for the low-stock banner.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Subtle gray for table borders.
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
