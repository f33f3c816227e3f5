pub mod highlight;
pub mod indicator;
pub mod text;

use eframe::egui;

use crate::theme::Theme;

/// Width of the glyph track drawn beside a slide body.
pub fn track_width(ui: &egui::Ui, theme: &Theme, glyph: char) -> f32 {
    ui.painter()
        .layout_no_wrap(glyph.to_string(), theme.body_font(), theme.gutter_color)
        .rect
        .width()
        .max(1.0)
}
