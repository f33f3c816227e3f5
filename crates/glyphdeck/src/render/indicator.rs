use eframe::egui::{self, Align2, FontId};

use crate::scrollbar::Indicator;
use crate::theme::Theme;

/// Paint the track and thumb glyphs into `track_rect`, one glyph per line.
/// The thumb is drawn over the track with its cells cleared first.
pub fn paint(ui: &egui::Ui, track_rect: egui::Rect, indicator: &Indicator, theme: &Theme, font: &FontId) {
    let Indicator::Shown(track) = indicator else {
        return;
    };
    let painter = ui.painter_at(track_rect);
    let line = track.line_height;

    for (i, glyph) in track.gutter.chars().enumerate() {
        let pos = track_rect.left_top() + egui::vec2(0.0, i as f32 * line);
        painter.text(pos, Align2::LEFT_TOP, glyph, font.clone(), theme.gutter_color);
    }

    for (i, glyph) in track.slider.chars().enumerate() {
        let pos = track_rect.left_top() + egui::vec2(0.0, track.slider_top + i as f32 * line);
        let cell = egui::Rect::from_min_size(pos, egui::vec2(track_rect.width(), line));
        painter.rect_filled(cell, 0.0, theme.background);
        painter.text(pos, Align2::LEFT_TOP, glyph, font.clone(), theme.slider_color);
    }
}
