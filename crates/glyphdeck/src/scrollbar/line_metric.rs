use eframe::egui::{self, Color32, FontId};

/// Measures the pixel height of one rendered text line in a container.
pub trait LineMetric {
    /// Height in pixels, or `0.0` when it cannot be determined yet.
    fn measure(&self) -> f32;
}

/// Lays out a single-glyph probe in the body font and reads its height.
/// The probe galley is never painted.
pub struct GlyphProbe<'a> {
    ui: &'a egui::Ui,
    font: FontId,
}

impl<'a> GlyphProbe<'a> {
    pub fn new(ui: &'a egui::Ui, font: FontId) -> Self {
        Self { ui, font }
    }
}

impl LineMetric for GlyphProbe<'_> {
    fn measure(&self) -> f32 {
        let galley =
            self.ui
                .painter()
                .layout_no_wrap("A".to_string(), self.font.clone(), Color32::WHITE);
        usable_height(galley.rect.height())
    }
}

fn usable_height(height: f32) -> f32 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

/// A line height known up front, for exercising layout math without a `Ui`.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedLineHeight(pub f32);

#[cfg(test)]
impl LineMetric for FixedLineHeight {
    fn measure(&self) -> f32 {
        usable_height(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indeterminate_heights_measure_zero() {
        assert_eq!(FixedLineHeight(f32::NAN).measure(), 0.0);
        assert_eq!(FixedLineHeight(f32::INFINITY).measure(), 0.0);
        assert_eq!(FixedLineHeight(-3.0).measure(), 0.0);
        assert_eq!(FixedLineHeight(18.5).measure(), 18.5);
    }

    #[test]
    fn test_glyph_height_in_a_headless_context() {
        let ctx = egui::Context::default();
        let mut height = 0.0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                height = GlyphProbe::new(ui, FontId::monospace(18.0)).measure();
            });
        });
        assert!(height > 0.0);
        assert!(height.is_finite());
    }
}
