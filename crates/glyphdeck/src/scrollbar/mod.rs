//! Glyph-drawn scroll indicator.
//!
//! Each slide owns one [`Scrollbar`]. On every trigger (scroll, resize,
//! activation) the viewport's pixel metrics are converted to line units,
//! the thumb geometry is computed, and the result is quantized into glyph
//! strings from the configured [`ScrollbarStyle`]. The outcome is kept as an
//! [`Indicator`] which the UI layer paints.

mod geometry;
mod glyphs;
mod line_metric;

use std::sync::Arc;

use tracing::trace;

use crate::config::ScrollbarStyle;

pub use geometry::{ScrollMetrics, ViewportMetrics, compute_geometry};
pub use glyphs::{SliderGlyphs, gutter_len};
#[cfg(test)]
pub use line_metric::FixedLineHeight;
pub use line_metric::{GlyphProbe, LineMetric};

/// What the indicator currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Indicator {
    Hidden,
    Shown(Track),
}

/// Rendered track and thumb, one glyph per line.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub gutter: String,
    pub slider: String,
    /// Pixel offset of the thumb's first cell from the top of the track.
    pub slider_top: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone)]
pub struct Scrollbar {
    style: Arc<ScrollbarStyle>,
    line_height: f32,
    indicator: Indicator,
}

impl Scrollbar {
    pub fn new(style: Arc<ScrollbarStyle>) -> Self {
        Self {
            style,
            line_height: 0.0,
            indicator: Indicator::Hidden,
        }
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// Whether a line height has been measured yet.
    pub fn is_ready(&self) -> bool {
        self.line_height > 0.0
    }

    /// Recompute the indicator from the current viewport metrics.
    ///
    /// Safe to call redundantly: the result depends only on `viewport` and
    /// the cached line height. When the line height cannot be measured the
    /// previous indicator is left untouched and the next call retries.
    pub fn update(&mut self, viewport: &ViewportMetrics, probe: &dyn LineMetric) {
        if self.line_height <= 0.0 {
            self.line_height = probe.measure();
        }
        if self.line_height <= 0.0 {
            trace!("line height not measurable yet, skipping scrollbar update");
            return;
        }

        if !viewport.overflows() {
            self.indicator = Indicator::Hidden;
            return;
        }

        let metrics = ScrollMetrics::from_pixels(viewport, self.line_height);
        let Some(geometry) = compute_geometry(&metrics) else {
            self.indicator = Indicator::Hidden;
            return;
        };
        trace!(
            before = metrics.before,
            visible = metrics.visible,
            after = metrics.after,
            start = geometry.start_line,
            end = geometry.end_line,
            "scrollbar geometry"
        );

        let glyphs = SliderGlyphs::quantize(&geometry, &self.style);
        let gutter = std::iter::repeat_n(self.style.gutter.fill, gutter_len(metrics.visible))
            .collect::<String>();
        self.indicator = Indicator::Shown(Track {
            gutter,
            slider: glyphs.render(self.style.slider.fill),
            slider_top: (geometry.start_line.floor() as f32) * self.line_height,
            line_height: self.line_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Returns a scripted sequence of heights, repeating the last one.
    struct ScriptedProbe {
        heights: Vec<f32>,
        calls: Cell<usize>,
    }

    impl ScriptedProbe {
        fn new(heights: &[f32]) -> Self {
            Self {
                heights: heights.to_vec(),
                calls: Cell::new(0),
            }
        }
    }

    impl LineMetric for ScriptedProbe {
        fn measure(&self) -> f32 {
            let n = self.calls.get();
            self.calls.set(n + 1);
            self.heights[n.min(self.heights.len() - 1)]
        }
    }

    fn scrollbar() -> Scrollbar {
        Scrollbar::new(Arc::new(ScrollbarStyle::default()))
    }

    #[test]
    fn test_non_overflowing_content_hides_indicator() {
        let mut bar = scrollbar();
        bar.update(&ViewportMetrics::new(0.0, 300.0, 300.0), &FixedLineHeight(20.0));
        assert_eq!(bar.indicator(), &Indicator::Hidden);
    }

    #[test]
    fn test_reference_render() {
        let mut bar = scrollbar();
        bar.update(&ViewportMetrics::new(400.0, 200.0, 1000.0), &FixedLineHeight(20.0));
        let Indicator::Shown(track) = bar.indicator() else {
            panic!("expected a visible indicator");
        };
        assert_eq!(track.slider, "⣿⣿");
        assert_eq!(track.slider_top, 80.0);
        assert_eq!(track.gutter.chars().count(), 11);
        assert!(track.gutter.chars().all(|c| c == '▕'));
        assert_eq!(track.line_height, 20.0);
    }

    #[test]
    fn test_fractional_thumb_top_is_cell_aligned() {
        let mut bar = scrollbar();
        // before=5, visible=10, after=25: a 2.5 line thumb spanning 1.25..3.75
        bar.update(&ViewportMetrics::new(100.0, 200.0, 800.0), &FixedLineHeight(20.0));
        let Indicator::Shown(track) = bar.indicator() else {
            panic!("expected a visible indicator");
        };
        assert_eq!(track.slider_top, 20.0);
        assert_eq!(track.slider.chars().count(), 3);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut bar = scrollbar();
        let px = ViewportMetrics::new(130.0, 200.0, 1000.0);
        bar.update(&px, &FixedLineHeight(20.0));
        let first = bar.indicator().clone();
        bar.update(&px, &FixedLineHeight(20.0));
        assert_eq!(bar.indicator(), &first);
    }

    #[test]
    fn test_unmeasurable_line_height_retries_later() {
        let mut bar = scrollbar();
        let probe = ScriptedProbe::new(&[0.0, 20.0]);
        let px = ViewportMetrics::new(400.0, 200.0, 1000.0);

        bar.update(&px, &probe);
        assert!(!bar.is_ready());
        assert_eq!(bar.indicator(), &Indicator::Hidden);

        bar.update(&px, &probe);
        assert!(bar.is_ready());
        assert!(matches!(bar.indicator(), Indicator::Shown(_)));
    }

    #[test]
    fn test_line_height_is_cached() {
        let mut bar = scrollbar();
        let probe = ScriptedProbe::new(&[20.0, 40.0]);
        let px = ViewportMetrics::new(400.0, 200.0, 1000.0);
        bar.update(&px, &probe);
        bar.update(&px, &probe);
        assert_eq!(probe.calls.get(), 1);
        let Indicator::Shown(track) = bar.indicator() else {
            panic!("expected a visible indicator");
        };
        assert_eq!(track.line_height, 20.0);
    }

    #[test]
    fn test_shrinking_content_hides_again() {
        let mut bar = scrollbar();
        let probe = FixedLineHeight(20.0);
        bar.update(&ViewportMetrics::new(0.0, 200.0, 1000.0), &probe);
        assert!(matches!(bar.indicator(), Indicator::Shown(_)));
        bar.update(&ViewportMetrics::new(0.0, 200.0, 200.0), &probe);
        assert_eq!(bar.indicator(), &Indicator::Hidden);
    }
}
