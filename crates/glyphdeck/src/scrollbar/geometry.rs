/// Raw pixel measurements of a scrollable viewport, as reported by the host
/// after layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportMetrics {
    /// Pixels scrolled past the top of the content.
    pub scroll_top: f32,
    /// Height of the visible viewport.
    pub client_height: f32,
    /// Full height of the inner content.
    pub scroll_height: f32,
}

impl ViewportMetrics {
    pub fn new(scroll_top: f32, client_height: f32, scroll_height: f32) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Whether the content extends past the viewport. Sub-pixel differences
    /// at the unscrolled position count as fitting.
    pub fn overflows(&self) -> bool {
        !(self.scroll_top == 0.0 && (self.scroll_height - self.client_height).abs() < 1.0)
    }
}

/// Content extents in line units. `total` is always the sum of the other three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub before: f64,
    pub visible: f64,
    pub after: f64,
    pub total: f64,
}

impl ScrollMetrics {
    /// Convert pixel metrics into line units. Negative extents (content
    /// shorter than the viewport, overscroll) clamp to zero.
    pub fn from_pixels(px: &ViewportMetrics, line_height: f32) -> Self {
        let line_height = f64::from(line_height);
        let before_px = f64::from(px.scroll_top).max(0.0);
        let visible_px = f64::from(px.client_height).max(0.0);
        let after_px = (f64::from(px.scroll_height) - before_px - visible_px).max(0.0);

        let before = before_px / line_height;
        let visible = visible_px / line_height;
        let after = after_px / line_height;
        Self {
            before,
            visible,
            after,
            total: before + visible + after,
        }
    }

    /// Fraction of the scrollable range already scrolled past, or `None`
    /// when there is nothing to scroll.
    pub fn scroll_percent(&self) -> Option<f64> {
        let range = self.before + self.after;
        if range > 0.0 && range.is_finite() {
            Some(self.before / range)
        } else {
            None
        }
    }
}

/// Thumb placement within the track, in fractional line units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderGeometry {
    pub start_line: f64,
    pub end_line: f64,
    pub height_lines: f64,
}

/// Smallest thumb ever drawn, in lines.
pub const MIN_SLIDER_LINES: f64 = 2.0;

/// Compute the thumb geometry for the given extents.
///
/// The thumb height is `visible * (visible / total)` floored at
/// [`MIN_SLIDER_LINES`], and its end travels linearly from `height` to
/// `visible` as the scroll percentage goes from 0 to 1. Returns `None` for
/// degenerate extents (nothing to scroll, zero total).
pub fn compute_geometry(metrics: &ScrollMetrics) -> Option<SliderGeometry> {
    if metrics.total <= 0.0 || !metrics.total.is_finite() {
        return None;
    }
    let scroll_percent = metrics.scroll_percent()?;
    let visible = metrics.visible;

    let height_lines = (visible * (visible / metrics.total)).max(MIN_SLIDER_LINES);
    let mut end_line = height_lines + (visible - height_lines) * scroll_percent;
    let mut start_line = end_line - height_lines;

    // A viewport shorter than the minimum thumb would push the thumb above
    // the track; pin it to the top instead.
    if start_line < 0.0 {
        start_line = 0.0;
        end_line = height_lines;
    }

    Some(SliderGeometry {
        start_line,
        end_line,
        height_lines,
    })
}
