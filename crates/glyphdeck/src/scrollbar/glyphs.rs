use crate::config::ScrollbarStyle;

use super::geometry::SliderGeometry;

/// A thumb quantized to whole glyph cells: an optional partial glyph for
/// each fractional edge and a run of full glyphs between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderGlyphs {
    pub top: Option<char>,
    pub fill_count: usize,
    pub bottom: Option<char>,
}

impl SliderGlyphs {
    pub fn quantize(geometry: &SliderGeometry, style: &ScrollbarStyle) -> Self {
        let slider = &style.slider;
        let mut fill = geometry.height_lines;

        let end_frac = geometry.end_line - geometry.end_line.floor();
        let bottom = if end_frac > 0.0 {
            fill -= end_frac;
            Some(partial_glyph(&slider.bottom_chars, end_frac, slider.fill))
        } else {
            None
        };

        // Portion of the top cell covered by the thumb.
        let start_cover = 1.0 - (geometry.start_line - geometry.start_line.floor());
        let top = if start_cover < 1.0 {
            fill -= start_cover;
            Some(partial_glyph(&slider.top_chars, start_cover, slider.fill))
        } else {
            None
        };

        Self {
            top,
            fill_count: fill.round().max(0.0) as usize,
            bottom,
        }
    }

    /// Number of cells the thumb occupies.
    pub fn len(&self) -> usize {
        self.fill_count + usize::from(self.top.is_some()) + usize::from(self.bottom.is_some())
    }

    /// One glyph per line, top to bottom.
    pub fn render(&self, fill: char) -> String {
        let mut out = String::with_capacity(self.len() * 4);
        out.extend(self.top);
        out.extend(std::iter::repeat_n(fill, self.fill_count));
        out.extend(self.bottom);
        out
    }
}

/// Pick the glyph for a cell covered by `fraction` (in `0..1`). The
/// sequence runs from least to most covered; an empty sequence falls back to
/// the fill glyph.
fn partial_glyph(sequence: &str, fraction: f64, fallback: char) -> char {
    let count = sequence.chars().count();
    if count == 0 {
        return fallback;
    }
    let idx = (fraction / (1.0 / count as f64)).floor().max(0.0) as usize;
    sequence.chars().nth(idx.min(count - 1)).unwrap_or(fallback)
}

/// Number of track glyphs for a viewport `visible` lines tall.
pub fn gutter_len(visible: f64) -> usize {
    (visible + 1.0).max(0.0).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScrollbarStyle, SliderStyle};

    fn geometry(start_line: f64, height_lines: f64) -> SliderGeometry {
        SliderGeometry {
            start_line,
            end_line: start_line + height_lines,
            height_lines,
        }
    }

    #[test]
    fn test_aligned_thumb_has_no_partials() {
        let style = ScrollbarStyle::default();
        let glyphs = SliderGlyphs::quantize(&geometry(4.0, 2.0), &style);
        assert_eq!(
            glyphs,
            SliderGlyphs {
                top: None,
                fill_count: 2,
                bottom: None
            }
        );
        assert_eq!(glyphs.render(style.slider.fill), "⣿⣿");
    }

    #[test]
    fn test_half_offset_uses_middle_partials() {
        let style = ScrollbarStyle::default();
        // Thumb spans 4.5..6.5: half of cell 4, all of cell 5, half of cell 6.
        let glyphs = SliderGlyphs::quantize(&geometry(4.5, 2.0), &style);
        assert_eq!(glyphs.top, Some('⣦'));
        assert_eq!(glyphs.bottom, Some('⠻'));
        assert_eq!(glyphs.fill_count, 1);
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs.render(style.slider.fill), "⣦⣿⠻");
    }

    #[test]
    fn test_small_fractions_pick_first_glyph() {
        let style = ScrollbarStyle::default();
        // Top covers 0.1 of its cell, bottom covers 0.1 of its cell.
        let glyphs = SliderGlyphs::quantize(&geometry(3.9, 2.2), &style);
        assert_eq!(glyphs.top, Some('⡀'));
        assert_eq!(glyphs.bottom, Some('⠈'));
        assert_eq!(glyphs.fill_count, 2);
    }

    #[test]
    fn test_fill_count_rounds_to_nearest() {
        let style = ScrollbarStyle::default();
        // 3.7 lines from an aligned start: 3.7 - 0.7 = 3 full cells.
        let glyphs = SliderGlyphs::quantize(&geometry(0.0, 3.7), &style);
        assert_eq!(glyphs.top, None);
        assert!(glyphs.bottom.is_some());
        assert_eq!(glyphs.fill_count, 3);
    }

    #[test]
    fn test_empty_sequences_fall_back_to_fill() {
        let style = ScrollbarStyle {
            slider: SliderStyle {
                top_chars: String::new(),
                fill: '#',
                bottom_chars: String::new(),
            },
            ..ScrollbarStyle::default()
        };
        let glyphs = SliderGlyphs::quantize(&geometry(1.5, 2.0), &style);
        assert_eq!(glyphs.render('#'), "###");
    }

    #[test]
    fn test_coarse_sequence() {
        let style = ScrollbarStyle {
            slider: SliderStyle {
                top_chars: "▄".to_string(),
                fill: '█',
                bottom_chars: "▀".to_string(),
            },
            ..ScrollbarStyle::default()
        };
        let glyphs = SliderGlyphs::quantize(&geometry(0.25, 2.0), &style);
        assert_eq!(glyphs.render('█'), "▄█▀");
    }

    #[test]
    fn test_gutter_len_truncates() {
        assert_eq!(gutter_len(10.0), 11);
        assert_eq!(gutter_len(9.75), 10);
        assert_eq!(gutter_len(0.0), 1);
    }
}
