//! Text measurement using cosmic-text.

use crate::state::{FontSpec, TextAlign};
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};

/// Metrics returned by measure_text().
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to top of the bounding box.
    pub ascent: f32,
    /// Distance from baseline to bottom of the bounding box.
    pub descent: f32,
}

/// Measure a single line of text with the given font.
pub fn measure_text(font_system: &mut FontSystem, text: &str, font: &FontSpec) -> TextMetrics {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let attrs = Attrs::new().family(Family::Name(&font.family));
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);

    let mut width: f32 = 0.0;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        ascent = ascent.max(run.line_y - run.line_top);
        descent = descent.max((run.line_top + run.line_height) - run.line_y);
    }
    if ascent == 0.0 && descent == 0.0 {
        ascent = font.size_px * 0.8;
        descent = font.size_px * 0.2;
    }

    TextMetrics {
        width,
        ascent,
        descent,
    }
}

/// Horizontal offset applied to the draw position for the given alignment.
pub fn align_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TextAlign::Left, 0.0)]
    #[case(TextAlign::Right, -40.0)]
    #[case(TextAlign::Center, -20.0)]
    fn test_align_offset(#[case] align: TextAlign, #[case] expected: f32) {
        assert_eq!(align_offset(40.0, align), expected);
    }
}
