//! Drawing state that can be saved and restored.

use tiny_skia::Transform;

/// Horizontal text anchoring relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align text to the left of the anchor point.
    #[default]
    Left,
    /// Align text to the right of the anchor point.
    Right,
    /// Center text on the anchor point.
    Center,
}

/// Font selection for text drawing: pixel size plus a single family name.
#[derive(Debug, Clone)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f32,
    /// Font family name, resolved against the surface's font database.
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            family: "sans-serif".to_string(),
        }
    }
}

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current fill color.
    pub fill_color: tiny_skia::Color,
    /// Current stroke color.
    pub stroke_color: tiny_skia::Color,
    /// Current line width.
    pub line_width: f32,
    /// Current font specification.
    pub font: FontSpec,
    /// Current text alignment.
    pub text_align: TextAlign,
    /// Current transform matrix.
    pub transform: Transform,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_color: tiny_skia::Color::BLACK,
            stroke_color: tiny_skia::Color::BLACK,
            line_width: 1.0,
            font: FontSpec::default(),
            text_align: TextAlign::default(),
            transform: Transform::identity(),
        }
    }
}
