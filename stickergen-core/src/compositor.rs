//! The compositor: renders background + caption onto the fixed-size canvas.

use crate::layout;
use crate::state::{BackgroundImage, TextStyleState};
use stickergen_canvas::{Canvas, CanvasResult, FontConfig, TextAlign};

/// Fixed canvas width in logical pixels.
pub const CANVAS_WIDTH: u32 = 296;

/// Fixed canvas height in logical pixels.
pub const CANVAS_HEIGHT: u32 = 256;

/// Font family every sticker caption is set in.
pub const STICKER_FONT_FAMILY: &str = "YurukaStd";

/// Owns the canvas surface and paints the full composite on demand.
pub struct Compositor {
    canvas: Canvas,
}

impl Compositor {
    /// Create a compositor with the fixed sticker dimensions and default
    /// font sources.
    pub fn new() -> CanvasResult<Self> {
        Ok(Self {
            canvas: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)?,
        })
    }

    /// Create a compositor with custom font sources (extra font dirs or raw
    /// font data carrying the sticker font).
    pub fn with_fonts(fonts: &FontConfig) -> CanvasResult<Self> {
        Ok(Self {
            canvas: Canvas::with_fonts(CANVAS_WIDTH, CANVAS_HEIGHT, fonts)?,
        })
    }

    /// Whether the sticker font family is available to this surface.
    pub fn font_ready(&self) -> bool {
        self.canvas.is_family_available(STICKER_FONT_FAMILY)
    }

    /// The underlying canvas surface.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Render the full composite.
    ///
    /// The canvas is always reset first. If the background image is not
    /// loaded yet, or the sticker font is not ready, nothing further is
    /// painted; this is the skip policy for assets that are still loading,
    /// not an error.
    pub fn render(
        &mut self,
        state: &TextStyleState,
        background: &BackgroundImage,
        font_ready: bool,
    ) -> CanvasResult<()> {
        self.canvas.reset();

        let Some(image) = background.pixmap() else {
            return Ok(());
        };
        if !font_ready {
            return Ok(());
        }

        // Scale the image uniformly to fit and center it on both axes
        let width = CANVAS_WIDTH as f32;
        let height = CANVAS_HEIGHT as f32;
        let h_ratio = width / image.width() as f32;
        let v_ratio = height / image.height() as f32;
        let ratio = h_ratio.min(v_ratio);
        let shift_x = (width - image.width() as f32 * ratio) / 2.0;
        let shift_y = (height - image.height() as f32 * ratio) / 2.0;
        self.canvas.draw_pixmap_scaled(
            image,
            shift_x,
            shift_y,
            image.width() as f32 * ratio,
            image.height() as f32 * ratio,
        );

        // Text styling
        self.canvas.set_font(state.font_size, STICKER_FONT_FAMILY);
        self.canvas.set_line_width(layout::STROKE_WIDTH);
        self.canvas.set_stroke_color(layout::STROKE_COLOR)?;
        self.canvas.set_fill_color(&state.font_color)?;
        self.canvas.set_text_align(TextAlign::Center);

        // Anchor transform: all text placement is relative to this
        self.canvas.save();
        self.canvas.translate(state.position.x, state.position.y);
        self.canvas.rotate(state.rotation / 10.0);

        let lines: Vec<&str> = state.text.split('\n').collect();

        if state.curve {
            // The sweep is derived once from the whole text's length,
            // newlines included, and shared by every line.
            let sweep = layout::curve_sweep(state.text.chars().count());
            let radius = layout::arc_radius(state.font_size);
            let mut buf = [0u8; 4];
            for line in &lines {
                let len = line.chars().count();
                if len == 0 {
                    continue;
                }
                let step = layout::glyph_rotation_step(sweep, len);
                for ch in line.chars() {
                    // Rotation compounds across the line's glyphs
                    self.canvas.rotate(step);
                    self.canvas.save();
                    self.canvas.translate(0.0, -radius);
                    let glyph = ch.encode_utf8(&mut buf);
                    self.canvas.stroke_text(glyph, 0.0, 0.0);
                    self.canvas.fill_text(glyph, 0.0, 0.0);
                    self.canvas.restore();
                }
            }
        } else {
            for (i, line) in lines.iter().enumerate() {
                let k = layout::line_offset(i, state.line_spacing);
                self.canvas.stroke_text(line, 0.0, k);
                self.canvas.fill_text(line, 0.0, k);
            }
        }

        // Pop the anchor transform in both modes
        self.canvas.restore();

        Ok(())
    }
}
