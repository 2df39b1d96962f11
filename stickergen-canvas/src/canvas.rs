//! The raster surface: a fixed-size pixmap with a Canvas-2D-style drawing
//! state (colors, line width, font, transform) and save/restore stack.

use crate::error::{CanvasError, CanvasResult};
use crate::fonts::FontConfig;
use crate::state::{DrawingState, TextAlign};
use crate::text::TextMetrics;
use cosmic_text::{Attrs, Buffer, Command, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Pixmap, Transform};

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// A fixed-size raster surface with Canvas-2D-style drawing operations.
pub struct Canvas {
    /// Width of the canvas in pixels.
    width: u32,
    /// Height of the canvas in pixels.
    height: u32,
    /// Pixel buffer (premultiplied alpha).
    pixmap: Pixmap,
    /// Font system for text shaping.
    font_system: FontSystem,
    /// Swash cache for glyph outline retrieval.
    swash_cache: SwashCache,
    /// Current drawing state.
    state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
}

impl Canvas {
    /// Create a new canvas with the specified dimensions.
    ///
    /// Uses `FontConfig::default()`, which loads system fonts.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Self::with_fonts(width, height, &FontConfig::default())
    }

    /// Create a new canvas with the specified dimensions and font sources.
    pub fn with_fonts(width: u32, height: u32, fonts: &FontConfig) -> CanvasResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;

        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), fonts.to_fontdb());

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset the canvas to its initial state.
    ///
    /// Clears all pixels to transparent, resets the drawing state, and
    /// empties the state stack. Equivalent to re-assigning the canvas
    /// dimensions in the Canvas 2D API.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.state_stack.clear();
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Style setters ---

    /// Set the fill color from a CSS color string.
    pub fn set_fill_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.fill_color = parse_color(color)?;
        Ok(())
    }

    /// Set the stroke color from a CSS color string.
    pub fn set_stroke_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.stroke_color = parse_color(color)?;
        Ok(())
    }

    /// Set the line width used when stroking text.
    /// Non-finite or non-positive values are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Set the font size (pixels) and family for subsequent text calls.
    pub fn set_font(&mut self, size_px: f32, family: &str) {
        self.state.font.size_px = size_px;
        self.state.font.family = family.to_string();
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    // --- Transform operations ---

    /// Translate the canvas.
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    /// Rotate the canvas by an angle in radians.
    pub fn rotate(&mut self, angle: f32) {
        log::debug!(target: "canvas", "rotate {}", angle);
        let cos = angle.cos();
        let sin = angle.sin();
        let rotation = Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0);
        self.state.transform = self.state.transform.pre_concat(rotation);
    }

    // --- Fonts ---

    /// Check whether a font family is registered in the surface's font
    /// database. This is the readiness query the compositor gates text
    /// drawing on.
    pub fn is_family_available(&self, family: &str) -> bool {
        self.font_system.db().faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _lang)| name.eq_ignore_ascii_case(family))
        })
    }

    // --- Text ---

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(&mut self.font_system, text, &self.state.font)
    }

    /// Fill text at the specified position.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, true);
    }

    /// Stroke text at the specified position.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, false);
    }

    /// Internal text rendering using vector glyph paths.
    ///
    /// (x, y) is the anchor on the alphabetic baseline; the current text
    /// alignment shifts the run horizontally around it.
    fn render_text(&mut self, text: &str, x: f32, y: f32, fill: bool) {
        if text.is_empty() {
            return;
        }

        let font = &self.state.font;
        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = Attrs::new().family(Family::Name(&font.family));
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Advance width for alignment
        let mut text_width: f32 = 0.0;
        for run in buffer.layout_runs() {
            text_width = text_width.max(run.line_w);
        }

        let base_x = x + crate::text::align_offset(text_width, self.state.text_align);
        let base_y = y;

        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(if fill {
            self.state.fill_color
        } else {
            self.state.stroke_color
        });

        let stroke = tiny_skia::Stroke {
            width: self.state.line_width,
            miter_limit: 10.0,
            ..Default::default()
        };

        // Render each glyph as a vector path
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical_glyph = glyph.physical((base_x, base_y), 1.0);

                // Floating-point glyph position for sub-pixel precision
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines have Y pointing up, the surface has Y pointing
                // down, so Y coordinates are negated while building the path.
                let mut path_builder = tiny_skia::PathBuilder::new();
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                        Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                        Command::QuadTo(ctrl, end) => {
                            path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                        }
                        Command::CurveTo(c1, c2, end) => {
                            path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                        }
                        Command::Close => path_builder.close(),
                    }
                }

                let Some(path) = path_builder.finish() else {
                    continue;
                };

                let glyph_transform =
                    Transform::from_translate(glyph_x, glyph_y).post_concat(self.state.transform);

                if fill {
                    self.pixmap.fill_path(
                        &path,
                        &paint,
                        tiny_skia::FillRule::Winding,
                        glyph_transform,
                        None,
                    );
                } else {
                    self.pixmap
                        .stroke_path(&path, &paint, &stroke, glyph_transform, None);
                }
            }
        }
    }

    // --- Image drawing ---

    /// Draw a pixmap scaled to the destination rectangle under the current
    /// transform.
    pub fn draw_pixmap_scaled(&mut self, image: &Pixmap, dx: f32, dy: f32, dw: f32, dh: f32) {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} at {} {} scaled {}x{}",
            image.width(),
            image.height(),
            dx,
            dy,
            dw,
            dh
        );
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };

        let scale_x = dw / image.width() as f32;
        let scale_y = dh / image.height() as f32;

        let transform = self
            .state
            .transform
            .pre_translate(dx, dy)
            .pre_scale(scale_x, scale_y);

        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    // --- Output ---

    /// Get straight-alpha RGBA pixel data for the whole canvas.
    pub fn image_data(&self) -> Vec<u8> {
        let mut data = vec![0u8; (self.width * self.height * 4) as usize];

        for (i, pixel) in self.pixmap.data().chunks_exact(4).enumerate() {
            let dst = &mut data[i * 4..i * 4 + 4];
            let a = pixel[3];
            // Convert from premultiplied alpha to straight alpha
            if a == 0 {
                dst.copy_from_slice(&[0, 0, 0, 0]);
            } else if a == 255 {
                dst.copy_from_slice(pixel);
            } else {
                let alpha_f = a as f32 / 255.0;
                dst[0] = (pixel[0] as f32 / alpha_f).min(255.0) as u8;
                dst[1] = (pixel[1] as f32 / alpha_f).min(255.0) as u8;
                dst[2] = (pixel[2] as f32 / alpha_f).min(255.0) as u8;
                dst[3] = a;
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.image_data();
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }

    /// Get a reference to the underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
fn parse_color(s: &str) -> CanvasResult<tiny_skia::Color> {
    let parsed =
        csscolorparser::parse(s).map_err(|e| CanvasError::ColorParse(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}
