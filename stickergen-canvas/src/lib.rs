//! Small Canvas-2D-style raster surface using tiny-skia and cosmic-text.
//!
//! This crate provides the drawing operations the sticker compositor needs
//! without a browser or JavaScript runtime:
//! - `tiny-skia` for rasterization, transforms, and image blitting
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for font database management
//!
//! # Example
//!
//! ```rust,ignore
//! use stickergen_canvas::Canvas;
//!
//! let mut canvas = Canvas::new(296, 256)?;
//! canvas.set_fill_color("#33AAEE")?;
//! canvas.set_font(30.0, "YurukaStd");
//! canvas.fill_text("hello", 148.0, 128.0);
//! let png_data = canvas.to_png()?;
//! ```

mod canvas;
mod error;
mod fonts;
mod state;
mod text;

// Re-export public API
pub use canvas::Canvas;
pub use error::{CanvasError, CanvasResult};
pub use fonts::FontConfig;
pub use state::{DrawingState, FontSpec, TextAlign};
pub use text::TextMetrics;
