//! Sticker generator core.
//!
//! A headless reimplementation of a browser sticker maker: pick a character,
//! overlay a styled caption (position, rotation, curvature, font size, line
//! spacing, color), composite onto a fixed 296×256 canvas, export as PNG.
//!
//! The pieces:
//! - [`catalog`] — the static character list (consumed, not owned)
//! - [`state`] — the interactive parameter model and image-load lifecycle
//! - [`layout`] — pure text layout math (straight lines vs glyph arcs)
//! - [`compositor`] — the draw routine painting background + text
//! - [`export`] — PNG download / clipboard copy with usage events
//! - [`config`] — best-effort startup configuration

pub mod catalog;
pub mod compositor;
pub mod config;
pub mod export;
pub mod layout;
pub mod state;

pub use catalog::{Catalog, CatalogError, CharacterDefinition, DefaultText};
pub use compositor::{Compositor, CANVAS_HEIGHT, CANVAS_WIDTH, STICKER_FONT_FAMILY};
pub use config::{bootstrap, AppConfig};
pub use export::{
    copy, download, encode_png, sticker_file_name, ClipboardError, ClipboardSink, EventLog,
    ExportAction, ExportError, NullUsageLog, UsageLogger,
};
pub use state::{BackgroundImage, LoadRequest, Position, StickerModel, TextStyleState};

// Re-export the canvas surface types callers need to configure fonts or
// inspect pixels.
pub use stickergen_canvas::{Canvas, CanvasError, CanvasResult, FontConfig};
