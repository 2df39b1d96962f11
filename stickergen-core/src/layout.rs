//! Pure layout math for the text pass, shared by the compositor and tests.
//!
//! Straight mode stacks lines below the anchor; curve mode fans the glyphs
//! of each line along an arc centered on the anchor. The constants and
//! formulas are the ones every existing sticker was authored against, so
//! they are not tunable.

use std::f32::consts::PI;

/// Fixed text outline width.
pub const STROKE_WIDTH: f32 = 9.0;

/// Fixed text outline color.
pub const STROKE_COLOR: &str = "white";

/// Arc radius as a multiple of the font size.
pub const ARC_RADIUS_FACTOR: f32 = 3.5;

/// Curve-mode vertical slider offset as a multiple of the font size.
pub const CURVE_SLIDER_FACTOR: f32 = 3.0;

/// Local y offset of line `index` in straight mode.
pub fn line_offset(index: usize, line_spacing: f32) -> f32 {
    index as f32 * line_spacing
}

/// Total arc sweep for curve mode.
///
/// Computed once from the length of the whole text, newlines included, and
/// shared by every line. A longer caption fans wider.
pub fn curve_sweep(total_chars: usize) -> f32 {
    PI * total_chars as f32 / 7.0
}

/// Incremental rotation applied before each glyph of a line in curve mode.
///
/// `line_len` must be non-zero; empty lines are skipped by the caller.
pub fn glyph_rotation_step(sweep: f32, line_len: usize) -> f32 {
    sweep / line_len as f32 / 2.5
}

/// Distance from the anchor to the glyph baseline in curve mode.
pub fn arc_radius(font_size: f32) -> f32 {
    font_size * ARC_RADIUS_FACTOR
}
