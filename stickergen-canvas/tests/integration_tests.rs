//! Integration tests for stickergen-canvas.

use stickergen_canvas::{Canvas, FontConfig, TextAlign};

fn system_fonts_present() -> bool {
    FontConfig::default().to_fontdb().faces().count() > 0
}

fn solid_pixmap(width: u32, height: u32, r: u8, g: u8, b: u8) -> tiny_skia::Pixmap {
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    pixmap
}

/// Test drawing a scaled image.
#[test]
fn test_draw_pixmap_scaled() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    let image = solid_pixmap(10, 10, 255, 0, 0);

    // Scale the 10x10 image up to 50x50 at (25, 25)
    canvas.draw_pixmap_scaled(&image, 25.0, 25.0, 50.0, 50.0);

    let data = canvas.image_data();
    let idx = (50 * 100 + 50) * 4;
    assert_eq!(data[idx], 255); // R
    assert_eq!(data[idx + 1], 0); // G
    assert_eq!(data[idx + 3], 255); // A

    // Outside the destination rect stays transparent
    let idx_out = (10 * 100 + 10) * 4;
    assert_eq!(data[idx_out + 3], 0);
}

/// Test that a translate transform moves the blit destination.
#[test]
fn test_translate_applies_to_draw() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    let image = solid_pixmap(10, 10, 0, 0, 255);

    canvas.translate(40.0, 40.0);
    canvas.draw_pixmap_scaled(&image, 0.0, 0.0, 10.0, 10.0);

    let data = canvas.image_data();
    let idx = (45 * 100 + 45) * 4;
    assert_eq!(data[idx + 2], 255); // B
    let idx_origin = (5 * 100 + 5) * 4;
    assert_eq!(data[idx_origin + 3], 0); // nothing at the untranslated spot
}

/// Test that reset clears pixels.
#[test]
fn test_reset_clears_pixels() {
    let mut canvas = Canvas::new(50, 50).unwrap();
    let image = solid_pixmap(50, 50, 0, 255, 0);
    canvas.draw_pixmap_scaled(&image, 0.0, 0.0, 50.0, 50.0);
    assert!(canvas.pixmap().data().iter().any(|&b| b != 0));

    canvas.reset();
    assert!(canvas.pixmap().data().iter().all(|&b| b == 0));
}

/// Test PNG export.
#[test]
fn test_png_export() {
    let mut canvas = Canvas::new(50, 50).unwrap();
    let image = solid_pixmap(50, 50, 0, 0, 255);
    canvas.draw_pixmap_scaled(&image, 0.0, 0.0, 50.0, 50.0);

    let png_data = canvas.to_png().unwrap();

    // Check PNG header
    assert_eq!(&png_data[0..8], b"\x89PNG\r\n\x1a\n");

    // Round-trip: decoding the PNG reproduces the rendered frame
    let decoded = tiny_skia::Pixmap::decode_png(&png_data).unwrap();
    assert_eq!(decoded.width(), 50);
    assert_eq!(decoded.height(), 50);
    assert_eq!(decoded.data(), canvas.pixmap().data());
}

/// Test text measurement.
#[test]
fn test_measure_text() {
    if !system_fonts_present() {
        return;
    }
    let mut canvas = Canvas::new(100, 100).unwrap();
    canvas.set_font(12.0, "sans-serif");
    let metrics = canvas.measure_text("Hello");
    assert!(metrics.width > 0.0);
}

/// Test that text drawing paints pixels when fonts are available.
#[test]
fn test_fill_and_stroke_text() {
    let mut canvas = Canvas::new(200, 100).unwrap();
    canvas.set_font(40.0, "sans-serif");
    canvas.set_text_align(TextAlign::Center);
    canvas.set_fill_color("#ff0000").unwrap();
    canvas.set_stroke_color("#ffffff").unwrap();
    canvas.set_line_width(9.0);

    canvas.stroke_text("Hi", 100.0, 60.0);
    canvas.fill_text("Hi", 100.0, 60.0);

    if system_fonts_present() {
        assert!(canvas.pixmap().data().iter().any(|&b| b != 0));
    }
}

/// Empty text draws nothing.
#[test]
fn test_empty_text_is_noop() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    canvas.set_font(30.0, "sans-serif");
    canvas.fill_text("", 50.0, 50.0);
    assert!(canvas.pixmap().data().iter().all(|&b| b == 0));
}

/// Font availability query is false for a family that cannot exist.
#[test]
fn test_family_availability() {
    let canvas = Canvas::new(10, 10).unwrap();
    assert!(!canvas.is_family_available("NoSuchFamily_stickergen"));
}
