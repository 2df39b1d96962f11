use clap::Parser;
use std::path::PathBuf;
use stickergen_core::{
    bootstrap, download, Catalog, Compositor, EventLog, FontConfig, NullUsageLog, StickerModel,
    UsageLogger, STICKER_FONT_FAMILY,
};

/// stickergen: render a character sticker with a styled caption to a PNG
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the character catalog JSON file
    #[clap(short, long)]
    pub catalog: Option<PathBuf>,

    /// Optional configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Character index in the catalog
    #[clap(short = 'i', long, default_value_t = 0)]
    pub character: usize,

    /// Directory containing the character images (default: <catalog dir>/img)
    #[clap(long)]
    pub img_dir: Option<PathBuf>,

    /// Caption text (defaults to the character's own)
    #[clap(short, long)]
    pub text: Option<String>,

    /// Caption anchor x position
    #[clap(long)]
    pub x: Option<f32>,

    /// Caption anchor y position
    #[clap(long)]
    pub y: Option<f32>,

    /// Font size in pixels
    #[clap(long)]
    pub font_size: Option<f32>,

    /// Line spacing between straight-mode lines
    #[clap(long)]
    pub spacing: Option<f32>,

    /// Rotation in UI units (radians x 10)
    #[clap(long)]
    pub rotate: Option<f32>,

    /// Lay the caption out along an arc instead of straight lines
    #[clap(long)]
    pub curve: bool,

    /// Caption fill color (CSS color string)
    #[clap(long)]
    pub color: Option<String>,

    /// Extra directories to scan for fonts (where the sticker font lives)
    #[clap(long)]
    pub font_dir: Vec<PathBuf>,

    /// Directory the sticker file is written into
    #[clap(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

fn main() {
    env_logger::init();

    let args: Args = Args::parse();

    // Best-effort configuration; failures degrade to defaults
    let config = bootstrap(args.config.as_deref());

    // Locate the catalog
    let catalog_path = match args.catalog.or(config.catalog) {
        Some(path) => path,
        None => {
            println!("No catalog given: pass --catalog or set it in the config file");
            return;
        }
    };

    let catalog = match Catalog::from_file(&catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            println!("Failed to load catalog {}: {}", catalog_path.display(), err);
            return;
        }
    };

    let character = match catalog.get(args.character) {
        Some(character) => character.clone(),
        None => {
            println!(
                "Character index {} out of range (catalog has {} characters)",
                args.character,
                catalog.len()
            );
            return;
        }
    };

    // Initialize the model on the chosen character and load its image
    let (mut model, request) = StickerModel::new(args.character, &character);

    let img_dir = args.img_dir.unwrap_or_else(|| {
        catalog_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("img")
    });
    let image_path = img_dir.join(&request.img);

    let image_bytes = match std::fs::read(&image_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            println!("Failed to read image {}: {}", image_path.display(), err);
            return;
        }
    };

    let pixmap = match tiny_skia::Pixmap::decode_png(&image_bytes) {
        Ok(pixmap) => pixmap,
        Err(err) => {
            println!("Failed to decode image {}: {}", image_path.display(), err);
            return;
        }
    };
    log::debug!(
        "loaded {} ({}x{})",
        image_path.display(),
        pixmap.width(),
        pixmap.height()
    );
    model.finish_load(request.generation, pixmap);

    // Apply caption overrides
    if let Some(text) = &args.text {
        model.set_text(text);
    }
    if let Some(x) = args.x {
        model.set_position(x, model.state().position.y);
    }
    if let Some(y) = args.y {
        model.set_position(model.state().position.x, y);
    }
    if let Some(size) = args.font_size {
        model.set_font_size(size);
    }
    if let Some(spacing) = args.spacing {
        model.set_line_spacing(spacing);
    }
    if let Some(rotation) = args.rotate {
        model.set_rotation(rotation);
    }
    if args.curve {
        model.set_curve(true);
    }
    if let Some(color) = &args.color {
        model.set_font_color(color);
    }

    // Build the compositor with fonts from config and command line
    let mut font_dirs = config.font_dirs.clone();
    font_dirs.extend(args.font_dir);
    let fonts = FontConfig {
        font_dirs,
        ..FontConfig::default()
    };

    let mut compositor = match Compositor::with_fonts(&fonts) {
        Ok(compositor) => compositor,
        Err(err) => {
            println!("Failed to create compositor: {}", err);
            return;
        }
    };

    // The font gate only matters when there is a caption to draw
    let font_ready = compositor.font_ready() || model.state().text.is_empty();
    if !font_ready {
        println!(
            "Sticker font '{}' not found: install it or pass --font-dir",
            STICKER_FONT_FAMILY
        );
        return;
    }

    if model.take_redraw() {
        if let Err(err) = compositor.render(model.state(), model.background(), font_ready) {
            println!("Render failed: {}", err);
            return;
        }
    }

    let mut event_log = EventLog;
    let mut null_log = NullUsageLog;
    let usage: &mut dyn UsageLogger = if config.usage_log {
        &mut event_log
    } else {
        &mut null_log
    };

    match download(&compositor, &character, &args.out_dir, usage) {
        Ok(path) => println!("Wrote {}", path.display()),
        Err(err) => {
            println!(
                "Failed to write sticker to {}: {}",
                args.out_dir.display(),
                err
            );
        }
    }
}
