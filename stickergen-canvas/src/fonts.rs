//! Font configuration for the canvas surface.
//!
//! Describes which fonts a surface can draw with, using only standard
//! library types. The configuration is turned into a `fontdb::Database`
//! once, when the surface is created.

use std::path::PathBuf;

/// Font sources to register with a new surface.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Raw font file data (TTF/OTF) to register directly.
    pub font_data: Vec<Vec<u8>>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_data: Vec::new(),
        }
    }
}

impl FontConfig {
    /// Build a font database from this configuration.
    ///
    /// This is the single point where font configuration is translated into
    /// the fontdb backend.
    pub fn to_fontdb(&self) -> fontdb::Database {
        let mut db = fontdb::Database::new();

        if self.load_system_fonts {
            db.load_system_fonts();
        }

        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }

        for data in &self.font_data {
            db.load_font_data(data.clone());
        }

        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
        assert!(config.font_data.is_empty());
    }

    #[test]
    fn test_to_fontdb_no_system_fonts() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        let db = config.to_fontdb();
        // With no system fonts and no custom fonts, the database is empty
        assert_eq!(db.faces().count(), 0);
    }
}
