//! Character catalog: the static list of character definitions the user
//! picks from.
//!
//! The catalog is consumed, not owned: it is deserialized from a JSON file
//! with the record shape `{id, name, img, color, defaultText: {text, x, y,
//! s, r}}` and never mutated.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the catalog JSON.
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default text placement shipped with a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultText {
    /// Default caption text.
    pub text: String,
    /// Default anchor x position.
    pub x: f32,
    /// Default anchor y position.
    pub y: f32,
    /// Default font size in pixels.
    #[serde(rename = "s")]
    pub size: f32,
    /// Default rotation in UI units (radians × 10).
    #[serde(rename = "r")]
    pub rotation: f32,
}

/// One immutable character record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    /// Stable character id, used for usage events.
    pub id: u32,
    /// Display name, used for the exported file name.
    pub name: String,
    /// Image file name of the character's background, relative to the
    /// image directory.
    pub img: String,
    /// Character base color (CSS color string), the initial font color.
    pub color: String,
    /// Default text placement.
    #[serde(rename = "defaultText")]
    pub default_text: DefaultText,
}

/// An ordered, immutable collection of character definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    characters: Vec<CharacterDefinition>,
}

impl Catalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let characters = serde_json::from_str(json)?;
        Ok(Self { characters })
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Get the character at the given index.
    pub fn get(&self, index: usize) -> Option<&CharacterDefinition> {
        self.characters.get(index)
    }

    /// Number of characters in the catalog.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Iterate over all characters in order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.characters.iter()
    }
}
