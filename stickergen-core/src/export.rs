//! Sticker export: PNG file download, clipboard copy, and usage events.
//!
//! The clipboard and the usage log are injected collaborators so the
//! compositor and parameter model stay free of host side effects.

use crate::catalog::CharacterDefinition;
use crate::compositor::Compositor;
use std::fmt;
use std::path::{Path, PathBuf};
use stickergen_canvas::CanvasError;
use thiserror::Error;

/// Export action, recorded by the usage log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Download,
    Copy,
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportAction::Download => f.write_str("download"),
            ExportAction::Copy => f.write_str("copy"),
        }
    }
}

/// Fire-and-forget usage event recording.
pub trait UsageLogger {
    fn log(&mut self, id: u32, name: &str, action: ExportAction);
}

/// Default usage logger: records events through the `log` facade.
#[derive(Debug, Default)]
pub struct EventLog;

impl UsageLogger for EventLog {
    fn log(&mut self, id: u32, name: &str, action: ExportAction) {
        log::info!(target: "usage", "{} {} {}", id, name, action);
    }
}

/// Usage logger that drops every event (usage logging disabled).
#[derive(Debug, Default)]
pub struct NullUsageLog;

impl UsageLogger for NullUsageLog {
    fn log(&mut self, _id: u32, _name: &str, _action: ExportAction) {}
}

/// Errors a clipboard sink can report.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The host denied clipboard-write permission.
    #[error("clipboard write permission denied")]
    Denied,

    /// No clipboard is available in this environment.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for clipboard-style image export.
pub trait ClipboardSink {
    /// Write PNG image bytes to the clipboard.
    fn write_png(&mut self, png: &[u8]) -> Result<(), ClipboardError>;
}

/// Errors that can occur while exporting a sticker.
#[derive(Debug, Error)]
pub enum ExportError {
    /// PNG serialization failed.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Writing the output file failed.
    #[error("Failed to write sticker file: {0}")]
    Io(#[from] std::io::Error),

    /// The clipboard refused the image.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// File name a downloaded sticker is saved under.
pub fn sticker_file_name(character_name: &str) -> String {
    format!("Sticker_{}.png", character_name)
}

/// Serialize the canvas to PNG bytes.
pub fn encode_png(compositor: &Compositor) -> Result<Vec<u8>, ExportError> {
    Ok(compositor.canvas().to_png()?)
}

/// Save the rendered sticker as `Sticker_<name>.png` in `dir` and record a
/// download event. Returns the path written.
pub fn download(
    compositor: &Compositor,
    character: &CharacterDefinition,
    dir: &Path,
    usage: &mut dyn UsageLogger,
) -> Result<PathBuf, ExportError> {
    let png = encode_png(compositor)?;
    let path = dir.join(sticker_file_name(&character.name));
    std::fs::write(&path, png)?;
    usage.log(character.id, &character.name, ExportAction::Download);
    Ok(path)
}

/// Write the rendered sticker to the clipboard sink and record a copy
/// event.
///
/// A sink refusal is surfaced to the caller; the rendered canvas is left
/// intact and no usage event is recorded for the failed copy.
pub fn copy(
    compositor: &Compositor,
    character: &CharacterDefinition,
    clipboard: &mut dyn ClipboardSink,
    usage: &mut dyn UsageLogger,
) -> Result<(), ExportError> {
    let png = encode_png(compositor)?;
    clipboard.write_png(&png)?;
    usage.log(character.id, &character.name, ExportAction::Copy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_file_name() {
        assert_eq!(sticker_file_name("Airi"), "Sticker_Airi.png");
    }

    #[test]
    fn test_action_display() {
        assert_eq!(ExportAction::Download.to_string(), "download");
        assert_eq!(ExportAction::Copy.to_string(), "copy");
    }
}
