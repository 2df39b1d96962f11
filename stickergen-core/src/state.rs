//! The interactive parameter model: text style state, character selection,
//! and the background image load lifecycle.

use crate::catalog::CharacterDefinition;
use crate::compositor::CANVAS_HEIGHT;
use crate::layout;
use tiny_skia::Pixmap;

/// Text anchor position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Current text and style parameters, mutated only through
/// [`StickerModel`] setters.
#[derive(Debug, Clone)]
pub struct TextStyleState {
    /// Caption text; newlines separate lines.
    pub text: String,
    /// Anchor position of the text block.
    pub position: Position,
    /// Font size in pixels.
    pub font_size: f32,
    /// Vertical distance between lines in straight mode.
    pub line_spacing: f32,
    /// Rotation in UI units; the applied angle is `rotation / 10` radians.
    pub rotation: f32,
    /// Whether curve mode is enabled.
    pub curve: bool,
    /// Fill color of the text (CSS color string).
    pub font_color: String,
}

/// Background image load lifecycle.
///
/// A character selection starts a load; the compositor refuses to paint
/// until the image reaches `Loaded`.
#[derive(Debug)]
pub enum BackgroundImage {
    /// Load started but the decode has not completed.
    Pending,
    /// Decode finished; ready to composite.
    Loaded(Pixmap),
}

impl BackgroundImage {
    /// Whether the image is ready to draw.
    pub fn is_loaded(&self) -> bool {
        matches!(self, BackgroundImage::Loaded(_))
    }

    /// The decoded pixmap, if loaded.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        match self {
            BackgroundImage::Pending => None,
            BackgroundImage::Loaded(pixmap) => Some(pixmap),
        }
    }
}

/// A request to decode a character's background image.
///
/// The generation token identifies the selection that started the load;
/// [`StickerModel::finish_load`] discards completions whose token no longer
/// matches the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Generation token to pass back to `finish_load`.
    pub generation: u64,
    /// Image file name from the character definition.
    pub img: String,
}

/// Owns the text style state, the selected character index, and the
/// background image slot.
#[derive(Debug)]
pub struct StickerModel {
    state: TextStyleState,
    character_index: usize,
    background: BackgroundImage,
    generation: u64,
    needs_redraw: bool,
}

impl StickerModel {
    /// Create a model positioned on the given character, with the
    /// character's default text, placement, and color.
    ///
    /// Returns the model together with the load request for the initial
    /// background image.
    pub fn new(index: usize, character: &CharacterDefinition) -> (Self, LoadRequest) {
        let state = TextStyleState {
            text: character.default_text.text.clone(),
            position: Position {
                x: character.default_text.x,
                y: character.default_text.y,
            },
            font_size: character.default_text.size,
            line_spacing: 50.0,
            rotation: character.default_text.rotation,
            curve: false,
            font_color: character.color.clone(),
        };
        let model = Self {
            state,
            character_index: index,
            background: BackgroundImage::Pending,
            generation: 1,
            needs_redraw: true,
        };
        let request = LoadRequest {
            generation: 1,
            img: character.img.clone(),
        };
        (model, request)
    }

    /// Current text style parameters.
    pub fn state(&self) -> &TextStyleState {
        &self.state
    }

    /// Current background image slot.
    pub fn background(&self) -> &BackgroundImage {
        &self.background
    }

    /// Index of the selected character.
    pub fn character_index(&self) -> usize {
        self.character_index
    }

    /// Current load generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consume the redraw flag, returning whether a repaint is due.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    // --- Setters ---

    pub fn set_text(&mut self, text: &str) {
        self.state.text = text.to_string();
        self.needs_redraw = true;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.state.position = Position { x, y };
        self.needs_redraw = true;
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.state.font_size = size;
        self.needs_redraw = true;
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.state.line_spacing = spacing;
        self.needs_redraw = true;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.state.rotation = rotation;
        self.needs_redraw = true;
    }

    pub fn set_curve(&mut self, curve: bool) {
        self.state.curve = curve;
        self.needs_redraw = true;
    }

    pub fn set_font_color(&mut self, color: &str) {
        self.state.font_color = color.to_string();
        self.needs_redraw = true;
    }

    // --- Slider mapping ---

    /// Set the horizontal slider value (maps directly to `position.x`).
    pub fn set_horizontal_slider(&mut self, v: f32) {
        self.set_position(v, self.state.position.y);
    }

    /// Set the vertical slider value.
    ///
    /// The slider is vertically flipped relative to canvas coordinates:
    /// `y = height − v`, shifted by `font_size * 3` when curve mode is on.
    pub fn set_vertical_slider(&mut self, v: f32) {
        let height = CANVAS_HEIGHT as f32;
        let y = if self.state.curve {
            height + self.state.font_size * layout::CURVE_SLIDER_FACTOR - v
        } else {
            height - v
        };
        self.set_position(self.state.position.x, y);
    }

    /// Current vertical slider value (inverse of [`set_vertical_slider`]).
    pub fn vertical_slider_value(&self) -> f32 {
        let height = CANVAS_HEIGHT as f32;
        if self.state.curve {
            height - self.state.position.y + self.state.font_size * layout::CURVE_SLIDER_FACTOR
        } else {
            height - self.state.position.y
        }
    }

    // --- Character selection and image loading ---

    /// Select a character: reset position, rotation, and font size to the
    /// character's defaults, keep the caption text and color, and start a
    /// fresh background load.
    pub fn select_character(
        &mut self,
        index: usize,
        character: &CharacterDefinition,
    ) -> LoadRequest {
        self.character_index = index;
        self.state.position = Position {
            x: character.default_text.x,
            y: character.default_text.y,
        };
        self.state.rotation = character.default_text.rotation;
        self.state.font_size = character.default_text.size;

        self.background = BackgroundImage::Pending;
        self.generation += 1;
        self.needs_redraw = true;

        LoadRequest {
            generation: self.generation,
            img: character.img.clone(),
        }
    }

    /// Complete a background image load.
    ///
    /// The pixmap is installed only when `generation` matches the current
    /// selection; a completion for a superseded selection is discarded.
    /// Returns whether the pixmap was installed.
    pub fn finish_load(&mut self, generation: u64, pixmap: Pixmap) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding stale image load (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }
        self.background = BackgroundImage::Loaded(pixmap);
        self.needs_redraw = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DefaultText;

    fn character(name: &str, x: f32, y: f32, size: f32, rotation: f32) -> CharacterDefinition {
        CharacterDefinition {
            id: 7,
            name: name.to_string(),
            img: format!("{}.png", name),
            color: "#33AAEE".to_string(),
            default_text: DefaultText {
                text: "Example".to_string(),
                x,
                y,
                size,
                rotation,
            },
        }
    }

    fn pixmap() -> Pixmap {
        Pixmap::new(4, 4).unwrap()
    }

    #[test]
    fn test_new_model_uses_character_defaults() {
        let ch = character("Airi", 148.0, 58.0, 33.0, -2.0);
        let (model, request) = StickerModel::new(0, &ch);

        assert_eq!(model.state().text, "Example");
        assert_eq!(model.state().position, Position { x: 148.0, y: 58.0 });
        assert_eq!(model.state().font_size, 33.0);
        assert_eq!(model.state().rotation, -2.0);
        assert_eq!(model.state().line_spacing, 50.0);
        assert_eq!(model.state().font_color, "#33AAEE");
        assert!(!model.state().curve);
        assert!(!model.background().is_loaded());
        assert_eq!(request.img, "Airi.png");
    }

    #[test]
    fn test_select_character_resets_placement_keeps_text_and_color() {
        let first = character("Airi", 148.0, 58.0, 33.0, -2.0);
        let second = character("Emu", 140.0, 120.0, 30.0, 1.6);

        let (mut model, _) = StickerModel::new(0, &first);
        model.set_text("my caption");
        model.set_font_color("#E4485F");
        model.set_position(10.0, 10.0);
        model.set_rotation(5.0);
        model.set_font_size(80.0);

        model.select_character(1, &second);

        // Placement reset to the new character's defaults
        assert_eq!(model.state().position, Position { x: 140.0, y: 120.0 });
        assert_eq!(model.state().rotation, 1.6);
        assert_eq!(model.state().font_size, 30.0);
        // Caption and color survive the swap
        assert_eq!(model.state().text, "my caption");
        assert_eq!(model.state().font_color, "#E4485F");
        assert_eq!(model.character_index(), 1);
    }

    #[test]
    fn test_select_character_restarts_load() {
        let ch = character("Airi", 148.0, 58.0, 33.0, -2.0);
        let (mut model, first) = StickerModel::new(0, &ch);
        assert!(model.finish_load(first.generation, pixmap()));
        assert!(model.background().is_loaded());

        let second = model.select_character(0, &ch);
        assert!(!model.background().is_loaded());
        assert!(second.generation > first.generation);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let ch = character("Airi", 148.0, 58.0, 33.0, -2.0);
        let (mut model, first) = StickerModel::new(0, &ch);

        // A second selection supersedes the first load
        let second = model.select_character(0, &ch);

        assert!(!model.finish_load(first.generation, pixmap()));
        assert!(!model.background().is_loaded());

        assert!(model.finish_load(second.generation, pixmap()));
        assert!(model.background().is_loaded());
    }

    #[test]
    fn test_vertical_slider_mapping_straight() {
        let ch = character("Airi", 148.0, 58.0, 30.0, 0.0);
        let (mut model, _) = StickerModel::new(0, &ch);

        model.set_vertical_slider(100.0);
        assert_eq!(model.state().position.y, 156.0); // 256 - 100
        assert_eq!(model.vertical_slider_value(), 100.0);
    }

    #[test]
    fn test_vertical_slider_mapping_curve() {
        let ch = character("Airi", 148.0, 58.0, 30.0, 0.0);
        let (mut model, _) = StickerModel::new(0, &ch);
        model.set_curve(true);

        model.set_vertical_slider(100.0);
        assert_eq!(model.state().position.y, 246.0); // 256 + 90 - 100
        assert_eq!(model.vertical_slider_value(), 100.0);
    }

    #[test]
    fn test_mutations_raise_redraw_flag() {
        let ch = character("Airi", 148.0, 58.0, 33.0, -2.0);
        let (mut model, _) = StickerModel::new(0, &ch);
        assert!(model.take_redraw());
        assert!(!model.take_redraw());

        model.set_text("x");
        assert!(model.take_redraw());
        model.set_curve(true);
        assert!(model.take_redraw());
        assert!(!model.take_redraw());
    }
}
