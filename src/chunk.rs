//! TextChunk - the atomic formatting unit.
//!
//! A `TextChunk` is a piece of text with at most one color and one effect
//! set. Requests are built from chunks and the formatter renders each one
//! independently before concatenating them.

use std::fmt;

use crate::color::{Color, ColorInput, apply_color};
use crate::effects::{Effect, EffectSet, apply_from_set};
use crate::measure::{cursor_position, visible_length};
use crate::palette;

/// A piece of text with an optional color, optional effects and a position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextChunk {
    /// The text content.
    pub text: String,
    /// Color to render with (None = no color codes).
    pub color: Option<Color>,
    /// Effects to render with (None = no effect codes).
    pub effects: Option<EffectSet>,
    /// Column, used only by raw rendering.
    pub pos_x: u16,
    /// Row, used only by raw rendering.
    pub pos_y: u16,
}

impl TextChunk {
    /// Create a new chunk with text and optional color.
    #[must_use]
    pub fn new(text: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            text: text.into(),
            color,
            ..Self::default()
        }
    }

    /// Create a chunk with no color and no effects.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Create a chunk colored by any recognized color input.
    ///
    /// Names are resolved against the active palette; unknown names fall
    /// back to `no_color`.
    #[must_use]
    pub fn colored(text: impl Into<String>, color: impl Into<ColorInput>) -> Self {
        Self::new(text, Some(color.into().resolve(palette::active())))
    }

    /// Create an empty chunk, used to pad ragged table rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a run of `width` plain spaces.
    #[must_use]
    pub fn filler(width: usize) -> Self {
        Self::plain(" ".repeat(width))
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: EffectSet) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Add one effect to whatever is already set.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects = Some(self.effects.unwrap_or_default() | effect.flag());
        self
    }

    #[must_use]
    pub fn at(mut self, pos_x: u16, pos_y: u16) -> Self {
        self.pos_x = pos_x;
        self.pos_y = pos_y;
        self
    }

    /// Same chunk with different text; color, effects and position are kept.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Number of visible characters in the text.
    #[must_use]
    pub fn visible_length(&self) -> usize {
        visible_length(&self.text)
    }

    /// Check if this chunk has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Palette name of the chunk color, if it came from the palette.
    #[must_use]
    pub fn color_name(&self) -> Option<&str> {
        self.color.as_ref().and_then(Color::name)
    }

    /// Render effects first, then wrap the result in the color.
    #[must_use]
    pub fn render(&self) -> String {
        let text = match self.effects {
            Some(effects) => apply_from_set(&self.text, effects),
            None => self.text.clone(),
        };
        match &self.color {
            Some(color) => apply_color(&text, color),
            None => text,
        }
    }

    /// Render with the cursor moved to this chunk's position first.
    #[must_use]
    pub fn render_positioned(&self) -> String {
        let text = format!("{}{}", cursor_position(self.pos_x, self.pos_y), self.text);
        self.with_text(text).render()
    }
}

impl fmt::Display for TextChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for TextChunk {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for TextChunk {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<(&str, Color)> for TextChunk {
    fn from((text, color): (&str, Color)) -> Self {
        Self::new(text, Some(color))
    }
}
