//! Indentation for normal-mode messages.

use crate::chunk::TextChunk;

/// Spaces per indentation level.
pub const TAB_WIDTH: usize = 4;

/// Most indentation levels a chunk can get; larger requests are clamped.
pub const MAX_LEVELS: usize = 65_535;

/// How many indentation levels a message gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tabs {
    /// Derive the level from each chunk's palette color name.
    #[default]
    Auto,
    /// Exactly this many levels for every chunk.
    Manual(usize),
}

impl Tabs {
    /// Map a signed level: any negative value means automatic and levels
    /// past [`MAX_LEVELS`] are clamped.
    #[must_use]
    pub fn from_level(level: i64) -> Self {
        usize::try_from(level).map_or(Self::Auto, |levels| Self::Manual(levels.min(MAX_LEVELS)))
    }
}

/// Indentation level implied by a palette color name.
#[must_use]
pub fn level_for(name: Option<&str>) -> usize {
    match name {
        Some("primary" | "debug") => 1,
        Some("secondary" | "info") => 2,
        Some("ternary") => 3,
        Some("quaternary" | "menu") => 4,
        Some("success" | "warning" | "error") => 5,
        _ => 0,
    }
}

/// The indentation string for one chunk.
#[must_use]
pub fn indentation(tabs: Tabs, chunk: &TextChunk) -> String {
    let levels = match tabs {
        Tabs::Manual(levels) => levels,
        Tabs::Auto => level_for(chunk.color_name()),
    };
    " ".repeat(levels.min(MAX_LEVELS).saturating_mul(TAB_WIDTH))
}

/// Prefix every chunk with its indentation.
pub(crate) fn indent_chunks(chunks: Vec<TextChunk>, tabs: Tabs) -> Vec<TextChunk> {
    chunks
        .into_iter()
        .map(|chunk| {
            let indent = indentation(tabs, &chunk);
            if indent.is_empty() {
                chunk
            } else {
                let text = format!("{indent}{}", chunk.text);
                chunk.with_text(text)
            }
        })
        .collect()
}
