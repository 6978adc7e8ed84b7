//! Horizontal alignment of a single-line message.
//!
//! Alignment works on the visible length of the concatenated chunks and
//! only ever adds plain filler chunks; the chunks themselves are untouched.

use std::fmt;
use std::str::FromStr;

use crate::chunk::TextChunk;

/// Horizontal alignment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Leave the message as is (default).
    #[default]
    Left,
    /// One filler before the message.
    Right,
    /// Fillers on both sides; the odd space goes right.
    Center,
    /// Widen the gaps between chunks to fill the line.
    Justify,
    /// Per-column padding in tables; leaves a single line untouched.
    CenterBlock,
}

impl Align {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Justify => "justify",
            Self::CenterBlock => "center_block",
        }
    }

    /// Whether rendering needs the line width.
    #[must_use]
    pub const fn needs_width(self) -> bool {
        matches!(self, Self::Right | Self::Center | Self::Justify)
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':').to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            "justify" => Ok(Self::Justify),
            "center_block" | "center-block" => Ok(Self::CenterBlock),
            other => Err(format!("Unknown alignment: {other}")),
        }
    }
}

/// Total visible length of the chunks, without separators.
#[must_use]
pub fn visible_width(chunks: &[TextChunk]) -> usize {
    chunks.iter().map(TextChunk::visible_length).sum()
}

/// Align `chunks` within `width` columns.
#[must_use]
pub fn align_chunks(chunks: Vec<TextChunk>, align: Align, width: usize) -> Vec<TextChunk> {
    match align {
        Align::Left | Align::CenterBlock => chunks,
        Align::Right => {
            let pad = width.saturating_sub(visible_width(&chunks));
            surround(chunks, pad, 0)
        }
        Align::Center => {
            let pad = width.saturating_sub(visible_width(&chunks));
            let left = pad / 2;
            surround(chunks, left, pad - left)
        }
        Align::Justify => justify(chunks, width),
    }
}

fn surround(chunks: Vec<TextChunk>, left: usize, right: usize) -> Vec<TextChunk> {
    let mut out = Vec::with_capacity(chunks.len() + 2);
    if left > 0 {
        out.push(TextChunk::filler(left));
    }
    out.extend(chunks);
    if right > 0 {
        out.push(TextChunk::filler(right));
    }
    out
}

fn justify(chunks: Vec<TextChunk>, width: usize) -> Vec<TextChunk> {
    let gaps = chunks.len().saturating_sub(1);
    if gaps == 0 {
        return chunks;
    }
    let extra = width.saturating_sub(visible_width(&chunks) + gaps);
    let gap_size = extra / gaps;
    let remainder = extra % gaps;

    let mut out = Vec::with_capacity(chunks.len() + gaps);
    for (index, chunk) in chunks.into_iter().enumerate() {
        if index > 0 {
            let bonus = usize::from(index - 1 < remainder);
            out.push(TextChunk::filler(1 + gap_size + bonus));
        }
        out.push(chunk);
    }
    out
}
