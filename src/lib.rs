//! # aurora_term
//!
//! Terminal text formatting: colors, ANSI effects, alignment and tables,
//! rendered into plain strings of escape sequences.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aurora_term::prelude::*;
//!
//! let line = format(
//!     &FormatRequest::new([TextChunk::colored("Saved", "success")])
//!         .align(Align::Center),
//! );
//! println!("{line}");
//! println!("{}", apply_gradient_to_text("rainbow", &palette_gradient()));
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: one RGB point kept in HEX, RGB, ARGB, HSV, HSL and CMYK
//! - **Palette**: named colors, installed once and read-only afterwards
//! - **Effect**: bold, italic and the other SGR attributes
//! - **TextChunk**: text with an optional color, effects and position
//! - **FormatRequest**: chunks plus layout, rendered by a `Formatter`

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chunk;
pub mod color;
pub mod convert;
pub mod effects;
pub mod format;
pub mod gradient;
#[cfg(feature = "json")]
pub mod json;
pub mod logging;
pub mod measure;
pub mod palette;
pub mod sync;
pub mod terminal;
pub mod text;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::chunk::TextChunk;
    pub use crate::color::{
        Color, ColorInput, ColorOptions, ColorParseError, apply_color, apply_color_with,
        escape_ansi, to_color,
    };
    pub use crate::convert::{Value, to_chunk, to_color_input, to_effects};
    pub use crate::effects::{Effect, EffectSet, apply_effect, apply_from_set, apply_many};
    pub use crate::format::{
        Align, Chunks, FormatRequest, Formatter, LineBreak, Mode, Tabs, format, render_chunks,
        render_table,
    };
    pub use crate::gradient::{
        apply_gradient_to_text, apply_palette_gradient, expand_to_six, gradient_between,
        gradient_chunks, palette_gradient,
    };
    pub use crate::logging::AuroraLogger;
    pub use crate::measure::{strip_ansi, visible_length};
    pub use crate::palette::{Palette, PaletteError};
    pub use crate::text::remove_diacritics;

    #[cfg(feature = "json")]
    pub use crate::json::{JsonError, JsonFormatter, format_json};

    #[cfg(feature = "tracing")]
    pub use crate::logging::AuroraTracingLayer;
}

// Re-export key types at crate root
pub use chunk::TextChunk;
pub use color::{Color, ColorInput};
pub use effects::{Effect, EffectSet};
pub use format::{FormatRequest, Formatter, format};
pub use measure::{strip_ansi, visible_length};
pub use palette::Palette;
