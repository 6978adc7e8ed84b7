//! Palette-colored JSON pretty-printing.
//!
//! Parsing is delegated to `serde_json`; this module only lays the value out
//! and colors each token with the active palette.
//!
//! ```rust,ignore
//! use aurora_term::json::{JsonFormatter, format_json};
//!
//! let colored = format_json(r#"{"name": "Alice", "age": 30}"#)?;
//! let plain = JsonFormatter::from_str("[1, 2]")?.indent(4).to_plain_string();
//! ```
//!
//! Without the `preserve_order` feature of `serde_json`, object keys come
//! out in sorted order whether or not `sort_keys` is set.

use std::fmt::Write as _;

use serde_json::Value;

use crate::chunk::TextChunk;
use crate::color::Color;
use crate::effects::EffectSet;
use crate::palette::{self, Palette};

const MAX_DEPTH: usize = 20;

/// Color and effects for one kind of token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStyle {
    pub color: Option<Color>,
    pub effects: EffectSet,
}

impl TokenStyle {
    #[must_use]
    pub fn new(color: Color, effects: EffectSet) -> Self {
        Self {
            color: Some(color),
            effects,
        }
    }

    fn chunk(&self, text: impl Into<String>) -> TextChunk {
        let chunk = TextChunk::new(text, self.color.clone());
        if self.effects.is_empty() {
            chunk
        } else {
            chunk.with_effects(self.effects)
        }
    }
}

/// Token styles for JSON highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTheme {
    pub key: TokenStyle,
    pub string: TokenStyle,
    pub number: TokenStyle,
    pub boolean: TokenStyle,
    pub null: TokenStyle,
    pub bracket: TokenStyle,
    pub punctuation: TokenStyle,
}

impl JsonTheme {
    /// Theme built from palette entries.
    #[must_use]
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            key: TokenStyle::new(palette.get("info").clone(), EffectSet::BOLD),
            string: TokenStyle::new(palette.get("success").clone(), EffectSet::empty()),
            number: TokenStyle::new(palette.get("warning").clone(), EffectSet::BOLD),
            boolean: TokenStyle::new(palette.get("menu").clone(), EffectSet::BOLD),
            null: TokenStyle::new(palette.get("debug").clone(), EffectSet::ITALIC),
            bracket: TokenStyle::new(palette.get("primary").clone(), EffectSet::BOLD),
            punctuation: TokenStyle::default(),
        }
    }
}

impl Default for JsonTheme {
    fn default() -> Self {
        Self::from_palette(palette::active())
    }
}

/// Pretty-printer for one JSON value.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    value: Value,
    indent: usize,
    sort_keys: bool,
    highlight: bool,
    theme: JsonTheme,
}

impl JsonFormatter {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self {
            value,
            indent: 2,
            sort_keys: false,
            highlight: true,
            theme: JsonTheme::default(),
        }
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `JsonError::Parse` if the string is not valid JSON.
    #[expect(
        clippy::should_implement_trait,
        reason = "returns Result with custom error, not FromStr pattern"
    )]
    pub fn from_str(s: &str) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_str(s).map_err(JsonError::Parse)?;
        Ok(Self::new(value))
    }

    #[must_use]
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }

    #[must_use]
    pub fn sort_keys(mut self, sort: bool) -> Self {
        self.sort_keys = sort;
        self
    }

    #[must_use]
    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: JsonTheme) -> Self {
        self.theme = theme;
        self
    }

    fn token(&self, text: impl Into<String>, style: &TokenStyle) -> TextChunk {
        if self.highlight {
            style.chunk(text)
        } else {
            TextChunk::plain(text)
        }
    }

    fn render_value(&self, value: &Value, depth: usize) -> Vec<TextChunk> {
        match value {
            Value::Null => vec![self.token("null", &self.theme.null)],
            Value::Bool(flag) => vec![self.token(flag.to_string(), &self.theme.boolean)],
            Value::Number(number) => vec![self.token(number.to_string(), &self.theme.number)],
            Value::String(text) => vec![self.token(
                format!("\"{}\"", escape_json_string(text)),
                &self.theme.string,
            )],
            Value::Array(items) => self.render_array(items, depth),
            Value::Object(object) => self.render_object(object, depth),
        }
    }

    fn render_array(&self, items: &[Value], depth: usize) -> Vec<TextChunk> {
        if depth > MAX_DEPTH {
            return vec![self.token("[...]", &self.theme.bracket)];
        }
        if items.is_empty() {
            return vec![self.token("[]", &self.theme.bracket)];
        }

        let indent = " ".repeat(self.indent * (depth + 1));
        let mut chunks = vec![self.token("[", &self.theme.bracket), TextChunk::plain("\n")];
        for (index, item) in items.iter().enumerate() {
            chunks.push(TextChunk::plain(indent.as_str()));
            chunks.extend(self.render_value(item, depth + 1));
            if index + 1 < items.len() {
                chunks.push(self.token(",", &self.theme.punctuation));
            }
            chunks.push(TextChunk::plain("\n"));
        }
        chunks.push(TextChunk::plain(" ".repeat(self.indent * depth)));
        chunks.push(self.token("]", &self.theme.bracket));
        chunks
    }

    fn render_object(&self, object: &serde_json::Map<String, Value>, depth: usize) -> Vec<TextChunk> {
        if depth > MAX_DEPTH {
            return vec![self.token("{...}", &self.theme.bracket)];
        }
        if object.is_empty() {
            return vec![self.token("{}", &self.theme.bracket)];
        }

        let mut keys: Vec<&String> = object.keys().collect();
        if self.sort_keys {
            keys.sort();
        }

        let indent = " ".repeat(self.indent * (depth + 1));
        let mut chunks = vec![self.token("{", &self.theme.bracket), TextChunk::plain("\n")];
        for (index, key) in keys.iter().enumerate() {
            chunks.push(TextChunk::plain(indent.as_str()));
            chunks.push(self.token(format!("\"{}\"", escape_json_string(key)), &self.theme.key));
            chunks.push(self.token(": ", &self.theme.punctuation));
            chunks.extend(self.render_value(&object[*key], depth + 1));
            if index + 1 < keys.len() {
                chunks.push(self.token(",", &self.theme.punctuation));
            }
            chunks.push(TextChunk::plain("\n"));
        }
        chunks.push(TextChunk::plain(" ".repeat(self.indent * depth)));
        chunks.push(self.token("}", &self.theme.bracket));
        chunks
    }

    /// The document as chunks, one per token.
    #[must_use]
    pub fn render(&self) -> Vec<TextChunk> {
        self.render_value(&self.value, 0)
    }

    /// The document as a string with ANSI codes.
    #[must_use]
    pub fn to_ansi_string(&self) -> String {
        self.render().iter().map(TextChunk::render).collect()
    }

    /// The document without any ANSI codes.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.render().iter().map(|chunk| chunk.text.as_str()).collect()
    }
}

/// Pretty-print and highlight a JSON document with the active palette.
///
/// # Errors
///
/// Returns `JsonError::Parse` if `input` is not valid JSON.
pub fn format_json(input: &str) -> Result<String, JsonError> {
    Ok(JsonFormatter::from_str(input)?.to_ansi_string())
}

fn escape_json_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", u32::from(c));
            }
            c => result.push(c),
        }
    }
    result
}

/// Error type for JSON decoding.
#[derive(Debug)]
pub enum JsonError {
    Parse(serde_json::Error),
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
        }
    }
}
