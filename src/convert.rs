//! Lenient coercions.
//!
//! [`Value`] is a loosely typed input, such as a CLI argument or a decoded
//! document. The `ensure_*` functions turn it into a concrete type and fall
//! back to that type's zero value instead of failing. [`to_chunk`],
//! [`to_color_input`] and [`to_effects`] build formatter inputs the same way.

use std::fmt;

use crate::chunk::TextChunk;
use crate::color::{Color, ColorInput};
use crate::effects::{Effect, EffectSet};
use crate::palette;

/// Symbol returned by [`ensure_symbol`] when nothing usable is found.
pub const UNDEFINED_SYMBOL: &str = "undefined";

/// A loosely typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Chunk(TextChunk),
    Color(Color),
}

impl Value {
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Items of a list or tuple.
    fn items(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Text of a string or symbol.
    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Str(text) | Self::Symbol(text) => Some(text),
            _ => None,
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A debug-style representation, used when a value has no text of its own.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(text) => write!(f, "{text:?}"),
            Self::Symbol(name) => write!(f, ":{name}"),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items.iter())?;
                f.write_str("]")
            }
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items.iter())?;
                f.write_str(")")
            }
            Self::Map(pairs) => {
                f.write_str("{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Chunk(chunk) => write!(f, "TextChunk({:?})", chunk.text),
            Self::Color(color) => write!(f, "Color({color})"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<TextChunk> for Value {
    fn from(value: TextChunk) -> Self {
        Self::Chunk(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

/// Text of a value; `""` when it has none.
#[must_use]
pub fn ensure_string(value: &Value) -> String {
    match value {
        Value::Str(text) | Value::Symbol(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Int(number) => number.to_string(),
        Value::Float(number) => number.to_string(),
        Value::Chunk(chunk) => chunk.text.clone(),
        Value::Color(color) => color.hex().to_string(),
        Value::Nil | Value::List(_) | Value::Tuple(_) | Value::Map(_) => String::new(),
    }
}

/// Integer of a value; floats truncate, numeric strings parse, else `0`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, which is the intended coercion"
)]
pub fn ensure_integer(value: &Value) -> i64 {
    match value {
        Value::Int(number) => *number,
        Value::Float(number) if number.is_finite() => number.trunc() as i64,
        Value::Bool(flag) => i64::from(*flag),
        Value::Str(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .map(|number| number.trunc() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Float of a value; numeric strings parse, else `0.0`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "large integers lose precision as floats, which is acceptable here"
)]
pub fn ensure_float(value: &Value) -> f64 {
    match value {
        Value::Float(number) => *number,
        Value::Int(number) => *number as f64,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Str(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Boolean of a value; only `true` and the text `"true"` are true.
#[must_use]
pub fn ensure_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Str(text) | Value::Symbol(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Symbol name of a value; `"undefined"` when it has none.
#[must_use]
pub fn ensure_symbol(value: &Value) -> String {
    match value {
        Value::Symbol(name) => name.clone(),
        Value::Str(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => UNDEFINED_SYMBOL.to_string(),
    }
}

/// Items of a list or tuple; `[]` otherwise.
#[must_use]
pub fn ensure_list(value: &Value) -> Vec<Value> {
    value.items().map(<[Value]>::to_vec).unwrap_or_default()
}

/// Key/value pairs of a map, or of a list of 2-tuples; `[]` otherwise.
#[must_use]
pub fn ensure_map(value: &Value) -> Vec<(Value, Value)> {
    match value {
        Value::Map(pairs) => pairs.clone(),
        Value::List(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Tuple(pair) if pair.len() == 2 => Some((pair[0].clone(), pair[1].clone())),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Classify a value as a color input.
///
/// Strings and symbols are hex or names; lists or tuples of three or four
/// integers in `0..=255` are RGB or ARGB.
#[must_use]
pub fn to_color_input(value: &Value) -> ColorInput {
    if let Some(text) = value.as_text() {
        return ColorInput::classify(text);
    }
    if let Value::Color(color) = value {
        return ColorInput::Color(color.clone());
    }
    let channels: Option<Vec<u8>> = value.items().and_then(|items| {
        items
            .iter()
            .map(|item| match item {
                Value::Int(number) => u8::try_from(*number).ok(),
                _ => None,
            })
            .collect()
    });
    match channels.as_deref() {
        Some(&[r, g, b]) => ColorInput::Rgb(r, g, b),
        Some(&[a, r, g, b]) => ColorInput::Argb(a, r, g, b),
        _ => ColorInput::Unrecognized,
    }
}

/// Build an effect set from a name, a list of names, a map of
/// name to boolean, or a chunk. Unknown names are ignored.
#[must_use]
pub fn to_effects(value: &Value) -> EffectSet {
    let by_name = |value: &Value| value.as_text().and_then(Effect::from_name);
    match value {
        Value::Str(_) | Value::Symbol(_) => by_name(value).map(EffectSet::from).unwrap_or_default(),
        Value::List(items) | Value::Tuple(items) => items.iter().filter_map(by_name).collect(),
        Value::Map(pairs) => pairs
            .iter()
            .filter(|(_, enabled)| ensure_boolean(enabled))
            .filter_map(|(name, _)| by_name(name))
            .collect(),
        Value::Chunk(chunk) => chunk.effects.unwrap_or_default(),
        _ => EffectSet::empty(),
    }
}

/// Turn any value into a chunk.
///
/// A string becomes an uncolored chunk, a `(text, color)` tuple a colored
/// one, a chunk is returned as is and anything else is shown with its
/// debug representation.
#[must_use]
pub fn to_chunk(value: &Value) -> TextChunk {
    match value {
        Value::Str(text) => TextChunk::plain(text.as_str()),
        Value::Chunk(chunk) => chunk.clone(),
        Value::Tuple(items) => match items.as_slice() {
            [Value::Str(text), color] => {
                let color = to_color_input(color).resolve(palette::active());
                TextChunk::new(text.as_str(), Some(color))
            }
            _ => TextChunk::plain(value.to_string()),
        },
        _ => TextChunk::plain(value.to_string()),
    }
}
