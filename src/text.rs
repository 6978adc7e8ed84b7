//! Text normalization and visible-width padding helpers.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::measure::visible_length;

/// Decompose to NFD and drop combining marks: `"Ação"` becomes `"Acao"`.
#[must_use]
pub fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Pad `text` with trailing spaces up to `width` visible characters.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_length(text));
    format!("{text}{}", " ".repeat(padding))
}

/// Pad `text` with leading spaces up to `width` visible characters.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_length(text));
    format!("{}{text}", " ".repeat(padding))
}

/// Center `text` within `width`; the odd space goes on the right.
#[must_use]
pub fn pad_center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_length(text));
    let left = padding / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(padding - left))
}
