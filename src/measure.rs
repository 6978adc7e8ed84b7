//! Visible-length measurement and ANSI stripping.
//!
//! One rule decides what counts as an escape sequence: CSI sequences
//! (`ESC [` parameters, intermediates, one final byte), OSC sequences
//! (`ESC ]` ... BEL or `ESC \`) and the other string sequences
//! (`ESC P`, `ESC X`, `ESC ^`, `ESC _` ... `ESC \`). Everything else is
//! visible text, measured in grapheme clusters.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static ANSI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\x1b\[[0-?]*[ -/]*[@-~]",
        r"|(?s:\x1b\].*?(?:\x07|\x1b\\))",
        r"|(?s:\x1b[PX^_].*?\x1b\\)",
    ))
    .expect("valid regex")
});

/// Remove every ANSI escape sequence from `text`.
///
/// Removal repeats until nothing matches, so a sequence that only appears
/// once its surroundings are removed is stripped as well.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut stripped = Cow::Borrowed(text);
    while ANSI_PATTERN.is_match(&stripped) {
        stripped = Cow::Owned(ANSI_PATTERN.replace_all(&stripped, "").into_owned());
    }
    stripped.into_owned()
}

/// Whether `text` contains any ANSI escape sequence.
#[must_use]
pub fn has_ansi(text: &str) -> bool {
    ANSI_PATTERN.is_match(text)
}

/// Number of grapheme clusters left after stripping ANSI sequences.
#[must_use]
pub fn visible_length(text: &str) -> usize {
    if !text.contains('\x1b') {
        return text.graphemes(true).count();
    }
    strip_ansi(text).graphemes(true).count()
}

/// Cursor-position escape for raw rendering: `ESC[{row};{column}H`.
#[must_use]
pub fn cursor_position(column: u16, row: u16) -> String {
    format!("\x1b[{row};{column}H")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_sgr() {
        assert_eq!(strip_ansi("\x1b[1m\x1b[31mHi\x1b[0m"), "Hi");
    }

    #[test]
    fn test_strip_truecolor_and_cursor() {
        assert_eq!(strip_ansi("\x1b[38;2;255;0;0mA\x1b[0m\x1b[3;4HB"), "AB");
    }

    #[test]
    fn test_strip_osc_hyperlink() {
        let link = "\x1b]8;;https://example.com\x1b\\click\x1b]8;;\x1b\\";
        assert_eq!(strip_ansi(link), "click");
        assert_eq!(strip_ansi("\x1b]0;title\x07body"), "body");
    }

    #[test]
    fn test_strip_dcs() {
        assert_eq!(strip_ansi("a\x1bPq#0;2;0;0;0\x1b\\b"), "ab");
    }

    #[test]
    fn test_strip_plain_is_unchanged() {
        assert_eq!(strip_ansi("plain [1m text"), "plain [1m text");
    }

    #[test]
    fn test_strip_is_idempotent_on_nested_escape() {
        let tricky = "\x1b\x1b[1m[31mX";
        let once = strip_ansi(tricky);
        assert_eq!(once, "X");
        assert_eq!(strip_ansi(&once), once);
    }

    #[test]
    fn test_visible_length_ignores_escapes() {
        assert_eq!(visible_length("\x1b[1mHello\x1b[0m"), 5);
        assert_eq!(visible_length(""), 0);
    }

    #[test]
    fn test_visible_length_counts_characters_not_bytes() {
        assert_eq!(visible_length("héllo"), 5);
        assert_eq!(visible_length("日本"), 2);
        // e + combining acute accent is one grapheme.
        assert_eq!(visible_length("e\u{301}"), 1);
    }

    #[test]
    fn test_has_ansi() {
        assert!(has_ansi("\x1b[0m"));
        assert!(!has_ansi("nothing"));
    }

    #[test]
    fn test_cursor_position() {
        assert_eq!(cursor_position(5, 2), "\x1b[2;5H");
    }
}
