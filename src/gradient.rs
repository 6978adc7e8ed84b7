//! Color gradients.
//!
//! Gradients are linear in RGB. Six-stop gradients match the palette's
//! `gradient_1` .. `gradient_6` entries; per-character gradients spread any
//! 2 to 6 stops across a string.

use num_rational::Ratio;
use unicode_segmentation::UnicodeSegmentation;

use crate::chunk::TextChunk;
use crate::color::Color;
use crate::palette::{self, GRADIENT_STOPS};

/// Most stops a per-character gradient uses; extra stops are ignored.
pub const MAX_TEXT_STOPS: usize = 6;

/// Six hex steps from `start` to `end`, both included.
///
/// Step `i` is `start + (end - start) * i / 5` per channel. If either end is
/// not a valid hex color, all six steps are the `no_color` hex.
#[must_use]
pub fn gradient_between(start: &str, end: &str) -> Vec<String> {
    let (start, end) = match (Color::parse_hex(start), Color::parse_hex(end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(err), _) | (_, Err(err)) => {
            log::debug!("{err}, gradient falls back to no_color");
            let hex = palette::active().no_color().hex().to_string();
            return vec![hex; GRADIENT_STOPS];
        }
    };
    let last = i64::try_from(GRADIENT_STOPS - 1).unwrap_or(1);
    (0..=last)
        .map(|step| lerp(&start, &end, Ratio::new(step, last)).hex().to_string())
        .collect()
}

/// Stretch 1 to 6 colors into exactly six gradient stops.
///
/// Other counts yield six copies of `no_color`.
#[must_use]
pub fn expand_to_six(colors: &[Color]) -> Vec<Color> {
    let pattern: &[usize] = match colors.len() {
        1 => &[0, 0, 0, 0, 0, 0],
        2 => &[0, 0, 0, 1, 1, 1],
        3 => &[0, 0, 1, 1, 2, 2],
        4 => &[0, 0, 1, 2, 3, 3],
        5 => &[0, 1, 2, 2, 3, 4],
        6 => &[0, 1, 2, 3, 4, 5],
        count => {
            log::debug!("cannot expand {count} colors to a gradient, using no_color");
            return vec![palette::active().no_color().clone(); GRADIENT_STOPS];
        }
    };
    pattern.iter().map(|&index| colors[index].clone()).collect()
}

/// Linear RGB interpolation; `t` is clamped to `[0, 1]`.
#[must_use]
pub fn interpolate(start: &Color, end: &Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (r1, g1, b1) = start.rgb();
    let (r2, g2, b2) = end.rgb();
    Color::from_rgb(
        mix_f64(r1, r2, t),
        mix_f64(g1, g2, t),
        mix_f64(b1, b2, t),
    )
}

/// Color every character of `text` along a gradient through `colors`.
///
/// The stops split the text into `stops - 1` equal segments; each character
/// takes the interpolation between its segment's endpoints at its offset
/// and is wrapped on its own. The first character gets the first stop and
/// the last character gets the last one. Stops past the sixth are ignored.
#[must_use]
pub fn apply_gradient_to_text(text: &str, colors: &[Color]) -> String {
    gradient_chunks(text, colors)
        .iter()
        .map(TextChunk::render)
        .collect()
}

/// The chunks behind [`apply_gradient_to_text`]: one colored chunk per
/// grapheme, or the whole text uncolored when there are no stops.
#[must_use]
pub fn gradient_chunks(text: &str, colors: &[Color]) -> Vec<TextChunk> {
    let stops = &colors[..colors.len().min(MAX_TEXT_STOPS)];
    match stops {
        [] => return vec![TextChunk::plain(text)],
        [only] => {
            return text
                .graphemes(true)
                .map(|grapheme| TextChunk::new(grapheme, Some(only.clone())))
                .collect();
        }
        _ => {}
    }

    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let span = i64::try_from(graphemes.len().saturating_sub(1).max(1)).unwrap_or(i64::MAX);
    let segments = i64::try_from(stops.len() - 1).unwrap_or(1);
    (0_i64..)
        .zip(graphemes)
        .map(|(index, grapheme)| {
            let position = Ratio::new(index * segments, span);
            let segment = position.floor().to_integer().min(segments - 1);
            let offset = position - segment;
            let segment = usize::try_from(segment).unwrap_or_default();
            let color = lerp(&stops[segment], &stops[segment + 1], offset);
            TextChunk::new(grapheme, Some(color))
        })
        .collect()
}

/// The six gradient stops of the active palette.
#[must_use]
pub fn palette_gradient() -> Vec<Color> {
    palette::active().gradients()
}

/// [`apply_gradient_to_text`] with the active palette's gradient stops.
#[must_use]
pub fn apply_palette_gradient(text: &str) -> String {
    apply_gradient_to_text(text, &palette_gradient())
}

fn lerp(start: &Color, end: &Color, t: Ratio<i64>) -> Color {
    let (r1, g1, b1) = start.rgb();
    let (r2, g2, b2) = end.rgb();
    Color::from_rgb(mix(r1, r2, t), mix(g1, g2, t), mix(b1, b2, t))
}

fn mix(start: u8, end: u8, t: Ratio<i64>) -> u8 {
    let start = i64::from(start);
    let value = (Ratio::from_integer(start) + (Ratio::from_integer(i64::from(end) - start) * t))
        .round()
        .to_integer();
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to the u8 range"
)]
fn mix_f64(start: u8, end: u8, t: f64) -> u8 {
    let start = f64::from(start);
    (start + (f64::from(end) - start) * t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(color: &str) -> Color {
        Color::from_hex(color)
    }

    #[test]
    fn test_gradient_between_endpoints() {
        let steps = gradient_between("#000000", "#FFFFFF");
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], "#000000");
        assert_eq!(steps[5], "#FFFFFF");
        assert_eq!(steps[1], "#333333");
    }

    #[test]
    fn test_gradient_between_normalizes_case() {
        let steps = gradient_between("#ff0000", "#0000ff");
        assert_eq!(steps[0], "#FF0000");
        assert_eq!(steps[5], "#0000FF");
    }

    #[test]
    fn test_gradient_between_black_to_white_increases() {
        let steps = gradient_between("#000000", "#FFFFFF");
        let reds: Vec<u8> = steps.iter().map(|s| hex(s).rgb().0).collect();
        assert!(reds.windows(2).all(|pair| pair[0] < pair[1]), "{reds:?}");
    }

    #[test]
    fn test_gradient_between_invalid_falls_back() {
        let steps = gradient_between("nope", "#FFFFFF");
        let fallback = palette::active().no_color().hex().to_string();
        assert_eq!(steps, vec![fallback; 6]);
    }

    #[test]
    fn test_expand_to_six_patterns() {
        let colors: Vec<Color> = ["#110000", "#220000", "#330000", "#440000", "#550000"]
            .into_iter()
            .map(hex)
            .collect();
        let reds = |expanded: Vec<Color>| -> Vec<u8> {
            expanded.iter().map(|c| c.rgb().0 / 0x11).collect()
        };
        assert_eq!(reds(expand_to_six(&colors[..1])), [1, 1, 1, 1, 1, 1]);
        assert_eq!(reds(expand_to_six(&colors[..2])), [1, 1, 1, 2, 2, 2]);
        assert_eq!(reds(expand_to_six(&colors[..3])), [1, 1, 2, 2, 3, 3]);
        assert_eq!(reds(expand_to_six(&colors[..4])), [1, 1, 2, 3, 4, 4]);
        assert_eq!(reds(expand_to_six(&colors[..5])), [1, 2, 3, 3, 4, 5]);
    }

    #[test]
    fn test_expand_to_six_identity_and_fallback() {
        let six: Vec<Color> = (0..6u8).map(|n| Color::from_rgb(n, n, n)).collect();
        assert_eq!(expand_to_six(&six), six);
        let none = expand_to_six(&[]);
        assert_eq!(none.len(), 6);
        assert!(none.iter().all(|c| c == palette::active().no_color()));
    }

    #[test]
    fn test_interpolate() {
        let mid = interpolate(&hex("#000000"), &hex("#FFFFFF"), 0.5);
        assert_eq!(mid.rgb(), (128, 128, 128));
        let clamped = interpolate(&hex("#000000"), &hex("#FFFFFF"), 3.0);
        assert_eq!(clamped.hex(), "#FFFFFF");
    }

    #[test]
    fn test_apply_gradient_to_text_endpoints() {
        let out = apply_gradient_to_text("abc", &[hex("#FF0000"), hex("#0000FF")]);
        assert_eq!(
            out,
            concat!(
                "\x1b[38;2;255;0;0ma\x1b[0m",
                "\x1b[38;2;128;0;128mb\x1b[0m",
                "\x1b[38;2;0;0;255mc\x1b[0m",
            )
        );
    }

    #[test]
    fn test_apply_gradient_to_text_three_stops() {
        let stops = [hex("#FF0000"), hex("#00FF00"), hex("#0000FF")];
        let out = apply_gradient_to_text("abc", &stops);
        assert!(out.contains("\x1b[38;2;0;255;0mb"));
    }

    #[test]
    fn test_apply_gradient_to_text_truncates_extra_stops() {
        let mut stops: Vec<Color> = (0..6).map(|_| hex("#000000")).collect();
        stops.push(hex("#FFFFFF"));
        let out = apply_gradient_to_text("ab", &stops);
        assert!(!out.contains("255;255;255"));
    }

    #[test]
    fn test_apply_gradient_degenerate_inputs() {
        assert_eq!(apply_gradient_to_text("", &[hex("#000000"), hex("#FFFFFF")]), "");
        assert_eq!(apply_gradient_to_text("ab", &[]), "ab");
        assert_eq!(
            apply_gradient_to_text("x", &[hex("#FF0000"), hex("#0000FF")]),
            "\x1b[38;2;255;0;0mx\x1b[0m"
        );
    }

    #[test]
    fn test_gradient_chunks_one_per_grapheme() {
        let chunks = gradient_chunks("ae\u{301}z", &[hex("#000000"), hex("#FFFFFF")]);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["a", "e\u{301}", "z"]);
        assert_eq!(chunks[2].color.as_ref().map(Color::hex), Some("#FFFFFF"));
        assert_eq!(gradient_chunks("ab", &[]), vec![TextChunk::plain("ab")]);
    }

    #[test]
    fn test_palette_gradient_has_six_stops() {
        assert_eq!(palette_gradient().len(), 6);
        assert_eq!(crate::measure::visible_length(&apply_palette_gradient("hello")), 5);
    }
}
