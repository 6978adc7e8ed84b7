//! Property-based tests for aurora_term.
//!
//! These check the invariants that must hold for any input: conversion
//! round-trips, stripping idempotence and measurement of styled text.

use proptest::prelude::*;

use aurora_term::color::{
    Color, apply_color, cmyk_to_rgb, hex_to_rgb, hsl_to_rgb, hsv_to_rgb, rgb_to_cmyk,
    rgb_to_hex, rgb_to_hsl, rgb_to_hsv,
};
use aurora_term::effects::{EffectSet, apply_from_set};
use aurora_term::format::{Align, FormatRequest, format};
use aurora_term::gradient::{expand_to_six, gradient_between};
use aurora_term::measure::{strip_ansi, visible_length};

// ============================================================================
// Custom Strategies
// ============================================================================

fn rgb_triplet() -> impl Strategy<Value = (u8, u8, u8)> {
    (any::<u8>(), any::<u8>(), any::<u8>())
}

fn random_effects() -> impl Strategy<Value = EffectSet> {
    (0u16..512u16).prop_map(EffectSet::from_bits_truncate)
}

/// Text mixing printable characters with stray escape fragments.
fn messy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ]{0,6}",
            Just("\x1b".to_string()),
            Just("\x1b[".to_string()),
            Just("[1m".to_string()),
            Just("\x1b[0m".to_string()),
            Just("\x1b]8;;".to_string()),
            Just("\x1b\\".to_string()),
            Just("é".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn close(a: (u8, u8, u8), b: (u8, u8, u8)) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1 && a.2.abs_diff(b.2) <= 1
}

// ============================================================================
// Color conversions
// ============================================================================

proptest! {
    #[test]
    fn hex_round_trip(rgb in rgb_triplet()) {
        prop_assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), rgb);
    }

    #[test]
    fn hsv_round_trip(rgb in rgb_triplet()) {
        let back = hsv_to_rgb(rgb_to_hsv(rgb));
        prop_assert!(close(rgb, back), "{:?} -> {:?}", rgb, back);
    }

    #[test]
    fn hsl_round_trip(rgb in rgb_triplet()) {
        let back = hsl_to_rgb(rgb_to_hsl(rgb));
        prop_assert!(close(rgb, back), "{:?} -> {:?}", rgb, back);
    }

    #[test]
    fn cmyk_round_trip(rgb in rgb_triplet()) {
        let back = cmyk_to_rgb(rgb_to_cmyk(rgb));
        prop_assert!(close(rgb, back), "{:?} -> {:?}", rgb, back);
    }

    #[test]
    fn hue_is_normalized(rgb in rgb_triplet()) {
        let (hue, s, v) = rgb_to_hsv(rgb);
        prop_assert!((0.0..360.0).contains(&hue));
        prop_assert!((0.0..=1.0).contains(&s));
        prop_assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn lighten_never_darkens(rgb in rgb_triplet(), tones in 0u32..24) {
        let color = Color::from_rgb(rgb.0, rgb.1, rgb.2);
        let lighter = color.lighten(tones);
        prop_assert!(lighter.hsl().2 + 0.01 >= color.hsl().2);
    }
}

// ============================================================================
// Gradients
// ============================================================================

proptest! {
    #[test]
    fn gradient_endpoints_match_inputs(a in rgb_triplet(), b in rgb_triplet()) {
        let start = rgb_to_hex(a).to_lowercase();
        let end = rgb_to_hex(b);
        let steps = gradient_between(&start, &end);
        prop_assert_eq!(steps.len(), 6);
        prop_assert_eq!(&steps[0], &rgb_to_hex(a));
        prop_assert_eq!(&steps[5], &end);
    }

    #[test]
    fn expand_to_six_always_yields_six(count in 0usize..10) {
        let colors: Vec<Color> = (0..count)
            .map(|n| Color::from_rgb(u8::try_from(n).unwrap_or(0), 0, 0))
            .collect();
        let expanded = expand_to_six(&colors);
        prop_assert_eq!(expanded.len(), 6);
        if count == 6 {
            prop_assert_eq!(expanded, colors);
        }
    }
}

// ============================================================================
// Measurement
// ============================================================================

proptest! {
    #[test]
    fn strip_ansi_is_idempotent(text in messy_text()) {
        let once = strip_ansi(&text);
        prop_assert_eq!(strip_ansi(&once), once);
    }

    #[test]
    fn styling_preserves_visible_length(
        text in "[a-zA-Z0-9 àéîõü]{0,30}",
        rgb in rgb_triplet(),
        effects in random_effects(),
    ) {
        let color = Color::from_rgb(rgb.0, rgb.1, rgb.2);
        let styled = apply_color(&apply_from_set(&text, effects), &color);
        prop_assert_eq!(visible_length(&styled), visible_length(&text));
        prop_assert_eq!(strip_ansi(&styled), text);
    }

    #[test]
    fn right_alignment_fills_exactly(text in "[a-z]{1,40}", width in 1usize..60) {
        let request = FormatRequest::new([text.as_str()]).align(Align::Right).width(width);
        let out = format(&request);
        prop_assert_eq!(visible_length(&out), width.max(text.len()));
        prop_assert!(out.ends_with(text.as_str()));
    }
}
