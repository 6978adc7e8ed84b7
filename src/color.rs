//! Color model for terminal rendering.
//!
//! A [`Color`] keeps every representation of one RGB point in sync:
//! hex, RGB, ARGB, HSV, HSL and CMYK. Colors are immutable values; the
//! brightness helpers ([`Color::lighten`], [`Color::darken`]) return a new
//! color with every representation recomputed.
//!
//! # Examples
//!
//! ## Building Colors
//!
//! ```
//! use aurora_term::color::Color;
//!
//! let red = Color::from_rgb(255, 0, 0);
//! assert_eq!(red.hex(), "#FF0000");
//!
//! let teal = Color::from_hex("#336699");
//! assert_eq!(teal.rgb(), (51, 102, 153));
//!
//! // HSV, HSL and CMYK need their own constructors, they are never guessed.
//! let green = Color::from_hsv(120.0, 1.0, 1.0);
//! assert_eq!(green.rgb(), (0, 255, 0));
//! ```
//!
//! ## Universal Ingestion
//!
//! ```
//! use aurora_term::color::{to_color, to_rgb};
//!
//! let from_hex = to_color("#00FF00");
//! let from_tuple = to_color((0, 255, 0));
//! assert_eq!(from_hex.rgb(), from_tuple.rgb());
//!
//! // Unknown names fall back to the palette's `no_color` entry.
//! let fallback = to_color("definitely_not_a_color");
//! assert_eq!(fallback.name(), Some("no_color"));
//! assert_eq!(to_rgb("#0000FF"), (0, 0, 255));
//! ```
//!
//! ## ANSI Codes
//!
//! ```
//! use aurora_term::color::{Color, apply_color};
//!
//! let red = Color::from_hex("#FF0000");
//! assert_eq!(red.to_ansi_fg(), "\x1b[38;2;255;0;0m");
//! assert_eq!(apply_color("Hi", &red), "\x1b[38;2;255;0;0mHi\x1b[0m");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::effects::RESET;
use crate::palette::{self, Palette};

/// Reverse-video escape emitted in front of inverted colors.
pub const REVERSE_VIDEO: &str = "\x1b[7m";

/// One lightness tone: 1/12 of the HSL lightness range.
pub const TONE: f64 = 1.0 / 12.0;

/// A color with all of its representations kept in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    hex: String,
    rgb: (u8, u8, u8),
    argb: (u8, u8, u8, u8),
    hsv: (f64, f64, f64),
    hsl: (f64, f64, f64),
    cmyk: (f64, f64, f64, f64),
    name: Option<String>,
    inverted: bool,
}

impl Default for Color {
    fn default() -> Self {
        palette::active().no_color().clone()
    }
}

impl Color {
    /// Create a color from RGB components (alpha 255).
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(255, red, green, blue)
    }

    /// Create a color from alpha and RGB components.
    #[must_use]
    pub fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        let rgb = (red, green, blue);
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            argb: (alpha, red, green, blue),
            hsv: rgb_to_hsv(rgb),
            hsl: rgb_to_hsl(rgb),
            cmyk: rgb_to_cmyk(rgb),
            name: None,
            inverted: false,
        }
    }

    /// Create a color from a hex string, leniently.
    ///
    /// Malformed input produces black; use [`Color::parse_hex`] when the
    /// failure must be observed.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let (r, g, b) = hex_to_rgb(hex);
        Self::from_rgb(r, g, b)
    }

    /// Parse a `#RRGGBB` (or `#RGB`) hex string.
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError::Empty` for blank input and
    /// `ColorParseError::InvalidHex` for anything that is not a hex color.
    pub fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let trimmed = hex.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }
        let (r, g, b) = parse_hex_digits(trimmed)
            .ok_or_else(|| ColorParseError::InvalidHex(trimmed.to_string()))?;
        Ok(Self::from_rgb(r, g, b))
    }

    /// Create a color from HSV (hue in degrees, saturation and value in 0-1).
    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let (r, g, b) = hsv_to_rgb((hue, saturation, value));
        Self::from_rgb(r, g, b)
    }

    /// Create a color from HSL (hue in degrees, saturation and lightness in 0-1).
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let (r, g, b) = hsl_to_rgb((hue, saturation, lightness));
        Self::from_rgb(r, g, b)
    }

    /// Create a color from CMYK components (each in 0-1).
    #[must_use]
    pub fn from_cmyk(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        let (r, g, b) = cmyk_to_rgb((cyan, magenta, yellow, key));
        Self::from_rgb(r, g, b)
    }

    /// Attach a palette name to this color.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark this color as rendered with reverse video.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Replace the alpha channel.
    #[must_use]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.argb.0 = alpha;
        self
    }

    /// Uppercase `#RRGGBB` form.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[must_use]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    #[must_use]
    pub const fn argb(&self) -> (u8, u8, u8, u8) {
        self.argb
    }

    #[must_use]
    pub const fn hsv(&self) -> (f64, f64, f64) {
        self.hsv
    }

    #[must_use]
    pub const fn hsl(&self) -> (f64, f64, f64) {
        self.hsl
    }

    #[must_use]
    pub const fn cmyk(&self) -> (f64, f64, f64, f64) {
        self.cmyk
    }

    /// Palette name, if this color came from a named palette entry.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Lighten by `tones` twelfths of the HSL lightness range.
    #[must_use]
    pub fn lighten(&self, tones: u32) -> Self {
        self.shift_lightness(f64::from(tones) * TONE)
    }

    /// Darken by `tones` twelfths of the HSL lightness range.
    #[must_use]
    pub fn darken(&self, tones: u32) -> Self {
        self.shift_lightness(-f64::from(tones) * TONE)
    }

    fn shift_lightness(&self, delta: f64) -> Self {
        if delta.abs() < f64::EPSILON {
            return self.clone();
        }
        let (hue, saturation, lightness) = self.hsl;
        let (r, g, b) = hsl_to_rgb((hue, saturation, (lightness + delta).clamp(0.0, 1.0)));
        Self {
            name: self.name.clone(),
            inverted: self.inverted,
            ..Self::from_argb(self.argb.0, r, g, b)
        }
    }

    /// 24-bit foreground escape, prefixed with reverse video when inverted.
    #[must_use]
    pub fn to_ansi_fg(&self) -> String {
        self.escape(false, self.inverted)
    }

    /// 24-bit background escape, prefixed with reverse video when inverted.
    #[must_use]
    pub fn to_ansi_bg(&self) -> String {
        self.escape(true, self.inverted)
    }

    fn escape(&self, background: bool, inverted: bool) -> String {
        let (r, g, b) = self.rgb;
        let layer = if background { 48 } else { 38 };
        let prefix = if inverted { REVERSE_VIDEO } else { "" };
        format!("{prefix}\x1b[{layer};2;{r};{g};{b}m")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((alpha, red, green, blue): (u8, u8, u8, u8)) -> Self {
        Self::from_argb(alpha, red, green, blue)
    }
}

/// Error type for strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Input Classification
// ============================================================================

/// The recognized shapes a color can be given in.
///
/// HSV, HSL and CMYK tuples share their arity with RGB/ARGB and are
/// deliberately absent; build those with [`Color::from_hsv`],
/// [`Color::from_hsl`] and [`Color::from_cmyk`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    Hex(String),
    Rgb(u8, u8, u8),
    Argb(u8, u8, u8, u8),
    Name(String),
    Color(Color),
    Unrecognized,
}

impl ColorInput {
    /// Classify a string: `#...` is hex, anything else non-blank is a name.
    #[must_use]
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with('#') {
            Self::Hex(trimmed.to_string())
        } else if trimmed.is_empty() {
            Self::Unrecognized
        } else {
            Self::Name(trimmed.to_lowercase())
        }
    }

    /// Resolve against an explicit palette. Never fails.
    #[must_use]
    pub fn resolve(self, palette: &Palette) -> Color {
        match self {
            Self::Hex(hex) => Color::parse_hex(&hex).unwrap_or_else(|err| {
                log::debug!("{err}, using no_color");
                palette.no_color().clone()
            }),
            Self::Rgb(r, g, b) => Color::from_rgb(r, g, b),
            Self::Argb(a, r, g, b) => Color::from_argb(a, r, g, b),
            Self::Name(name) => palette.get(&name).clone(),
            Self::Color(color) => color,
            Self::Unrecognized => palette.no_color().clone(),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        Self::classify(value)
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        Self::classify(&value)
    }
}

impl From<&String> for ColorInput {
    fn from(value: &String) -> Self {
        Self::classify(value)
    }
}

impl From<(u8, u8, u8)> for ColorInput {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl From<[u8; 3]> for ColorInput {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for ColorInput {
    fn from((a, r, g, b): (u8, u8, u8, u8)) -> Self {
        Self::Argb(a, r, g, b)
    }
}

impl From<Color> for ColorInput {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<&Color> for ColorInput {
    fn from(value: &Color) -> Self {
        Self::Color(value.clone())
    }
}

impl<T: Into<ColorInput>> From<Option<T>> for ColorInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unrecognized, Into::into)
    }
}

/// Turn any recognized input into a [`Color`] using the active palette.
#[must_use]
pub fn to_color(input: impl Into<ColorInput>) -> Color {
    input.into().resolve(palette::active())
}

#[must_use]
pub fn to_hex(input: impl Into<ColorInput>) -> String {
    to_color(input).hex
}

#[must_use]
pub fn to_rgb(input: impl Into<ColorInput>) -> (u8, u8, u8) {
    to_color(input).rgb
}

#[must_use]
pub fn to_argb(input: impl Into<ColorInput>) -> (u8, u8, u8, u8) {
    to_color(input).argb
}

#[must_use]
pub fn to_hsv(input: impl Into<ColorInput>) -> (f64, f64, f64) {
    to_color(input).hsv
}

#[must_use]
pub fn to_hsl(input: impl Into<ColorInput>) -> (f64, f64, f64) {
    to_color(input).hsl
}

#[must_use]
pub fn to_cmyk(input: impl Into<ColorInput>) -> (f64, f64, f64, f64) {
    to_color(input).cmyk
}

// ============================================================================
// ANSI Emission
// ============================================================================

/// Options for [`apply_color_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Emit a background escape instead of a foreground one.
    pub background: bool,
    /// Override the color's own `inverted` flag.
    pub inverted: Option<bool>,
}

impl ColorOptions {
    #[must_use]
    pub const fn background() -> Self {
        Self {
            background: true,
            inverted: None,
        }
    }
}

#[must_use]
pub fn color_to_ansi_fg(color: &Color) -> String {
    color.to_ansi_fg()
}

#[must_use]
pub fn color_to_ansi_bg(color: &Color) -> String {
    color.to_ansi_bg()
}

/// Wrap `text` in the color's foreground escape and a trailing reset.
#[must_use]
pub fn apply_color(text: &str, color: &Color) -> String {
    apply_color_with(text, color, ColorOptions::default())
}

/// Wrap `text` in a color escape and a trailing reset.
///
/// Empty text stays empty so no bare escape pair is emitted.
#[must_use]
pub fn apply_color_with(text: &str, color: &Color, options: ColorOptions) -> String {
    if text.is_empty() {
        return String::new();
    }
    let inverted = options.inverted.unwrap_or(color.inverted);
    let code = color.escape(options.background, inverted);
    format!("{code}{text}{RESET}")
}

/// Make escape sequences printable by replacing ESC with `\e`.
#[must_use]
pub fn escape_ansi(rendered: &str) -> String {
    rendered.replace('\x1b', "\\e")
}

// ============================================================================
// Conversion Algorithms
// ============================================================================

fn parse_hex_digits(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some((
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        )),
        3 => {
            let mut channels = digits.chars().map(|c| {
                c.to_digit(16)
                    .and_then(|d| u8::try_from(d * 17).ok())
            });
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}

/// Parse `#RRGGBB` (case-insensitive). Malformed input yields black.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    parse_hex_digits(hex.trim()).unwrap_or_else(|| {
        log::trace!("malformed hex {hex:?}, using (0, 0, 0)");
        (0, 0, 0)
    })
}

#[must_use]
pub fn rgb_to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[must_use]
pub const fn rgb_to_argb((r, g, b): (u8, u8, u8)) -> (u8, u8, u8, u8) {
    (255, r, g, b)
}

#[must_use]
pub const fn argb_to_rgb((_, r, g, b): (u8, u8, u8, u8)) -> (u8, u8, u8) {
    (r, g, b)
}

fn normalized((r, g, b): (u8, u8, u8)) -> (f64, f64, f64) {
    (
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0-255 before the cast"
)]
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue in degrees via the max-channel branch, wrapped into [0, 360).
fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta <= 0.0 {
        return 0.0;
    }
    let hue = if (max - r).abs() < f64::EPSILON {
        60.0 * ((g - b) / delta)
    } else if (max - g).abs() < f64::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    hue.rem_euclid(360.0)
}

/// Map chroma and the secondary component onto RGB for a hue sector.
fn sector((hue, chroma, m): (f64, f64, f64)) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h {
        h if h < 1.0 => (chroma, x, 0.0),
        h if h < 2.0 => (x, chroma, 0.0),
        h if h < 3.0 => (0.0, chroma, x),
        h if h < 4.0 => (0.0, x, chroma),
        h if h < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    (to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

#[must_use]
pub fn rgb_to_hsv(rgb: (u8, u8, u8)) -> (f64, f64, f64) {
    let (r, g, b) = normalized(rgb);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let saturation = if max <= 0.0 { 0.0 } else { delta / max };
    (hue(r, g, b, max, delta), saturation, max)
}

#[must_use]
pub fn hsv_to_rgb((hue, saturation, value): (f64, f64, f64)) -> (u8, u8, u8) {
    let saturation = saturation.clamp(0.0, 1.0);
    let value = value.clamp(0.0, 1.0);
    let chroma = value * saturation;
    sector((hue, chroma, value - chroma))
}

#[must_use]
pub fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f64, f64, f64) {
    let (r, g, b) = normalized(rgb);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = f64::midpoint(max, min);
    let saturation = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    };
    (hue(r, g, b, max, delta), saturation.clamp(0.0, 1.0), lightness)
}

#[must_use]
pub fn hsl_to_rgb((hue, saturation, lightness): (f64, f64, f64)) -> (u8, u8, u8) {
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    sector((hue, chroma, lightness - chroma / 2.0))
}

#[must_use]
pub fn rgb_to_cmyk(rgb: (u8, u8, u8)) -> (f64, f64, f64, f64) {
    if rgb == (0, 0, 0) {
        return (0.0, 0.0, 0.0, 1.0);
    }
    let (r, g, b) = normalized(rgb);
    let key = 1.0 - r.max(g).max(b);
    let ink = |channel: f64| (1.0 - channel - key) / (1.0 - key);
    (ink(r), ink(g), ink(b), key)
}

#[must_use]
pub fn cmyk_to_rgb((cyan, magenta, yellow, key): (f64, f64, f64, f64)) -> (u8, u8, u8) {
    let key = key.clamp(0.0, 1.0);
    let channel = |ink: f64| to_channel((1.0 - ink.clamp(0.0, 1.0)) * (1.0 - key));
    (channel(cyan), channel(magenta), channel(yellow))
}
