//! Named color palette.
//!
//! A [`Palette`] maps names (`primary`, `error`, `gradient_1`, ...) to
//! [`Color`]s. The process palette is installed once at startup with
//! [`Palette::install`] and is read-only afterwards; [`active`] returns it,
//! or the built-in palette when nothing was installed.
//!
//! Palette configuration uses a small `.ini` dialect:
//!
//! ```ini
//! [colors]
//! primary = #A1E7FA
//!
//! [gradients]
//! gradient_1 = #FF0080
//! ```
//!
//! Lookups of unknown names fall back to the `no_color` entry.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, OnceLock};

use crate::color::{Color, ColorInput, ColorParseError};

/// Number of gradient stops a palette carries.
pub const GRADIENT_STOPS: usize = 6;

/// Name of the universal fallback entry.
pub const NO_COLOR: &str = "no_color";

static BUILTIN: LazyLock<Palette> = LazyLock::new(|| {
    Palette::from_ini_str(include_str!("default_palette.ini"), false)
        .expect("src/default_palette.ini: built-in palette must parse")
});

static ACTIVE: OnceLock<Palette> = OnceLock::new();

/// The installed process palette, or the built-in one.
#[must_use]
pub fn active() -> &'static Palette {
    ACTIVE.get().unwrap_or_else(Palette::builtin)
}

/// A read-only mapping from color name to [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<String, Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl Palette {
    /// The built-in palette.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Create a palette from named colors.
    ///
    /// If `inherit` is true the built-in entries are kept and the provided
    /// colors override / extend them. A `no_color` entry is always present.
    #[must_use]
    pub fn new(colors: HashMap<String, Color>, inherit: bool) -> Self {
        let mut merged = if inherit {
            BUILTIN.colors.clone()
        } else {
            HashMap::new()
        };
        for (name, color) in colors {
            let name = normalize_name(&name);
            merged.insert(name.clone(), color.named(name));
        }
        merged
            .entry(NO_COLOR.to_string())
            .or_insert_with(|| Color::from_rgb(255, 255, 255).named(NO_COLOR));
        Self { colors: merged }
    }

    /// Build a palette from `(name, hex)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidColor` naming the first entry whose hex
    /// string does not parse.
    pub fn from_hex_entries<I, K, V>(entries: I, inherit: bool) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut colors = HashMap::new();
        for (name, hex) in entries {
            let name = name.into();
            let color =
                Color::parse_hex(hex.as_ref()).map_err(|err| PaletteError::InvalidColor {
                    name: name.clone(),
                    err,
                })?;
            colors.insert(name, color);
        }
        Ok(Self::new(colors, inherit))
    }

    /// Parse a palette `.ini` document with `[colors]` and `[gradients]` sections.
    ///
    /// Gradient keys may be written `gradient_3` or just `3`.
    ///
    /// # Errors
    ///
    /// Returns a `PaletteError` for malformed lines, duplicate keys, unknown
    /// sections, bad gradient stop numbers and invalid hex colors.
    pub fn from_ini_str(contents: &str, inherit: bool) -> Result<Self, PaletteError> {
        let mut section: Option<Section> = None;
        let mut colors: HashMap<String, Color> = HashMap::new();

        for (line_no, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section_name = line[1..line.len() - 1].trim();
                section = Some(Section::parse(section_name).ok_or_else(|| {
                    PaletteError::UnknownSection {
                        line_no: line_no + 1,
                        name: section_name.to_string(),
                    }
                })?);
                continue;
            }

            let invalid_line = || PaletteError::InvalidIniLine {
                line_no: line_no + 1,
                line: raw_line.to_string(),
            };

            let Some(section) = section else {
                return Err(invalid_line());
            };

            let (key, hex) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(invalid_line)?;

            let key = key.trim();
            if key.is_empty() {
                return Err(invalid_line());
            }
            let name = match section {
                Section::Colors => normalize_name(key),
                Section::Gradients => {
                    gradient_key(key).ok_or_else(|| PaletteError::InvalidGradientStop {
                        line_no: line_no + 1,
                        name: key.to_string(),
                    })?
                }
            };

            let color = Color::parse_hex(hex).map_err(|err| PaletteError::InvalidColor {
                name: name.clone(),
                err,
            })?;

            if colors.insert(name.clone(), color).is_some() {
                return Err(PaletteError::DuplicateKey {
                    line_no: line_no + 1,
                    name,
                });
            }
        }

        Ok(Self::new(colors, inherit))
    }

    /// Read a palette `.ini` file from disk.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::Io` when the file cannot be read, or any error
    /// from [`Palette::from_ini_str`].
    pub fn read(path: impl AsRef<Path>, inherit: bool) -> Result<Self, PaletteError> {
        let contents = fs::read_to_string(&path).map_err(|err| PaletteError::Io {
            path: path.as_ref().to_path_buf(),
            err,
        })?;
        Self::from_ini_str(&contents, inherit)
    }

    /// Install this palette as the process palette.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::AlreadyInstalled` if a palette was installed
    /// before; the first installation wins.
    pub fn install(self) -> Result<(), PaletteError> {
        ACTIVE
            .set(self)
            .map_err(|_| PaletteError::AlreadyInstalled)
    }

    /// Look up a color by name without falling back.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Color> {
        self.colors.get(&normalize_name(name))
    }

    /// Look up a color by name, falling back to `no_color`.
    #[must_use]
    pub fn get(&self, name: &str) -> &Color {
        self.lookup(name).unwrap_or_else(|| {
            log::debug!("unknown palette color {name:?}, using {NO_COLOR}");
            self.no_color()
        })
    }

    /// The universal fallback color.
    #[must_use]
    pub fn no_color(&self) -> &Color {
        self.colors
            .get(NO_COLOR)
            .unwrap_or_else(|| &BUILTIN.colors[NO_COLOR])
    }

    /// The six gradient stops in order; missing stops use `no_color`.
    #[must_use]
    pub fn gradients(&self) -> Vec<Color> {
        (1..=GRADIENT_STOPS)
            .map(|stop| self.get(&format!("gradient_{stop}")).clone())
            .collect()
    }

    /// All color names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve any color input against this palette.
    #[must_use]
    pub fn resolve(&self, input: impl Into<ColorInput>) -> Color {
        input.into().resolve(self)
    }

    /// Render this palette back into its `.ini` form.
    #[must_use]
    pub fn config(&self) -> String {
        let (gradients, colors): (Vec<&str>, Vec<&str>) = self
            .names()
            .into_iter()
            .partition(|name| gradient_key(name).is_some_and(|key| key == *name));

        let mut out = String::from("[colors]\n");
        for name in colors {
            out.push_str(&format!("{name} = {}\n", self.colors[name].hex()));
        }
        out.push_str("\n[gradients]\n");
        for name in gradients {
            out.push_str(&format!("{name} = {}\n", self.colors[name].hex()));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Colors,
    Gradients,
}

impl Section {
    fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("colors") {
            Some(Self::Colors)
        } else if name.eq_ignore_ascii_case("gradients") {
            Some(Self::Gradients)
        } else {
            None
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().trim_start_matches(':').to_lowercase()
}

/// Map `3` or `gradient_3` to `gradient_3` when the stop is in range.
fn gradient_key(key: &str) -> Option<String> {
    let key = normalize_name(key);
    let number = key.strip_prefix("gradient_").unwrap_or(&key);
    let stop: usize = number.parse().ok()?;
    (1..=GRADIENT_STOPS)
        .contains(&stop)
        .then(|| format!("gradient_{stop}"))
}

/// Errors returned while decoding palette configuration.
#[derive(Debug)]
pub enum PaletteError {
    Io {
        path: std::path::PathBuf,
        err: std::io::Error,
    },
    InvalidIniLine {
        line_no: usize,
        line: String,
    },
    UnknownSection {
        line_no: usize,
        name: String,
    },
    DuplicateKey {
        line_no: usize,
        name: String,
    },
    InvalidGradientStop {
        line_no: usize,
        name: String,
    },
    InvalidColor {
        name: String,
        err: ColorParseError,
    },
    AlreadyInstalled,
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, err } => {
                write!(f, "failed to read palette file {}: {err}", path.display())
            }
            Self::InvalidIniLine { line_no, line } => {
                write!(f, "invalid palette ini line {line_no}: {line:?}")
            }
            Self::UnknownSection { line_no, name } => {
                write!(f, "unknown palette section [{name}] at line {line_no}")
            }
            Self::DuplicateKey { line_no, name } => {
                write!(f, "duplicate palette key {name:?} at line {line_no}")
            }
            Self::InvalidGradientStop { line_no, name } => {
                write!(
                    f,
                    "invalid gradient stop {name:?} at line {line_no} (expected 1-{GRADIENT_STOPS})"
                )
            }
            Self::InvalidColor { name, err } => {
                write!(f, "invalid color for palette key {name:?}: {err}")
            }
            Self::AlreadyInstalled => write!(f, "a palette is already installed"),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::InvalidColor { err, .. } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 17] = [
        "primary",
        "secondary",
        "ternary",
        "quaternary",
        "success",
        "warning",
        "error",
        "info",
        "debug",
        "menu",
        "no_color",
        "critical",
        "alert",
        "emergency",
        "happy",
        "notice",
        "background",
    ];

    #[test]
    fn builtin_has_every_default_name() {
        let palette = Palette::builtin();
        for name in NAMES {
            let color = palette.lookup(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(color.name(), Some(name));
        }
        assert_eq!(palette.gradients().len(), GRADIENT_STOPS);
    }

    #[test]
    fn unknown_name_falls_back_to_no_color() {
        let palette = Palette::builtin();
        assert_eq!(palette.get("nope"), palette.no_color());
        assert!(palette.lookup("nope").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let palette = Palette::builtin();
        assert_eq!(palette.lookup("PRIMARY"), palette.lookup("primary"));
        assert_eq!(palette.lookup(":primary"), palette.lookup("primary"));
    }

    #[test]
    fn from_hex_entries_overrides_defaults() {
        let palette = Palette::from_hex_entries([("primary", "#010203")], true).expect("palette");
        assert_eq!(palette.get("primary").hex(), "#010203");
        assert!(palette.lookup("error").is_some());
    }

    #[test]
    fn from_hex_entries_without_inherit_still_has_no_color() {
        let palette = Palette::from_hex_entries([("brand", "#010203")], false).expect("palette");
        assert!(palette.lookup("primary").is_none());
        assert_eq!(palette.no_color().name(), Some(NO_COLOR));
    }

    #[test]
    fn from_hex_entries_reports_bad_hex() {
        let err = Palette::from_hex_entries([("primary", "blue")], true).expect_err("error");
        assert_eq!(
            err.to_string(),
            "invalid color for palette key \"primary\": Invalid hex color: blue"
        );
    }

    #[test]
    fn from_ini_str_parses_both_sections() {
        let ini = "[colors]\nprimary = #112233\n\n[gradients]\n1 = #000000\ngradient_6 = #FFFFFF\n";
        let palette = Palette::from_ini_str(ini, true).expect("palette");
        assert_eq!(palette.get("primary").hex(), "#112233");
        let stops = palette.gradients();
        assert_eq!(stops[0].hex(), "#000000");
        assert_eq!(stops[5].hex(), "#FFFFFF");
    }

    #[test]
    fn from_ini_str_rejects_unknown_section() {
        let err = Palette::from_ini_str("[styles]\n", true).expect_err("error");
        assert!(matches!(err, PaletteError::UnknownSection { line_no: 1, .. }));
    }

    #[test]
    fn from_ini_str_rejects_line_outside_section() {
        let err = Palette::from_ini_str("primary = #000000\n", true).expect_err("error");
        assert!(matches!(err, PaletteError::InvalidIniLine { line_no: 1, .. }));
    }

    #[test]
    fn from_ini_str_rejects_duplicates() {
        let err = Palette::from_ini_str("[colors]\na = #000000\nA = #111111\n", true)
            .expect_err("error");
        assert!(matches!(err, PaletteError::DuplicateKey { line_no: 3, .. }));
    }

    #[test]
    fn from_ini_str_rejects_bad_gradient_stop() {
        let err = Palette::from_ini_str("[gradients]\n7 = #000000\n", true).expect_err("error");
        assert!(matches!(err, PaletteError::InvalidGradientStop { .. }));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = Palette::read("/definitely/not/here.ini", true).expect_err("error");
        assert!(matches!(err, PaletteError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_roundtrip() {
        let palette = Palette::builtin();
        let config = palette.config();
        assert!(config.starts_with("[colors]\n"));
        let reparsed = Palette::from_ini_str(&config, false).expect("palette");
        assert_eq!(&reparsed, palette);
    }

    #[test]
    fn resolve_uses_this_palette() {
        let palette = Palette::from_hex_entries([("primary", "#0000FF")], true).expect("palette");
        assert_eq!(palette.resolve("primary").rgb(), (0, 0, 255));
    }
}
