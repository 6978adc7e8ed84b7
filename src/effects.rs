//! ANSI text effects.
//!
//! Effects are flat: every application wraps the text in the effect codes
//! followed by a single `ESC[0m` reset. There is no nesting or stack
//! tracking, so an inner reset also clears any outer effect.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;

/// Reset all graphic rendition attributes.
pub const RESET: &str = "\x1b[0m";

/// A single text effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
    /// Rendered with the underline code; tracked separately from underline.
    Link,
}

impl Effect {
    /// Every effect, in the order codes are composed from an [`EffectSet`].
    pub const ALL: [Self; 9] = [
        Self::Bold,
        Self::Dim,
        Self::Italic,
        Self::Underline,
        Self::Blink,
        Self::Reverse,
        Self::Hidden,
        Self::Strikethrough,
        Self::Link,
    ];

    /// ANSI SGR code for this effect.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Dim => 2,
            Self::Italic => 3,
            Self::Underline | Self::Link => 4,
            Self::Blink => 5,
            Self::Reverse => 7,
            Self::Hidden => 8,
            Self::Strikethrough => 9,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Reverse => "reverse",
            Self::Hidden => "hidden",
            Self::Strikethrough => "strikethrough",
            Self::Link => "link",
        }
    }

    /// Look up an effect by name (case-insensitive, leading `:` ignored).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches(':');
        Self::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(name))
    }

    /// The flag for this effect in an [`EffectSet`].
    #[must_use]
    pub const fn flag(self) -> EffectSet {
        match self {
            Self::Bold => EffectSet::BOLD,
            Self::Dim => EffectSet::DIM,
            Self::Italic => EffectSet::ITALIC,
            Self::Underline => EffectSet::UNDERLINE,
            Self::Blink => EffectSet::BLINK,
            Self::Reverse => EffectSet::REVERSE,
            Self::Hidden => EffectSet::HIDDEN,
            Self::Strikethrough => EffectSet::STRIKETHROUGH,
            Self::Link => EffectSet::LINK,
        }
    }

    fn escape(self) -> String {
        format!("\x1b[{}m", self.code())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

/// Error for effect names outside the effect table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEffect(pub String);

impl fmt::Display for UnknownEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown effect: {}", self.0)
    }
}

impl std::error::Error for UnknownEffect {}

bitflags! {
    /// The set of active effects on a chunk.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EffectSet: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
        const LINK          = 1 << 8;
    }
}

impl EffectSet {
    /// Active effects in fixed field order.
    #[must_use]
    pub fn effects(&self) -> Vec<Effect> {
        Effect::ALL
            .into_iter()
            .filter(|effect| self.contains(effect.flag()))
            .collect()
    }

    /// ANSI SGR codes for the active effects, in fixed field order.
    #[must_use]
    pub fn to_sgr_codes(&self) -> SmallVec<[u8; 4]> {
        Effect::ALL
            .into_iter()
            .filter(|effect| self.contains(effect.flag()))
            .map(Effect::code)
            .collect()
    }
}

impl From<Effect> for EffectSet {
    fn from(effect: Effect) -> Self {
        effect.flag()
    }
}

impl FromIterator<Effect> for EffectSet {
    fn from_iter<T: IntoIterator<Item = Effect>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, effect| set | effect.flag())
    }
}

/// Apply one effect by name. Unknown names leave the text unchanged.
#[must_use]
pub fn apply_effect(text: &str, effect: &str) -> String {
    apply_many(text, &[effect])
}

/// Apply several effects by name, in the order given.
///
/// The codes of all known effects form one prefix and a single reset closes
/// the text. When no name resolves the text is returned unchanged.
#[must_use]
pub fn apply_many<S: AsRef<str>>(text: &str, effects: &[S]) -> String {
    let resolved: SmallVec<[Effect; 4]> = effects
        .iter()
        .filter_map(|name| {
            let effect = Effect::from_name(name.as_ref());
            if effect.is_none() {
                log::trace!("ignoring unknown effect {:?}", name.as_ref());
            }
            effect
        })
        .collect();
    apply_effects(text, &resolved)
}

/// Apply typed effects in the order given.
#[must_use]
pub fn apply_effects(text: &str, effects: &[Effect]) -> String {
    if effects.is_empty() {
        return text.to_string();
    }
    let prefix: String = effects.iter().copied().map(Effect::escape).collect();
    format!("{prefix}{text}{RESET}")
}

/// Apply every effect that is set, in fixed field order.
#[must_use]
pub fn apply_from_set(text: &str, set: EffectSet) -> String {
    apply_effects(text, &set.effects())
}
