//! Inline text style: the `(size, weight, slant)` triple that selects a font.

use std::fmt;

use serde::Serialize;

/// Font size, in pixels, at the start of every layout pass.
pub const DEFAULT_FONT_SIZE: i32 = 16;

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight, set by `<b>`.
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright glyphs.
    #[default]
    Roman,
    /// Italic glyphs, set by `<i>`.
    Italic,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        })
    }
}

impl fmt::Display for FontSlant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Roman => "roman",
            Self::Italic => "italic",
        })
    }
}

/// A resolved text style and the key fonts are cached under.
///
/// During layout this doubles as the mutable style state. Closing
/// directives assign fixed values rather than restoring a saved state, so
/// `<b>x<b>y</b>z</b>` renders `z` in normal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FontKey {
    /// Font size in pixels. Repeated `<small>` can drive this to zero or
    /// below; font providers decide whether such a size is usable.
    pub size: i32,
    /// Font weight.
    pub weight: FontWeight,
    /// Font slant.
    pub slant: FontSlant,
}

impl FontKey {
    /// The style every layout pass starts from: 16px, normal, roman.
    pub const INITIAL: Self = Self {
        size: DEFAULT_FONT_SIZE,
        weight: FontWeight::Normal,
        slant: FontSlant::Roman,
    };

    /// Create a key from its parts.
    #[must_use]
    pub const fn new(size: i32, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            size,
            weight,
            slant,
        }
    }

    /// Whether this style is bold.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    /// Whether this style is italic.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.slant == FontSlant::Italic
    }
}

impl Default for FontKey {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {} {}", self.size, self.weight, self.slant)
    }
}
