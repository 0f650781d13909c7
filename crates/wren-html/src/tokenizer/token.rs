use strum_macros::{Display, EnumString};

/// A unit of tokenizer output.
///
/// The tokenizer emits a flat stream of these: runs of literal text between
/// markup, and the raw contents of each `<...>` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal characters outside markup. Never empty.
    Text {
        /// The characters exactly as they appeared in the document.
        content: String,
    },

    /// The raw text between `<` and `>`, including a leading `/` for closing
    /// directives. May be empty (`<>`). Attributes are not split off.
    Tag {
        /// Everything between the delimiters.
        name: String,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create a tag token.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag { name: name.into() }
    }

    /// The recognized style or break directive this token carries, if any.
    ///
    /// Matching is exact and case-sensitive: `<B>` and `<b class=x>` are not
    /// recognized.
    #[must_use]
    pub fn directive(&self) -> Option<Directive> {
        match self {
            Self::Tag { name } => name.parse().ok(),
            Self::Text { .. } => None,
        }
    }
}

/// The fixed set of tag names that drive layout.
///
/// Every other tag name is ignored by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Directive {
    /// `<b>`: switch to bold weight.
    #[strum(serialize = "b")]
    Bold,
    /// `</b>`: switch to normal weight.
    #[strum(serialize = "/b")]
    EndBold,
    /// `<i>`: switch to italic slant.
    #[strum(serialize = "i")]
    Italic,
    /// `</i>`: switch to roman slant.
    #[strum(serialize = "/i")]
    EndItalic,
    /// `<small>`: shrink the font by 2px.
    #[strum(serialize = "small")]
    Small,
    /// `</small>`: grow the font by 2px.
    #[strum(serialize = "/small")]
    EndSmall,
    /// `<big>`: grow the font by 4px.
    #[strum(serialize = "big")]
    Big,
    /// `</big>`: shrink the font by 4px.
    #[strum(serialize = "/big")]
    EndBig,
    /// `<br>`: end the current line.
    #[strum(serialize = "br")]
    LineBreak,
    /// `</p>`: end the current line and leave a paragraph gap.
    #[strum(serialize = "/p")]
    EndParagraph,
}
