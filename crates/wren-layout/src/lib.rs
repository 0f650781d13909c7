//! Text layout engine for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style state** - size, weight and slant driven by `<b>`, `<i>`,
//!   `<small>` and `<big>`
//! - **Word wrapping** - whitespace-separated words measured against the
//!   page width, never split
//! - **Line boxes** - a shared baseline per line derived from font ascent
//!   and descent, with `<br>` and `</p>` breaks
//! - **Font capabilities** - metrics and provider traits plus a memoizing
//!   font cache injected into each pass
//! - **Display list** - positioned words with viewport clipping
//!
//! # Not Implemented
//!
//! - Cascading styles or the box model
//! - Nested style frames (closing directives reset to fixed values)
//! - Hyphenation or breaking inside words

/// Font metrics, providers and the font cache.
pub mod font;
/// Token stream to positioned words.
pub mod layout;
/// Display list of placed words.
pub mod paint;
/// Text style and font keys.
pub mod style;

pub use font::{
    ApproximateFontMetrics, ApproximateFontProvider, FontCache, FontError, FontHandle,
    FontMetrics, FontProvider,
};
pub use layout::inline::LINE_SPACING;
pub use layout::{InlineLayout, LayoutConfig, LayoutError, layout};
pub use paint::{DisplayList, PlacedItem};
pub use style::{DEFAULT_FONT_SIZE, FontKey, FontSlant, FontWeight};
