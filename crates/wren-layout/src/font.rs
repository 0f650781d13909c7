//! Font capabilities used by layout.
//!
//! Layout never talks to a font backend directly. It asks a [`FontCache`]
//! for a [`FontHandle`] per style, and the cache asks its [`FontProvider`]
//! only the first time a style is seen.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::style::{FontKey, FontWeight};

/// Measurement interface for one concrete font at one size.
///
/// Ascent and descent are both positive distances from the baseline, in
/// pixels.
pub trait FontMetrics {
    /// Advance width of `text`, in pixels.
    fn measure(&self, text: &str) -> f32;

    /// Height of the font above the baseline.
    fn ascent(&self) -> f32;

    /// Depth of the font below the baseline.
    fn descent(&self) -> f32;
}

/// Source of fonts for a given style.
pub trait FontProvider {
    /// Resolve the font for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`FontError`] if no font can be produced for the style.
    /// Layout has no fallback, so the error aborts the pass.
    fn load_font(&self, key: FontKey) -> Result<Rc<dyn FontMetrics>, FontError>;
}

/// Failure to resolve a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The requested size cannot be rendered.
    #[error("invalid font size {size}px")]
    InvalidSize {
        /// The offending size.
        size: i32,
    },
    /// The backend has no font for this style.
    #[error("no font available for {key}: {reason}")]
    Unavailable {
        /// The style that was requested.
        key: FontKey,
        /// Backend-specific detail.
        reason: String,
    },
}

/// A resolved font: the style it was resolved for plus its shared metrics.
///
/// Cloning is cheap. Two handles from the same [`FontCache`] entry share
/// one metrics object, see [`FontHandle::same_font`].
#[derive(Clone)]
pub struct FontHandle {
    key: FontKey,
    metrics: Rc<dyn FontMetrics>,
}

impl FontHandle {
    /// Wrap `metrics` as the font for `key`.
    #[must_use]
    pub fn new(key: FontKey, metrics: Rc<dyn FontMetrics>) -> Self {
        Self { key, metrics }
    }

    /// The style this font was resolved for.
    #[must_use]
    pub const fn key(&self) -> FontKey {
        self.key
    }

    /// Advance width of `text`, in pixels.
    #[must_use]
    pub fn measure(&self, text: &str) -> f32 {
        self.metrics.measure(text)
    }

    /// Height above the baseline.
    #[must_use]
    pub fn ascent(&self) -> f32 {
        self.metrics.ascent()
    }

    /// Depth below the baseline.
    #[must_use]
    pub fn descent(&self) -> f32 {
        self.metrics.descent()
    }

    /// Whether both handles point at the same font instance.
    #[must_use]
    pub fn same_font(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.metrics, &other.metrics)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle").field(&self.key).finish()
    }
}

impl Serialize for FontHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.key.serialize(serializer)
    }
}

/// Memoizing front for a [`FontProvider`].
///
/// Entries are never evicted. The cache outlives individual layout passes
/// and is handed to each one explicitly.
pub struct FontCache {
    provider: Box<dyn FontProvider>,
    fonts: HashMap<FontKey, FontHandle>,
}

impl FontCache {
    /// Create an empty cache in front of `provider`.
    #[must_use]
    pub fn new(provider: impl FontProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            fonts: HashMap::new(),
        }
    }

    /// Get the font for `key`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`FontError`]. Failed lookups are not
    /// cached.
    pub fn get_font(&mut self, key: FontKey) -> Result<FontHandle, FontError> {
        if let Some(handle) = self.fonts.get(&key) {
            return Ok(handle.clone());
        }
        let handle = FontHandle::new(key, self.provider.load_font(key)?);
        debug!("font cache miss: {key}");
        let _ = self.fonts.insert(key, handle.clone());
        Ok(handle)
    }

    /// Number of cached fonts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Approximate font metrics using fixed ratios of the font size.
///
/// Without font data, every character is assumed to be half an em wide
/// (bold a sixteenth wider), ascent is three quarters of the size and
/// descent one quarter. All ratios are exact in binary, so layouts built on
/// them are reproducible to the last bit.
///
/// This is used in tests and when real fonts are explicitly not wanted.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateFontMetrics {
    size: f32,
    char_width: f32,
}

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.5;
    const BOLD_CHAR_WIDTH_RATIO: f32 = 0.5625;
    const ASCENT_RATIO: f32 = 0.75;
    const DESCENT_RATIO: f32 = 0.25;

    /// Metrics for the given style.
    #[must_use]
    pub fn new(key: FontKey) -> Self {
        let size = key.size as f32;
        let ratio = match key.weight {
            FontWeight::Normal => Self::CHAR_WIDTH_RATIO,
            FontWeight::Bold => Self::BOLD_CHAR_WIDTH_RATIO,
        };
        Self {
            size,
            char_width: size * ratio,
        }
    }
}

impl FontMetrics for ApproximateFontMetrics {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn ascent(&self) -> f32 {
        self.size * Self::ASCENT_RATIO
    }

    fn descent(&self) -> f32 {
        self.size * Self::DESCENT_RATIO
    }
}

/// [`FontProvider`] serving [`ApproximateFontMetrics`] for any positive size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontProvider;

impl FontProvider for ApproximateFontProvider {
    fn load_font(&self, key: FontKey) -> Result<Rc<dyn FontMetrics>, FontError> {
        if key.size <= 0 {
            return Err(FontError::InvalidSize { size: key.size });
        }
        Ok(Rc::new(ApproximateFontMetrics::new(key)))
    }
}
