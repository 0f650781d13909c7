//! Font metrics backed by fontdue for text measurement during layout.
//!
//! System fonts are loaded once into a [`FontSet`]. The same set feeds both
//! the layout-side [`FontdueFontProvider`] and the [`Renderer`](crate::renderer::Renderer),
//! so words are measured and drawn with identical glyph advances.

use std::rc::Rc;

use fontdue::{Font, FontSettings};
use log::{info, warn};
use wren_layout::{FontError, FontKey, FontMetrics, FontProvider};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// The four faces of one font family. Any of them may be missing.
#[derive(Clone, Default)]
pub struct FontSet {
    regular: Option<Rc<Font>>,
    bold: Option<Rc<Font>>,
    italic: Option<Rc<Font>>,
    bold_italic: Option<Rc<Font>>,
}

impl FontSet {
    /// Search the usual system locations for each face.
    #[must_use]
    pub fn load_system() -> Self {
        let set = Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS, "regular"),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        };
        if set.regular.is_none() {
            warn!("no system font found; searched {FONT_SEARCH_PATHS:?}");
        }
        set
    }

    /// Build a set from a single regular face, e.g. one bundled by the
    /// caller. Bold and italic requests fall back to it.
    ///
    /// # Errors
    ///
    /// Returns a message if fontdue cannot parse `data`.
    pub fn from_regular_bytes(data: &[u8]) -> Result<Self, String> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(str::to_string)?;
        Ok(Self {
            regular: Some(Rc::new(font)),
            ..Self::default()
        })
    }

    /// Whether at least the regular face is available.
    #[must_use]
    pub const fn has_regular(&self) -> bool {
        self.regular.is_some()
    }

    /// The best available face for a style: exact match, then partial
    /// match, then regular.
    #[must_use]
    pub fn face(&self, key: FontKey) -> Option<&Rc<Font>> {
        match (key.is_bold(), key.is_italic()) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.regular.as_ref()),
            (true, false) => self.bold.as_ref().or(self.regular.as_ref()),
            (false, true) => self.italic.as_ref().or(self.regular.as_ref()),
            (false, false) => self.regular.as_ref(),
        }
    }
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str], label: &str) -> Option<Rc<Font>> {
    for path in paths {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = Font::from_bytes(data, FontSettings::default()) {
                info!("loaded {label} font: {path}");
                return Some(Rc::new(font));
            }
        }
    }
    None
}

/// Font metrics for one fontdue face at one pixel size.
///
/// Widths sum per-character advance widths, matching the cursor advancement
/// used by the renderer. `Font::metrics()` is used rather than
/// `Font::rasterize()` so no bitmaps are generated for measuring.
pub struct FontdueMetrics {
    font: Rc<Font>,
    size: f32,
    ascent: f32,
    descent: f32,
}

impl FontdueMetrics {
    /// Metrics for `font` at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Unavailable`] if the face carries no horizontal
    /// line metrics.
    pub fn new(font: Rc<Font>, key: FontKey) -> Result<Self, FontError> {
        let size = key.size as f32;
        let Some(line) = font.horizontal_line_metrics(size) else {
            return Err(FontError::Unavailable {
                key,
                reason: "font has no horizontal line metrics".to_string(),
            });
        };
        Ok(Self {
            font,
            size,
            ascent: line.ascent,
            // fontdue reports descent as a negative offset.
            descent: -line.descent,
        })
    }
}

impl FontMetrics for FontdueMetrics {
    fn measure(&self, text: &str) -> f32 {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, self.size).advance_width)
            .sum()
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }
}

/// [`FontProvider`] backed by a [`FontSet`].
#[derive(Clone)]
pub struct FontdueFontProvider {
    fonts: FontSet,
}

impl FontdueFontProvider {
    /// Serve metrics from `fonts`.
    #[must_use]
    pub const fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }
}

impl FontProvider for FontdueFontProvider {
    fn load_font(&self, key: FontKey) -> Result<Rc<dyn FontMetrics>, FontError> {
        if key.size <= 0 {
            return Err(FontError::InvalidSize { size: key.size });
        }
        let Some(face) = self.fonts.face(key) else {
            return Err(FontError::Unavailable {
                key,
                reason: "no system font found".to_string(),
            });
        };
        Ok(Rc::new(FontdueMetrics::new(Rc::clone(face), key)?))
    }
}
