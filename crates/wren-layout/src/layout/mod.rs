//! Text layout: from a token stream to positioned words.
//!
//! Layout is a single forward pass over the tokens. Directive tags update
//! the current style or end lines; text is split into words that are
//! measured, wrapped against the page width, and collected into lines. Each
//! finished line is aligned on a shared baseline and appended to the
//! [`DisplayList`].

/// Line building and the style state machine.
pub mod inline;

use std::time::Instant;

use log::debug;
use thiserror::Error;
use wren_html::Token;

use crate::font::{FontCache, FontError};
use crate::paint::DisplayList;

pub use inline::InlineLayout;

/// Default page width in pixels.
pub const DEFAULT_PAGE_WIDTH: f32 = 800.0;

/// Default horizontal margin on both sides of the page.
pub const DEFAULT_H_STEP: f32 = 13.0;

/// Default top margin, which is also the gap left after a paragraph.
pub const DEFAULT_V_STEP: f32 = 18.0;

/// Page geometry for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Total page width in pixels.
    pub page_width: f32,
    /// Left and right margin.
    pub h_step: f32,
    /// Top margin and paragraph gap.
    pub v_step: f32,
}

impl LayoutConfig {
    /// Default margins with a custom page width.
    #[must_use]
    pub const fn with_page_width(page_width: f32) -> Self {
        Self {
            page_width,
            h_step: DEFAULT_H_STEP,
            v_step: DEFAULT_V_STEP,
        }
    }

    /// The x coordinate a word may not extend past without wrapping.
    #[must_use]
    pub fn line_limit(&self) -> f32 {
        self.page_width - self.h_step
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::with_page_width(DEFAULT_PAGE_WIDTH)
    }
}

/// Failure of a layout pass.
///
/// Layout never rejects its input; it only fails when a collaborator does.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A font could not be resolved.
    #[error(transparent)]
    Font(#[from] FontError),
}

/// Lay out `tokens` on a page.
///
/// Every call starts from a fresh style and an empty line; only `fonts` is
/// shared between passes.
///
/// # Errors
///
/// Returns [`LayoutError::Font`] if the font cache cannot resolve a style.
/// Nothing is returned for a failed pass.
pub fn layout(
    tokens: &[Token],
    config: &LayoutConfig,
    fonts: &mut FontCache,
) -> Result<DisplayList, LayoutError> {
    let start = Instant::now();

    let mut inline = InlineLayout::new(*config, fonts);
    for token in tokens {
        inline.token(token)?;
    }
    let display_list = inline.finish();

    debug!(
        "layout: {} tokens -> {} items in {:.2}ms",
        tokens.len(),
        display_list.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(display_list)
}
