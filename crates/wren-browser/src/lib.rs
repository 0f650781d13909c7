//! High-level page loading API for the Wren renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - fetch a page over HTTP(S) or from a `file://` URL
//! - **Pipeline** - tokenize and lay out the document into a display list
//! - **Fonts** - system fonts through fontdue, behind the layout font traits
//! - **Viewport** - scroll state and clipping of the display list
//! - **Software Rendering** - headless screenshots of the viewport
//!
//! # Not Yet Implemented
//!
//! - Windowing and input handling
//! - Re-layout on viewport resize

pub mod font_metrics;
pub mod renderer;
pub mod viewport;

pub use wren_html as html;
pub use wren_layout as layout;

pub use font_metrics::{FontSet, FontdueFontProvider, FontdueMetrics};
pub use viewport::{SCROLL_STEP, Viewport};

use std::time::Instant;

use log::debug;
use thiserror::Error;
use wren_common::FetchError;
use wren_html::Token;
use wren_layout::{DisplayList, FontCache, LayoutConfig, LayoutError};

/// A fetched and laid-out document.
#[derive(Debug)]
pub struct LoadedDocument {
    /// Original document text
    pub source: String,

    /// URL the document was loaded from, empty for inline strings
    pub url: String,

    /// Tokenizer output (for debugging)
    pub tokens: Vec<Token>,

    /// Positioned words, ready to draw
    pub display_list: DisplayList,
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be fetched.
    #[error("failed to load document: {0}")]
    Fetch(#[from] FetchError),
    /// The document could not be laid out.
    #[error("failed to lay out document: {0}")]
    Layout(#[from] LayoutError),
}

/// Load and lay out the document at `url`.
///
/// `url` must be an absolute `http://`, `https://` or `file://` URL.
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] if the document cannot be acquired and
/// [`LoadError::Layout`] if a font cannot be resolved. A failure never
/// yields a partially laid-out document.
pub fn load_document(
    url: &str,
    config: &LayoutConfig,
    fonts: &mut FontCache,
) -> Result<LoadedDocument, LoadError> {
    let start = Instant::now();
    let source = wren_common::load_document(url)?;
    debug!(
        "fetched {url}: {} bytes in {:.2}ms",
        source.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let mut document = parse_html_string(&source, config, fonts)?;
    document.url = url.to_string();
    Ok(document)
}

/// Tokenize and lay out a document already held in memory.
///
/// # Errors
///
/// Returns [`LoadError::Layout`] if a font cannot be resolved.
pub fn parse_html_string(
    html: &str,
    config: &LayoutConfig,
    fonts: &mut FontCache,
) -> Result<LoadedDocument, LoadError> {
    let tokens = wren_html::tokenize(html);
    let display_list = wren_layout::layout(&tokens, config, fonts)?;

    Ok(LoadedDocument {
        source: html.to_string(),
        url: String::new(),
        tokens,
        display_list,
    })
}
