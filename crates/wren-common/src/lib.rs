//! Common utilities for the Wren renderer.
//!
//! This crate provides the document acquisition layer used by the pipeline:
//! - **URL parsing** - splitting `scheme://host[:port]/path` into parts
//! - **Fetching** - strict blocking HTTP(S) GET and local file loading

pub mod net;
pub mod url;

pub use net::{FetchError, load_document};
pub use url::{DocumentUrl, Scheme, UrlError};
