//! Document fetching for the Wren renderer.
//!
//! Provides the single entry point the pipeline needs: turn a URL into the
//! raw document text. Network loading is strict: redirects are
//! not followed, anything but `200 OK` is an error, and bodies sent with a
//! transfer or content encoding are rejected instead of decoded.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{CONNECTION, CONTENT_ENCODING, TRANSFER_ENCODING, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use thiserror::Error;

use crate::url::{DocumentUrl, Scheme, UrlError};

/// User-Agent header sent with all requests.
const USER_AGENT_VALUE: &str = "Wren/0.1";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to acquire a document. There are no partial results.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// A `file://` path could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The normalized path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The HTTP client could not be built or the request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with something other than `200 OK`.
    #[error("HTTP error: {status} {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, empty if unknown.
        reason: String,
    },

    /// The response used a transfer or content encoding we do not decode.
    #[error("unsupported response header {header}: {value}")]
    UnsupportedEncoding {
        /// Header name.
        header: &'static str,
        /// Header value as sent by the server.
        value: String,
    },
}

/// Load the raw text of the document at `url`.
///
/// `file://` URLs are read from the local filesystem after lexical path
/// normalization; `http://` and `https://` URLs are fetched with a blocking
/// GET request.
///
/// # Errors
///
/// Returns a [`FetchError`] if the URL is malformed, the file cannot be read,
/// the request fails, or the response is not an unencoded `200 OK`.
pub fn load_document(url: &str) -> Result<String, FetchError> {
    let url = DocumentUrl::parse(url)?;
    match url.scheme {
        Scheme::File => load_file(Path::new(&url.path)),
        Scheme::Http | Scheme::Https => fetch_text(&url),
    }
}

/// Read a local file as UTF-8 text.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read.
pub fn load_file(path: &Path) -> Result<String, FetchError> {
    let path = normalize_path(path);
    debug!("loading file {}", path.display());
    fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source })
}

/// Fetch a network URL and return its body as text.
///
/// # Errors
///
/// See [`load_document`].
pub fn fetch_text(url: &DocumentUrl) -> Result<String, FetchError> {
    let client = Client::builder()
        .timeout(TIMEOUT)
        .redirect(Policy::none())
        .build()?;

    debug!("GET {url}");
    let response = client
        .get(url.to_string())
        .header(CONNECTION, "close")
        .header(USER_AGENT, USER_AGENT_VALUE)
        .send()?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    for (name, header) in [
        (TRANSFER_ENCODING, "transfer-encoding"),
        (CONTENT_ENCODING, "content-encoding"),
    ] {
        if let Some(value) = response.headers().get(name) {
            return Err(FetchError::UnsupportedEncoding {
                header,
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            });
        }
    }

    Ok(response.text()?)
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                let after_name = matches!(last, Some(Component::Normal(_)));
                if after_name {
                    let _ = normalized.pop();
                } else if !at_root {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
