//! URL parsing for document loading.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! NOTE: This is a small parser. Only the three schemes the
//! loader understands are accepted, and no percent-decoding, query or
//! fragment handling is performed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while splitting a URL into its parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    /// The input has no `://` separator.
    #[error("missing scheme separator in '{0}'")]
    MissingScheme(String),
    /// The scheme is not one of `http`, `https` or `file`.
    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),
    /// The `:port` suffix of the host is not a valid port number.
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// The schemes the document loader knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain-text HTTP.
    Http,
    /// HTTP over TLS.
    Https,
    /// A path on the local filesystem.
    File,
}

impl Scheme {
    /// The default port for network schemes, `None` for `file`.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::File => None,
        }
    }

    /// The scheme as it appears before `://`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::File => "file",
        }
    }
}

impl FromStr for Scheme {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            "file" => Ok(Self::File),
            other => Err(UrlError::UnknownScheme(other.to_string())),
        }
    }
}

/// A URL split into the parts the loader needs.
///
/// For `file` URLs, `host` is empty and `path` holds everything after
/// `file://` unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUrl {
    /// The URL scheme.
    pub scheme: Scheme,
    /// Host name without the port.
    pub host: String,
    /// Explicit port, or the scheme default.
    pub port: Option<u16>,
    /// Absolute path, always starting with `/` for network URLs.
    pub path: String,
}

impl DocumentUrl {
    /// Parse `scheme://host[:port]/path`.
    ///
    /// A missing path becomes `/`. For `file://` URLs the remainder is taken
    /// as a filesystem path verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`UrlError`] if the separator is missing, the scheme is not
    /// recognized, or the port does not parse.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(UrlError::MissingScheme(input.to_string()));
        };
        let scheme: Scheme = scheme.parse()?;

        if scheme == Scheme::File {
            return Ok(Self {
                scheme,
                host: String::new(),
                port: None,
                path: rest.to_string(),
            });
        }

        let (authority, path) = rest
            .split_once('/')
            .map_or((rest, String::from("/")), |(host, path)| {
                (host, format!("/{path}"))
            });

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| UrlError::InvalidPort(port.to_string()))?;
                (host.to_string(), Some(port))
            }
            None => (authority.to_string(), scheme.default_port()),
        };

        Ok(Self {
            scheme,
            host,
            port,
            path,
        })
    }

    /// The value for the `Host` request header.
    #[must_use]
    pub fn host_header(&self) -> String {
        match (self.port, self.scheme.default_port()) {
            (Some(port), Some(default)) if port != default => format!("{}:{port}", self.host),
            _ => self.host.clone(),
        }
    }
}

impl FromStr for DocumentUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::File => write!(f, "file://{}", self.path),
            scheme => write!(f, "{}://{}{}", scheme.as_str(), self.host_header(), self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_becomes_root() {
        let url = DocumentUrl::parse("http://example.org").unwrap();
        assert_eq!(url.host, "example.org");
        assert_eq!(url.path, "/");
        assert_eq!(url.port, Some(80));
    }

    #[test]
    fn test_explicit_port() {
        let url = DocumentUrl::parse("https://localhost:8443/index.html").unwrap();
        assert_eq!(url.scheme, Scheme::Https);
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, Some(8443));
        assert_eq!(url.path, "/index.html");
        assert_eq!(url.host_header(), "localhost:8443");
    }

    #[test]
    fn test_file_url_keeps_path() {
        let url = DocumentUrl::parse("file:///tmp/page.html").unwrap();
        assert_eq!(url.scheme, Scheme::File);
        assert_eq!(url.path, "/tmp/page.html");
        assert_eq!(url.to_string(), "file:///tmp/page.html");
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            DocumentUrl::parse("gopher://example.org/"),
            Err(UrlError::UnknownScheme("gopher".to_string()))
        );
    }

    #[test]
    fn test_bad_port() {
        assert!(matches!(
            DocumentUrl::parse("http://example.org:http/"),
            Err(UrlError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            DocumentUrl::parse("example.org"),
            Err(UrlError::MissingScheme(_))
        ));
    }
}
