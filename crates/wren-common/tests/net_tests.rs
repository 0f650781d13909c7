//! Integration tests for document loading.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use wren_common::{FetchError, UrlError, load_document};

#[test]
fn test_load_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "Hi <b>there</b>!").unwrap();

    let url = format!("file://{}", path.display());
    assert_eq!(load_document(&url).unwrap(), "Hi <b>there</b>!");
}

#[test]
fn test_load_file_url_with_dot_segments() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("page.html"), "text").unwrap();

    let url = format!("file://{}/sub/../page.html", dir.path().display());
    assert_eq!(load_document(&url).unwrap(), "text");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}/absent.html", dir.path().display());
    assert!(matches!(load_document(&url), Err(FetchError::Io { .. })));
}

#[test]
fn test_unknown_scheme_is_rejected() {
    assert!(matches!(
        load_document("ftp://example.org/index.html"),
        Err(FetchError::Url(UrlError::UnknownScheme(_)))
    ));
}

/// Serve one canned HTTP response on a local port and return its URL.
fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let _ = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/index.html")
}

#[test]
fn test_http_ok_returns_body() {
    let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello");
    assert_eq!(load_document(&url).unwrap(), "hello");
}

#[test]
fn test_http_redirect_is_not_followed() {
    let url = serve_once(
        "HTTP/1.1 301 Moved Permanently\r\nLocation: http://127.0.0.1:1/\r\n\
         Content-Length: 0\r\nConnection: close\r\n\r\n",
    );
    assert!(matches!(
        load_document(&url),
        Err(FetchError::Status { status: 301, .. })
    ));
}

#[test]
fn test_http_chunked_body_is_rejected() {
    let url = serve_once(
        "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
         5\r\nhello\r\n0\r\n\r\n",
    );
    assert!(matches!(
        load_document(&url),
        Err(FetchError::UnsupportedEncoding {
            header: "transfer-encoding",
            ..
        })
    ));
}

#[test]
fn test_http_compressed_body_is_rejected() {
    let url = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\nContent-Length: 5\r\n\
         Connection: close\r\n\r\nhello",
    );
    match load_document(&url) {
        Err(FetchError::UnsupportedEncoding { header, value }) => {
            assert_eq!(header, "content-encoding");
            assert_eq!(value, "gzip");
        }
        other => panic!("expected unsupported encoding, got {other:?}"),
    }
}
