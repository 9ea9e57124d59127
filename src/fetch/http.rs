// src/fetch/http.rs
// =============================================================================
// This module performs HTTP GET requests.
//
// Key functionality:
// - One shared reqwest Client (connection pooling, redirects, TLS)
// - Non-2xx responses are turned into errors, so a 404 page is never
//   mistaken for an image
// - The Response keeps the URL we *asked for*, not the one we ended up at
//   after redirects; that is the path we mirror on disk
//
// Rust concepts:
// - Traits: Fetcher describes "something that can fetch a URL"
// - async-trait: lets trait methods be async
// - thiserror: typed errors with readable messages
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::html::is_html_content_type;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// A completed, successful HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// The URL that was requested
    pub url: Url,
    /// HTTP status code (always 2xx)
    pub status: u16,
    /// Raw Content-Type header, if the server sent one
    pub content_type: Option<String>,
    /// Response body, byte for byte
    pub body: Vec<u8>,
}

impl Response {
    /// True when the Content-Type media type is text/html
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(is_html_content_type)
            .unwrap_or(false)
    }
}

// Reasons a fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be read completely
    #[error("failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

// Anything that can turn a URL into a Response
//
// Send + Sync so a fetcher can live inside the crawler no matter which
// runtime flavor drives it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError>;
}

// The real fetcher, backed by reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client
    //
    // Parameters:
    //   timeout: upper bound for a whole request (connect + body)
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(Response {
            url: url.clone(),
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one canned HTTP response on a random local port
    async fn serve_once(raw_response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read until the end of the request headers
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            socket.write_all(raw_response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        Url::parse(&format!("http://{}/static/a.png", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_content_type() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\nabcd",
        )
        .await;

        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("image/png"));
        assert_eq!(response.body, b"abcd");
        assert_eq!(response.url.path(), "/static/a.png");
        assert!(!response.is_html());
    }

    #[tokio::test]
    async fn test_fetch_rejects_not_found() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn test_response_is_html_with_charset() {
        let response = Response {
            url: Url::parse("https://example.com/").unwrap(),
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: Vec::new(),
        };
        assert!(response.is_html());
    }

    #[test]
    fn test_response_without_content_type_is_not_html() {
        let response = Response {
            url: Url::parse("https://example.com/blob").unwrap(),
            status: 200,
            content_type: None,
            body: b"<html></html>".to_vec(),
        };
        assert!(!response.is_html());
    }
}
