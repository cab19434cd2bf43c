//! HTTP image-search source.

use crate::validate::validate_image;
use crate::FetchError;
use reqwest::{Client, Url};
use slidegen_core::{ImageSource, Picture};
use std::time::Duration;

/// Public keyword image endpoint; `{query}` is replaced by the encoded query.
pub const DEFAULT_ENDPOINT: &str = "https://source.unsplash.com/800x600/?{query}&random";

/// Request timeout applied to each lookup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Largest image body accepted, in bytes.
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Settings for [`HttpImageSource`].
#[derive(Debug, Clone)]
pub struct ImageSourceConfig {
    /// URL template containing `{query}`.
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Bodies larger than this are abandoned.
    pub max_bytes: usize,
}

impl Default for ImageSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("slidegen/", env!("CARGO_PKG_VERSION")).to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl ImageSourceConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Looks up one picture per query with a single unauthenticated GET.
///
/// No retries, no caching: a non-success status, a transport error or a body
/// that isn't an embeddable image all yield `None`.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
    endpoint: String,
    max_bytes: usize,
}

impl HttpImageSource {
    pub fn new(config: ImageSourceConfig) -> Result<Self, FetchError> {
        if !config.endpoint.contains("{query}") {
            return Err(FetchError::InvalidEndpoint(format!(
                "'{}' has no {{query}} placeholder",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        let source = Self {
            client,
            endpoint: config.endpoint,
            max_bytes: config.max_bytes,
        };
        // Reject templates that can never produce a valid URL
        source.url_for("probe")?;
        Ok(source)
    }

    /// Request URL for `query`.
    pub fn url_for(&self, query: &str) -> Result<Url, FetchError> {
        let raw = self
            .endpoint
            .replace("{query}", &urlencoding::encode(query));
        Url::parse(&raw).map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", raw, e)))
    }

    async fn try_fetch(&self, query: &str) -> Result<Picture, FetchError> {
        let url = self.url_for(query)?;
        log::debug!("GET {}", url);

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(FetchError::TooLarge(self.max_bytes));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge(self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        validate_image(body)
    }
}

impl ImageSource for HttpImageSource {
    async fn fetch(&self, query: &str) -> Option<Picture> {
        match self.try_fetch(query).await {
            Ok(picture) => Some(picture),
            Err(e) => {
                log::warn!("No image for \"{}\": {}", query, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::TINY_PNG;
    use slidegen_core::ImageFormat;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response; the handle yields the request line.
    async fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}/search?q={{query}}", addr), handle)
    }

    fn source(endpoint: &str) -> HttpImageSource {
        HttpImageSource::new(
            ImageSourceConfig::default()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[test]
    fn test_url_encodes_query() {
        let source = source(DEFAULT_ENDPOINT);
        assert_eq!(
            source.url_for("ocean waves").unwrap().as_str(),
            "https://source.unsplash.com/800x600/?ocean%20waves&random"
        );
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let result = HttpImageSource::new(
            ImageSourceConfig::default().with_endpoint("https://example.com/random"),
        );
        assert!(matches!(result, Err(FetchError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_rejects_unparseable_template() {
        let result =
            HttpImageSource::new(ImageSourceConfig::default().with_endpoint("not a url {query}"));
        assert!(matches!(result, Err(FetchError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (endpoint, server) = serve_once("200 OK", TINY_PNG.to_vec()).await;

        let picture = source(&endpoint).fetch("green forest").await.unwrap();
        assert_eq!(picture.format, ImageFormat::Png);

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /search?q=green%20forest HTTP/1.1");
    }

    #[tokio::test]
    async fn test_non_success_status_is_none() {
        let (endpoint, server) = serve_once("404 Not Found", TINY_PNG.to_vec()).await;
        assert_eq!(source(&endpoint).fetch("forest").await, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_image_body_is_none() {
        let (endpoint, server) = serve_once("200 OK", b"<html>oops</html>".to_vec()).await;
        assert_eq!(source(&endpoint).fetch("forest").await, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_oversized_body_is_none() {
        let (endpoint, server) = serve_once("200 OK", TINY_PNG.to_vec()).await;
        let source = HttpImageSource::new(
            ImageSourceConfig::default()
                .with_endpoint(endpoint)
                .with_max_bytes(TINY_PNG.len() - 1),
        )
        .unwrap();

        assert!(matches!(
            source.try_fetch("forest").await,
            Err(FetchError::TooLarge(_))
        ));
        // The client may hang up before the body is written
        let _ = server.await;
    }

    #[tokio::test]
    async fn test_body_at_limit_accepted() {
        let (endpoint, server) = serve_once("200 OK", TINY_PNG.to_vec()).await;
        let source = HttpImageSource::new(
            ImageSourceConfig::default()
                .with_endpoint(endpoint)
                .with_max_bytes(TINY_PNG.len()),
        )
        .unwrap();

        assert!(source.fetch("forest").await.is_some());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_is_none() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source(&format!("http://{}/?{{query}}", addr));
        assert_eq!(source.fetch("forest").await, None);
    }
}
