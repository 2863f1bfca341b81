//! HTTP transport and the default tile fetcher.
//!
//! [`HttpClient`] narrows an HTTP library to the one request shape tile
//! retrieval needs, so the fetcher can be tested against mock transports.
//! [`ReqwestClient`] is the real implementation.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::cache::BoxFuture;
use crate::coord::{tile_path, TileCoord};
use crate::fetch::body::read_body;
use crate::fetch::{FetchError, TileFetcher};

/// Boxed byte stream carrying a response body.
pub type BoxByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// The parts of an HTTP response tile retrieval cares about.
///
/// `content_length` reflects the advertised header value; servers that omit
/// it (or advertise zero) leave the body length unknown.
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: BoxByteStream,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request, yielding headers and a body stream.
    fn get(&self, url: &str) -> BoxFuture<'_, Result<HttpResponse, FetchError>>;
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<HttpResponse, FetchError>> {
        (**self).get(url)
    }
}

/// Real HTTP client implementation using reqwest.
///
/// Only connection establishment is bounded by a timeout; a slow but live
/// transfer is allowed to finish, matching the body reader's own caps.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client whose connection attempts time out after
    /// `connect_timeout`.
    pub fn new(connect_timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<HttpResponse, FetchError>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self.client.get(&url).send().await.map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout { url: url.clone() }
                } else {
                    FetchError::Transport {
                        url: url.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let content_length = response.content_length();
            let body: BoxByteStream =
                Box::pin(response.bytes_stream().map(|chunk| {
                    chunk.map_err(|e| std::io::Error::other(e.to_string()))
                }));

            Ok(HttpResponse {
                status,
                content_type,
                content_length,
                body,
            })
        })
    }
}

/// Default [`TileFetcher`]: GETs `{root_url}/{zoom}/{x}/{y}{ext}` and
/// validates the response before handing bytes back.
///
/// Validation order mirrors the failure modes: address parse, status,
/// content type, then the bounded body read.
pub struct HttpTileFetcher<C: HttpClient> {
    client: C,
    root_url: String,
    ext: String,
    max_body_bytes: usize,
}

impl<C: HttpClient> HttpTileFetcher<C> {
    /// Creates a fetcher for tiles under `root_url` (no trailing slash)
    /// with file extension `ext` (leading dot included).
    pub fn new(
        client: C,
        root_url: impl Into<String>,
        ext: impl Into<String>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            client,
            root_url: root_url.into(),
            ext: ext.into(),
            max_body_bytes,
        }
    }

    fn build_url(&self, coord: TileCoord) -> String {
        format!("{}/{}", self.root_url, tile_path(coord, &self.ext))
    }
}

impl<C: HttpClient> TileFetcher for HttpTileFetcher<C> {
    fn tile_url(&self, coord: TileCoord) -> String {
        self.build_url(coord)
    }

    fn fetch(&self, coord: TileCoord) -> BoxFuture<'_, Result<Bytes, FetchError>> {
        let url = self.build_url(coord);
        Box::pin(async move {
            // Reject unparseable addresses before touching the network.
            reqwest::Url::parse(&url).map_err(|e| FetchError::MalformedAddress {
                url: url.clone(),
                reason: e.to_string(),
            })?;

            let response = self.client.get(&url).await?;

            if !response.is_success() {
                return Err(FetchError::Status {
                    status: response.status,
                    url,
                });
            }

            let content_type = response.content_type.clone().unwrap_or_default();
            if !content_type.starts_with("image") {
                return Err(FetchError::WrongContentType { content_type, url });
            }

            read_body(
                response.body,
                response.content_length,
                self.max_body_bytes,
                &url,
            )
            .await
        })
    }
}
