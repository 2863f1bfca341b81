//! Remote tile retrieval over HTTP.
//!
//! [`TileFetcher`] is the network seam the vault consumes. The default
//! implementation, [`HttpTileFetcher`], layers tile addressing and response
//! validation over an [`HttpClient`] abstraction so tests can inject mock
//! transports, and reads bodies through the bounded reader in `body.rs`.

use bytes::Bytes;
use thiserror::Error;

use crate::cache::BoxFuture;
use crate::coord::TileCoord;

mod body;
mod http;

pub use http::{BoxByteStream, HttpClient, HttpResponse, HttpTileFetcher, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;

/// Errors raised while retrieving a tile from the remote server.
///
/// `Clone` so scripted test doubles can replay canned outcomes.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The tile address could not be parsed as a URL. Detected before any
    /// network attempt.
    #[error("malformed tile address {url}: {reason}")]
    MalformedAddress { url: String, reason: String },

    /// Connection establishment exceeded the connect timeout.
    #[error("connection to {url} timed out")]
    Timeout { url: String },

    /// Network-level failure while talking to the server.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response was not an image.
    #[error("unexpected content type {content_type:?} from {url}")]
    WrongContentType { content_type: String, url: String },

    /// The response body would exceed the configured size cap.
    #[error("response body exceeds the {limit}-byte limit")]
    BodyTooLarge { limit: usize },

    /// The stream ended before the advertised length was reached.
    #[error("response body ended after {read} of {expected} bytes")]
    Truncated { expected: usize, read: usize },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Source of encoded tile bytes.
///
/// `tile_url` doubles as the authoritative cache key when no mirror is
/// configured, so it must be pure and stable for a given coordinate.
pub trait TileFetcher: Send + Sync {
    /// Remote address of a tile.
    fn tile_url(&self, coord: TileCoord) -> String;

    /// Retrieve the encoded bytes for a tile.
    fn fetch(&self, coord: TileCoord) -> BoxFuture<'_, Result<Bytes, FetchError>>;
}
