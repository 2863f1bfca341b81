//! Core trait for the bounded tile cache.
//!
//! The `TileCache` trait is the memory tier's seam: the vault talks to it
//! through a trait object so tests can substitute instrumented doubles and
//! embedders can bring their own store.
//!
//! # Design Principles
//!
//! - **String keys**: the authoritative cache key is a path or URL, already
//!   a string; keeping it one makes keys readable in logs
//! - **Infallible operations**: the memory tier has no I/O, so lookups and
//!   inserts cannot fail, only miss
//! - **Dyn-compatible**: uses `Pin<Box<dyn Future>>` for trait object support

use std::future::Future;
use std::pin::Pin;

use crate::tile::RasterTile;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Bounded key-value store for decoded tiles.
///
/// A miss must have no side effect beyond recency and statistics
/// bookkeeping. Entries are replaced or evicted whole, never mutated in
/// place; `RasterTile` clones share pixel data so returning an owned value
/// stays cheap.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
pub trait TileCache: Send + Sync {
    /// Look up a tile by its cache key.
    ///
    /// Returns `None` when the key is absent or has been evicted.
    fn get(&self, key: &str) -> BoxFuture<'_, Option<RasterTile>>;

    /// Store a tile under the given key, replacing any existing entry.
    ///
    /// Eviction may occur if the cache exceeds its capacity.
    fn insert(&self, key: &str, tile: RasterTile) -> BoxFuture<'_, ()>;

    /// Drop every entry.
    fn clear(&self) -> BoxFuture<'_, ()>;

    /// Current number of cached entries.
    fn entry_count(&self) -> u64;

    /// Maximum number of entries the cache will hold.
    fn capacity(&self) -> u64;
}
