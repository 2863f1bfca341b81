//! In-memory tile cache with LRU-flavored eviction using moka.
//!
//! Backed by `moka::future::Cache`, which uses lock-free data structures
//! internally, so concurrent lookups from many async tasks never block the
//! Tokio runtime.
//!
//! # Why moka?
//!
//! - Lock-free reads (common case)
//! - Concurrent writes without blocking
//! - Automatic eviction once the entry limit is reached
//! - Designed for async contexts

use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache as MokaCache;

use crate::cache::traits::{BoxFuture, TileCache};
use crate::tile::RasterTile;

/// Point-in-time statistics for a memory cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries currently resident.
    pub entry_count: u64,
    /// Configured entry limit.
    pub capacity: u64,
}

/// Bounded in-memory store for decoded tiles.
///
/// Capacity is an entry count, not a byte size: decoded tiles for one layer
/// are all the same dimensions, so counting entries bounds memory just as
/// well and keeps the limit easy to reason about.
pub struct MemoryTileCache {
    /// The underlying moka cache.
    cache: MokaCache<String, RasterTile>,
    /// Configured entry limit.
    capacity: u64,
    /// Statistics, atomics for lock-free updates.
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryTileCache {
    /// Create a cache holding at most `capacity` tiles.
    pub fn new(capacity: u64) -> Self {
        let cache = MokaCache::builder().max_capacity(capacity).build();

        Self {
            cache,
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get point-in-time statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.cache.entry_count(),
            capacity: self.capacity,
        }
    }

    /// Run moka's pending maintenance so entry counts are exact.
    ///
    /// moka is eventually consistent; call this before asserting on
    /// `entry_count` in tests.
    async fn sync_pending(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl TileCache for MemoryTileCache {
    fn get(&self, key: &str) -> BoxFuture<'_, Option<RasterTile>> {
        let key = key.to_string();
        Box::pin(async move {
            match self.cache.get(&key).await {
                Some(tile) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    Some(tile)
                }
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    None
                }
            }
        })
    }

    fn insert(&self, key: &str, tile: RasterTile) -> BoxFuture<'_, ()> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, tile).await;
        })
    }

    fn clear(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.cache.invalidate_all();
            self.cache.run_pending_tasks().await;
        })
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use image::RgbaImage;
    use std::sync::Arc;

    fn tile(x: u32, y: u32, zoom: u8) -> RasterTile {
        RasterTile::new(TileCoord::new(x, y, zoom), RgbaImage::new(1, 1))
    }

    #[tokio::test]
    async fn insert_then_get_returns_tile() {
        let cache = MemoryTileCache::new(10);
        cache.insert("8/3/5.png", tile(3, 5, 8)).await;

        let found = cache.get("8/3/5.png").await.unwrap();

        assert_eq!(found.coord(), TileCoord::new(3, 5, 8));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let cache = MemoryTileCache::new(10);

        assert!(cache.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn insert_replaces_existing_entry() {
        let cache = MemoryTileCache::new(10);
        cache.insert("key", tile(1, 1, 1)).await;
        cache.insert("key", tile(2, 2, 2)).await;
        cache.sync_pending().await;

        let found = cache.get("key").await.unwrap();

        assert_eq!(found.coord(), TileCoord::new(2, 2, 2));
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let cache = MemoryTileCache::new(10);
        cache.insert("a", tile(0, 0, 1)).await;
        cache.insert("b", tile(1, 0, 1)).await;

        cache.clear().await;

        assert_eq!(cache.entry_count(), 0);
        assert!(cache.get("a").await.is_none());
    }

    #[tokio::test]
    async fn stats_track_hits_and_misses() {
        let cache = MemoryTileCache::new(10);
        cache.insert("present", tile(0, 0, 1)).await;

        cache.get("present").await;
        cache.get("present").await;
        cache.get("absent").await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.capacity, 10);
    }

    #[tokio::test]
    async fn eviction_keeps_entry_count_at_capacity() {
        let cache = MemoryTileCache::new(4);

        for i in 0..20u32 {
            cache.insert(&format!("1/{}/0.png", i), tile(i, 0, 1)).await;
        }
        cache.sync_pending().await;

        assert!(
            cache.entry_count() <= 4,
            "expected at most 4 entries, got {}",
            cache.entry_count()
        );
    }

    #[tokio::test]
    async fn concurrent_insert_and_get() {
        let cache = Arc::new(MemoryTileCache::new(1000));
        let mut handles = Vec::new();

        for i in 0..50u32 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                let key = format!("3/{}/{}.png", i, i);
                cache.insert(&key, tile(i, i, 3)).await;
                let found = cache.get(&key).await.unwrap();
                assert_eq!(found.coord(), TileCoord::new(i, i, 3));
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        cache.sync_pending().await;
        assert_eq!(cache.entry_count(), 50);
    }

    #[tokio::test]
    async fn clones_share_pixels() {
        let cache = MemoryTileCache::new(10);
        cache.insert("key", tile(0, 0, 1)).await;

        let a = cache.get("key").await.unwrap();
        let b = cache.get("key").await.unwrap();

        assert!(std::ptr::eq(a.image(), b.image()));
    }
}
