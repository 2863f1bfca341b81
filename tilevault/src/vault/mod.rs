//! The tile orchestrator.
//!
//! [`TileVault`] composes the memory cache, the optional disk mirror, the
//! remote fetcher, and the empty-tile policy into a single [`load`] that
//! always produces a tile. The tiers are trait objects wired by
//! [`TileVaultBuilder`], so every seam can be swapped in tests or by
//! embedders.
//!
//! # Load sequence
//!
//! ```text
//! load(coord)
//!   ├─ memory cache hit ──────────────► cached tile
//!   ├─ disk mirror hit ── decode ─────► tile (cached in memory)
//!   ├─ remote fetch ── mirror store ── decode ─► tile (cached in memory)
//!   └─ any failure ───────────────────► placeholder (not cached by default)
//! ```
//!
//! # Single flight
//!
//! Concurrent loads for the same key share one underlying fetch through a
//! per-key in-flight cell. This is a deliberate improvement over designs
//! that let a viewport redraw issue one network request per duplicate
//! lookup; callers observe the same results either way.
//!
//! [`load`]: TileVault::load

mod builder;
mod config;

pub use builder::TileVaultBuilder;
pub use config::{
    VaultConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_FILE_EXT,
    DEFAULT_MAX_BODY_BYTES,
};

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::fetch::TileFetcher;
use crate::log::Logger;
use crate::mirror::TileMirror;
use crate::placeholder::EmptyTileHandler;
use crate::projection::Projection;
use crate::requestor::TileRequestor;
use crate::telemetry::{TelemetrySnapshot, VaultMetrics};
use crate::tile::{decode_tile, RasterTile};

/// Terminal result of one keyed load, shared among single-flight waiters.
///
/// Placeholders are not part of the outcome: each waiter asks the policy
/// itself, so a failed load leaves nothing behind to go stale.
#[derive(Clone)]
enum LoadOutcome {
    Tile(RasterTile),
    Failed,
}

/// Two-tier tile store with remote fallback.
///
/// `load` never fails and never blocks indefinitely on a broken tile: every
/// error path ends at the empty-tile policy. The vault is `Send + Sync` and
/// designed to sit behind an `Arc`, with one logical `load` per visible
/// tile running concurrently.
pub struct TileVault {
    config: VaultConfig,

    /// Memory tier, first stop for every request.
    cache: Arc<dyn TileCache>,

    /// Optional disk tier; its locator is the authoritative key when present.
    mirror: Option<Arc<dyn TileMirror>>,

    /// Network tier.
    fetcher: Arc<dyn TileFetcher>,

    /// Supplies substitutes when no real tile can be produced.
    empty_tiles: Arc<dyn EmptyTileHandler>,

    /// Injected sink for policy events (fetch failures, mirror errors).
    logger: Arc<dyn Logger>,

    /// Per-key in-flight guard for single-flight deduplication.
    in_flight: DashMap<String, Arc<OnceCell<LoadOutcome>>>,

    /// Cancellation/progress callback for batch loads.
    requestor: RwLock<Option<Arc<dyn TileRequestor>>>,

    /// Load-path counters.
    metrics: VaultMetrics,
}

impl TileVault {
    /// Starts a builder from a configuration.
    pub fn builder(config: VaultConfig) -> TileVaultBuilder {
        TileVaultBuilder::new(config)
    }

    /// Builds a vault with all-default tiers.
    ///
    /// Equivalent to `TileVault::builder(config).build()`.
    pub fn new(config: VaultConfig) -> Result<Self, crate::fetch::FetchError> {
        Self::builder(config).build()
    }

    pub(crate) fn from_parts(
        config: VaultConfig,
        cache: Arc<dyn TileCache>,
        mirror: Option<Arc<dyn TileMirror>>,
        fetcher: Arc<dyn TileFetcher>,
        empty_tiles: Arc<dyn EmptyTileHandler>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config,
            cache,
            mirror,
            fetcher,
            empty_tiles,
            logger,
            in_flight: DashMap::new(),
            requestor: RwLock::new(None),
            metrics: VaultMetrics::new(),
        }
    }

    /// The configuration this vault was built from.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// The memory cache tier.
    pub fn cache(&self) -> &Arc<dyn TileCache> {
        &self.cache
    }

    /// True when a disk mirror tier is wired.
    pub fn has_mirror(&self) -> bool {
        self.mirror.is_some()
    }

    /// Point-in-time copy of the load-path counters.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }

    /// Installs the batch cancellation/progress callback.
    pub fn set_requestor(&self, requestor: Arc<dyn TileRequestor>) {
        *self.requestor.write() = Some(requestor);
    }

    /// Removes the batch callback; batches then run to completion.
    pub fn clear_requestor(&self) {
        *self.requestor.write() = None;
    }

    /// Authoritative cache key for a tile.
    ///
    /// The local derivation when a mirror is configured, the remote URL
    /// otherwise, so the key always names the nearest persistent tier.
    pub fn cache_key(&self, coord: TileCoord) -> String {
        match &self.mirror {
            Some(mirror) => mirror.locator(coord),
            None => self.fetcher.tile_url(coord),
        }
    }

    /// Loads one tile, consulting memory, disk, then the network.
    ///
    /// Always returns a tile: any failure along the way is logged and
    /// answered with the empty-tile policy's placeholder. Failed loads are
    /// not cached unless [`VaultConfig::cache_empty_tiles`] is set, so the
    /// next request retries from scratch.
    pub async fn load(&self, coord: TileCoord) -> RasterTile {
        let key = self.cache_key(coord);

        if let Some(tile) = self.cache.get(&key).await {
            self.metrics.record_memory_hit();
            debug!(tile = %coord, "memory cache hit");
            return tile;
        }

        // Single flight: concurrent misses for one key share one cell. The
        // entry guard must drop before any await.
        let cell = {
            let entry = self.in_flight.entry(key.clone()).or_default();
            Arc::clone(&entry)
        };
        let outcome = cell
            .get_or_init(|| self.load_uncached(coord, &key))
            .await
            .clone();
        self.in_flight
            .remove_if(&key, |_, value| Arc::ptr_eq(value, &cell));

        match outcome {
            LoadOutcome::Tile(tile) => tile,
            LoadOutcome::Failed => {
                self.metrics.record_placeholder();
                let tile = self.empty_tiles.empty_tile(coord);
                if self.config.cache_empty_tiles {
                    self.cache.insert(&key, tile.clone()).await;
                }
                tile
            }
        }
    }

    /// Disk-then-network path for a key that missed the memory cache.
    async fn load_uncached(&self, coord: TileCoord, key: &str) -> LoadOutcome {
        if let Some(mirror) = &self.mirror {
            if let Some(bytes) = mirror.load(coord).await {
                match decode_tile(bytes).await {
                    Ok(image) => {
                        let tile = RasterTile::new(coord, image);
                        self.cache.insert(key, tile.clone()).await;
                        self.metrics.record_disk_hit();
                        debug!(tile = %coord, "disk mirror hit");
                        return LoadOutcome::Tile(tile);
                    }
                    Err(e) => {
                        // A corrupt mirror file falls through to the network.
                        self.logger
                            .warn_cause(&format!("unreadable mirror tile {key}, refetching"), &e);
                    }
                }
            }
        }

        self.metrics.record_remote_fetch();
        let url = self.fetcher.tile_url(coord);
        let bytes = match self.fetcher.fetch(coord).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.metrics.record_remote_failure();
                self.logger.warn_cause(&format!("tile fetch failed for {url}"), &e);
                return LoadOutcome::Failed;
            }
        };
        debug!(tile = %coord, bytes = bytes.len(), "remote fetch complete");

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.store(coord, bytes.clone()).await {
                // A mirror write failure never fails the fetch.
                self.logger
                    .warn_cause(&format!("mirror write failed for {key}"), &e);
            }
        }

        match decode_tile(bytes).await {
            Ok(image) => {
                let tile = RasterTile::new(coord, image);
                self.cache.insert(key, tile.clone()).await;
                LoadOutcome::Tile(tile)
            }
            Err(e) => {
                self.logger
                    .warn_cause(&format!("tile decode failed for {url}"), &e);
                LoadOutcome::Failed
            }
        }
    }

    /// Loads every tile visible at the projection's preferred zoom.
    pub async fn get_tiles(&self, projection: &dyn Projection) -> Vec<RasterTile> {
        self.get_tiles_at(projection, projection.preferred_zoom())
            .await
    }

    /// Loads every tile visible at the given zoom.
    pub async fn get_tiles_at(&self, projection: &dyn Projection, zoom: u8) -> Vec<RasterTile> {
        let mut tiles = Vec::new();
        self.get_tiles_into(projection, zoom, &mut tiles).await;
        tiles
    }

    /// Loads the visible span into `out`, polling the requestor between
    /// tiles.
    ///
    /// Cancellation is cooperative and coarse-grained: a `false` from
    /// `should_continue` abandons the remaining span, but the tile already
    /// in flight completes. `list_update` fires after each produced tile so
    /// the caller can render incrementally.
    pub async fn get_tiles_into(
        &self,
        projection: &dyn Projection,
        zoom: u8,
        out: &mut Vec<RasterTile>,
    ) {
        let span = projection.visible_span(zoom);
        let requestor = self.requestor.read().clone();

        for coord in span.coords(zoom) {
            if let Some(requestor) = &requestor {
                if !requestor.should_continue() {
                    debug!(zoom, loaded = out.len(), "batch abandoned by requestor");
                    return;
                }
            }

            let tile = self.load(coord).await;
            out.push(tile);

            if let Some(requestor) = &requestor {
                requestor.list_update();
            }
        }
    }

    /// Clears the memory cache and deletes the mirror tree.
    ///
    /// Mirror deletion failures are logged and swallowed; the memory cache
    /// is empty afterward regardless.
    pub async fn reset(&self) {
        self.cache.clear().await;

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.clear().await {
                self.logger.warn_cause("mirror delete failed during reset", &e);
            }
        }

        self.logger.info("vault reset, memory cache cleared");
    }
}
