//! Assembles a [`TileVault`] from pluggable strategies.
//!
//! Every tier is a trait object the builder can swap: tests inject scripted
//! fetchers and capturing loggers, embedders bring their own cache or mirror.
//! Anything left unset gets the default wired from the [`VaultConfig`].

use std::sync::Arc;

use crate::cache::{MemoryTileCache, TileCache};
use crate::fetch::{FetchError, HttpTileFetcher, ReqwestClient, TileFetcher};
use crate::log::{Logger, TracingLogger};
use crate::mirror::{DiskMirror, TileMirror};
use crate::placeholder::{EmptyTileHandler, SolidEmptyTileHandler};
use crate::vault::{TileVault, VaultConfig};

/// Builder for [`TileVault`].
///
/// ```no_run
/// use tilevault::vault::{TileVault, VaultConfig};
///
/// # fn main() -> Result<(), tilevault::fetch::FetchError> {
/// let vault = TileVault::builder(VaultConfig::new("http://tiles.example.com/layer"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct TileVaultBuilder {
    config: VaultConfig,
    cache: Option<Arc<dyn TileCache>>,
    mirror: Option<Arc<dyn TileMirror>>,
    fetcher: Option<Arc<dyn TileFetcher>>,
    empty_tiles: Option<Arc<dyn EmptyTileHandler>>,
    logger: Option<Arc<dyn Logger>>,
}

impl TileVaultBuilder {
    /// Starts a builder from a configuration.
    pub fn new(config: VaultConfig) -> Self {
        Self {
            config,
            cache: None,
            mirror: None,
            fetcher: None,
            empty_tiles: None,
            logger: None,
        }
    }

    /// Replaces the memory cache tier.
    pub fn cache(mut self, cache: Arc<dyn TileCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replaces the disk mirror tier.
    ///
    /// Supplying a mirror makes its locator the authoritative cache key even
    /// when `mirror_dir` is unset in the config.
    pub fn mirror(mut self, mirror: Arc<dyn TileMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Replaces the remote fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn TileFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replaces the empty-tile policy.
    pub fn empty_tiles(mut self, handler: Arc<dyn EmptyTileHandler>) -> Self {
        self.empty_tiles = Some(handler);
        self
    }

    /// Replaces the injected logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the vault, wiring defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Fails only when the default HTTP client cannot be constructed; a
    /// vault with an injected fetcher never fails to build.
    pub fn build(self) -> Result<TileVault, FetchError> {
        let cache: Arc<dyn TileCache> = match self.cache {
            Some(cache) => cache,
            None => Arc::new(MemoryTileCache::new(self.config.cache_capacity)),
        };

        let mirror: Option<Arc<dyn TileMirror>> = match self.mirror {
            Some(mirror) => Some(mirror),
            None => self
                .config
                .mirror_dir
                .as_ref()
                .map(|dir| {
                    Arc::new(DiskMirror::new(dir.clone(), self.config.file_ext.clone()))
                        as Arc<dyn TileMirror>
                }),
        };

        let fetcher: Arc<dyn TileFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                let client = ReqwestClient::new(self.config.connect_timeout)?;
                Arc::new(HttpTileFetcher::new(
                    client,
                    self.config.root_url.clone(),
                    self.config.file_ext.clone(),
                    self.config.max_body_bytes,
                ))
            }
        };

        let empty_tiles = self
            .empty_tiles
            .unwrap_or_else(|| Arc::new(SolidEmptyTileHandler::new()));
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));

        Ok(TileVault::from_parts(
            self.config,
            cache,
            mirror,
            fetcher,
            empty_tiles,
            logger,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::fetch::tests::MockTileFetcher;
    use bytes::Bytes;

    #[test]
    fn test_build_with_defaults() {
        let vault = TileVaultBuilder::new(VaultConfig::new("http://tiles.example.com/layer"))
            .build()
            .unwrap();

        assert_eq!(vault.cache().capacity(), 100);
        assert!(!vault.has_mirror());
    }

    #[test]
    fn test_config_mirror_dir_enables_disk_tier() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            VaultConfig::new("http://tiles.example.com/layer").with_mirror_dir(dir.path());

        let vault = TileVaultBuilder::new(config).build().unwrap();

        assert!(vault.has_mirror());
    }

    #[test]
    fn test_injected_fetcher_controls_the_key() {
        let fetcher = Arc::new(MockTileFetcher::always(Ok(Bytes::from_static(b"x"))));
        let vault = TileVaultBuilder::new(VaultConfig::new("http://unused.example.com"))
            .fetcher(fetcher)
            .build()
            .unwrap();

        assert_eq!(
            vault.cache_key(TileCoord::new(3, 5, 8)),
            "mock://tiles/8/3/5.png"
        );
    }

    #[test]
    fn test_custom_cache_capacity_is_respected() {
        let cache = Arc::new(MemoryTileCache::new(7));
        let vault = TileVaultBuilder::new(VaultConfig::new("http://t.example.com"))
            .cache(cache)
            .build()
            .unwrap();

        assert_eq!(vault.cache().capacity(), 7);
    }
}
