//! Configuration surface for the tile vault.
//!
//! Plain struct with `with_*` builders; parsing configuration files is the
//! embedder's business. Values are normalized on the way in so the rest of
//! the crate can assume a canonical shape: no trailing slash on the root
//! URL, a leading dot on the extension.

use std::path::PathBuf;
use std::time::Duration;

/// Default number of tiles held by the memory cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default connect timeout in milliseconds.
///
/// Applies to connection establishment only; a slow but live transfer is
/// allowed to finish.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

/// Default tile file extension, leading dot included.
pub const DEFAULT_FILE_EXT: &str = ".png";

/// Hard cap on a single response body (32 MiB).
///
/// Protects against servers that stream unbounded data without advertising
/// a content length.
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Configuration for a [`TileVault`](crate::vault::TileVault).
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Remote base URL the zoom/x/y path scheme is rooted under.
    pub root_url: String,

    /// Tile file extension, leading dot included.
    pub file_ext: String,

    /// Maximum number of tiles in the memory cache.
    pub cache_capacity: u64,

    /// Root directory of the on-disk mirror. `None` disables the disk tier.
    pub mirror_dir: Option<PathBuf>,

    /// Timeout for connection establishment.
    pub connect_timeout: Duration,

    /// Hard cap on a single response body.
    pub max_body_bytes: usize,

    /// Whether placeholder tiles for failed loads are cached.
    ///
    /// Off by default: a persistently failing tile is retried on every
    /// request. Turning this on trades retries for staleness until the
    /// placeholder is evicted or the vault is reset.
    pub cache_empty_tiles: bool,
}

impl VaultConfig {
    /// Creates a config for tiles under `root_url` with all defaults.
    ///
    /// A trailing slash on the URL is trimmed so path joining stays uniform.
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: normalize_root_url(root_url.into()),
            file_ext: DEFAULT_FILE_EXT.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            mirror_dir: None,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cache_empty_tiles: false,
        }
    }

    /// Sets the tile file extension; a missing leading dot is added.
    pub fn with_file_ext(mut self, ext: impl Into<String>) -> Self {
        self.file_ext = normalize_ext(ext.into());
        self
    }

    /// Sets the memory cache capacity in entries.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enables the disk mirror rooted at `dir`.
    pub fn with_mirror_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mirror_dir = Some(dir.into());
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the response body cap in bytes.
    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }

    /// Controls whether placeholders for failed loads are cached.
    pub fn with_cache_empty_tiles(mut self, cache: bool) -> Self {
        self.cache_empty_tiles = cache;
        self
    }
}

fn normalize_root_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn normalize_ext(ext: String) -> String {
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VaultConfig::new("http://tiles.example.com/layer");

        assert_eq!(config.root_url, "http://tiles.example.com/layer");
        assert_eq!(config.file_ext, ".png");
        assert_eq!(config.cache_capacity, 100);
        assert!(config.mirror_dir.is_none());
        assert_eq!(config.connect_timeout, Duration::from_millis(5000));
        assert_eq!(config.max_body_bytes, 32 * 1024 * 1024);
        assert!(!config.cache_empty_tiles);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = VaultConfig::new("http://tiles.example.com/layer/");
        assert_eq!(config.root_url, "http://tiles.example.com/layer");
    }

    #[test]
    fn test_missing_dot_on_extension_is_added() {
        let config = VaultConfig::new("http://t.example.com").with_file_ext("jpg");
        assert_eq!(config.file_ext, ".jpg");

        let config = VaultConfig::new("http://t.example.com").with_file_ext(".jpeg");
        assert_eq!(config.file_ext, ".jpeg");
    }

    #[test]
    fn test_builders_chain() {
        let config = VaultConfig::new("http://t.example.com")
            .with_cache_capacity(500)
            .with_mirror_dir("/var/tiles")
            .with_connect_timeout(Duration::from_secs(1))
            .with_max_body_bytes(1024)
            .with_cache_empty_tiles(true);

        assert_eq!(config.cache_capacity, 500);
        assert_eq!(config.mirror_dir.as_deref(), Some(std::path::Path::new("/var/tiles")));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.max_body_bytes, 1024);
        assert!(config.cache_empty_tiles);
    }
}
