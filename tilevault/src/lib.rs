//! TileVault - two-tier map tile retrieval and caching.
//!
//! Fetches rectangular raster map tiles addressed by (zoom, x, y) from a
//! remote image server, caches them in memory and in an optional on-disk
//! mirror, and hands them to a rendering caller. The central guarantee is
//! that a load always produces a tile: any fetch, disk, or decode failure
//! is logged and answered with a placeholder, so one broken tile can never
//! abort a batch render.
//!
//! # Quick start
//!
//! ```no_run
//! use tilevault::coord::TileCoord;
//! use tilevault::vault::{TileVault, VaultConfig};
//!
//! # async fn example() -> Result<(), tilevault::fetch::FetchError> {
//! let config = VaultConfig::new("http://tiles.example.com/layer")
//!     .with_mirror_dir("/var/cache/tiles");
//! let vault = TileVault::new(config)?;
//!
//! let tile = vault.load(TileCoord::new(3, 5, 8)).await;
//! assert_eq!(tile.coord(), TileCoord::new(3, 5, 8));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod coord;
pub mod fetch;
pub mod log;
pub mod logging;
pub mod mirror;
pub mod placeholder;
pub mod projection;
pub mod requestor;
pub mod telemetry;
pub mod tile;
pub mod vault;

pub use coord::TileCoord;
pub use tile::RasterTile;
pub use vault::{TileVault, TileVaultBuilder, VaultConfig};
