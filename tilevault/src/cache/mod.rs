//! Bounded in-memory tile cache.
//!
//! The memory tier is the first stop for every tile request. It stores
//! decoded [`RasterTile`](crate::tile::RasterTile) values under string keys
//! and evicts automatically once the configured entry limit is reached.
//!
//! [`TileCache`] is the seam the vault consumes; [`MemoryTileCache`] is the
//! default moka-backed implementation.

mod memory;
mod traits;

pub use memory::{CacheStats, MemoryTileCache};
pub use traits::{BoxFuture, TileCache};
