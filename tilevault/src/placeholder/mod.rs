//! Placeholder tiles for failed loads.
//!
//! When no real tile can be produced the vault still owes its caller a tile,
//! so a single bad tile can never abort a batch render. The
//! [`EmptyTileHandler`] decides what that substitute looks like; the default
//! [`SolidEmptyTileHandler`] fills a solid color. Handlers are infallible:
//! whatever happens upstream, a placeholder is always available.

use image::{Rgba, RgbaImage};

use crate::coord::TileCoord;
use crate::tile::RasterTile;

/// Supplies a substitute tile when the real one cannot be obtained.
///
/// Called on every failure path, so implementations should be cheap; the
/// vault does not cache placeholders unless configured to.
pub trait EmptyTileHandler: Send + Sync {
    /// Produce a placeholder for the given coordinates.
    fn empty_tile(&self, coord: TileCoord) -> RasterTile;
}

/// Default handler: a solid-color square, fully transparent unless
/// configured otherwise.
pub struct SolidEmptyTileHandler {
    color: Rgba<u8>,
    size: u32,
}

impl SolidEmptyTileHandler {
    /// Standard tile edge length in pixels.
    pub const DEFAULT_SIZE: u32 = 256;

    /// Transparent 256x256 placeholder.
    pub fn new() -> Self {
        Self {
            color: Rgba([0, 0, 0, 0]),
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Placeholder filled with `color` at `size` pixels square.
    pub fn with_color(color: Rgba<u8>, size: u32) -> Self {
        Self { color, size }
    }
}

impl Default for SolidEmptyTileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyTileHandler for SolidEmptyTileHandler {
    fn empty_tile(&self, coord: TileCoord) -> RasterTile {
        let image = RgbaImage::from_pixel(self.size, self.size, self.color);
        RasterTile::placeholder(coord, image)
    }
}
