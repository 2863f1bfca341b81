//! Decoded raster tiles.
//!
//! A [`RasterTile`] is produced once per successful load and is immutable
//! afterwards. Pixels live behind an `Arc`, so handing clones out of the
//! cache to concurrent callers is a pointer copy, not a pixel copy.

mod decode;

pub use decode::{decode_tile, DecodeError};

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::coord::{tile_bounds, TileBounds, TileCoord};

/// A decoded map tile bound to its place in the tile pyramid.
///
/// Carries the RGBA pixels, the coordinates it answers, and the geographic
/// bounds a renderer needs to place it against a projection. Placeholder
/// tiles (substitutes for tiles that could not be produced) are flagged so
/// callers can style or re-request them.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use tilevault::coord::TileCoord;
/// use tilevault::tile::RasterTile;
///
/// let tile = RasterTile::new(TileCoord::new(3, 5, 8), RgbaImage::new(256, 256));
/// assert_eq!(tile.coord(), TileCoord::new(3, 5, 8));
/// assert!(!tile.is_placeholder());
/// ```
#[derive(Clone, PartialEq)]
pub struct RasterTile {
    coord: TileCoord,
    bounds: TileBounds,
    image: Arc<RgbaImage>,
    placeholder: bool,
}

impl RasterTile {
    /// Creates a tile from decoded pixels.
    pub fn new(coord: TileCoord, image: RgbaImage) -> Self {
        Self {
            coord,
            bounds: tile_bounds(coord),
            image: Arc::new(image),
            placeholder: false,
        }
    }

    /// Creates a placeholder tile standing in for one that could not be produced.
    pub fn placeholder(coord: TileCoord, image: RgbaImage) -> Self {
        Self {
            coord,
            bounds: tile_bounds(coord),
            image: Arc::new(image),
            placeholder: true,
        }
    }

    /// Coordinates this tile answers.
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Geographic extent of the tile in degrees.
    pub fn bounds(&self) -> TileBounds {
        self.bounds
    }

    /// Decoded pixels, RGBA.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True if this tile is a placeholder rather than real imagery.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

// Pixel buffers are megabytes; Debug prints the tile identity instead.
impl fmt::Debug for RasterTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterTile")
            .field("coord", &self.coord)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_binds_coord_and_bounds() {
        let coord = TileCoord::new(3, 5, 8);
        let tile = RasterTile::new(coord, RgbaImage::new(16, 16));

        assert_eq!(tile.coord(), coord);
        assert_eq!(tile.bounds(), tile_bounds(coord));
        assert_eq!(tile.width(), 16);
        assert_eq!(tile.height(), 16);
        assert!(!tile.is_placeholder());
    }

    #[test]
    fn test_placeholder_flag() {
        let tile = RasterTile::placeholder(TileCoord::new(0, 0, 0), RgbaImage::new(4, 4));
        assert!(tile.is_placeholder());
    }

    #[test]
    fn test_clone_shares_pixels() {
        let tile = RasterTile::new(TileCoord::new(1, 2, 3), RgbaImage::new(8, 8));
        let cloned = tile.clone();

        assert!(Arc::ptr_eq(&tile.image, &cloned.image));
        assert_eq!(tile, cloned);
    }

    #[test]
    fn test_debug_omits_pixels() {
        let tile = RasterTile::new(TileCoord::new(7, 9, 4), RgbaImage::new(32, 32));
        let rendered = format!("{:?}", tile);

        assert!(rendered.contains("RasterTile"));
        assert!(rendered.contains("32"));
        assert!(!rendered.contains('['), "pixel data must not be dumped: {rendered}");
    }
}
