//! Tile addressing for XYZ map tile pyramids.
//!
//! Provides the tile coordinate type, the canonical relative path scheme
//! shared by the remote URL and the disk mirror, and the inverse Web Mercator
//! conversion that gives a tile its geographic placement.

use std::f64::consts::PI;
use std::fmt;

/// Coordinates of a single map tile in the standard XYZ scheme.
///
/// - X: column (0 to 2^zoom - 1, west to east)
/// - Y: row (0 to 2^zoom - 1, north to south)
/// - Zoom: resolution index; higher values mean more tiles per area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column index, west to east.
    pub x: u32,
    /// Row index, north to south.
    pub y: u32,
    /// Zoom level.
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Builds the canonical relative path for a tile.
///
/// Deterministic and side-effect-free: the same inputs always produce the
/// same string. The result is used verbatim as the URL suffix under the
/// remote root and, component by component, as the file path under the
/// mirror root, so both tiers address the same logical tile.
///
/// # Arguments
///
/// * `coord` - Tile coordinates
/// * `ext` - File extension including the leading dot (e.g. `".png"`)
///
/// # Example
///
/// ```
/// use tilevault::coord::{tile_path, TileCoord};
///
/// let path = tile_path(TileCoord::new(3, 5, 8), ".png");
/// assert_eq!(path, "8/3/5.png");
/// ```
#[inline]
pub fn tile_path(coord: TileCoord, ext: &str) -> String {
    format!("{}/{}/{}{}", coord.zoom, coord.x, coord.y, ext)
}

/// Geographic extent of a tile in degrees.
///
/// Produced by [`tile_bounds`]; consumers place the decoded raster against
/// their own projection using these corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    /// Latitude of the northern edge.
    pub north: f64,
    /// Latitude of the southern edge.
    pub south: f64,
    /// Longitude of the western edge.
    pub west: f64,
    /// Longitude of the eastern edge.
    pub east: f64,
}

/// Converts tile coordinates to their geographic bounding box.
///
/// Uses the inverse Web Mercator projection: the northwest corner of the
/// tile itself and the northwest corner of its southeastern neighbor.
#[inline]
pub fn tile_bounds(coord: TileCoord) -> TileBounds {
    let n = 2.0_f64.powi(coord.zoom as i32);
    let (north, west) = corner_lat_lon(coord.x as f64, coord.y as f64, n);
    let (south, east) = corner_lat_lon(coord.x as f64 + 1.0, coord.y as f64 + 1.0, n);

    TileBounds {
        north,
        south,
        west,
        east,
    }
}

/// Latitude/longitude of a tile grid intersection at fractional precision.
fn corner_lat_lon(x: f64, y: f64, n: f64) -> (f64, f64) {
    let lon = x / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y / n)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;
    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_path_format() {
        let path = tile_path(TileCoord::new(3, 5, 8), ".png");
        assert_eq!(path, "8/3/5.png");
    }

    #[test]
    fn test_tile_path_origin_tile() {
        let path = tile_path(TileCoord::new(0, 0, 0), ".jpg");
        assert_eq!(path, "0/0/0.jpg");
    }

    #[test]
    fn test_tile_path_large_coordinates() {
        let path = tile_path(TileCoord::new(83776, 138240, 18), ".png");
        assert_eq!(path, "18/83776/138240.png");
    }

    #[test]
    fn test_tile_coord_display_matches_path_scheme() {
        let coord = TileCoord::new(19295, 24640, 16);
        assert_eq!(coord.to_string(), "16/19295/24640");
    }

    #[test]
    fn test_tile_coord_equality_and_hash() {
        use std::collections::HashSet;

        let a = TileCoord::new(1, 2, 3);
        let b = TileCoord::new(1, 2, 3);
        let c = TileCoord::new(2, 1, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut seen = HashSet::new();
        assert!(seen.insert(a));
        assert!(!seen.insert(b));
        assert!(seen.insert(c));
    }

    #[test]
    fn test_tile_bounds_world_tile() {
        // The single zoom-0 tile spans the whole Web Mercator world.
        let bounds = tile_bounds(TileCoord::new(0, 0, 0));

        assert!((bounds.west - (-180.0)).abs() < 1e-9);
        assert!((bounds.east - 180.0).abs() < 1e-9);
        assert!((bounds.north - 85.051).abs() < 0.01);
        assert!((bounds.south - (-85.051)).abs() < 0.01);
    }

    #[test]
    fn test_tile_bounds_zoom_one_quadrant() {
        // Tile (0,0) at zoom 1 is the northwest quadrant.
        let bounds = tile_bounds(TileCoord::new(0, 0, 1));

        assert!((bounds.west - (-180.0)).abs() < 1e-9);
        assert!(bounds.east.abs() < 1e-9);
        assert!((bounds.north - 85.051).abs() < 0.01);
        assert!(bounds.south.abs() < 1e-9);
    }

    #[test]
    fn test_tile_bounds_nyc_tile() {
        // Tile covering Manhattan at zoom 16 (x=19295, y=24640).
        let bounds = tile_bounds(TileCoord::new(19295, 24640, 16));

        assert!(
            (bounds.north - 40.713).abs() < 0.01,
            "north edge should be close to 40.713, got {}",
            bounds.north
        );
        assert!(
            (bounds.west - (-74.007)).abs() < 0.01,
            "west edge should be close to -74.007, got {}",
            bounds.west
        );
        assert!(bounds.north > bounds.south);
        assert!(bounds.east > bounds.west);
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let left = tile_bounds(TileCoord::new(4, 7, 5));
        let right = tile_bounds(TileCoord::new(5, 7, 5));
        let below = tile_bounds(TileCoord::new(4, 8, 5));

        assert!((left.east - right.west).abs() < 1e-9);
        assert!((left.south - below.north).abs() < 1e-9);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tile_path_is_pure(
                x in 0u32..1_000_000,
                y in 0u32..1_000_000,
                zoom in 0u8..=22
            ) {
                let coord = TileCoord::new(x, y, zoom);
                let first = tile_path(coord, ".png");
                let second = tile_path(coord, ".png");

                prop_assert_eq!(&first, &second, "identical inputs must yield identical paths");
                prop_assert_eq!(first, format!("{}/{}/{}.png", zoom, x, y));
            }

            #[test]
            fn test_tile_path_components_roundtrip(
                x in 0u32..1_000_000,
                y in 0u32..1_000_000,
                zoom in 0u8..=22
            ) {
                let path = tile_path(TileCoord::new(x, y, zoom), ".png");
                let parts: Vec<&str> = path.split('/').collect();

                prop_assert_eq!(parts.len(), 3);
                prop_assert_eq!(parts[0].parse::<u8>().unwrap(), zoom);
                prop_assert_eq!(parts[1].parse::<u32>().unwrap(), x);
                prop_assert_eq!(parts[2].strip_suffix(".png").unwrap().parse::<u32>().unwrap(), y);
            }

            #[test]
            fn test_tile_bounds_ordering(
                x_raw in 0u32..65536,
                y_raw in 0u32..65536,
                zoom in 0u8..=16
            ) {
                let max_coord = 2u32.pow(zoom as u32);
                let coord = TileCoord::new(x_raw % max_coord, y_raw % max_coord, zoom);
                let bounds = tile_bounds(coord);

                prop_assert!(bounds.north > bounds.south);
                prop_assert!(bounds.east > bounds.west);
                prop_assert!(bounds.west >= -180.0 && bounds.east <= 180.0);
                prop_assert!(bounds.north <= 85.06 && bounds.south >= -85.06);
            }
        }
    }
}
