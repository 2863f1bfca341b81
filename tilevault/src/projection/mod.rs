//! Viewport collaborator interface.
//!
//! Projection math is the caller's business; the vault only needs to know
//! which tiles a viewport wants. [`Projection`] answers exactly that: a
//! preferred zoom level and the inclusive span of tile columns and rows
//! visible at a given zoom.

use crate::coord::TileCoord;

/// Inclusive range of tile columns and rows visible in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    /// First visible column.
    pub x_min: u32,
    /// Last visible column, inclusive.
    pub x_max: u32,
    /// First visible row.
    pub y_min: u32,
    /// Last visible row, inclusive.
    pub y_max: u32,
}

impl TileSpan {
    /// Creates a span from inclusive bounds.
    pub fn new(x_min: u32, x_max: u32, y_min: u32, y_max: u32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Number of tiles the span covers.
    pub fn tile_count(&self) -> u64 {
        if self.x_max < self.x_min || self.y_max < self.y_min {
            return 0;
        }
        (self.x_max - self.x_min + 1) as u64 * (self.y_max - self.y_min + 1) as u64
    }

    /// Iterates the span column-major: x outer, y inner.
    pub fn coords(&self, zoom: u8) -> impl Iterator<Item = TileCoord> + '_ {
        let span = *self;
        (span.x_min..=span.x_max)
            .flat_map(move |x| (span.y_min..=span.y_max).map(move |y| TileCoord::new(x, y, zoom)))
    }
}

/// What the vault needs to know about a caller's viewport.
pub trait Projection: Send + Sync {
    /// Zoom level this projection would like tiles at.
    fn preferred_zoom(&self) -> u8;

    /// Tiles visible at the given zoom.
    fn visible_span(&self, zoom: u8) -> TileSpan;
}

/// Fixed-span projection for embedders that already know their tile range.
#[derive(Debug, Clone, Copy)]
pub struct FixedSpanProjection {
    zoom: u8,
    span: TileSpan,
}

impl FixedSpanProjection {
    /// Projection answering `span` at every zoom, preferring `zoom`.
    pub fn new(zoom: u8, span: TileSpan) -> Self {
        Self { zoom, span }
    }
}

impl Projection for FixedSpanProjection {
    fn preferred_zoom(&self) -> u8 {
        self.zoom
    }

    fn visible_span(&self, _zoom: u8) -> TileSpan {
        self.span
    }
}
