//! Viewport tile coverage
//!
//! Computes the set of tile coordinates whose tiles intersect the viewport
//! at the nearest integer zoom level, given a projection's scale and
//! translation. Pure math; no network or I/O side effects, and the same
//! inputs always produce the same coordinate set.

use super::types::{TileCoord, MAX_ZOOM};
use crate::projection::Projection;
use crate::viewport::Viewport;

/// Generates the tile coordinates covering a viewport.
///
/// The world is `world_scale` pixels wide at the projection's scale and is
/// cut into `2^z` tiles of `tile_size` pixels at the nearest integer zoom
/// `z`. Tiles are emitted row by row, west to east.
#[derive(Debug, Clone, Copy)]
pub struct TileGrid {
    tile_size: u32,
}

impl TileGrid {
    /// Standard tile edge length in pixels.
    pub const DEFAULT_TILE_SIZE: u32 = 256;

    /// Creates a grid generator with the standard 256px tile size.
    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
        }
    }

    /// Creates a grid generator with a custom tile size.
    pub fn with_tile_size(tile_size: u32) -> Self {
        Self { tile_size }
    }

    /// Computes the ordered set of tiles intersecting the viewport.
    ///
    /// The integer zoom is `round(log2(world_scale / tile_size))`, clamped
    /// to the supported pyramid range. Each tile then spans
    /// `world_scale / 2^zoom` pixels, which differs from `tile_size` when
    /// the projection scale is not an exact power of two.
    pub fn cover(&self, projection: &Projection, viewport: &Viewport) -> Vec<TileCoord> {
        let scale = projection.world_scale();
        // Pixel position of the world center (lon 0, lat 0) under this
        // projection; the world's top-left corner is half a world away.
        let (tx, ty) = projection.project(0.0, 0.0);

        let z = (scale / self.tile_size as f64).log2();
        let zoom = z.round().clamp(0.0, MAX_ZOOM as f64) as u8;
        let tile_px = 2.0_f64.powf(z - zoom as f64) * self.tile_size as f64;

        let x0 = tx - scale / 2.0;
        let y0 = ty - scale / 2.0;
        let max_index = (1u64 << zoom) as f64 - 1.0;

        let x_lo = ((0.0 - x0) / tile_px).floor().max(0.0);
        let x_hi = (((viewport.width - x0) / tile_px).ceil() - 1.0).min(max_index);
        let y_lo = ((0.0 - y0) / tile_px).floor().max(0.0);
        let y_hi = (((viewport.height - y0) / tile_px).ceil() - 1.0).min(max_index);

        if x_hi < x_lo || y_hi < y_lo {
            return Vec::new();
        }

        let mut tiles = Vec::new();
        for y in y_lo as u32..=y_hi as u32 {
            for x in x_lo as u32..=x_hi as u32 {
                tiles.push(TileCoord { x, y, z: zoom });
            }
        }
        tiles
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}
