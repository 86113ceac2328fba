//! MVT geometry command decoding
//!
//! Vector-tile geometries are streams of command integers: a header packs a
//! command id (MoveTo = 1, LineTo = 2, ClosePath = 7) with a repeat count,
//! followed by zigzag-encoded coordinate deltas. Rings are classified by
//! signed area in tile space (y grows downward): positive means exterior,
//! negative means a hole of the preceding exterior.

use geo_types::{LineString, Polygon};

use super::error::DecodeError;
use crate::coord::TileCoord;

const CMD_MOVE_TO: u32 = 1;
const CMD_LINE_TO: u32 = 2;
const CMD_CLOSE_PATH: u32 = 7;

/// Decodes a polygon geometry stream into rings of tile-local coordinates.
///
/// Rings are returned unclosed (no duplicated end point); the closing edge
/// is implied by ClosePath.
pub(crate) fn decode_rings(commands: &[u32]) -> Result<Vec<Vec<(i64, i64)>>, DecodeError> {
    let mut rings = Vec::new();
    let mut current: Vec<(i64, i64)> = Vec::new();
    let (mut x, mut y) = (0i64, 0i64);

    let mut i = 0;
    while i < commands.len() {
        let header = commands[i];
        i += 1;
        let command = header & 0x7;
        let count = (header >> 3) as usize;

        match command {
            CMD_MOVE_TO => {
                for _ in 0..count {
                    let (dx, dy) = take_delta(commands, &mut i)?;
                    x += dx;
                    y += dy;
                    if !current.is_empty() {
                        rings.push(std::mem::take(&mut current));
                    }
                    current.push((x, y));
                }
            }
            CMD_LINE_TO => {
                for _ in 0..count {
                    let (dx, dy) = take_delta(commands, &mut i)?;
                    x += dx;
                    y += dy;
                    current.push((x, y));
                }
            }
            CMD_CLOSE_PATH => {
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
            }
            other => return Err(DecodeError::UnknownCommand { command: other }),
        }
    }

    if !current.is_empty() {
        rings.push(current);
    }
    Ok(rings)
}

/// Reads one zigzag-encoded (dx, dy) pair from the stream.
#[inline]
fn take_delta(commands: &[u32], i: &mut usize) -> Result<(i64, i64), DecodeError> {
    if *i + 2 > commands.len() {
        return Err(DecodeError::TruncatedGeometry);
    }
    let dx = zigzag(commands[*i]);
    let dy = zigzag(commands[*i + 1]);
    *i += 2;
    Ok((dx, dy))
}

#[inline]
fn zigzag(value: u32) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Twice the signed area of a ring in tile space.
///
/// Tile y grows downward, so per the vector-tile convention a positive
/// value marks an exterior ring and a negative value a hole.
pub(crate) fn signed_area2(ring: &[(i64, i64)]) -> i64 {
    let n = ring.len();
    let mut sum = 0i64;
    for i in 0..n {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum
}

/// Groups classified rings into polygons and converts coordinates from
/// tile-local space to (lon, lat) degrees.
pub(crate) fn assemble_polygons(
    rings: Vec<Vec<(i64, i64)>>,
    coord: &TileCoord,
    extent: u32,
) -> Result<Vec<Polygon<f64>>, DecodeError> {
    let mut assembled: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();

    for ring in rings {
        if ring.len() < 3 {
            return Err(DecodeError::DegenerateRing { points: ring.len() });
        }
        let area2 = signed_area2(&ring);
        if area2 == 0 {
            return Err(DecodeError::DegenerateRing { points: ring.len() });
        }

        let line = to_lon_lat_ring(&ring, coord, extent);
        if area2 > 0 {
            assembled.push((line, Vec::new()));
        } else {
            match assembled.last_mut() {
                Some((_, holes)) => holes.push(line),
                None => return Err(DecodeError::OrphanInteriorRing),
            }
        }
    }

    Ok(assembled
        .into_iter()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect())
}

fn to_lon_lat_ring(ring: &[(i64, i64)], coord: &TileCoord, extent: u32) -> LineString<f64> {
    LineString::from(
        ring.iter()
            .map(|&(x, y)| tile_local_to_lon_lat(coord, extent, x, y))
            .collect::<Vec<_>>(),
    )
}

/// Converts a tile-local coordinate to (lon, lat) degrees via the inverse
/// Web Mercator projection.
#[inline]
fn tile_local_to_lon_lat(coord: &TileCoord, extent: u32, x: i64, y: i64) -> (f64, f64) {
    use std::f64::consts::PI;

    let n = 2.0_f64.powi(coord.z as i32);
    let gx = (coord.x as f64 + x as f64 / extent as f64) / n;
    let gy = (coord.y as f64 + y as f64 / extent as f64) / n;

    let lon = gx * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * gy)).sinh().atan().to_degrees();
    (lon, lat)
}
