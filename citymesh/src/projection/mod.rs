//! Mercator projection with center, scale, and translation
//!
//! Mirrors the classic center/scale/translate map projection: geographic
//! coordinates are projected through the spherical Mercator formula, scaled
//! by `scale` pixels per radian, and positioned so the configured center
//! lands on the configured translation point. Screen y grows downward.
//!
//! Also provides the EPSG:3857 (Web Mercator meters) conversion used as the
//! planar space for triangulation.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use crate::viewport::Viewport;

/// Earth radius used by the EPSG:3857 conversion, in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A Mercator projection parameterized by center, scale, and translation.
///
/// `scale` is in pixels per radian, so the projected world is
/// `scale * 2π` pixels wide. Deterministic: projection output depends only
/// on these parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center_lon: f64,
    center_lat: f64,
    scale: f64,
    translate: (f64, f64),
}

impl Projection {
    /// Creates a projection centered on (lon, lat) degrees with the given
    /// scale (pixels per radian) and translation (pixels).
    pub fn new(center_lon: f64, center_lat: f64, scale: f64, translate: (f64, f64)) -> Self {
        Self {
            center_lon,
            center_lat,
            scale,
            translate,
        }
    }

    /// Creates a projection whose world scale matches the given integer
    /// zoom level (256px tiles), centered on (lon, lat) and translated to
    /// the viewport center.
    pub fn for_zoom(center_lon: f64, center_lat: f64, zoom: u8, viewport: &Viewport) -> Self {
        let world_scale = 256.0 * 2.0_f64.powi(zoom as i32);
        Self::new(center_lon, center_lat, world_scale / TAU, viewport.center())
    }

    /// Scale in pixels per radian.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Width of the projected world in pixels (`scale * 2π`).
    #[inline]
    pub fn world_scale(&self) -> f64 {
        self.scale * TAU
    }

    /// Projects (lon, lat) degrees to screen pixels.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (cx, cy) = mercator_raw(self.center_lon, self.center_lat);
        let (px, py) = mercator_raw(lon, lat);
        (
            self.translate.0 + self.scale * (px - cx),
            // screen y grows downward while mercator y grows northward
            self.translate.1 - self.scale * (py - cy),
        )
    }

    /// Inverts screen pixels back to (lon, lat) degrees.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = mercator_raw(self.center_lon, self.center_lat);
        let mx = cx + (x - self.translate.0) / self.scale;
        let my = cy - (y - self.translate.1) / self.scale;
        let lon = mx.to_degrees();
        let lat = (2.0 * my.exp().atan() - FRAC_PI_2).to_degrees();
        (lon, lat)
    }
}

/// Spherical Mercator in radian space: x = λ, y = ln(tan(π/4 + φ/2)).
#[inline]
fn mercator_raw(lon: f64, lat: f64) -> (f64, f64) {
    let lambda = lon.to_radians();
    let phi = lat.to_radians();
    (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
}

/// Converts (lon, lat) degrees to EPSG:3857 Web Mercator meters.
#[inline]
pub fn to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let (x, y) = mercator_raw(lon, lat);
    (EARTH_RADIUS_M * x, EARTH_RADIUS_M * y)
}
