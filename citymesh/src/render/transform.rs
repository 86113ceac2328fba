//! Geographic-to-device coordinate mapping
//!
//! Triangulation happens in Web Mercator meters; the resulting vertices are
//! offset and scaled into device pixels by mapping the mercator extent of
//! the viewport onto the output surface.

use crate::projection::{to_web_mercator, Projection};
use crate::viewport::Viewport;

/// Maps Web Mercator meters to device pixels.
///
/// Built from the mercator positions of the viewport's top-left and
/// bottom-right corners. Mercator y grows northward while screen y grows
/// downward, so the vertical ratio is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceTransform {
    origin_x: f64,
    origin_y: f64,
    ratio_x: f64,
    ratio_y: f64,
    pixel_ratio: f64,
}

impl DeviceTransform {
    /// Derives the transform from a projection and viewport.
    pub fn from_projection(projection: &Projection, viewport: &Viewport) -> Self {
        let (lon0, lat0) = projection.invert(0.0, 0.0);
        let (lon1, lat1) = projection.invert(viewport.width, viewport.height);
        let (x0, y0) = to_web_mercator(lon0, lat0);
        let (x1, y1) = to_web_mercator(lon1, lat1);

        Self {
            origin_x: x0,
            origin_y: y0,
            ratio_x: viewport.width / (x1 - x0),
            ratio_y: viewport.height / (y1 - y0),
            pixel_ratio: viewport.device_pixel_ratio,
        }
    }

    /// Maps one mercator coordinate to device pixels.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.origin_x) * self.ratio_x * self.pixel_ratio,
            (y - self.origin_y) * self.ratio_y * self.pixel_ratio,
        )
    }
}
