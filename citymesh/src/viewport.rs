//! Viewport description shared by the grid generator, renderer, and physics
//! session.
//!
//! The viewport is read once at startup; there is no runtime resize handling.

/// Pixel dimensions and device pixel ratio of the output surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: f64,
    /// Height in CSS pixels
    pub height: f64,
    /// Device pixels per CSS pixel (1.0 on standard displays)
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Creates a viewport from pixel dimensions and a device pixel ratio.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Width in device pixels.
    #[inline]
    pub fn device_width(&self) -> f64 {
        self.width * self.device_pixel_ratio
    }

    /// Height in device pixels.
    #[inline]
    pub fn device_height(&self) -> f64 {
        self.height * self.device_pixel_ratio
    }

    /// Center point in CSS pixels.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_dimensions_scale_with_pixel_ratio() {
        let viewport = Viewport::new(1280.0, 800.0, 2.0);
        assert_eq!(viewport.device_width(), 2560.0);
        assert_eq!(viewport.device_height(), 1600.0);
    }

    #[test]
    fn test_center() {
        let viewport = Viewport::new(1280.0, 800.0, 1.0);
        assert_eq!(viewport.center(), (640.0, 400.0));
    }
}
