//! Path parsing, scaling, and simplification
//!
//! Only move/line segment endpoints are consumed, and only from the first
//! subpath of each path; curves are not flattened. Vertices are offset and
//! scaled to fit the viewport, then Douglas-Peucker simplified.

use geo::Simplify;
use geo_types::LineString;
use kurbo::{BezPath, PathEl};

use super::error::{InsufficientDataError, ParseError, SvgError};
use crate::viewport::Viewport;

/// Default Douglas-Peucker simplification tolerance.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.3;

/// Axis-aligned bounds of a set of paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Offset-then-scale transform fitting path space into the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// Fits the bounding box into the viewport, preserving aspect ratio.
    pub fn fit(bbox: &BoundingBox, viewport: &Viewport) -> Self {
        let scale_x = viewport.width / bbox.width();
        let scale_y = viewport.height / bbox.height();
        Self {
            scale: scale_x.min(scale_y),
            offset_x: bbox.min_x,
            offset_y: bbox.min_y,
        }
    }

    /// Identity transform (no offset, no scaling).
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) * self.scale, (y - self.offset_y) * self.scale)
    }
}

/// Computes the bounding box over the move/line endpoints of all paths.
///
/// Unlike [`parse_path`], all subpaths contribute: the box describes the
/// full drawing, not individual shapes.
pub fn bounding_box(paths: &[String]) -> Result<BoundingBox, SvgError> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut count = 0usize;

    for d in paths {
        let path = parse_d(d)?;
        for el in path.elements() {
            let point = match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => *p,
                _ => continue,
            };
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
            count += 1;
        }
    }

    if count == 0 {
        return Err(SvgError::Insufficient(InsufficientDataError {
            vertices: 0,
        }));
    }
    Ok(BoundingBox {
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

/// Parses one path into fitted, simplified vertices.
///
/// Keeps only the move/line endpoints of the first subpath (processing
/// stops at the second move command), applies the fit transform, then
/// Douglas-Peucker simplifies with the given tolerance.
///
/// # Errors
///
/// [`SvgError::Parse`] for malformed path data, [`SvgError::Insufficient`]
/// if two or fewer vertices survive simplification.
pub fn parse_path(
    d: &str,
    fit: &FitTransform,
    tolerance: f64,
) -> Result<Vec<(f64, f64)>, SvgError> {
    let path = parse_d(d)?;

    let mut vertices: Vec<(f64, f64)> = Vec::new();
    let mut subpaths = 0usize;
    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                subpaths += 1;
                if subpaths > 1 {
                    break;
                }
                vertices.push(fit.apply(p.x, p.y));
            }
            PathEl::LineTo(p) => vertices.push(fit.apply(p.x, p.y)),
            // curves and close commands contribute no vertices
            _ => {}
        }
    }

    let simplified = LineString::from(vertices).simplify(&tolerance);
    let vertices: Vec<(f64, f64)> = simplified.0.iter().map(|c| (c.x, c.y)).collect();

    if vertices.len() <= 2 {
        return Err(SvgError::Insufficient(InsufficientDataError {
            vertices: vertices.len(),
        }));
    }
    Ok(vertices)
}

fn parse_d(d: &str) -> Result<BezPath, SvgError> {
    BezPath::from_svg(d).map_err(|e| {
        SvgError::Parse(ParseError {
            message: e.to_string(),
        })
    })
}
