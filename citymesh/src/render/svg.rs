//! SVG markup rendering
//!
//! Emits one `<path>` element per merged feature with fixed styling and the
//! feature id as the element id. Pure function of its inputs.

use std::fmt::Write;

use crate::feature::MergedFeature;
use crate::geometry::Geometry;
use crate::projection::Projection;
use crate::viewport::Viewport;

/// Fill applied to every feature path.
pub const FEATURE_FILL: &str = "rgba(255,0,0,0.05)";

/// Stroke applied to every feature path.
pub const FEATURE_STROKE: &str = "#000";

/// Stroke width applied to every feature path.
pub const FEATURE_STROKE_WIDTH: f64 = 0.5;

/// Builds the `d` attribute for a geometry: one `M … L … Z` run per ring,
/// coordinates projected to screen pixels.
pub fn path_data(geometry: &Geometry, projection: &Projection) -> String {
    let mut d = String::new();
    for polygon in geometry.polygons() {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors().iter()) {
            // The closing coordinate duplicates the first; Z closes the run
            let coords = &ring.0;
            let open = coords.len().saturating_sub(1);
            for (i, c) in coords[..open].iter().enumerate() {
                let (x, y) = projection.project(c.x, c.y);
                let verb = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{:.2},{:.2}", verb, x, y);
            }
            d.push('Z');
        }
    }
    d
}

/// Renders merged features as a complete SVG document string.
pub fn svg_document(
    features: &[MergedFeature],
    projection: &Projection,
    viewport: &Viewport,
) -> String {
    let mut svg = format!(
        r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
        viewport.width, viewport.height
    );
    for feature in features {
        let _ = write!(
            svg,
            r#"<path fill="{}" stroke="{}" stroke-width="{}" id="{}" d="{}"></path>"#,
            FEATURE_FILL,
            FEATURE_STROKE,
            FEATURE_STROKE_WIDTH,
            feature.id,
            path_data(&feature.geometry, projection)
        );
    }
    svg.push_str("</svg>");
    svg
}
