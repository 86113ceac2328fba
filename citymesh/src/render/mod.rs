//! Rendering of merged feature collections
//!
//! Two output forms, both pure functions of their inputs: SVG markup (one
//! path element per feature) and an earcut-triangulated mesh in device
//! pixels for filled rendering.

mod svg;
mod transform;
mod triangulate;

pub use svg::{path_data, svg_document, FEATURE_FILL, FEATURE_STROKE, FEATURE_STROKE_WIDTH};
pub use transform::DeviceTransform;
pub use triangulate::{triangulate, TriangleMesh};
