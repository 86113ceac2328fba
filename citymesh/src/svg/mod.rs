//! SVG input for the physics pipeline
//!
//! Loads an SVG document, pulls the raw `d` attributes out of a named
//! group, and turns each path into a fitted, simplified vertex outline.

mod error;
mod loader;
mod path;

pub use error::{InsufficientDataError, ParseError, SvgError};
pub use loader::{extract_paths, DEFAULT_GROUP_ID};
pub use path::{
    bounding_box, parse_path, BoundingBox, FitTransform, DEFAULT_SIMPLIFY_TOLERANCE,
};
