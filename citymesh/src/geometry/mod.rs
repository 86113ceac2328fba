//! Polygon geometry: tagged variants, validation, winding correction
//!
//! The decode stage produces [`Geometry`] values validated once at the
//! boundary; the merge and render stages consume them without re-checking.

mod error;
mod types;
mod winding;

pub use error::GeometryError;
pub use types::Geometry;
pub use winding::{rewind, WindingOrder};
