//! Error type for polygon validation and geometry operations.

use std::fmt;

/// Errors raised when a geometry is unfit for union or triangulation.
///
/// Policy is to propagate (abort) rather than skip the malformed feature: a
/// partially merged collection is worse than no collection.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Geometry contains no rings at all
    Empty,
    /// A ring has fewer than four coordinates (three distinct plus the
    /// closing duplicate)
    RingTooShort { points: usize },
    /// A ring does not end on its starting coordinate
    OpenRing,
    /// A coordinate is NaN or infinite
    NonFiniteCoordinate { x: f64, y: f64 },
    /// The triangulation routine rejected the ring layout
    TriangulationFailed(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Empty => write!(f, "geometry has no rings"),
            GeometryError::RingTooShort { points } => {
                write!(f, "ring has {} coordinates, need at least 4", points)
            }
            GeometryError::OpenRing => write!(f, "ring is not closed"),
            GeometryError::NonFiniteCoordinate { x, y } => {
                write!(f, "non-finite coordinate ({}, {})", x, y)
            }
            GeometryError::TriangulationFailed(msg) => {
                write!(f, "triangulation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for GeometryError {}
