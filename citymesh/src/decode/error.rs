//! Error types for vector-tile decoding.

use std::fmt;

use crate::geometry::GeometryError;

/// Errors that can occur while decoding a vector-tile payload.
///
/// Decode failures are fatal to the tile; under the fail-fast fetch policy
/// they abort the whole pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The payload is not a valid protobuf vector tile
    Container(String),
    /// A geometry stream used a command id other than MoveTo/LineTo/ClosePath
    UnknownCommand { command: u32 },
    /// A geometry stream ended in the middle of a parameter pair
    TruncatedGeometry,
    /// A ring encloses no area and cannot be classified
    DegenerateRing { points: usize },
    /// An interior ring appeared before any exterior ring
    OrphanInteriorRing,
    /// A feature tag points outside the layer's key/value tables
    InvalidTagIndex { index: u32 },
    /// A feature carries neither an `id` property nor a tile-level id
    MissingId { layer: String },
    /// Decoded geometry failed boundary validation
    Geometry(GeometryError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Container(msg) => write!(f, "invalid tile payload: {}", msg),
            DecodeError::UnknownCommand { command } => {
                write!(f, "unknown geometry command {}", command)
            }
            DecodeError::TruncatedGeometry => write!(f, "geometry stream truncated"),
            DecodeError::DegenerateRing { points } => {
                write!(f, "ring with {} points encloses no area", points)
            }
            DecodeError::OrphanInteriorRing => {
                write!(f, "interior ring before any exterior ring")
            }
            DecodeError::InvalidTagIndex { index } => {
                write!(f, "tag index {} outside key/value tables", index)
            }
            DecodeError::MissingId { layer } => {
                write!(f, "feature in layer '{}' has no id", layer)
            }
            DecodeError::Geometry(e) => write!(f, "invalid geometry: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for DecodeError {
    fn from(e: GeometryError) -> Self {
        DecodeError::Geometry(e)
    }
}
