//! Error types for the map pipeline.
//!
//! Errors are categorized by pipeline stage; under the fail-fast fetch
//! policy any stage error aborts the whole run with no partial results.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::geometry::GeometryError;
use crate::provider::FetchError;

/// Errors that can occur during a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Tile retrieval failed
    #[error("tile fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Tile payload could not be decoded
    #[error("tile decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// A union or triangulation input was invalid
    #[error("geometry operation failed: {0}")]
    Geometry(#[from] GeometryError),

    /// A fetch task panicked
    #[error("fetch task panicked: {0}")]
    TaskPanicked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = PipelineError::from(FetchError::Network("connection refused".to_string()));
        assert_eq!(
            err.to_string(),
            "tile fetch failed: network error: connection refused"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let err = PipelineError::from(DecodeError::TruncatedGeometry);
        assert_eq!(err.to_string(), "tile decode failed: geometry stream truncated");
    }
}
