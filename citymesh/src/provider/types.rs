//! Provider types and traits

use std::fmt;
use std::future::Future;

use crate::coord::TileCoord;

/// Errors that can occur while retrieving a tile payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Request reached the server but returned a non-success status
    HttpStatus { status: u16, url: String },
    /// Request failed before a response arrived
    Network(String),
    /// The HTTP client could not be constructed
    ClientConstruction(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            FetchError::Network(msg) => write!(f, "network error: {}", msg),
            FetchError::ClientConstruction(msg) => {
                write!(f, "failed to create HTTP client: {}", msg)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Trait for vector-tile sources.
///
/// Implementors retrieve the binary payload for one tile coordinate. The
/// pipeline issues all fetches for a run concurrently; implementations must
/// be shareable across tasks.
pub trait TileSource: Send + Sync {
    /// Retrieves the binary vector-tile payload for a tile coordinate.
    fn fetch_tile(
        &self,
        coord: TileCoord,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;
}
