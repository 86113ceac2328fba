//! Error types for SVG path extraction.

use std::fmt;

/// A path's `d` attribute could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed path data: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// A shape collapsed to too few vertices to form a body.
///
/// Raised when simplification leaves two or fewer vertices; the shape is
/// skipped and the batch continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientDataError {
    pub vertices: usize,
}

impl fmt::Display for InsufficientDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape collapsed to {} vertices, need at least 3",
            self.vertices
        )
    }
}

impl std::error::Error for InsufficientDataError {}

/// Errors raised while loading and parsing SVG input.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgError {
    /// The document is not well-formed XML
    Document(String),
    /// No element with the requested group id exists
    GroupNotFound(String),
    /// A path's `d` attribute is malformed
    Parse(ParseError),
    /// A shape has too few usable vertices
    Insufficient(InsufficientDataError),
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Document(msg) => write!(f, "invalid SVG document: {}", msg),
            SvgError::GroupNotFound(id) => write!(f, "group '{}' not found", id),
            SvgError::Parse(e) => write!(f, "{}", e),
            SvgError::Insufficient(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SvgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgError::Parse(e) => Some(e),
            SvgError::Insufficient(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for SvgError {
    fn from(e: ParseError) -> Self {
        SvgError::Parse(e)
    }
}

impl From<InsufficientDataError> for SvgError {
    fn from(e: InsufficientDataError) -> Self {
        SvgError::Insufficient(e)
    }
}
