//! Error types for the physics session.

use std::fmt;

/// Errors that can occur while spawning bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// An outline has fewer than three vertices and cannot form a body
    DegenerateOutline { vertices: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::DegenerateOutline { vertices } => {
                write!(f, "outline with {} vertices cannot form a body", vertices)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
