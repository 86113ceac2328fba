//! Ring winding correction
//!
//! Polygon union does not guarantee a consistent ring winding, while path
//! rendering and spherical area math require one: exterior rings clockwise
//! for ordinary (sub-hemisphere) areas, interior rings the opposite way.
//! [`rewind`] restores the configured convention after every union.

use geo::orient::{Direction, Orient};
use std::fmt;
use std::str::FromStr;

use super::types::Geometry;

/// Exterior-ring winding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingOrder {
    /// Exterior rings clockwise, interiors counter-clockwise (the spherical
    /// rendering convention; the default)
    #[default]
    Clockwise,
    /// Exterior rings counter-clockwise, interiors clockwise (the OGC
    /// planar convention)
    CounterClockwise,
}

impl WindingOrder {
    fn direction(self) -> Direction {
        match self {
            // geo's Default direction is CCW exteriors
            WindingOrder::Clockwise => Direction::Reversed,
            WindingOrder::CounterClockwise => Direction::Default,
        }
    }
}

impl fmt::Display for WindingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindingOrder::Clockwise => write!(f, "clockwise"),
            WindingOrder::CounterClockwise => write!(f, "counterclockwise"),
        }
    }
}

impl FromStr for WindingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clockwise" | "cw" => Ok(WindingOrder::Clockwise),
            "counterclockwise" | "ccw" => Ok(WindingOrder::CounterClockwise),
            other => Err(format!("unknown winding order '{}'", other)),
        }
    }
}

/// Reorients every ring of the geometry to the given convention.
pub fn rewind(geometry: &Geometry, order: WindingOrder) -> Geometry {
    let direction = order.direction();
    match geometry {
        Geometry::Polygon(p) => Geometry::Polygon(p.orient(direction)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.orient(direction)),
    }
}
