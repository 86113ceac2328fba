//! Tagged polygon geometry
//!
//! Features carry an explicit {Polygon, MultiPolygon} variant instead of a
//! loosely-typed coordinate blob. Geometries are validated once at the
//! decode boundary and trusted downstream.

use geo_types::{MultiPolygon, Polygon};

use super::error::GeometryError;

/// A polygonal geometry in geographic (lon, lat) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    /// Iterates the member polygons (one for the `Polygon` variant).
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<f64>> {
        match self {
            Geometry::Polygon(p) => std::slice::from_ref(p).iter(),
            Geometry::MultiPolygon(mp) => mp.0.as_slice().iter(),
        }
    }

    /// Number of member polygons.
    pub fn polygon_count(&self) -> usize {
        match self {
            Geometry::Polygon(_) => 1,
            Geometry::MultiPolygon(mp) => mp.0.len(),
        }
    }

    /// Converts to a `MultiPolygon`, the common currency of boolean ops.
    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        match self {
            Geometry::Polygon(p) => MultiPolygon(vec![p.clone()]),
            Geometry::MultiPolygon(mp) => mp.clone(),
        }
    }

    /// Checks that every ring is closed, long enough, and finite.
    ///
    /// Union and triangulation inputs must pass this; failures propagate as
    /// [`GeometryError`] rather than being skipped.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let mut ring_count = 0;
        for polygon in self.polygons() {
            for ring in
                std::iter::once(polygon.exterior()).chain(polygon.interiors().iter())
            {
                ring_count += 1;
                let coords = &ring.0;
                if coords.len() < 4 {
                    return Err(GeometryError::RingTooShort {
                        points: coords.len(),
                    });
                }
                if coords.first() != coords.last() {
                    return Err(GeometryError::OpenRing);
                }
                for c in coords {
                    if !c.x.is_finite() || !c.y.is_finite() {
                        return Err(GeometryError::NonFiniteCoordinate { x: c.x, y: c.y });
                    }
                }
            }
        }
        if ring_count == 0 {
            return Err(GeometryError::Empty);
        }
        Ok(())
    }
}

impl From<Polygon<f64>> for Geometry {
    fn from(p: Polygon<f64>) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<MultiPolygon<f64>> for Geometry {
    fn from(mp: MultiPolygon<f64>) -> Self {
        Geometry::MultiPolygon(mp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, LineString};

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]
    }

    #[test]
    fn test_valid_polygon_passes() {
        let geom = Geometry::Polygon(unit_square());
        assert!(geom.validate().is_ok());
    }

    #[test]
    fn test_empty_multi_polygon_rejected() {
        let geom = Geometry::MultiPolygon(MultiPolygon(vec![]));
        assert_eq!(geom.validate(), Err(GeometryError::Empty));
    }

    #[test]
    fn test_short_ring_rejected() {
        // A two-point exterior; Polygon::new closes it to three coords,
        // still below the four-coordinate minimum.
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        let geom = Geometry::Polygon(Polygon::new(ring, vec![]));
        assert!(matches!(
            geom.validate(),
            Err(GeometryError::RingTooShort { .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let ring = LineString::from(vec![
            (0.0, 0.0),
            (f64::NAN, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ]);
        let geom = Geometry::Polygon(Polygon::new(ring, vec![]));
        assert!(matches!(
            geom.validate(),
            Err(GeometryError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_polygon_count() {
        assert_eq!(Geometry::Polygon(unit_square()).polygon_count(), 1);
        let mp = Geometry::MultiPolygon(MultiPolygon(vec![unit_square(), unit_square()]));
        assert_eq!(mp.polygon_count(), 2);
    }
}
