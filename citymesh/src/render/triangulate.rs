//! Earcut triangulation of merged features
//!
//! Rings are projected to Web Mercator meters, flattened with hole indices,
//! and handed to the ear-clipping triangulator; the resulting vertices are
//! mapped into device pixels.

use tracing::debug;

use super::transform::DeviceTransform;
use crate::geometry::{Geometry, GeometryError};
use crate::projection::to_web_mercator;

/// A triangulated fill: flat vertex list plus triangle indices.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Device-pixel vertex positions
    pub vertices: Vec<[f64; 2]>,
    /// Triangle corner indices, three per triangle
    pub indices: Vec<usize>,
}

impl TriangleMesh {
    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates resolved triangles as corner-coordinate triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f64; 2]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0]],
                self.vertices[t[1]],
                self.vertices[t[2]],
            ]
        })
    }
}

/// Triangulates a geometry into a device-space mesh.
///
/// # Errors
///
/// Returns [`GeometryError`] if the geometry fails validation or the
/// triangulator rejects the ring layout.
pub fn triangulate(
    geometry: &Geometry,
    transform: &DeviceTransform,
) -> Result<TriangleMesh, GeometryError> {
    geometry.validate()?;

    let mut mesh = TriangleMesh::default();
    for polygon in geometry.polygons() {
        let rings: Vec<Vec<Vec<f64>>> =
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors().iter())
                .map(|ring| {
                    // Drop the duplicated closing vertex; earcut expects
                    // simple rings
                    let coords = &ring.0;
                    let open = coords.len().saturating_sub(1);
                    coords[..open]
                        .iter()
                        .map(|c| {
                            let (x, y) = to_web_mercator(c.x, c.y);
                            vec![x, y]
                        })
                        .collect()
                })
                .collect();

        let (vertices, holes, dims) = earcutr::flatten(&rings);
        let triangles = earcutr::earcut(&vertices, &holes, dims)
            .map_err(|e| GeometryError::TriangulationFailed(format!("{:?}", e)))?;

        let base = mesh.vertices.len();
        for pair in vertices.chunks_exact(dims) {
            let (x, y) = transform.apply(pair[0], pair[1]);
            mesh.vertices.push([x, y]);
        }
        mesh.indices.extend(triangles.into_iter().map(|i| base + i));
    }

    debug!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        "triangulated geometry"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;
    use crate::viewport::Viewport;
    use geo_types::{polygon, LineString, MultiPolygon, Polygon};

    fn transform() -> DeviceTransform {
        let viewport = Viewport::new(100.0, 100.0, 1.0);
        let projection = Projection::for_zoom(0.0, 0.0, 0, &viewport);
        DeviceTransform::from_projection(&projection, &viewport)
    }

    fn small_square(min: f64, max: f64) -> Polygon<f64> {
        polygon![
            (x: min, y: min),
            (x: max, y: min),
            (x: max, y: max),
            (x: min, y: max),
        ]
    }

    #[test]
    fn test_square_becomes_two_triangles() {
        let geometry = Geometry::Polygon(small_square(0.0, 1.0));
        let mesh = triangulate(&geometry, &transform()).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn test_square_with_hole() {
        let outer = LineString::from(vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        let hole = LineString::from(vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]);
        let geometry = Geometry::Polygon(Polygon::new(outer, vec![hole]));

        let mesh = triangulate(&geometry, &transform()).unwrap();

        assert_eq!(mesh.vertices.len(), 8);
        // A square ring with a square hole triangulates into 8 triangles
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_multi_polygon_offsets_indices() {
        let geometry = Geometry::MultiPolygon(MultiPolygon(vec![
            small_square(0.0, 1.0),
            small_square(2.0, 3.0),
        ]));

        let mesh = triangulate(&geometry, &transform()).unwrap();

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        // Second polygon's triangles must reference its own vertices
        assert!(mesh.indices[6..].iter().all(|&i| i >= 4));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let geometry = Geometry::MultiPolygon(MultiPolygon(vec![]));
        assert!(matches!(
            triangulate(&geometry, &transform()),
            Err(GeometryError::Empty)
        ));
    }

    #[test]
    fn test_triangles_iterator_resolves_coordinates() {
        let geometry = Geometry::Polygon(small_square(0.0, 1.0));
        let mesh = triangulate(&geometry, &transform()).unwrap();

        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 2);
    }
}
