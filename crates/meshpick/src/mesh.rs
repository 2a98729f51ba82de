//! Triangle meshes and brute-force ray-mesh intersection.

use meshpick_math::{Point3, Vec3, NO_HIT};

use crate::bbox::Aabb3;
use crate::distance::sqr_distance_to_triangle;
use crate::error::MeshError;
use crate::triangle::intersect_triangle;
use crate::Ray;

/// Closest ray hit on a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Parameter along the ray that was tested, in multiples of its direction.
    pub t: f64,
    /// Barycentric weight of the triangle's second vertex.
    pub u: f64,
    /// Barycentric weight of the triangle's third vertex.
    pub v: f64,
    /// Offset into the index buffer of the hit triangle's first index.
    pub triangle_index: usize,
}

impl MeshHit {
    /// Barycentric weights `(w, u, v)` of the three vertices, `w = 1 - u - v`.
    pub fn barycentric(&self) -> (f64, f64, f64) {
        (1.0 - self.u - self.v, self.u, self.v)
    }

    /// Local-space contact point, rebuilt from the barycentric weights.
    ///
    /// # Panics
    ///
    /// Panics if `mesh` is not the mesh this hit came from and is too short
    /// for `triangle_index`.
    pub fn point(&self, mesh: &Mesh) -> Point3 {
        let [a, b, c] = mesh.triangle(self.triangle_index);
        a + self.u * (b - a) + self.v * (c - a)
    }
}

/// Intersect a ray with every triangle named by `indices`, keeping the closest.
///
/// The ray must be in the same space as `vertices`. Every index must be a
/// valid vertex offset and `indices.len()` a multiple of 3; neither is
/// checked here (see [`Mesh::new`] for validation). Trailing indices that do
/// not form a whole triangle are ignored.
///
/// Ties on `t` keep the earlier triangle.
pub fn intersect_mesh(ray: &Ray, vertices: &[Point3], indices: &[u32]) -> Option<MeshHit> {
    let mut closest: Option<MeshHit> = None;
    let mut closest_t = NO_HIT;

    for (tri, chunk) in indices.chunks_exact(3).enumerate() {
        let v0 = &vertices[chunk[0] as usize];
        let v1 = &vertices[chunk[1] as usize];
        let v2 = &vertices[chunk[2] as usize];

        if let Some(hit) = intersect_triangle(&ray.origin, &ray.direction, v0, v1, v2) {
            if hit.t < closest_t {
                closest_t = hit.t;
                closest = Some(MeshHit {
                    t: hit.t,
                    u: hit.u,
                    v: hit.v,
                    triangle_index: tri * 3,
                });
            }
        }
    }

    closest
}

/// An indexed triangle mesh in its local space.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Point3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh, checking that the indices describe whole triangles
    /// and only reference existing vertices.
    pub fn new(vertices: Vec<Point3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree { len: indices.len() });
        }
        if let Some((offset, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertices.len())
        {
            return Err(MeshError::IndexOutOfRange {
                offset,
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// Create a mesh without validation.
    ///
    /// Queries on a mesh with out-of-range indices panic.
    pub fn new_unchecked(vertices: Vec<Point3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a mesh from flat `f32` buffers, as produced by tessellators and
    /// GPU upload paths: `[x0, y0, z0, x1, ...]` and `[i0, i1, i2, ...]`.
    pub fn from_flat(positions: &[f32], indices: &[u32]) -> Result<Self, MeshError> {
        let vertices = positions
            .chunks_exact(3)
            .map(|p| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
            .collect();
        Self::new(vertices, indices.to_vec())
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangle indices, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The three corners of the triangle starting at `triangle_index` in the
    /// index buffer.
    ///
    /// # Panics
    ///
    /// Panics if `triangle_index + 3` exceeds the index count, or if the
    /// mesh was built with [`Mesh::new_unchecked`] and an index is out of
    /// range.
    pub fn triangle(&self, triangle_index: usize) -> [Point3; 3] {
        let i = &self.indices[triangle_index..triangle_index + 3];
        [
            self.vertices[i[0] as usize],
            self.vertices[i[1] as usize],
            self.vertices[i[2] as usize],
        ]
    }

    /// Bounding box of all vertices, in local space.
    pub fn local_bounds(&self) -> Aabb3 {
        Aabb3::from_points(self.vertices.iter())
    }

    /// Closest hit of a local-space ray on this mesh.
    pub fn intersect(&self, ray: &Ray) -> Option<MeshHit> {
        intersect_mesh(ray, &self.vertices, &self.indices)
    }

    /// Face normal (not normalized) of the triangle at `triangle_index`,
    /// following the winding order.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Mesh::triangle`].
    pub fn face_normal(&self, triangle_index: usize) -> Vec3 {
        let [a, b, c] = self.triangle(triangle_index);
        (b - a).cross(&(c - a))
    }

    /// Approximate squared distance from `point` to one triangle.
    ///
    /// See [`sqr_distance_to_triangle`].
    ///
    /// # Panics
    ///
    /// Same conditions as [`Mesh::triangle`].
    pub fn sqr_distance_to_triangle(
        &self,
        point: &Point3,
        triangle_index: usize,
        sqr_max_dist: f64,
    ) -> f64 {
        let [a, b, c] = self.triangle(triangle_index);
        sqr_distance_to_triangle(point, &a, &b, &c, sqr_max_dist)
    }

    /// Triangle nearest to `point` within `sqr_max_dist`, as
    /// `(triangle_index, sqr_distance)`.
    ///
    /// Uses the same approximate distance as [`sqr_distance_to_triangle`].
    /// The limit tightens as closer triangles are found, so later triangles
    /// are rejected by their plane distance alone.
    pub fn nearest_triangle(&self, point: &Point3, sqr_max_dist: f64) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut limit = sqr_max_dist;

        for tri in 0..self.triangle_count() {
            let offset = tri * 3;
            let d = self.sqr_distance_to_triangle(point, offset, limit);
            if d.is_finite() && d <= limit && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((offset, d));
                limit = d;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two parallel unit quads at z = 0 and z = 1, each split into two
    /// triangles. The z = 1 quad is listed first.
    fn two_layers() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7];
        Mesh::new(vertices, indices).unwrap()
    }

    #[test]
    fn test_closest_not_first() {
        let mesh = two_layers();
        let ray = Ray::new(Point3::new(0.75, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = mesh.intersect(&ray).unwrap();
        // z = 0 layer, first triangle of it
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert_eq!(hit.triangle_index, 6);
        let p = hit.point(&mesh);
        assert!((p - Point3::new(0.75, 0.25, 0.0)).norm() < 1e-12);
        let (w, u, v) = hit.barycentric();
        assert!((w - 0.25).abs() < 1e-12);
        assert!((u - 0.5).abs() < 1e-12);
        assert!((v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_second_triangle_of_quad() {
        let mesh = two_layers();
        let ray = Ray::new(Point3::new(0.25, 0.75, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-12);
        assert_eq!(hit.triangle_index, 3);
    }

    #[test]
    fn test_mesh_miss() {
        let mesh = two_layers();
        let ray = Ray::new(Point3::new(5.0, 5.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    fn test_behind_hits_win_when_smaller() {
        // Origin between the layers, pointing up: the z = 0 layer is behind
        // the origin at t = -0.5 and beats the z = 1 layer at t = 0.5.
        let mesh = two_layers();
        let ray = Ray::new(Point3::new(0.75, 0.25, 0.5), Vec3::new(0.0, 0.0, 1.0));
        let hit = mesh.intersect(&ray).unwrap();
        assert!((hit.t + 0.5).abs() < 1e-12);
        assert_eq!(hit.triangle_index, 6);
    }

    #[test]
    fn test_free_function_matches_method() {
        let mesh = two_layers();
        let ray = Ray::new(Point3::new(0.3, 0.6, 3.0), Vec3::new(0.0, 0.1, -1.0));
        let a = mesh.intersect(&ray);
        let b = intersect_mesh(&ray, mesh.vertices(), mesh.indices());
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(mesh.intersect(&ray).is_none());
        assert!(mesh.local_bounds().is_empty());
        assert!(mesh.nearest_triangle(&Point3::origin(), 1.0).is_none());
    }

    #[test]
    fn test_validation() {
        let verts = vec![Point3::origin(); 3];
        assert_eq!(
            Mesh::new(verts.clone(), vec![0, 1]).unwrap_err(),
            MeshError::IndexCountNotMultipleOfThree { len: 2 }
        );
        assert_eq!(
            Mesh::new(verts, vec![0, 1, 2, 2, 3, 0]).unwrap_err(),
            MeshError::IndexOutOfRange {
                offset: 4,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_unchecked_skips_validation() {
        let mesh = Mesh::new_unchecked(vec![Point3::origin(); 3], vec![0, 1]);
        assert_eq!(mesh.triangle_count(), 0);
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    #[should_panic]
    fn test_triangle_past_end_panics() {
        let mesh = two_layers();
        let _ = mesh.triangle(mesh.indices().len() - 2);
    }

    #[test]
    fn test_from_flat() {
        let mesh = Mesh::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        let n = mesh.face_normal(0);
        assert!((n - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_nearest_triangle() {
        let mesh = two_layers();
        // Just above the top layer
        let (tri, d) = mesh.nearest_triangle(&Point3::new(0.75, 0.25, 1.2), 1.0).unwrap();
        assert_eq!(tri, 0);
        assert!((d - 0.04).abs() < 1e-12);
        // Just below the bottom layer
        let (tri, d) = mesh.nearest_triangle(&Point3::new(0.25, 0.75, -0.1), 1.0).unwrap();
        assert_eq!(tri, 9);
        assert!((d - 0.01).abs() < 1e-12);
        // Out of range of both planes
        assert!(mesh.nearest_triangle(&Point3::new(0.5, 0.5, 3.0), 1.0).is_none());
    }

    #[test]
    fn test_local_bounds() {
        let b = two_layers().local_bounds();
        assert_eq!(b.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
    }
}
