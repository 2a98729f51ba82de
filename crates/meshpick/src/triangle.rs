//! Ray-triangle intersection (Möller–Trumbore).

use meshpick_math::{Point3, Vec3, DET_EPSILON};

/// Result of a ray-triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter along the ray, in multiples of the ray direction.
    pub t: f64,
    /// Barycentric weight of the second vertex.
    pub u: f64,
    /// Barycentric weight of the third vertex.
    pub v: f64,
}

impl TriangleHit {
    /// Barycentric weights `(w, u, v)` of the three vertices, `w = 1 - u - v`.
    pub fn barycentric(&self) -> (f64, f64, f64) {
        (1.0 - self.u - self.v, self.u, self.v)
    }
}

/// Intersect a ray with the triangle `(v0, v1, v2)`.
///
/// All inputs must be in the same space. The direction need not be unit
/// length and the triangle may be of any size. Returns `None` when the ray is
/// parallel to the triangle's plane, when the triangle is degenerate, or
/// when the crossing point lies outside the triangle.
///
/// No sign check is made on `t`: a triangle behind the origin is reported
/// with a negative `t`. Callers that only want forward hits filter on `t`.
pub fn intersect_triangle(
    origin: &Point3,
    direction: &Vec3,
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = direction.cross(&edge2);
    let det = p.dot(&edge1);

    // |det| <= |direction| |edge1| |edge2|
    if det.abs() <= DET_EPSILON * direction.norm() * edge1.norm() * edge2.norm() {
        return None;
    }
    let inv_det = 1.0 / det;

    let t_vec = origin - v0;
    let u = p.dot(&t_vec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = t_vec.cross(&edge1);
    let v = q.dot(direction) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = q.dot(&edge2) * inv_det;
    Some(TriangleHit { t, u, v })
}
