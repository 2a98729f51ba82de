//! Approximate point-to-triangle squared distance.
//!
//! The point is projected onto the triangle's plane and its two barycentric
//! weights are clamped to `[0, 1]` independently. Inside the triangle this is
//! exact. Outside it, near an edge or vertex, the clamped contact can land
//! off the triangle (for example in the parallelogram completed by the two
//! edges), so the result under-estimates the true distance there. An exact
//! closest-point query needs edge-by-edge clamping and is a different
//! routine.

use meshpick_math::{Point3, DET_EPSILON, NO_HIT};

/// Squared distance from `point` to the clamped contact on `(v0, v1, v2)`.
///
/// Returns [`NO_HIT`] without further work when the squared distance to the
/// triangle's plane already exceeds `sqr_max_dist`. A degenerate (zero-area)
/// triangle has no plane and also yields [`NO_HIT`]; area is judged relative
/// to the edge lengths, so small but well-shaped triangles are kept.
///
/// The limit only applies to the plane distance: a point just inside the
/// plane limit but far outside the triangle returns its (larger) clamped
/// distance rather than [`NO_HIT`].
pub fn sqr_distance_to_triangle(
    point: &Point3,
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
    sqr_max_dist: f64,
) -> f64 {
    let axis1 = v1 - v0;
    let axis2 = v2 - v0;
    let normal = axis1.cross(&axis2);

    // |normal| is also dot(normal, unit normal)
    let det = normal.norm();
    if det <= DET_EPSILON * axis1.norm() * axis2.norm() {
        return NO_HIT;
    }
    let inv_det = 1.0 / det;
    let unit_normal = normal * inv_det;

    let b = point - v0;
    let t = normal.dot(&b) * inv_det;
    if t * t > sqr_max_dist {
        return NO_HIT;
    }

    let b3 = b.cross(&unit_normal);
    let u = (-axis2.dot(&b3) * inv_det).clamp(0.0, 1.0);
    let v = (axis1.dot(&b3) * inv_det).clamp(0.0, 1.0);

    let contact = v0 + u * axis1 + v * axis2;
    (point - contact).norm_squared()
}
