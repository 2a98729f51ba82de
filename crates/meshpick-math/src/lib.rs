#![warn(missing_docs)]

//! Math types for the meshpick hit-testing core.
//!
//! Thin wrappers around nalgebra providing the point, vector and affine
//! transform types the picking pipeline works in, plus the named thresholds
//! used to reject degenerate cases.

use nalgebra::{Matrix3, Matrix4, UnitQuaternion, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A rotation in 3D space.
pub type Rotation = UnitQuaternion<f64>;

/// Relative threshold below which a determinant counts as zero: a ray
/// parallel to a triangle's plane, or a degenerate triangle.
///
/// Multiplied by the magnitudes of the vectors the determinant is built
/// from, so the test does not depend on the scale of the inputs. Fixed at
/// machine precision; the triangle test is not tunable.
pub const DET_EPSILON: f64 = f64::EPSILON;

/// Sentinel distance meaning "nothing found" or "rejected as too far".
pub const NO_HIT: f64 = f64::INFINITY;

/// A 4x4 affine transformation matrix.
///
/// Maps points from an object's local space into its parent (world) space.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vec3::new(dx, dy, dz)),
        }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)),
        }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation(&Rotation::from_axis_angle(&Vec3::y_axis(), angle))
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation(&Rotation::from_axis_angle(&Vec3::z_axis(), angle))
    }

    /// Pure rotation.
    pub fn rotation(rotation: &Rotation) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Translate-rotate-scale transform, the usual scene-node layout:
    /// points are scaled, then rotated, then translated.
    pub fn trs(translation: Vec3, rotation: &Rotation, scale: Vec3) -> Self {
        let linear: Matrix3<f64> =
            rotation.to_rotation_matrix().into_inner() * Matrix3::from_diagonal(&scale);
        let mut m = linear.to_homogeneous();
        m[(0, 3)] = translation.x;
        m[(1, 3)] = translation.y;
        m[(2, 3)] = translation.z;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The result applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation, applies rotation/scale).
    ///
    /// The result is not re-normalized.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
