//! Axis-aligned bounding boxes for the broad phase.

use meshpick_math::{Point3, Transform};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point. Empty if `points` is.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box in the transform's target space enclosing this box's corners.
    ///
    /// Conservative under rotation: the result is axis-aligned in the
    /// target space, so it may be larger than the transformed volume.
    pub fn transformed(&self, transform: &Transform) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = self.corners().map(|c| transform.apply_point(&c));
        Self::from_points(corners.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_then_include() {
        let mut aabb = Aabb3::empty();
        assert!(aabb.is_empty());
        aabb.include_point(&Point3::new(1.0, -2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_from_points() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, -1.0),
            Point3::new(-3.0, 0.5, 4.0),
        ];
        let aabb = Aabb3::from_points(pts.iter());
        assert_eq!(aabb.min, Point3::new(-3.0, 0.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn test_transformed_translation_and_scale() {
        let aabb = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let t = Transform::translation(5.0, 0.0, 0.0).then(&Transform::scale(2.0, 1.0, 3.0));
        let world = aabb.transformed(&t);
        assert!((world.min - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((world.max - Point3::new(7.0, 1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let aabb = Aabb3::new(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let world = aabb.transformed(&Transform::rotation_z(std::f64::consts::FRAC_PI_4));
        let half = 2.0_f64.sqrt();
        assert!((world.max.x - half).abs() < 1e-12);
        assert!((world.min.y + half).abs() < 1e-12);
    }

    #[test]
    fn test_transformed_empty_stays_empty() {
        let world = Aabb3::empty().transformed(&Transform::scale(-1.0, 1.0, 1.0));
        assert!(world.is_empty());
    }
}
