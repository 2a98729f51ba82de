#![warn(missing_docs)]

//! Ray picking against triangle-mesh objects.
//!
//! Answers "which object, which triangle, and where on it does this ray
//! strike first?" for a set of meshes placed in the world, and "how close is
//! this point to this triangle?".
//!
//! There is no acceleration structure: each candidate mesh is scanned
//! triangle by triangle. Work is saved by culling candidates against their
//! world bounds and by stopping once no remaining bounds can hold a closer
//! hit.
//!
//! # Architecture
//!
//! - [`intersect_triangle`] - Möller–Trumbore ray-triangle test
//! - [`sqr_distance_to_triangle`] - approximate point-triangle distance
//! - [`intersect_mesh`] - closest hit over every triangle of one mesh
//! - [`ObjectPicker`] - bounds culling, ordering and early termination
//!   across many [`Pickable`] objects
//!
//! # Example
//!
//! ```
//! use meshpick::{Mesh, ObjectPicker, Ray, SceneObject};
//! use meshpick_math::{Point3, Transform, Vec3};
//!
//! let quad = Mesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![0, 1, 2, 0, 2, 3],
//! )?;
//! let objects = vec![
//!     SceneObject::new("floor", quad.clone(), Transform::identity())?,
//!     SceneObject::new("shelf", quad, Transform::translation(0.0, 0.0, 2.0))?,
//! ];
//!
//! let ray = Ray::new(Point3::new(0.3, 0.6, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = ObjectPicker::default().pick(&ray, &objects).unwrap();
//! assert_eq!(hit.object.name(), "shelf");
//! assert!((hit.hit.t - 3.0).abs() < 1e-12);
//! # Ok::<(), meshpick::PickError>(())
//! ```

pub mod bbox;
pub mod config;
pub mod distance;
pub mod error;
pub mod mesh;
pub mod picker;
pub mod ray;
pub mod triangle;

pub use bbox::Aabb3;
pub use config::PickOptions;
pub use distance::sqr_distance_to_triangle;
pub use error::{MeshError, PickError, Result};
pub use mesh::{intersect_mesh, Mesh, MeshHit};
pub use picker::{MeshView, ObjectPicker, ObjectTransform, PickResult, PickStats, Pickable, SceneObject};
pub use ray::Ray;
pub use triangle::{intersect_triangle, TriangleHit};
