//! Picking across many mesh objects.
//!
//! A pick runs in two phases. The broad phase tests the world-space ray
//! against each candidate's world bounds and orders the survivors by entry
//! distance. The narrow phase walks them nearest-first, re-expresses the ray
//! in each candidate's local space and scans its triangles, stopping once
//! the next candidate's bounds begin beyond the best hit so far.
//!
//! Ray parameters compare across candidates without rescaling: the ray is
//! carried into local space by an affine map with the direction left
//! unnormalized, so a local `t` names the same point as the world `t`.

use meshpick_math::{Point3, Transform};

use crate::bbox::Aabb3;
use crate::config::PickOptions;
use crate::error::{PickError, Result};
use crate::mesh::{intersect_mesh, Mesh, MeshHit};
use crate::Ray;

/// Borrowed vertex and index buffers of one mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    /// Local-space vertex positions.
    pub vertices: &'a [Point3],
    /// Triangle indices, three per triangle.
    pub indices: &'a [u32],
}

impl<'a> From<&'a Mesh> for MeshView<'a> {
    fn from(mesh: &'a Mesh) -> Self {
        Self {
            vertices: mesh.vertices(),
            indices: mesh.indices(),
        }
    }
}

/// Local-to-world transform with its inverse, both fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTransform {
    local_to_world: Transform,
    world_to_local: Transform,
}

impl ObjectTransform {
    /// Pair a local-to-world transform with its inverse.
    pub fn new(local_to_world: Transform) -> Result<Self> {
        let world_to_local = local_to_world
            .inverse()
            .ok_or(PickError::SingularTransform)?;
        Ok(Self {
            local_to_world,
            world_to_local,
        })
    }

    /// Maps local coordinates into world space.
    pub fn local_to_world(&self) -> &Transform {
        &self.local_to_world
    }

    /// Maps world coordinates into local space.
    pub fn world_to_local(&self) -> &Transform {
        &self.world_to_local
    }
}

/// What the picker needs from an object in the host's scene.
///
/// An object that returns `None` for its bounds or mesh is skipped, the same
/// as an inactive one. Implementations must not change while a pick runs.
pub trait Pickable {
    /// Whether the object takes part in picking.
    fn is_active(&self) -> bool;

    /// World-space bounds enclosing the object's mesh.
    fn bounding_volume(&self) -> Option<Aabb3>;

    /// Local-space mesh data.
    fn mesh_data(&self) -> Option<MeshView<'_>>;

    /// Placement of the object in the world.
    fn transform(&self) -> &ObjectTransform;
}

/// A picked object and where it was hit.
#[derive(Debug)]
pub struct PickResult<'a, P: ?Sized> {
    /// The object that was hit.
    pub object: &'a P,
    /// Position of the object in the candidate sequence.
    pub index: usize,
    /// Hit on the object's mesh, in its local space.
    pub hit: MeshHit,
    /// World-space hit point, `ray.at(hit.t)`.
    pub point: Point3,
}

/// Counters from one pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickStats {
    /// Candidates offered.
    pub candidates: usize,
    /// Skipped as inactive or missing bounds or mesh.
    pub filtered: usize,
    /// Rejected by the ray-bounds test or the distance limit.
    pub culled: usize,
    /// Meshes scanned in the narrow phase.
    pub mesh_tests: usize,
    /// Triangles tested across all scanned meshes.
    pub triangles_tested: usize,
    /// Bounds survivors never scanned because of early termination.
    pub pruned: usize,
}

/// A broad-phase survivor.
struct Entry<'a, P: ?Sized> {
    entry: f64,
    index: usize,
    object: &'a P,
    mesh: MeshView<'a>,
}

/// Finds the nearest object struck by a world-space ray.
#[derive(Debug, Clone, Default)]
pub struct ObjectPicker {
    options: PickOptions,
}

impl ObjectPicker {
    /// Create a picker after validating `options`.
    pub fn new(options: PickOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options this picker runs with.
    pub fn options(&self) -> &PickOptions {
        &self.options
    }

    /// Nearest hit of `ray` among `candidates`.
    pub fn pick<'a, P, I>(&self, ray: &Ray, candidates: I) -> Option<PickResult<'a, P>>
    where
        P: Pickable + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        self.pick_with_stats(ray, candidates).0
    }

    /// Nearest hit of `ray` among `candidates`, with counters describing
    /// how much work the pick did.
    pub fn pick_with_stats<'a, P, I>(
        &self,
        ray: &Ray,
        candidates: I,
    ) -> (Option<PickResult<'a, P>>, PickStats)
    where
        P: Pickable + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let mut stats = PickStats::default();
        let limit = self.options.distance_limit();

        let mut entries = self.broad_phase(ray, candidates, limit, &mut stats);
        // Order among equal entry distances is unspecified.
        entries.sort_unstable_by(|a, b| a.entry.total_cmp(&b.entry));

        let mut best: Option<PickResult<'a, P>> = None;
        let mut best_t = f64::INFINITY;

        for (i, e) in entries.iter().enumerate() {
            if self.options.early_termination && e.entry > best_t {
                stats.pruned = entries.len() - i;
                log::trace!(
                    "candidate {} enters at {} beyond best hit {}, stopping",
                    e.index,
                    e.entry,
                    best_t
                );
                break;
            }

            let local_ray = ray.transformed(e.object.transform().world_to_local());
            stats.mesh_tests += 1;
            stats.triangles_tested += e.mesh.indices.len() / 3;

            let Some(hit) = intersect_mesh(&local_ray, e.mesh.vertices, e.mesh.indices) else {
                log::trace!("candidate {} bounds hit but mesh missed", e.index);
                continue;
            };

            if hit.t < best_t && hit.t <= limit {
                log::trace!(
                    "candidate {} hit at t = {} (triangle {})",
                    e.index,
                    hit.t,
                    hit.triangle_index
                );
                best_t = hit.t;
                best = Some(PickResult {
                    object: e.object,
                    index: e.index,
                    hit,
                    point: ray.at(hit.t),
                });
            }
        }

        log::debug!(
            "pick: {} candidates, {} filtered, {} culled, {} meshes ({} triangles), {} pruned, hit = {:?}",
            stats.candidates,
            stats.filtered,
            stats.culled,
            stats.mesh_tests,
            stats.triangles_tested,
            stats.pruned,
            best.as_ref().map(|b| b.index)
        );

        (best, stats)
    }

    /// Filter candidates and test their bounds, keeping entry distances.
    fn broad_phase<'a, P, I>(
        &self,
        ray: &Ray,
        candidates: I,
        limit: f64,
        stats: &mut PickStats,
    ) -> Vec<Entry<'a, P>>
    where
        P: Pickable + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let mut entries = Vec::new();

        for (index, object) in candidates.into_iter().enumerate() {
            stats.candidates += 1;

            if !object.is_active() {
                stats.filtered += 1;
                continue;
            }
            let (Some(bounds), Some(mesh)) = (object.bounding_volume(), object.mesh_data()) else {
                stats.filtered += 1;
                continue;
            };

            match ray.intersect_aabb(&bounds) {
                Some((entry, _)) if entry <= limit => entries.push(Entry {
                    entry,
                    index,
                    object,
                    mesh,
                }),
                _ => {
                    stats.culled += 1;
                    log::trace!("candidate {index} culled by bounds");
                }
            }
        }

        entries
    }
}

/// A named mesh placed in the world.
///
/// Reference [`Pickable`] for hosts without their own object model. World
/// bounds are recomputed whenever the transform changes.
#[derive(Debug, Clone)]
pub struct SceneObject {
    name: String,
    active: bool,
    mesh: Mesh,
    transform: ObjectTransform,
    world_bounds: Aabb3,
}

impl SceneObject {
    /// Place `mesh` in the world with `local_to_world`. Starts active.
    pub fn new(name: impl Into<String>, mesh: Mesh, local_to_world: Transform) -> Result<Self> {
        let transform = ObjectTransform::new(local_to_world)?;
        let world_bounds = mesh.local_bounds().transformed(transform.local_to_world());
        Ok(Self {
            name: name.into(),
            active: true,
            mesh,
            transform,
            world_bounds,
        })
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object's local-space mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// World-space bounds of the mesh.
    pub fn world_bounds(&self) -> &Aabb3 {
        &self.world_bounds
    }

    /// Include or exclude the object from picking.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Move the object. On error the previous placement is kept.
    pub fn set_transform(&mut self, local_to_world: Transform) -> Result<()> {
        let transform = ObjectTransform::new(local_to_world)?;
        self.world_bounds = self.mesh.local_bounds().transformed(transform.local_to_world());
        self.transform = transform;
        Ok(())
    }
}

impl Pickable for SceneObject {
    fn is_active(&self) -> bool {
        self.active
    }

    fn bounding_volume(&self) -> Option<Aabb3> {
        (!self.world_bounds.is_empty()).then_some(self.world_bounds)
    }

    fn mesh_data(&self) -> Option<MeshView<'_>> {
        Some(MeshView::from(&self.mesh))
    }

    fn transform(&self) -> &ObjectTransform {
        &self.transform
    }
}
