//! World: owns the body collection and the spatial index, steps the frame.
//!
//! `update` is a synchronous two-phase sweep. Phase A commits each body's
//! buffered state, runs the driver's per-body callback, integrates, and
//! rebuilds the quadtree. Phase B collects candidate pairs from per-body
//! index queries, resolves each unordered pair exactly once, applies the
//! boundary policy, and finally executes deferred removals. No structural
//! change to the collection happens mid-phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arena::BodyArena;
use super::body::{Body, BodyId};
use super::collision;
use super::quadtree::{IndexRecord, Quadtree, Rect};
use crate::consts::DEFAULT_RESTITUTION;

/// Rejected world configuration (fatal at construction)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("domain extent must be positive and finite, got {0}x{1}")]
    InvalidDomain(f32, f32),
    #[error("restitution must be non-negative and finite, got {0}")]
    InvalidRestitution(f32),
}

/// What happens to a body at the domain edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Flip the crossing velocity axis, scaled by restitution, and clamp the
    /// position inside the domain
    #[default]
    Reflect,
    /// Wrap the position modulo the domain extent
    Wrap,
}

/// Engine configuration, mutable between frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Fraction of relative velocity preserved after a collision
    pub restitution: f32,
    pub boundary: BoundaryPolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            restitution: DEFAULT_RESTITUTION,
            boundary: BoundaryPolicy::Reflect,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ConfigError::InvalidDomain(self.width, self.height));
        }
        if !self.restitution.is_finite() || self.restitution < 0.0 {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }

    fn domain_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Verdict from an [`IntersectPolicy`] for one overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairVerdict {
    /// Run normal bounce resolution
    Resolve,
    /// Skip resolution for this pair this frame
    Skip,
    /// Skip resolution and remove the named body at the end of the frame
    Remove(BodyId),
}

/// Custom intersection behavior, consulted before normal resolution.
///
/// The policy sees both bodies after the overlap test and before any
/// correction or impulse; it may mutate them. Removals go through the
/// verdict so collection membership only changes at frame boundaries.
pub trait IntersectPolicy {
    fn on_intersect(&mut self, a: &mut Body, b: &mut Body) -> PairVerdict;
}

/// Merge-on-contact: deep overlaps absorb the smaller body into the larger.
///
/// A pair merges once the center distance drops to half the larger nominal
/// radius; the survivor grows by the square root of the eaten body's radius
/// and absorbs its mass. While this policy is active, shallow contacts are
/// vetoed rather than bounced, so approaching bodies sink in until they merge.
#[derive(Debug, Default)]
pub struct MergeOnContact;

impl IntersectPolicy for MergeOnContact {
    fn on_intersect(&mut self, a: &mut Body, b: &mut Body) -> PairVerdict {
        let deep = a.position.distance(b.position) <= a.radius.max(b.radius) * 0.5;
        if !deep {
            return PairVerdict::Skip;
        }
        let (survivor, eaten) = if a.radius >= b.radius { (a, b) } else { (b, a) };
        survivor.radius += eaten.radius.sqrt();
        survivor.mass += eaten.mass;
        PairVerdict::Remove(eaten.id)
    }
}

/// The collision engine: bodies, index, per-frame orchestration.
pub struct World {
    config: WorldConfig,
    arena: BodyArena,
    index: Quadtree,
    intersect_policy: Option<Box<dyn IntersectPolicy>>,
    on_collision: Option<Box<dyn FnMut(&Body)>>,
    /// Per-frame scratch, rebuilt every update
    candidates: Vec<IndexRecord>,
    pairs: Vec<(usize, usize)>,
    /// Removals queued by the intersect policy, applied at frame end
    removals: Vec<BodyId>,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            index: Quadtree::new(config.domain_rect()),
            config,
            arena: BodyArena::new(),
            intersect_policy: None,
            on_collision: None,
            candidates: Vec::new(),
            pairs: Vec::new(),
            removals: Vec::new(),
        })
    }

    /// Install a custom intersection policy (e.g. [`MergeOnContact`]).
    pub fn with_intersect_policy(mut self, policy: impl IntersectPolicy + 'static) -> Self {
        self.intersect_policy = Some(Box::new(policy));
        self
    }

    /// Install a hook fired once per resolved collision and per reflected
    /// wall axis, with the colliding body. Used externally for effects.
    pub fn with_collision_hook(mut self, hook: impl FnMut(&Body) + 'static) -> Self {
        self.on_collision = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn set_boundary(&mut self, boundary: BoundaryPolicy) {
        self.config.boundary = boundary;
    }

    pub fn set_restitution(&mut self, restitution: f32) -> Result<(), ConfigError> {
        if !restitution.is_finite() || restitution < 0.0 {
            return Err(ConfigError::InvalidRestitution(restitution));
        }
        self.config.restitution = restitution;
        Ok(())
    }

    /// Hand a body to the engine; returns its stable id.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.arena.insert(body)
    }

    /// Remove by id. Must not be called from inside `update` callbacks;
    /// policies remove through [`PairVerdict::Remove`] instead.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.arena.remove(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.arena.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.arena.get_mut(id)
    }

    /// Live bodies in stable insertion-derived order
    pub fn bodies(&self) -> &[Body] {
        self.arena.bodies()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Index records near a point, from the index as of the last `update`.
    /// Over-approximates; callers filter (e.g. nearest-body pointer probes).
    pub fn query_near(&self, position: Vec2, width: f32, height: f32) -> Vec<IndexRecord> {
        self.index.retrieve(Rect::centered(position, width, height))
    }

    /// Step the simulation by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        self.update_with(delta, |_| {});
    }

    /// Step the simulation, running `per_body` on each body before it
    /// integrates (the external-acceleration hook). The callback may mutate
    /// the body it is given and nothing else.
    pub fn update_with<F>(&mut self, delta: f32, mut per_body: F)
    where
        F: FnMut(&mut Body),
    {
        // Phase A: commit buffers, mutate, integrate, rebuild the index
        self.index.clear();
        for body in self.arena.bodies_mut() {
            body.position = body.new_position;
            body.velocity = body.new_velocity;

            per_body(body);

            body.position += body.velocity * delta;
            body.new_position = body.position;
            body.new_velocity = body.velocity;

            self.index.insert(IndexRecord {
                bounds: Rect::centered(body.position, body.radius, body.radius),
                radius: body.radius,
                body: body.id,
            });
        }

        // Phase B: candidate pairs, narrow phase, boundary, removals
        self.collect_pairs();
        self.resolve_pairs();
        self.apply_boundary(delta);

        for id in std::mem::take(&mut self.removals) {
            self.arena.remove(id);
        }

        log::trace!(
            "frame: {} bodies, {} pairs, {} index nodes",
            self.arena.len(),
            self.pairs.len(),
            self.index.node_count()
        );
    }

    /// Query the index once per body (window sized to the body's own radius)
    /// and collect each overlapping unordered pair exactly once. Collection
    /// is symmetric: a hit from either side's query enqueues the pair, so a
    /// small body still pairs with a large neighbor its own window misses.
    fn collect_pairs(&mut self) {
        self.pairs.clear();
        for (slot, body) in self.arena.bodies().iter().enumerate() {
            let window = Rect::centered(body.position, body.radius, body.radius);
            self.index.retrieve_into(window, &mut self.candidates);
            for record in &self.candidates {
                if record.body == body.id {
                    continue;
                }
                // Stale record: no collision for this candidate
                let Some(other) = self.arena.slot_of(record.body) else {
                    continue;
                };
                self.pairs
                    .push((slot.min(other), slot.max(other)));
            }
        }
        self.pairs.sort_unstable();
        self.pairs.dedup();
    }

    fn resolve_pairs(&mut self) {
        for pair_index in 0..self.pairs.len() {
            let (i, j) = self.pairs[pair_index];
            let id_a = self.arena.handles()[i];
            let id_b = self.arena.handles()[j];
            // A body already queued for removal no longer collides
            if self.removals.contains(&id_a) || self.removals.contains(&id_b) {
                continue;
            }

            let (a, b) = self.arena.pair_mut(i, j);
            if !collision::overlapping(a, b) {
                continue;
            }

            let verdict = match self.intersect_policy.as_mut() {
                Some(policy) => policy.on_intersect(a, b),
                None => PairVerdict::Resolve,
            };
            match verdict {
                PairVerdict::Skip => {}
                PairVerdict::Remove(id) => self.removals.push(id),
                PairVerdict::Resolve => {
                    // The policy may have moved either body, so the contact
                    // is derived from the post-hook state. Coincident
                    // centers have no defined normal; skip this frame.
                    let Some(geometry) = collision::pair_geometry(a, b) else {
                        continue;
                    };
                    collision::correct_positions(a, b, &geometry);
                    if collision::apply_impulse(a, b, geometry.normal, self.config.restitution)
                        && let Some(hook) = self.on_collision.as_mut()
                    {
                        hook(a);
                    }
                }
            }
        }
    }

    fn apply_boundary(&mut self, delta: f32) {
        let WorldConfig { width, height, restitution, boundary } = self.config;

        for body in self.arena.bodies_mut() {
            match boundary {
                BoundaryPolicy::Wrap => {
                    // Euclidean modulo keeps the result in [0, extent)
                    body.position.x = body.position.x.rem_euclid(width);
                    body.position.y = body.position.y.rem_euclid(height);
                    body.new_position.x = body.new_position.x.rem_euclid(width);
                    body.new_position.y = body.new_position.y.rem_euclid(height);
                }
                BoundaryPolicy::Reflect => {
                    let edge = body.effective_radius();
                    let next = body.position + body.velocity * delta;

                    // Leading edge would cross a wall next frame: flip that
                    // axis, scaled by restitution
                    if next.x + edge > width || next.x - edge < 0.0 {
                        body.new_velocity.x = -body.velocity.x * restitution;
                        if let Some(hook) = self.on_collision.as_mut() {
                            hook(body);
                        }
                    }
                    if next.y + edge > height || next.y - edge < 0.0 {
                        body.new_velocity.y = -body.velocity.y * restitution;
                        if let Some(hook) = self.on_collision.as_mut() {
                            hook(body);
                        }
                    }

                    // Clamp so low restitution cannot leave a body sunk into
                    // the wall
                    body.new_position.x = clamp_inside(body.new_position.x, edge, width);
                    body.new_position.y = clamp_inside(body.new_position.y, edge, height);
                }
            }
        }
    }
}

/// Clamp a coordinate so the body edge stays inside `[0, extent]`. A body
/// wider than the domain has no interior band to clamp into; the center is
/// the only spot that keeps both walls equally violated.
fn clamp_inside(value: f32, edge: f32, extent: f32) -> f32 {
    if edge * 2.0 <= extent {
        value.clamp(edge, extent - edge)
    } else {
        extent * 0.5
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("bodies", &self.arena.len())
            .field("intersect_policy", &self.intersect_policy.is_some())
            .field("on_collision", &self.on_collision.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CORRECTION_SLOP;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const EPS: f32 = 1e-4;

    fn config(width: f32, height: f32, restitution: f32) -> WorldConfig {
        WorldConfig { width, height, restitution, boundary: BoundaryPolicy::Reflect }
    }

    fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Body {
        Body::new(Vec2::new(x, y), radius)
            .unwrap()
            .with_velocity(Vec2::new(vx, vy))
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(World::new(config(0.0, 100.0, 0.5)).is_err());
        assert!(World::new(config(100.0, -1.0, 0.5)).is_err());
        assert!(World::new(config(100.0, 100.0, f32::NAN)).is_err());
        assert!(World::new(config(100.0, 100.0, -0.1)).is_err());

        let mut world = World::new(config(100.0, 100.0, 0.5)).unwrap();
        assert!(world.set_restitution(f32::INFINITY).is_err());
        assert!(world.set_restitution(1.0).is_ok());
    }

    #[test]
    fn test_distant_bodies_keep_their_velocity() {
        let mut world = World::new(config(1000.0, 1000.0, 1.0)).unwrap();
        let a = world.add_body(body(100.0, 500.0, 3.0, -2.0, 10.0));
        let b = world.add_body(body(900.0, 500.0, -1.0, 4.0, 10.0));

        world.update(0.1);
        assert_eq!(world.body(a).unwrap().new_velocity, Vec2::new(3.0, -2.0));
        assert_eq!(world.body(b).unwrap().new_velocity, Vec2::new(-1.0, 4.0));
    }

    #[test]
    fn test_head_on_elastic_pair_swaps_velocities() {
        let mut world = World::new(config(200.0, 100.0, 1.0)).unwrap();
        let a = world.add_body(body(90.0, 50.0, 3.0, 0.0, 10.0));
        let b = world.add_body(body(98.0, 50.0, -3.0, 0.0, 10.0));

        world.update(0.01);
        assert!((world.body(a).unwrap().new_velocity.x - (-3.0)).abs() < EPS);
        assert!((world.body(b).unwrap().new_velocity.x - 3.0).abs() < EPS);
    }

    #[test]
    fn test_closing_pair_inelastic_bounce() {
        // Two radius-10 bodies closing at 5 units/s each in a 100x100 domain
        // with restitution 0.5: one 0.1s step resolves the overlap and
        // reverses both velocities, scaled by restitution.
        let mut world = World::new(config(100.0, 100.0, 0.5)).unwrap();
        let a = world.add_body(body(40.0, 50.0, 5.0, 0.0, 10.0));
        let b = world.add_body(body(50.0, 50.0, -5.0, 0.0, 10.0));

        world.update(0.1);

        let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
        assert!((a.new_velocity.x - (-2.5)).abs() < EPS);
        assert!((b.new_velocity.x - 2.5).abs() < EPS);

        let gap = a.new_position.distance(b.new_position);
        let combined = a.effective_radius() + b.effective_radius();
        assert!(gap >= combined - CORRECTION_SLOP - EPS);
    }

    #[test]
    fn test_reflect_flips_and_scales_velocity() {
        let mut world = World::new(config(100.0, 100.0, 0.5)).unwrap();
        let id = world.add_body(body(94.0, 50.0, 10.0, 0.0, 10.0));

        world.update(0.1);
        let b = world.body(id).unwrap();
        assert!((b.new_velocity.x - (-5.0)).abs() < EPS);
        assert_eq!(b.new_velocity.y, 0.0);
        // Clamped inside the domain
        assert!(b.new_position.x + b.effective_radius() <= 100.0);
    }

    #[test]
    fn test_wrap_remaps_past_the_far_wall() {
        let mut world = World::new(WorldConfig {
            boundary: BoundaryPolicy::Wrap,
            ..config(100.0, 100.0, 0.5)
        })
        .unwrap();
        // Integrates to x = 105, which must wrap to 5 (not -5, not 95)
        let id = world.add_body(body(95.0, 50.0, 100.0, 0.0, 4.0));

        world.update(0.1);
        let b = world.body(id).unwrap();
        assert!((b.position.x - 5.0).abs() < EPS);
        assert!((b.new_position.x - 5.0).abs() < EPS);
        // Wrap never touches velocity
        assert_eq!(b.new_velocity, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_collision_hook_fires_for_pair_and_wall() {
        let hits = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&hits);

        let mut world = World::new(config(100.0, 100.0, 1.0))
            .unwrap()
            .with_collision_hook(move |_| counter.set(counter.get() + 1));
        world.add_body(body(40.0, 50.0, 5.0, 0.0, 10.0));
        world.add_body(body(48.0, 50.0, -5.0, 0.0, 10.0));

        world.update(0.01);
        assert_eq!(hits.get(), 1);

        // Drive one body into the right wall
        let wall = world.add_body(body(94.0, 20.0, 20.0, 0.0, 10.0));
        world.update(0.1);
        assert!(hits.get() >= 2);
        assert!(world.body(wall).unwrap().new_velocity.x < 0.0);
    }

    #[test]
    fn test_merge_policy_absorbs_smaller_body() {
        let mut world = World::new(config(200.0, 200.0, 0.5))
            .unwrap()
            .with_intersect_policy(MergeOnContact);
        let big = world.add_body(body(100.0, 100.0, 0.0, 0.0, 10.0));
        let small = world.add_body(body(102.0, 100.0, 0.0, 0.0, 6.0));

        world.update(0.01);

        // Removal applied at frame end, by id
        assert_eq!(world.len(), 1);
        assert!(world.body(small).is_none());
        let survivor = world.body(big).unwrap();
        assert!((survivor.radius - (10.0 + 6.0f32.sqrt())).abs() < EPS);
        assert!((survivor.mass - 16.0).abs() < EPS);
    }

    #[test]
    fn test_merge_policy_vetoes_shallow_contacts() {
        // Overlapping but not deep enough to merge: the policy vetoes the
        // bounce, so the bodies keep closing.
        let mut world = World::new(config(200.0, 200.0, 1.0))
            .unwrap()
            .with_intersect_policy(MergeOnContact);
        let a = world.add_body(body(100.0, 100.0, 1.0, 0.0, 10.0));
        let b = world.add_body(body(109.0, 100.0, -1.0, 0.0, 10.0));

        world.update(0.01);
        assert_eq!(world.len(), 2);
        assert_eq!(world.body(a).unwrap().new_velocity.x, 1.0);
        assert_eq!(world.body(b).unwrap().new_velocity.x, -1.0);
    }

    #[test]
    fn test_reflect_handles_body_wider_than_domain() {
        // Effective radius 125 in a 100x100 domain: no interior band exists,
        // so the clamp parks the body at the center instead of panicking.
        let mut world = World::new(config(100.0, 100.0, 0.5)).unwrap();
        let id = world.add_body(body(50.0, 50.0, 10.0, 0.0, 250.0));

        world.update(0.1);
        let b = world.body(id).unwrap();
        assert!(b.new_position.is_finite());
        assert_eq!(b.new_position, Vec2::new(50.0, 50.0));
        // Both walls are beyond its edge, so x still reflects
        assert!((b.new_velocity.x - (-5.0)).abs() < EPS);
    }

    #[test]
    fn test_policy_mutation_refreshes_contact_geometry() {
        // A policy that relocates the second body before resolving: the
        // correction and impulse must follow the post-hook contact, not the
        // geometry the pair had when it was detected.
        struct SideStep;
        impl IntersectPolicy for SideStep {
            fn on_intersect(&mut self, _a: &mut Body, b: &mut Body) -> PairVerdict {
                b.position = Vec2::new(50.0, 52.0);
                b.new_position = b.position;
                PairVerdict::Resolve
            }
        }

        let mut world = World::new(config(200.0, 200.0, 1.0))
            .unwrap()
            .with_intersect_policy(SideStep);
        let a = world.add_body(body(50.0, 50.0, 0.0, 2.0, 10.0));
        let b = world.add_body(body(52.0, 50.0, 0.0, -2.0, 10.0));

        world.update(0.001);

        // Post-hook normal is +y; the stale x-axis normal would have seen
        // zero approach velocity and applied no impulse at all.
        let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
        assert!((a.new_velocity.y - (-2.0)).abs() < 1e-2);
        assert!((b.new_velocity.y - 2.0).abs() < 1e-2);
        assert_eq!(a.new_velocity.x, 0.0);
        assert_eq!(b.new_velocity.x, 0.0);
    }

    #[test]
    fn test_per_body_callback_applies_acceleration() {
        let mut world = World::new(config(1000.0, 1000.0, 0.5)).unwrap();
        let id = world.add_body(body(500.0, 100.0, 0.0, 0.0, 8.0));

        let gravity = Vec2::new(0.0, 9.82);
        world.update_with(0.5, |b| b.velocity += gravity * 0.5);

        let b = world.body(id).unwrap();
        assert!((b.new_velocity.y - 4.91).abs() < EPS);
        assert!((b.new_position.y - (100.0 + 4.91 * 0.5)).abs() < EPS);
    }

    #[test]
    fn test_small_body_pairs_with_large_neighbor() {
        // The small body's self-sized query window is far smaller than the
        // large body, but collection is symmetric: the large body's own
        // query sees the small record and enqueues the pair.
        let mut world = World::new(config(400.0, 400.0, 1.0)).unwrap();
        // Fillers force the quadtree to subdivide
        for i in 0..8 {
            world.add_body(body(40.0 + 40.0 * i as f32, 360.0, 0.0, 0.0, 4.0));
        }
        let big = world.add_body(body(200.0, 100.0, 0.0, 0.0, 80.0));
        let small = world.add_body(body(240.0, 100.0, -2.0, 0.0, 4.0));

        world.update(0.01);
        // Overlap (distance 40 < 80/2 + 4/2) must have been resolved
        let v = world.body(small).unwrap().new_velocity.x;
        assert!(v > 0.0, "small body should have bounced off, got vx={v}");
        assert!(world.body(big).is_some());
    }

    #[test]
    fn test_coincident_bodies_survive_the_frame() {
        // Exactly stacked centers: undefined normal, pair skipped, no NaN.
        let mut world = World::new(config(100.0, 100.0, 1.0)).unwrap();
        let a = world.add_body(body(50.0, 50.0, 0.0, 0.0, 10.0));
        let b = world.add_body(body(50.0, 50.0, 0.0, 0.0, 10.0));

        world.update(0.1);
        for id in [a, b] {
            let body = world.body(id).unwrap();
            assert!(body.new_position.is_finite());
            assert!(body.new_velocity.is_finite());
        }
    }

    #[test]
    fn test_query_near_finds_nearest_record() {
        let mut world = World::new(config(400.0, 400.0, 0.5)).unwrap();
        let near = world.add_body(body(100.0, 100.0, 0.0, 0.0, 8.0));
        world.add_body(body(300.0, 300.0, 0.0, 0.0, 8.0));
        world.update(0.0);

        let probe = Vec2::new(105.0, 100.0);
        let hits = world.query_near(probe, 20.0, 20.0);
        let nearest = hits
            .iter()
            .min_by(|a, b| {
                let da = Vec2::new(a.bounds.x, a.bounds.y).distance(probe);
                let db = Vec2::new(b.bounds.x, b.bounds.y).distance(probe);
                da.total_cmp(&db)
            })
            .unwrap();
        assert_eq!(nearest.body, near);
    }

    #[test]
    fn test_two_worlds_stay_in_lockstep() {
        let build = || {
            let mut world = World::new(config(300.0, 300.0, 0.8)).unwrap();
            for i in 0..12 {
                let angle = i as f32 * 0.5;
                world.add_body(body(
                    150.0 + 60.0 * angle.cos(),
                    150.0 + 60.0 * angle.sin(),
                    -8.0 * angle.cos(),
                    -8.0 * angle.sin(),
                    6.0,
                ));
            }
            world
        };
        let (mut x, mut y) = (build(), build());

        let gravity = Vec2::new(0.0, 9.82);
        for _ in 0..120 {
            x.update_with(crate::consts::SIM_DT, |b| b.velocity += gravity * crate::consts::SIM_DT);
            y.update_with(crate::consts::SIM_DT, |b| b.velocity += gravity * crate::consts::SIM_DT);
        }
        for (a, b) in x.bodies().iter().zip(y.bodies()) {
            assert_eq!(a.new_position, b.new_position);
            assert_eq!(a.new_velocity, b.new_velocity);
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_positions_in_domain(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            vx in -200.0f32..200.0,
            vy in -200.0f32..200.0,
        ) {
            let mut world = World::new(WorldConfig {
                boundary: BoundaryPolicy::Wrap,
                ..config(100.0, 100.0, 0.5)
            }).unwrap();
            let id = world.add_body(body(x, y, vx, vy, 4.0));

            world.update(0.1);
            let b = world.body(id).unwrap();
            prop_assert!((0.0..100.0).contains(&b.position.x));
            prop_assert!((0.0..100.0).contains(&b.position.y));
            prop_assert!((0.0..100.0).contains(&b.new_position.x));
            prop_assert!((0.0..100.0).contains(&b.new_position.y));
        }
    }
}
