//! Narrow phase: exact circle overlap tests and pair resolution.
//!
//! The broad phase hands over candidate pairs; everything here works on two
//! bodies at a time. Geometry reads the live `position`/`velocity` values and
//! resolution writes only the `new_*` buffers, so the order pairs are
//! processed in cannot feed one resolution's output into another's input
//! within the same frame.

use glam::Vec2;

use super::body::Body;
use crate::consts::{CORRECTION_SLOP, CORRECTION_STRENGTH};

/// Contact geometry for one candidate pair.
#[derive(Debug, Clone, Copy)]
pub struct PairGeometry {
    /// Unit normal pointing from the first body's center toward the second's
    pub normal: Vec2,
    /// Center-to-center distance
    pub distance: f32,
    /// Overlap depth of the effective circles; positive when intersecting
    pub depth: f32,
}

/// Circle overlap test on the live positions.
///
/// Bodies touch when the center distance is at most the sum of the effective
/// (half-nominal) radii.
#[inline]
pub fn overlapping(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) <= a.effective_radius() + b.effective_radius()
}

/// Contact normal, distance, and overlap depth for a pair.
///
/// Returns `None` when the centers coincide: the normal direction is
/// undefined, so the caller skips resolution for that pair this frame rather
/// than pushing NaN through the solver.
pub fn pair_geometry(a: &Body, b: &Body) -> Option<PairGeometry> {
    let offset = b.position - a.position;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return None;
    }
    Some(PairGeometry {
        normal: offset / distance,
        distance,
        depth: a.effective_radius() + b.effective_radius() - distance,
    })
}

/// Impulse-based velocity resolution along the contact normal.
///
/// Radius stands in for inverse mass in the divisor and the per-body impulse
/// share; all engine formulas are calibrated to that convention. Contacts
/// whose relative velocity already points apart are left alone, which keeps
/// glancing and freshly-resolved pairs from gaining energy. Returns whether
/// an impulse was applied.
pub fn apply_impulse(a: &mut Body, b: &mut Body, normal: Vec2, restitution: f32) -> bool {
    let relative = b.velocity - a.velocity;
    let along_normal = relative.dot(normal);
    // Already separating
    if along_normal > 0.0 {
        return false;
    }

    let j = -(1.0 + restitution) * along_normal / (1.0 / a.radius + 1.0 / b.radius);
    let impulse = normal * j;

    a.new_velocity -= impulse / a.radius;
    b.new_velocity += impulse / b.radius;
    true
}

/// Soft positional correction ("push-apart").
///
/// Displaces both bodies along the contact normal by the overlap depth minus
/// the slop tolerance, split by inverse mass so the heavier body moves less.
/// Applied every frame instead of solved exactly; the tolerated slop stops
/// resting contacts from jittering.
pub fn correct_positions(a: &mut Body, b: &mut Body, geometry: &PairGeometry) {
    let depth = (geometry.depth - CORRECTION_SLOP).max(0.0);
    if depth <= 0.0 {
        return;
    }

    let inv_mass_a = 1.0 / a.mass;
    let inv_mass_b = 1.0 / b.mass;
    let correction =
        geometry.normal * (depth * CORRECTION_STRENGTH / (inv_mass_a + inv_mass_b));

    a.new_position -= correction * inv_mass_a;
    b.new_position += correction * inv_mass_b;
}
