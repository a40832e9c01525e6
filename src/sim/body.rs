//! Body: a simulated circle with double-buffered motion state.

use glam::Vec2;
use palette::{Hsl, IntoColor, Srgb};
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable generational handle to a live body.
    ///
    /// Slots are reused after removal but the generation advances, so a held
    /// id can never silently alias a newer body.
    pub struct BodyId;
}

/// Rejected body parameters (fatal at creation)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
}

/// A simulated circle.
///
/// Motion state is double-buffered: `position`/`velocity` are the live values
/// the current frame's resolution reads, while `new_position`/`new_velocity`
/// accumulate this frame's corrections and become live at the start of the
/// next update. After `World::update` returns, `new_*` is the freshest state.
#[derive(Debug, Clone)]
pub struct Body {
    /// Assigned by the engine on `add_body`; null until then
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Position buffer holding this frame's integrated + corrected value
    pub new_position: Vec2,
    /// Velocity buffer holding this frame's post-impulse value
    pub new_velocity: Vec2,
    /// Nominal size. Behaves as a diameter: collision geometry and wall
    /// clearance use `radius / 2`, while the impulse divisors use the full
    /// value. All engine formulas are calibrated against this split.
    pub radius: f32,
    /// Defaults to `radius` when not set explicitly
    pub mass: f32,
}

impl Body {
    /// Create a body at rest. Fails on non-positive or non-finite radius.
    pub fn new(position: Vec2, radius: f32) -> Result<Self, BodyError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BodyError::InvalidRadius(radius));
        }
        Ok(Self {
            id: BodyId::default(),
            position,
            velocity: Vec2::ZERO,
            new_position: position,
            new_velocity: Vec2::ZERO,
            radius,
            mass: radius,
        })
    }

    /// Set the initial velocity (both buffers)
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self.new_velocity = velocity;
        self
    }

    /// Override the defaulted mass. Fails on non-positive or non-finite mass.
    pub fn with_mass(mut self, mass: f32) -> Result<Self, BodyError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(self)
    }

    /// Collision footprint radius (half the nominal radius)
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.radius * 0.5
    }

    /// Derived display color, sRGB components in [0, 1].
    ///
    /// Hue tracks position (`(x + y) / 2` degrees, wrapping), full
    /// saturation, half lightness. Presentation-only: the engine never reads
    /// it, renderers call it per frame if they want position-keyed color.
    pub fn display_color(&self) -> [f32; 3] {
        let hue = (self.new_position.x + self.new_position.y) * 0.5;
        let rgb: Srgb = Hsl::new(hue, 1.0, 0.5).into_color();
        [rgb.red, rgb.green, rgb.blue]
    }
}
