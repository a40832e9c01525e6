//! Ballpit - a 2D bouncing-ball collision engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, quadtree index, collision resolution)
//! - `settings`: Data-driven tuning for the demo driver
//!
//! The engine owns a collection of circular bodies and steps them with
//! [`sim::World::update`]: integrate, rebuild the spatial index, resolve
//! overlapping pairs with an impulse along the contact normal, then apply the
//! configured boundary policy. Rendering, input, and audio live outside the
//! crate and hang off the hooks in [`sim::World`].

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{
    Body, BodyError, BodyId, BoundaryPolicy, ConfigError, IndexRecord, IntersectPolicy,
    MergeOnContact, PairVerdict, World, WorldConfig,
};

/// Engine tuning constants
pub mod consts {
    /// Fixed demo timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Default restitution when none is configured
    pub const DEFAULT_RESTITUTION: f32 = 0.3;

    /// Overlap depth tolerated by positional correction (prevents jitter)
    pub const CORRECTION_SLOP: f32 = 0.01;
    /// Fraction of the slop-reduced overlap removed per frame.
    /// 1.0 separates an isolated pair in a single update; lower values trade
    /// separation speed for softer stacked contacts.
    pub const CORRECTION_STRENGTH: f32 = 1.0;

    /// Records a quadtree node holds before subdividing
    pub const INDEX_SPLIT_THRESHOLD: usize = 5;
    /// Quadtree subdivision cap; at this depth nodes grow instead of splitting
    pub const INDEX_MAX_DEPTH: u8 = 8;
}
