//! Deterministic collision simulation
//!
//! All engine logic lives here. This module must stay pure and single-threaded:
//! - No rendering or platform dependencies
//! - No internal RNG (seeding is the driver's job)
//! - Stable iteration order (insertion order of live bodies)
//! - Per-frame state (index, candidate pairs) rebuilt from body positions

pub mod arena;
pub mod body;
pub mod collision;
pub mod engine;
pub mod quadtree;

pub use body::{Body, BodyError, BodyId};
pub use collision::PairGeometry;
pub use engine::{
    BoundaryPolicy, ConfigError, IntersectPolicy, MergeOnContact, PairVerdict, World, WorldConfig,
};
pub use quadtree::{IndexRecord, Quadtree, Rect};
