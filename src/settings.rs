//! Demo-driver tuning.
//!
//! Persisted as a JSON file next to the binary; the engine itself never
//! reads this. Loading falls back to defaults rather than erroring so a
//! stale or hand-edited file can't stop the demo from starting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{BoundaryPolicy, WorldConfig};

/// Tuning for the headless demo driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Domain ===
    pub domain_width: f32,
    pub domain_height: f32,
    /// Coefficient of restitution (0 = dead, 1 = elastic)
    pub restitution: f32,
    pub boundary: BoundaryPolicy,

    // === Forces ===
    /// Apply downward gravity instead of `acceleration`
    pub gravity_enabled: bool,
    /// Custom acceleration (units/s²), used when gravity is off
    pub acceleration_x: f32,
    pub acceleration_y: f32,

    // === Spawning ===
    /// Bodies spawned at startup
    pub spawn_count: usize,
    pub spawn_size_min: f32,
    pub spawn_size_max: f32,
    /// Initial speed of spawned bodies (units/s)
    pub spawn_speed: f32,

    // === Behavior ===
    /// Merge-on-contact instead of bouncing
    pub merge: bool,

    // === Run ===
    /// RNG seed for spawn positions and velocities
    pub seed: u64,
    /// Frames to simulate before exiting
    pub frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domain_width: 1280.0,
            domain_height: 720.0,
            restitution: 0.3,
            boundary: BoundaryPolicy::Reflect,

            gravity_enabled: true,
            acceleration_x: 0.0,
            acceleration_y: 0.0,

            spawn_count: 200,
            spawn_size_min: 2.0,
            spawn_size_max: 6.0,
            spawn_speed: 20.0,

            merge: false,

            seed: 0xba11,
            frames: 600,
        }
    }
}

impl Settings {
    /// Effective per-second acceleration given the gravity toggle
    pub fn acceleration(&self) -> glam::Vec2 {
        if self.gravity_enabled {
            glam::Vec2::new(0.0, 9.82)
        } else {
            glam::Vec2::new(self.acceleration_x, self.acceleration_y)
        }
    }

    /// Spawn radius range with inverted bounds swapped, so a hand-edited
    /// file cannot panic the sampler.
    pub fn spawn_size_range(&self) -> std::ops::RangeInclusive<f32> {
        if self.spawn_size_min <= self.spawn_size_max {
            self.spawn_size_min..=self.spawn_size_max
        } else {
            log::warn!(
                "spawn_size_min {} > spawn_size_max {}, swapping",
                self.spawn_size_min,
                self.spawn_size_max,
            );
            self.spawn_size_max..=self.spawn_size_min
        }
    }

    /// Engine configuration derived from these settings
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.domain_width,
            height: self.domain_height,
            restitution: self.restitution,
            boundary: self.boundary,
        }
    }

    /// Load from a JSON file, falling back to defaults if it is missing or
    /// does not parse.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save to a JSON file. Failure is logged, not fatal.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize settings: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(path, json) {
            log::error!("Failed to write {}: {err}", path.display());
        } else {
            log::info!("Saved settings to {}", path.display());
        }
    }
}
