//! Meteor Shower - decorative streak particle background
//!
//! Core modules:
//! - `sim`: Particle model, spawning and the per-frame tick
//! - `renderer`: Drawing surface abstraction (Canvas 2D on the web)
//! - `engine`: Mount/run/stop lifecycle around the tick
//! - `settings`: Host-supplied options
//! - `web`: wasm-bindgen handle that wires the engine into a page

pub mod engine;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Bounds, Engine, EngineState};
pub use error::EngineError;
pub use settings::{ShowerSettings, SpawnRanges};

use glam::Vec2;

/// Shower configuration defaults
pub mod consts {
    use std::f32::consts::{FRAC_PI_4, PI};

    /// Number of meteors alive at once
    pub const DEFAULT_PARTICLE_COUNT: usize = 18;
    /// Upper bound on a host-requested population
    pub const MAX_PARTICLE_COUNT: usize = 10_000;

    /// Streak length range (pixels)
    pub const STREAK_LENGTH_MIN: f32 = 80.0;
    pub const STREAK_LENGTH_MAX: f32 = 140.0;

    /// Distance travelled per tick (pixels)
    pub const SPEED_MIN: f32 = 2.5;
    pub const SPEED_MAX: f32 = 5.0;

    /// Travel direction: 45° down-right, ±0.1π
    pub const BASE_ANGLE: f32 = FRAC_PI_4;
    pub const ANGLE_SPREAD: f32 = 0.1 * PI;

    pub const OPACITY_MIN: f32 = 0.5;
    pub const OPACITY_MAX: f32 = 1.0;

    pub const STROKE_WIDTH_MIN: f32 = 2.0;
    pub const STROKE_WIDTH_MAX: f32 = 4.0;

    /// Fresh meteors start in the upper 70% of the viewport
    pub const SPAWN_HEIGHT_FRACTION: f32 = 0.7;

    /// Respawned meteors re-enter just above the top edge
    pub const RESPAWN_Y: f32 = -20.0;

    /// Shadow blur radius for the glow (pixels)
    pub const GLOW_BLUR: f32 = 16.0;
}

/// Unit direction vector for an angle (radians)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Sample `lo + u * (hi - lo)` for `u` in `[0, 1)`
///
/// The result stays strictly below `hi` even when rounding would land on it.
/// An empty range (`lo == hi`) returns `lo`.
#[inline]
pub fn lerp_range(lo: f32, hi: f32, u: f32) -> f32 {
    let v = lo + u * (hi - lo);
    if hi > lo && v >= hi {
        next_below(hi).max(lo)
    } else {
        v
    }
}

/// Largest `f32` strictly less than `v` (finite `v` only)
fn next_below(v: f32) -> f32 {
    if v > 0.0 {
        f32::from_bits(v.to_bits() - 1)
    } else if v < 0.0 {
        f32::from_bits(v.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}
