//! Drawing surface abstraction
//!
//! The simulation only ever clears the surface and strokes glowing line
//! segments, so a surface is two calls. On the web this is a Canvas 2D
//! context; tests and the native demo record the calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::color::StreakColor;
use crate::sim::particle::Particle;

/// One glowing line segment, head to tail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    pub head: Vec2,
    pub tail: Vec2,
    pub color: StreakColor,
    /// Global alpha applied on top of the color's own alpha
    pub opacity: f32,
    pub width: f32,
    /// Shadow blur radius, drawn in `color`
    pub glow_blur: f32,
}

impl Streak {
    pub fn from_particle(particle: &Particle, glow_blur: f32) -> Self {
        Self {
            head: particle.pos,
            tail: particle.tail(),
            color: particle.color,
            opacity: particle.opacity,
            width: particle.stroke_width,
            glow_blur,
        }
    }
}

/// A pixel surface the shower draws onto
pub trait Surface {
    /// Clear `[0, width) x [0, height)`
    fn clear(&mut self, width: f32, height: f32);

    fn stroke_streak(&mut self, streak: &Streak);

    /// Match the backing store to new viewport dimensions
    fn resize(&mut self, _width: u32, _height: u32) {}
}
