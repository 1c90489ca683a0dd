//! A single meteor streak

use glam::Vec2;

use super::color::StreakColor;
use super::random::UniformSource;
use crate::{direction, lerp_range};
use crate::settings::ShowerSettings;

/// One animated streak
///
/// Every field is re-randomized on respawn; only `pos` changes between
/// respawns.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Head of the streak (surface pixels)
    pub pos: Vec2,
    pub streak_length: f32,
    /// Pixels advanced per tick
    pub speed: f32,
    /// Direction of travel (radians)
    pub angle: f32,
    pub opacity: f32,
    pub stroke_width: f32,
    pub color: StreakColor,
}

impl Particle {
    /// Spawn a fresh meteor somewhere inside a `width` x `height` surface
    ///
    /// Samples are drawn in a fixed order: x, y, length, speed, angle,
    /// opacity, stroke width, color.
    pub fn spawn(
        width: f32,
        height: f32,
        settings: &ShowerSettings,
        rng: &mut impl UniformSource,
    ) -> Self {
        let ranges = &settings.ranges;
        let x = lerp_range(0.0, width, rng.next_unit());
        let y = lerp_range(0.0, height * ranges.spawn_height_fraction, rng.next_unit());
        Self {
            pos: Vec2::new(x, y),
            streak_length: ranges.streak_length.sample(rng.next_unit()),
            speed: ranges.speed.sample(rng.next_unit()),
            angle: ranges.angle().sample(rng.next_unit()),
            opacity: ranges.opacity.sample(rng.next_unit()),
            stroke_width: ranges.stroke_width.sample(rng.next_unit()),
            color: pick_color(&settings.palette, rng.next_unit()),
        }
    }

    /// Replace all state with a fresh spawn entering from above the top edge
    pub fn respawn(
        &mut self,
        width: f32,
        height: f32,
        settings: &ShowerSettings,
        rng: &mut impl UniformSource,
    ) {
        *self = Self::spawn(width, height, settings, rng);
        self.pos.x = lerp_range(0.0, width, rng.next_unit());
        self.pos.y = settings.respawn_y;
    }

    /// Unit vector along the direction of travel
    #[inline]
    pub fn heading(&self) -> Vec2 {
        direction(self.angle)
    }

    /// End of the streak, trailing behind the head
    pub fn tail(&self) -> Vec2 {
        self.pos - self.heading() * self.streak_length
    }

    /// Move one tick along the heading
    pub fn advance(&mut self) {
        self.pos += self.heading() * self.speed;
    }

    /// True once the whole streak has left the left, right or bottom edge
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        let margin = self.streak_length;
        self.pos.x < -margin || self.pos.x > width + margin || self.pos.y > height + margin
    }
}

fn pick_color(palette: &[StreakColor], u: f32) -> StreakColor {
    if palette.is_empty() {
        return StreakColor::WHITE;
    }
    let index = ((u * palette.len() as f32) as usize).min(palette.len() - 1);
    palette[index]
}
