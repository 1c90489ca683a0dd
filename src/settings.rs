//! Shower settings
//!
//! Supplied by the host page at mount time. Never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;
use crate::sim::color::{StreakColor, default_palette};

/// Half-open `[min, max)` sampling range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, u: f32) -> f32 {
        crate::lerp_range(self.min, self.max, u)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }

    /// Order the bounds and clamp them to `[floor, ceil]`
    fn sanitized(self, floor: f32, ceil: f32) -> Self {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let lo = if lo.is_finite() { lo.clamp(floor, ceil) } else { floor };
        let hi = if hi.is_finite() { hi.clamp(floor, ceil) } else { ceil };
        Self::new(lo, hi)
    }
}

/// Parameter ranges used when spawning a meteor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnRanges {
    pub streak_length: SampleRange,
    pub speed: SampleRange,
    /// Radians either side of the 45° base direction
    pub angle_spread: f32,
    pub opacity: SampleRange,
    pub stroke_width: SampleRange,
    /// Fraction of the viewport height a fresh meteor may start in
    pub spawn_height_fraction: f32,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            streak_length: SampleRange::new(STREAK_LENGTH_MIN, STREAK_LENGTH_MAX),
            speed: SampleRange::new(SPEED_MIN, SPEED_MAX),
            angle_spread: ANGLE_SPREAD,
            opacity: SampleRange::new(OPACITY_MIN, OPACITY_MAX),
            stroke_width: SampleRange::new(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX),
            spawn_height_fraction: SPAWN_HEIGHT_FRACTION,
        }
    }
}

impl SpawnRanges {
    /// Angle sampling range centred on the base direction
    pub fn angle(&self) -> SampleRange {
        SampleRange::new(BASE_ANGLE - self.angle_spread, BASE_ANGLE + self.angle_spread)
    }
}

/// Host-facing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowerSettings {
    /// Constant meteor population
    pub particle_count: usize,
    /// Colors drawn uniformly per meteor
    #[serde(alias = "colors")]
    pub palette: Vec<StreakColor>,
    /// Flattened so hosts can pass `speed: [min, max]` at the top level
    #[serde(flatten)]
    pub ranges: SpawnRanges,
    /// Glow shadow blur radius (pixels)
    pub glow_blur: f32,
    /// Y coordinate respawned meteors re-enter at
    pub respawn_y: f32,
}

impl Default for ShowerSettings {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            palette: default_palette(),
            ranges: SpawnRanges::default(),
            glow_blur: GLOW_BLUR,
            respawn_y: RESPAWN_Y,
        }
    }
}

impl ShowerSettings {
    /// Settings with a custom meteor count
    pub fn with_count(count: usize) -> Self {
        Self {
            particle_count: count,
            ..Default::default()
        }
    }

    /// Parse host options (camelCase JSON)
    ///
    /// A bare number is accepted as the particle count. The result is
    /// always sanitized.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let settings = match value {
            serde_json::Value::Null => Self::default(),
            serde_json::Value::Number(n) => {
                let count = n
                    .as_f64()
                    .filter(|c| c.is_finite() && *c >= 0.0)
                    .ok_or_else(|| EngineError::InvalidOptions(format!("bad particle count {}", n)))?;
                Self::with_count(count as usize)
            }
            other => serde_json::from_value(other)?,
        };
        Ok(settings.sanitized())
    }

    /// Parse host options, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Clamp every range into a drawable, well-ordered state
    pub fn sanitized(mut self) -> Self {
        if self.particle_count > MAX_PARTICLE_COUNT {
            log::warn!(
                "{} meteors requested; capping at {}",
                self.particle_count,
                MAX_PARTICLE_COUNT
            );
            self.particle_count = MAX_PARTICLE_COUNT;
        }

        let r = &mut self.ranges;
        r.streak_length = r.streak_length.sanitized(1.0, 10_000.0);
        r.speed = r.speed.sanitized(0.01, 1_000.0);
        r.opacity = r.opacity.sanitized(0.01, 1.0);
        r.stroke_width = r.stroke_width.sanitized(0.1, 100.0);
        r.angle_spread = if r.angle_spread.is_finite() {
            r.angle_spread.abs().min(std::f32::consts::FRAC_PI_4)
        } else {
            ANGLE_SPREAD
        };
        r.spawn_height_fraction = if r.spawn_height_fraction.is_finite() {
            r.spawn_height_fraction.clamp(0.0, 1.0)
        } else {
            SPAWN_HEIGHT_FRACTION
        };

        if self.palette.is_empty() {
            self.palette = default_palette();
        }
        if !self.glow_blur.is_finite() || self.glow_blur < 0.0 {
            self.glow_blur = GLOW_BLUR;
        }
        if !self.respawn_y.is_finite() {
            self.respawn_y = RESPAWN_Y;
        }
        self
    }
}
