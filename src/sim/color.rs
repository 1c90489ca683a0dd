//! Streak colors
//!
//! Colors are plain data: an RGBA record that can round-trip through the CSS
//! strings the Canvas 2D API expects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Semi-transparent RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha (0.0 - 1.0)
    pub a: f32,
}

impl StreakColor {
    pub const PINK: Self = Self::rgba(244, 114, 182, 0.7);
    pub const PURPLE: Self = Self::rgba(162, 28, 175, 0.7);
    pub const INDIGO: Self = Self::rgba(99, 102, 241, 0.7);
    pub const FUCHSIA: Self = Self::rgba(236, 72, 153, 0.7);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 0.5);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form for `strokeStyle`/`shadowColor`
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Parse `rgba(r,g,b,a)`, `rgb(r,g,b)` or `#rrggbb`
    pub fn from_css(css: &str) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidColor(css.to_string());
        let s = css.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 1.0));
        }

        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let a = if has_alpha {
            let a = parts[3].parse::<f32>().map_err(|_| invalid())?;
            if !a.is_finite() {
                return Err(invalid());
            }
            a.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Ok(Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }
}

/// Pink, purple, indigo, fuchsia, white
pub fn default_palette() -> Vec<StreakColor> {
    vec![
        StreakColor::PINK,
        StreakColor::PURPLE,
        StreakColor::INDIGO,
        StreakColor::FUCHSIA,
        StreakColor::WHITE,
    ]
}

impl Serialize for StreakColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for StreakColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let css = String::deserialize(deserializer)?;
        StreakColor::from_css(&css).map_err(serde::de::Error::custom)
    }
}
