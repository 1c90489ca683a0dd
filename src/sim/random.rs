//! Uniform random sources for spawning
//!
//! Spawning only ever needs samples in `[0, 1)`, so the simulation takes
//! anything implementing [`UniformSource`]. The engine uses a PCG generator;
//! tests can script exact values with [`SequenceSource`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform samples in `[0, 1)`
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

/// Adapter exposing any `rand` generator as a [`UniformSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

impl RngSource<Pcg32> {
    /// Seeded PCG source
    pub fn seeded(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// PCG source seeded from the OS (`crypto.getRandomValues` on the web)
    pub fn from_entropy() -> Self {
        Self(Pcg32::from_os_rng())
    }
}

/// Replays a fixed list of samples, cycling when exhausted
///
/// Values are clamped into `[0, 1)` so a script can't push a field out of
/// its range.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns the same sample
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
