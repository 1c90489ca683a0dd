//! Fixed-population particle store
//!
//! The population is set once by [`ParticleStore::initialize`]; after that,
//! particles are only ever reset in place.

use super::particle::Particle;
use super::random::UniformSource;
use crate::settings::ShowerSettings;

#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `count` fresh spawns
    pub fn initialize(
        &mut self,
        width: f32,
        height: f32,
        count: usize,
        settings: &ShowerSettings,
        rng: &mut impl UniformSource,
    ) {
        self.particles.clear();
        self.particles.reserve_exact(count);
        self.particles
            .extend((0..count).map(|_| Particle::spawn(width, height, settings, rng)));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Particles in draw order
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
