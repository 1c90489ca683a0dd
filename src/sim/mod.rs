//! Meteor simulation
//!
//! Pure and host-agnostic:
//! - Randomness only through an injected `UniformSource`
//! - Stable iteration order (store order is draw order)
//! - No platform dependencies; drawing goes through `renderer::Surface`

pub mod color;
pub mod particle;
pub mod random;
pub mod store;
pub mod tick;

pub use color::{StreakColor, default_palette};
pub use particle::Particle;
pub use random::{RngSource, SequenceSource, UniformSource};
pub use store::ParticleStore;
pub use tick::{TickReport, tick};
