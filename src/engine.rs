//! Shower lifecycle
//!
//! `Uninitialized -> Running -> Stopped`, one way only. The engine owns the
//! surface while running and drops it on stop; frames requested after stop
//! are ignored.

use rand_pcg::Pcg32;

use crate::error::EngineError;
use crate::renderer::Surface;
use crate::settings::ShowerSettings;
use crate::sim::{ParticleStore, RngSource, TickReport, UniformSource, tick};

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, not yet mounted on a surface
    Uninitialized,
    /// Ticking every frame
    Running,
    /// Torn down; a new engine is needed to run again
    Stopped,
}

/// Drawable surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round a fractional viewport size (e.g. `innerWidth`) to whole pixels
    pub fn from_viewport(width: f64, height: f64) -> Self {
        let px = |v: f64| if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 };
        Self::new(px(width), px(height))
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// The meteor shower: store, settings, random source and surface
pub struct Engine<S: Surface, R: UniformSource = RngSource<Pcg32>> {
    state: EngineState,
    surface: Option<S>,
    store: ParticleStore,
    bounds: Bounds,
    settings: ShowerSettings,
    rng: R,
    frames: u64,
}

impl<S: Surface, R: UniformSource> Engine<S, R> {
    pub fn new(settings: ShowerSettings, rng: R) -> Self {
        Self {
            state: EngineState::Uninitialized,
            surface: None,
            store: ParticleStore::new(),
            bounds: Bounds::default(),
            settings: settings.sanitized(),
            rng,
            frames: 0,
        }
    }

    /// Mount on `surface` sized to `bounds` and seed the population
    ///
    /// Without a surface the engine stays `Uninitialized` and nothing is
    /// allocated.
    pub fn start(&mut self, surface: Option<S>, bounds: Bounds) -> Result<(), EngineError> {
        if self.state != EngineState::Uninitialized {
            return Err(EngineError::AlreadyStarted);
        }
        let mut surface = surface.ok_or(EngineError::NoSurface)?;

        surface.resize(bounds.width, bounds.height);
        self.bounds = bounds;
        self.store.initialize(
            bounds.width_f32(),
            bounds.height_f32(),
            self.settings.particle_count,
            &self.settings,
            &mut self.rng,
        );
        self.surface = Some(surface);
        self.state = EngineState::Running;

        log::info!(
            "Meteor shower started: {} meteors on {}x{}",
            self.store.len(),
            bounds.width,
            bounds.height
        );
        Ok(())
    }

    /// Run one tick; `None` when not running (stale frame)
    pub fn frame(&mut self) -> Option<TickReport> {
        if self.state != EngineState::Running {
            return None;
        }
        let surface = self.surface.as_mut()?;

        let report = tick(
            &mut self.store,
            surface,
            self.bounds.width_f32(),
            self.bounds.height_f32(),
            &self.settings,
            &mut self.rng,
        );
        self.frames += 1;

        if report.respawned > 0 {
            log::trace!("Frame {}: respawned {} meteors", self.frames, report.respawned);
        }
        Some(report)
    }

    /// Update the drawable size; particles are left untouched
    pub fn resize(&mut self, bounds: Bounds) {
        if self.state == EngineState::Stopped || bounds == self.bounds {
            return;
        }
        log::debug!(
            "Meteor shower resized {}x{} -> {}x{}",
            self.bounds.width,
            self.bounds.height,
            bounds.width,
            bounds.height
        );
        self.bounds = bounds;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(bounds.width, bounds.height);
        }
    }

    /// Stop and release the surface; returns false if already stopped
    pub fn stop(&mut self) -> bool {
        if self.state == EngineState::Stopped {
            return false;
        }
        let was_running = self.state == EngineState::Running;
        self.state = EngineState::Stopped;
        self.surface = None;
        if was_running {
            log::info!("Meteor shower stopped after {} frames", self.frames);
        }
        true
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn settings(&self) -> &ShowerSettings {
        &self.settings
    }

    /// Ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

impl<S: Surface> Engine<S> {
    /// Engine with an OS-seeded PCG source
    pub fn with_entropy(settings: ShowerSettings) -> Self {
        Self::new(settings, RngSource::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::sim::SequenceSource;
    use glam::Vec2;

    fn engine(count: usize) -> Engine<RecordingSurface> {
        Engine::new(ShowerSettings::with_count(count), RngSource::seeded(21))
    }

    #[test]
    fn test_start_without_surface() {
        let mut e = engine(5);
        assert_eq!(e.start(None, Bounds::new(800, 600)), Err(EngineError::NoSurface));
        assert_eq!(e.state(), EngineState::Uninitialized);
        assert!(e.store().is_empty());
        assert!(e.frame().is_none());
    }

    #[test]
    fn test_start_sizes_surface_and_seeds() {
        let mut e = engine(5);
        e.start(Some(RecordingSurface::new(1, 1)), Bounds::new(800, 600))
            .unwrap();

        assert_eq!(e.state(), EngineState::Running);
        assert_eq!(e.store().len(), 5);
        assert_eq!(e.surface().unwrap().size, (800, 600));
        for p in e.store() {
            assert!(p.pos.y < 600.0 * 0.7);
        }
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut e = engine(2);
        e.start(Some(RecordingSurface::default()), Bounds::new(10, 10))
            .unwrap();
        assert_eq!(
            e.start(Some(RecordingSurface::default()), Bounds::new(10, 10)),
            Err(EngineError::AlreadyStarted)
        );
    }

    #[test]
    fn test_frames_tick_while_running() {
        let mut e = engine(4);
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        for _ in 0..10 {
            let report = e.frame().unwrap();
            assert_eq!(report.drawn, 4);
        }
        assert_eq!(e.frames(), 10);
        assert_eq!(e.surface().unwrap().clear_count(), 10);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut e = engine(3);
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        e.frame();

        assert!(e.stop());
        assert!(!e.stop());
        assert_eq!(e.state(), EngineState::Stopped);
        assert!(e.surface().is_none());
        assert!(e.frame().is_none());
        assert_eq!(e.frames(), 1);
    }

    #[test]
    fn test_stop_before_start() {
        let mut e = engine(3);
        assert!(e.stop());
        assert!(e.frame().is_none());
        // No way back
        assert_eq!(
            e.start(Some(RecordingSurface::default()), Bounds::new(10, 10)),
            Err(EngineError::AlreadyStarted)
        );
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut e = engine(6);
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        let before: Vec<_> = e.store().iter().cloned().collect();

        e.resize(Bounds::new(1280, 720));

        let after: Vec<_> = e.store().iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(e.bounds(), Bounds::new(1280, 720));
        assert_eq!(e.surface().unwrap().size, (1280, 720));
    }

    #[test]
    fn test_resize_moves_respawn_range() {
        let mut e: Engine<RecordingSurface, SequenceSource> =
            Engine::new(ShowerSettings::with_count(1), SequenceSource::constant(0.5));
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        e.resize(Bounds::new(200, 600));
        // Push it past the new right edge
        if let Some(p) = e.store.get_mut(0) {
            p.pos = Vec2::new(1000.0, 100.0);
        }

        e.frame().unwrap();
        let p = e.store().get(0).unwrap();
        assert_eq!(p.pos, Vec2::new(100.0, -20.0));
    }

    #[test]
    fn test_resize_after_stop_ignored() {
        let mut e = engine(1);
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        e.stop();
        e.resize(Bounds::new(10, 10));
        assert_eq!(e.bounds(), Bounds::new(800, 600));
    }

    #[test]
    fn test_bounds_from_viewport() {
        assert_eq!(Bounds::from_viewport(1279.6, 720.2), Bounds::new(1280, 720));
        assert_eq!(Bounds::from_viewport(f64::NAN, -3.0), Bounds::new(0, 0));
    }

    #[test]
    fn test_oversized_population_is_capped() {
        let mut e = engine(usize::MAX);
        e.start(Some(RecordingSurface::default()), Bounds::new(800, 600))
            .unwrap();
        assert_eq!(e.store().len(), crate::consts::MAX_PARTICLE_COUNT);
        assert_eq!(e.frame().unwrap().drawn, crate::consts::MAX_PARTICLE_COUNT);
    }

    #[test]
    fn test_settings_sanitized_on_new() {
        let mut settings = ShowerSettings::with_count(2);
        settings.palette.clear();
        let e: Engine<RecordingSurface> = Engine::new(settings, RngSource::seeded(1));
        assert_eq!(e.settings().palette.len(), 5);
    }
}
