//! Per-frame simulation tick
//!
//! Draws every meteor at its current position, then advances it and
//! respawns the ones that left the surface.

use super::random::UniformSource;
use super::store::ParticleStore;
use crate::renderer::{Streak, Surface};
use crate::settings::ShowerSettings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub drawn: usize,
    pub respawned: usize,
}

/// Advance the shower by one frame
///
/// Store order is draw order. The population never changes.
pub fn tick(
    store: &mut ParticleStore,
    surface: &mut impl Surface,
    width: f32,
    height: f32,
    settings: &ShowerSettings,
    rng: &mut impl UniformSource,
) -> TickReport {
    let mut report = TickReport::default();

    surface.clear(width, height);

    for particle in store.iter_mut() {
        surface.stroke_streak(&Streak::from_particle(particle, settings.glow_blur));
        report.drawn += 1;

        particle.advance();

        if particle.is_out_of_bounds(width, height) {
            particle.respawn(width, height, settings, rng);
            report.respawned += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::color::StreakColor;
    use crate::sim::random::{RngSource, SequenceSource};
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    /// Three meteors, the first placed at `(x, 100)` heading 45° at speed 3
    fn scenario(x: f32) -> ParticleStore {
        let settings = ShowerSettings::with_count(3);
        let mut store = ParticleStore::new();
        store.initialize(W, H, 3, &settings, &mut RngSource::seeded(11));
        if let Some(p) = store.get_mut(0) {
            p.pos = Vec2::new(x, 100.0);
            p.angle = FRAC_PI_4;
            p.speed = 3.0;
            p.streak_length = 90.0;
        }
        store
    }

    #[test]
    fn test_tick_clears_then_draws_in_order() {
        let settings = ShowerSettings::with_count(3);
        let mut store = scenario(400.0);
        let heads: Vec<Vec2> = store.iter().map(|p| p.pos).collect();
        let mut surface = RecordingSurface::new(800, 600);

        let report = tick(&mut store, &mut surface, W, H, &settings, &mut RngSource::seeded(1));

        assert_eq!(report.drawn, 3);
        assert_eq!(surface.commands[0], DrawCommand::Clear { width: W, height: H });
        let drawn_heads: Vec<Vec2> = surface.commands[1..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke(s) => Some(s.head),
                _ => None,
            })
            .collect();
        // Drawn before advancing
        assert_eq!(drawn_heads, heads);
    }

    #[test]
    fn test_tick_advances_inside_margin() {
        let settings = ShowerSettings::with_count(3);
        let mut store = scenario(810.0);
        let mut surface = RecordingSurface::new(800, 600);

        tick(&mut store, &mut surface, W, H, &settings, &mut RngSource::seeded(1));

        // 810 > 800 + 90 is false, so it just moves
        let p = store.get(0).unwrap();
        assert!((p.pos.x - 812.1213).abs() < 1e-3);
        assert!((p.pos.y - 102.1213).abs() < 1e-3);
        assert_eq!(p.speed, 3.0);
    }

    #[test]
    fn test_tick_respawns_past_margin() {
        let settings = ShowerSettings::with_count(3);
        let mut store = scenario(895.0);
        let mut surface = RecordingSurface::new(800, 600);

        let report = tick(&mut store, &mut surface, W, H, &settings, &mut RngSource::seeded(5));

        let p = store.get(0).unwrap();
        assert_eq!(p.pos.y, -20.0);
        assert!(p.pos.x >= 0.0 && p.pos.x < W);
        assert!(report.respawned >= 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_respawn_from_right_edge_scripted() {
        let settings = ShowerSettings::with_count(1);
        let mut store = ParticleStore::new();
        store.initialize(W, H, 1, &settings, &mut RngSource::seeded(2));
        let length = store.get(0).unwrap().streak_length;
        store.get_mut(0).unwrap().pos = Vec2::new(W + length + 1.0, 100.0);

        // Nine samples: a full spawn, then the re-entry x
        let mut rng = SequenceSource::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.5]);
        let mut surface = RecordingSurface::new(800, 600);
        let report = tick(&mut store, &mut surface, W, H, &settings, &mut rng);

        let p = store.get(0).unwrap();
        assert_eq!(report.respawned, 1);
        assert_eq!(p.pos, Vec2::new(400.0, -20.0));
        assert!((p.streak_length - 98.0).abs() < 1e-4);
        assert_eq!(p.color, StreakColor::WHITE);
        assert_eq!(rng.drawn(), 9);
    }

    #[test]
    fn test_glow_blur_from_settings() {
        let settings = ShowerSettings {
            glow_blur: 4.0,
            ..ShowerSettings::with_count(2)
        };
        let mut store = ParticleStore::new();
        store.initialize(W, H, 2, &settings, &mut RngSource::seeded(9));
        let mut surface = RecordingSurface::new(800, 600);
        tick(&mut store, &mut surface, W, H, &settings, &mut RngSource::seeded(9));

        for cmd in surface.last_frame() {
            if let DrawCommand::Stroke(s) = cmd {
                assert_eq!(s.glow_blur, 4.0);
            }
        }
    }

    #[test]
    fn test_shrunk_surface_leaves_nothing_outside() {
        let settings = ShowerSettings::default();
        let mut store = ParticleStore::new();
        store.initialize(1920.0, 1080.0, 18, &settings, &mut RngSource::seeded(4));
        let mut surface = RecordingSurface::new(1920, 1080);

        tick(&mut store, &mut surface, 10.0, 10.0, &settings, &mut RngSource::seeded(4));
        for p in &store {
            assert!(!p.is_out_of_bounds(10.0, 10.0));
        }
    }

    proptest! {
        #[test]
        fn prop_population_and_ranges_hold(
            seed in any::<u64>(),
            count in 0usize..40,
            width in 1.0f32..3000.0,
            height in 1.0f32..3000.0,
            ticks in 1usize..300,
        ) {
            let settings = ShowerSettings::with_count(count);
            let mut rng = RngSource::seeded(seed);
            let mut store = ParticleStore::new();
            store.initialize(width, height, count, &settings, &mut rng);
            let mut surface = RecordingSurface::new(width as u32, height as u32);

            for _ in 0..ticks {
                prop_assert_eq!(store.len(), count);
                surface.reset();
                let report = tick(&mut store, &mut surface, width, height, &settings, &mut rng);
                prop_assert_eq!(report.drawn, count);
                prop_assert_eq!(store.len(), count);

                for p in &store {
                    prop_assert!(p.opacity > 0.0 && p.opacity <= 1.0);
                    prop_assert!(settings.ranges.stroke_width.contains(p.stroke_width));
                    prop_assert!(settings.ranges.speed.contains(p.speed));
                    prop_assert!(settings.ranges.streak_length.contains(p.streak_length));
                    prop_assert!(settings.ranges.angle().contains(p.angle));
                    prop_assert!(settings.palette.contains(&p.color));
                }
            }
        }

        #[test]
        fn prop_in_bounds_particles_advance_exactly(
            seed in any::<u64>(),
            x in 100.0f32..700.0,
            y in 0.0f32..400.0,
        ) {
            let settings = ShowerSettings::with_count(1);
            let mut rng = RngSource::seeded(seed);
            let mut store = ParticleStore::new();
            store.initialize(W, H, 1, &settings, &mut rng);
            store.get_mut(0).unwrap().pos = Vec2::new(x, y);
            let before = store.get(0).unwrap().clone();

            let mut surface = RecordingSurface::new(800, 600);
            let report = tick(&mut store, &mut surface, W, H, &settings, &mut rng);
            prop_assert_eq!(report.respawned, 0);

            let after = store.get(0).unwrap();
            let expected = before.pos + before.heading() * before.speed;
            prop_assert!((after.pos - expected).length() < 1e-3);
            prop_assert_eq!(after.color, before.color);
            prop_assert_eq!(after.streak_length, before.streak_length);
        }
    }
}
