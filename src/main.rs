//! Meteor Shower entry point
//!
//! On the web the library's `MeteorShower` handle is the entry point. The
//! native binary runs the simulation headless and logs what it drew.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use meteor_shower::renderer::RecordingSurface;
    use meteor_shower::{Bounds, Engine, ShowerSettings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meteor Shower (native, headless) starting...");

    // Usage: meteor-shower [frames] [options-json]
    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);
    let settings = args
        .next()
        .map(|json| ShowerSettings::from_json_or_default(&json))
        .unwrap_or_default();

    let mut engine: Engine<RecordingSurface> = Engine::with_entropy(settings);
    if let Err(e) = engine.start(Some(RecordingSurface::default()), Bounds::new(1280, 720)) {
        log::error!("{}", e);
        return;
    }

    let mut respawned = 0;
    for frame in 0..frames {
        // Halfway through, simulate the window being resized
        if frame == frames / 2 {
            engine.resize(Bounds::new(800, 600));
        }
        if let Some(report) = engine.frame() {
            respawned += report.respawned;
        }
    }

    let strokes = engine.surface().map_or(0, RecordingSurface::stroke_count);
    log::info!(
        "Ran {} frames: {} streaks drawn, {} respawns, {} meteors alive",
        engine.frames(),
        strokes,
        respawned,
        engine.store().len()
    );

    engine.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is meteor_shower::web::start, this is just to satisfy the compiler
}
