//! physim - discrete-time 2D physics sandbox
//!
//! Headless runner: builds a sandbox from configuration, steps it for a
//! fixed number of frames, and optionally round-trips the collection
//! through the flat-file store.

use physim::config::AppConfig;
use physim::{Sandbox, ShapeKind, SpawnParams, Vec2};

/// Seed a small demo arrangement when no load file provides one
fn spawn_demo_scene(sandbox: &mut Sandbox) {
    let spawns = [
        (
            Vec2::new(400.0, 300.0),
            SpawnParams {
                kind: ShapeKind::Circle,
                radius: 60.0,
                velocity: Vec2::new(120.0, -40.0),
                color: [0.9, 0.2, 0.2, 1.0],
                ..SpawnParams::default()
            },
        ),
        (
            Vec2::new(900.0, 400.0),
            SpawnParams {
                kind: ShapeKind::Square,
                radius: 90.0,
                velocity: Vec2::new(-80.0, 20.0),
                color: [0.2, 0.8, 0.3, 1.0],
                mass: 20.0,
                ..SpawnParams::default()
            },
        ),
        (
            Vec2::new(1400.0, 250.0),
            SpawnParams {
                kind: ShapeKind::Rectangle,
                size: Vec2::new(160.0, 80.0),
                velocity: Vec2::new(-150.0, 60.0),
                color: [0.2, 0.4, 0.9, 1.0],
                mass: 15.0,
                ..SpawnParams::default()
            },
        ),
        (
            Vec2::new(700.0, 700.0),
            SpawnParams {
                kind: ShapeKind::Triangle,
                radius: 100.0,
                velocity: Vec2::new(40.0, -120.0),
                color: [0.9, 0.8, 0.2, 1.0],
                mass: 5.0,
                ..SpawnParams::default()
            },
        ),
    ];

    for (position, params) in spawns {
        if let Err(e) = sandbox.spawn(position, params) {
            log::error!("failed to spawn demo object: {}", e);
        }
    }
}

fn main() {
    // Load configuration; the logger comes up after so the configured level
    // applies, and any load failure is reported once it does
    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_err {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!("Starting physim");
    let mut sandbox = Sandbox::with_config(config.simulation.to_sim_config());

    if let Some(path) = &config.runner.load_file {
        match physim::load(path, &mut sandbox) {
            Ok(count) => log::info!("loaded {} objects from {}", count, path),
            Err(e) => log::error!("failed to load {}: {}", path, e),
        }
    }

    if sandbox.objects().is_empty() {
        log::info!("no objects loaded, seeding demo scene");
        spawn_demo_scene(&mut sandbox);
    }

    if config.runner.impulse_on_start {
        sandbox.impulse();
    }

    sandbox.sim_mut().play();
    for frame in 0..config.runner.steps {
        sandbox.sim_mut().step(config.runner.dt);

        if frame % 60 == 0 {
            let collisions: u32 = sandbox.objects().iter().map(|o| o.collisions()).sum();
            log::debug!(
                "frame {}: {} objects, {} collisions so far",
                frame,
                sandbox.objects().len(),
                collisions
            );
        }
    }

    let collisions: u32 = sandbox.objects().iter().map(|o| o.collisions()).sum();
    log::info!(
        "simulated {} steps of {:.4}s: {} objects, {} collisions",
        config.runner.steps,
        config.runner.dt,
        sandbox.objects().len(),
        collisions
    );

    if let Some(path) = &config.runner.save_file {
        match physim::save(path, &sandbox) {
            Ok(()) => log::info!("saved {} objects to {}", sandbox.objects().len(), path),
            Err(e) => log::error!("failed to save {}: {}", path, e),
        }
    }
}
