//! Headless demo driver.
//!
//! Spawns a seeded field of bodies, steps the engine at a fixed timestep
//! while feeding acceleration through the per-body callback, and logs what
//! an interactive frontend would render. Rendering, input, and audio hang
//! off the same hooks this driver uses.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ballpit::Settings;
use ballpit::consts::SIM_DT;
use ballpit::sim::{Body, MergeOnContact, World};

const SETTINGS_PATH: &str = "ballpit.json";

fn main() {
    env_logger::init();
    log::info!("ballpit demo starting");

    let settings = Settings::load(SETTINGS_PATH);

    let bounces = Rc::new(Cell::new(0u64));
    let heard = Rc::clone(&bounces);
    let world = match World::new(settings.world_config()) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Rejected settings: {err}");
            std::process::exit(1);
        }
    };
    let mut world = world.with_collision_hook(move |body| {
        heard.set(heard.get() + 1);
        // What an audio frontend would use as playback volume
        let loudness = body.velocity.length() / 80.0 * body.mass;
        log::trace!("bounce, loudness {loudness:.2}");
    });
    if settings.merge {
        world = world.with_intersect_policy(MergeOnContact);
    }

    let mut rng = Pcg32::seed_from_u64(settings.seed);
    for _ in 0..settings.spawn_count {
        let position = Vec2::new(
            rng.random_range(0.0..settings.domain_width),
            rng.random_range(0.0..settings.domain_height),
        );
        let radius = rng.random_range(settings.spawn_size_range());
        let velocity = Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
            * settings.spawn_speed;
        match Body::new(position, radius) {
            Ok(body) => {
                world.add_body(body.with_velocity(velocity));
            }
            Err(err) => log::warn!("Skipping spawn: {err}"),
        }
    }
    log::info!(
        "Spawned {} bodies in {}x{} ({:?} boundary, restitution {})",
        world.len(),
        settings.domain_width,
        settings.domain_height,
        settings.boundary,
        settings.restitution,
    );

    let acceleration = settings.acceleration();
    for frame in 0..settings.frames {
        world.update_with(SIM_DT, |body| {
            body.velocity += acceleration * SIM_DT;
        });
        if frame % 120 == 0 {
            log::debug!(
                "frame {frame}: {} bodies, kinetic energy {:.1}",
                world.len(),
                kinetic_energy(&world),
            );
        }
    }

    // What a pointer-grab frontend would do: find the body nearest a point
    let probe = Vec2::new(settings.domain_width / 2.0, settings.domain_height / 2.0);
    let nearest = world
        .query_near(probe, 50.0, 50.0)
        .into_iter()
        .min_by(|a, b| {
            let center = |r: &ballpit::IndexRecord| {
                Vec2::new(
                    r.bounds.x + r.bounds.width * 0.5,
                    r.bounds.y + r.bounds.height * 0.5,
                )
            };
            center(a).distance(probe).total_cmp(&center(b).distance(probe))
        });
    match nearest.and_then(|record| world.body(record.body)) {
        Some(body) => {
            let [r, g, b] = body.display_color();
            log::info!(
                "Nearest body to center probe: {:?} at {:.1}, color ({r:.2}, {g:.2}, {b:.2})",
                body.id,
                body.new_position,
            );
        }
        None => log::info!("No body near the center probe"),
    }

    log::info!(
        "Done: {} frames, {} bodies remaining, {} bounces heard, kinetic energy {:.1}",
        settings.frames,
        world.len(),
        bounces.get(),
        kinetic_energy(&world),
    );

    settings.save(SETTINGS_PATH);
}

fn kinetic_energy(world: &World) -> f32 {
    world
        .bodies()
        .iter()
        .map(|b| 0.5 * b.mass * b.new_velocity.length_squared())
        .sum()
}
