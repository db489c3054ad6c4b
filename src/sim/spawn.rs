//! Time- and score-gated spawning
//!
//! Timers compare against the clock value handed to the tick, never a global
//! clock, so a replay with the same inputs spawns the same things.

use glam::Vec2;
use rand::Rng;

use super::body::Bounds;
use super::entity::{Asteroid, Comet, Edge, Enemy, GravityWell};
use super::state::World;
use crate::consts::ENEMY_SPAWN_OFFSET;

/// Attempts at finding a well position clear of the ship
const WELL_PLACEMENT_ATTEMPTS: usize = 64;

/// Fill an empty field with the opening asteroids, anywhere on screen
pub fn seed_asteroids(world: &mut World) {
    let bounds = world.bounds;
    for _ in 0..world.tuning.initial_asteroids {
        let pos = Vec2::new(
            world.rng.random_range(0.0..bounds.width),
            world.rng.random_range(0.0..bounds.height),
        );
        let radius = world
            .rng
            .random_range(world.tuning.asteroid_min_radius..world.tuning.asteroid_max_radius);
        world.asteroids.push(Asteroid::new(pos, radius, &mut world.rng));
    }
}

/// Draw the wait before the next enemy appears
pub fn roll_enemy_interval(world: &mut World) -> u64 {
    world
        .rng
        .random_range(world.tuning.enemy_spawn_min_ms..world.tuning.enemy_spawn_max_ms)
}

/// Run every spawn policy once
pub fn run(world: &mut World) {
    spawn_enemy(world);
    replenish_asteroids(world);
    spawn_well(world);
    spawn_comet(world);
}

fn spawn_enemy(world: &mut World) {
    if world.enemy.is_some() {
        return;
    }
    let elapsed = world.now_ms.saturating_sub(world.last_enemy_event_ms);
    if elapsed <= world.enemy_spawn_interval_ms {
        return;
    }

    let edge = Edge::random(&mut world.rng);
    let pos = edge.point_beyond(&world.bounds, ENEMY_SPAWN_OFFSET, &mut world.rng);
    let fire_range = (world.tuning.enemy_fire_min_ms, world.tuning.enemy_fire_max_ms);
    world.enemy = Some(Enemy::new(
        pos,
        world.tuning.enemy_hit_points,
        world.now_ms,
        fire_range,
        &mut world.rng,
    ));
    world.last_enemy_event_ms = world.now_ms;
    world.enemy_spawn_interval_ms = roll_enemy_interval(world);
    log::debug!("Enemy spawned at {:?} from {:?}", pos, edge);
}

fn replenish_asteroids(world: &mut World) {
    if world.asteroids.len() >= world.tuning.asteroid_floor {
        return;
    }
    if !world.rng.random_bool(world.tuning.asteroid_spawn_chance) {
        return;
    }
    let edge = Edge::random(&mut world.rng);
    // Right and bottom edges coincide with the left and top ones on the torus
    let pos = world
        .bounds
        .wrap(edge.point_beyond(&world.bounds, 0.0, &mut world.rng));
    let radius = world
        .rng
        .random_range(world.tuning.asteroid_min_radius..world.tuning.asteroid_max_radius);
    world.asteroids.push(Asteroid::new(pos, radius, &mut world.rng));
}

fn spawn_well(world: &mut World) {
    if world.well.is_some() || world.score < world.tuning.well_score_threshold {
        return;
    }
    if !world.rng.random_bool(world.tuning.well_spawn_chance) {
        return;
    }
    let pos = place_well(
        &world.bounds,
        world.ship.body.pos,
        world.tuning.well_min_ship_distance,
        &mut world.rng,
    );
    world.well = Some(GravityWell::new(pos, &mut world.rng));
    log::debug!("Gravity well opened at {:?}", pos);
}

/// Random point at least `min_distance` from `ship` on both axes.
///
/// Falls back to the point opposite the ship on the torus when the screen is
/// too small for the search to succeed.
pub fn place_well<R: Rng + ?Sized>(
    bounds: &Bounds,
    ship: Vec2,
    min_distance: f32,
    rng: &mut R,
) -> Vec2 {
    for _ in 0..WELL_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0.0..bounds.width),
            rng.random_range(0.0..bounds.height),
        );
        let d = (candidate - ship).abs();
        if d.x >= min_distance && d.y >= min_distance {
            return candidate;
        }
    }
    bounds.wrap(ship + bounds.center())
}

fn spawn_comet(world: &mut World) {
    if world.comet.is_some() {
        return;
    }
    let elapsed = world.now_ms.saturating_sub(world.last_comet_spawn_ms);
    if elapsed <= world.tuning.comet_interval_ms {
        return;
    }
    let edge = Edge::random(&mut world.rng);
    let comet = Comet::new(edge, &world.bounds, world.ship.body.pos, &mut world.rng);
    log::debug!("Comet inbound from {:?}", edge);
    world.comet = Some(comet);
    world.last_comet_spawn_ms = world.now_ms;
}
