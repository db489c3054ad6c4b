//! Rock Drift - A wrapped-plane asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, entities, spawning, gravity, collisions)
//! - `tuning`: Data-driven game balance
//! - `error`: Errors for the fallible configuration surface
//!
//! Rendering, audio and input devices live outside this crate. They feed a
//! [`sim::TickInput`] plus a millisecond clock into [`sim::tick`], then read
//! the [`sim::World`] and its drained [`sim::GameEvent`]s.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield size
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 0.3;
    pub const SHIP_ROTATION_SPEED: f32 = 0.1; // radians per tick
    pub const SHIP_FRICTION: f32 = 0.99;
    pub const FIRE_COOLDOWN_MS: u64 = 250;

    /// Player bullets
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_LIFESPAN: u32 = 100;

    /// Enemy bullets
    pub const ENEMY_BULLET_RADIUS: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    pub const ENEMY_BULLET_LIFESPAN: u32 = 140;

    /// Asteroids
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    pub const ASTEROID_MIN_VERTICES: usize = 8;
    pub const ASTEROID_MAX_VERTICES: usize = 11;
    pub const ASTEROID_OUTLINE_VARIANCE: f32 = 0.4;
    pub const ASTEROID_MAX_SPIN: f32 = 0.01;

    /// Enemy (UFO)
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_MAX_AXIS_SPEED: f32 = 1.5;
    pub const ENEMY_SPAWN_OFFSET: f32 = 20.0;

    /// Gravity well
    pub const WELL_CORE_RADIUS: f32 = 25.0;
    pub const WELL_INNER_RADIUS: f32 = 15.0;
    pub const WELL_OUTER_RADIUS: f32 = 250.0;
    pub const WELL_MAX_AXIS_DRIFT: f32 = 0.25;
    pub const WELL_DISK_SPIN: f32 = 0.02;
    /// Pull inside twice the inner radius
    pub const WELL_CLOSE_PULL: f32 = 0.8;
    /// Base pull, scaled linearly to zero at the outer radius
    pub const WELL_BASE_PULL: f32 = 0.3;

    /// Homing comet
    pub const COMET_RADIUS: f32 = 20.0;
    pub const COMET_SPEED: f32 = 10.0;
    pub const COMET_SPAWN_OFFSET: f32 = 50.0;
    pub const COMET_EXIT_MARGIN: f32 = 100.0;
    pub const COMET_PARTICLE_CHANCE: f64 = 0.3;
    pub const COMET_PARTICLE_DECAY: f32 = 0.02;
    pub const COMET_MAX_PARTICLES: usize = 40;

    /// Smallest radius a body may be constructed with
    pub const MIN_BODY_RADIUS: f32 = 0.5;
}

/// Wrap a coordinate into `[0, extent)`.
///
/// Coordinates that overshoot an edge re-enter from the opposite edge.
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round a tiny negative up to exactly `extent`
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Heading (radians) of the straight line from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a heading
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
