//! Gravity well pull and capture
//!
//! The caller decides what a capture means for each kind of body.

use glam::Vec2;

use super::body::Body;
use super::entity::GravityWell;
use super::state::{GameEvent, GamePhase, World};
use crate::consts::{WELL_BASE_PULL, WELL_CLOSE_PULL};
use crate::{angle_to, heading};

/// Pull every body toward the well and apply captures.
///
/// Captured rocks and bullets vanish (rocks do not split), a captured enemy
/// counts as a kill, a captured ship costs a life. The comet is pulled but
/// never captured.
pub fn run(world: &mut World) {
    let Some(well) = world.well.take() else {
        return;
    };

    let ship_captured = apply_gravity(&well, &mut world.ship.body);
    if ship_captured && world.phase != GamePhase::GameOver {
        log::debug!("Ship swallowed by the gravity well");
        world.lose_life_to_gravity();
    }

    let rocks_before = world.asteroids.len();
    world
        .asteroids
        .retain_mut(|rock| !apply_gravity(&well, &mut rock.body));
    let swallowed = rocks_before - world.asteroids.len();
    if swallowed > 0 {
        log::debug!("Gravity well swallowed {swallowed} asteroid(s)");
    }

    world
        .bullets
        .retain_mut(|bullet| !apply_gravity(&well, &mut bullet.body));

    let enemy_captured = world
        .enemy
        .as_mut()
        .is_some_and(|enemy| apply_gravity(&well, &mut enemy.body));
    if enemy_captured {
        let score = world.tuning.enemy_captured_score;
        world.kill_enemy(score, true);
        world.emit(GameEvent::Explosion);
    }

    world
        .enemy_bullets
        .retain_mut(|shot| !apply_gravity(&well, &mut shot.body));

    if let Some(comet) = world.comet.as_mut() {
        apply_gravity(&well, &mut comet.body);
    }

    world.well = Some(well);
}

/// Pull strength at distance `d` from the well centre, zero outside the field
pub fn pull_strength(well: &GravityWell, d: f32) -> f32 {
    if d >= well.outer_radius {
        0.0
    } else if d < well.inner_radius * 2.0 {
        WELL_CLOSE_PULL
    } else {
        WELL_BASE_PULL * (1.0 - d / well.outer_radius)
    }
}

/// Accelerate `body` toward the well; returns true if it was captured.
///
/// Capture requires being strictly inside the inner radius.
pub fn apply_gravity(well: &GravityWell, body: &mut Body) -> bool {
    let d = well.body.pos.distance(body.pos);
    if d >= well.outer_radius {
        return false;
    }

    let direction = if d > 0.0 {
        heading(angle_to(body.pos, well.body.pos))
    } else {
        Vec2::ZERO
    };
    body.vel += direction * pull_strength(well, d);

    d < well.inner_radius
}
