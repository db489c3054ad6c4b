//! Collision resolution
//!
//! All tests are circle overlaps (`distance < r1 + r2`). The passes run in a
//! fixed order; removals are collected during a pass and applied after it so
//! no collection is mutated while it is being scanned.

use super::entity::Asteroid;
use super::state::{GameEvent, GamePhase, World};

/// Run every collision pass once, in order
pub fn resolve(world: &mut World) {
    resolve_player_bullets(world);
    resolve_ship_asteroids(world);
    resolve_ship_enemy(world);
    resolve_ship_enemy_bullets(world);
    resolve_ship_comet(world);
}

/// Bullets against the enemy first, then against asteroids.
///
/// Newest bullets and newest asteroids win ties. Fragments join the field
/// after the pass, so they cannot be hit by the shot that created them.
fn resolve_player_bullets(world: &mut World) {
    let bullets = std::mem::take(&mut world.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());
    let mut destroyed = vec![false; world.asteroids.len()];
    let mut fragments: Vec<Asteroid> = Vec::new();

    for bullet in bullets.into_iter().rev() {
        let hits_enemy = world
            .enemy
            .as_ref()
            .is_some_and(|enemy| enemy.body.overlaps(&bullet.body));
        if hits_enemy {
            world.emit(GameEvent::Explosion);
            let down = world.enemy.as_mut().is_some_and(|enemy| enemy.hit());
            if down {
                let score = world.tuning.enemy_score;
                world.kill_enemy(score, false);
                log::debug!("Enemy shot down");
            }
            continue;
        }

        let target = (0..world.asteroids.len())
            .rev()
            .find(|&i| !destroyed[i] && world.asteroids[i].body.overlaps(&bullet.body));
        if let Some(i) = target {
            destroyed[i] = true;
            let threshold = world.tuning.split_threshold;
            fragments.extend(world.asteroids[i].fragments(threshold, &mut world.rng));
            world.score += world.tuning.asteroid_score;
            world.emit(GameEvent::Explosion);
            continue;
        }

        survivors.push(bullet);
    }

    survivors.reverse();
    world.bullets = survivors;

    let mut index = 0;
    world.asteroids.retain(|_| {
        let keep = !destroyed[index];
        index += 1;
        keep
    });
    world.asteroids.extend(fragments);
}

fn resolve_ship_asteroids(world: &mut World) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let ship = world.ship.body;
    if world.asteroids.iter().any(|rock| rock.body.overlaps(&ship)) {
        world.lose_life();
    }
}

/// Ramming the enemy costs a life and removes it without credit
fn resolve_ship_enemy(world: &mut World) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let ship = world.ship.body;
    if world.enemy.as_ref().is_some_and(|enemy| enemy.body.overlaps(&ship)) {
        world.lose_life();
        world.discard_enemy();
    }
}

/// At most one enemy bullet lands per tick
fn resolve_ship_enemy_bullets(world: &mut World) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let ship = world.ship.body;
    let hit = world
        .enemy_bullets
        .iter()
        .rposition(|shot| shot.body.overlaps(&ship));
    if let Some(i) = hit {
        world.enemy_bullets.remove(i);
        world.lose_life();
    }
}

fn resolve_ship_comet(world: &mut World) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let ship = world.ship.body;
    let hit = world
        .comet
        .as_ref()
        .is_some_and(|comet| comet.active && comet.body.overlaps(&ship));
    if hit {
        world.lose_life();
        if let Some(comet) = world.comet.as_mut() {
            comet.active = false;
        }
    }
}
