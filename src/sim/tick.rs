//! Per-frame simulation tick
//!
//! Core game loop: input → entity updates → spawning → gravity → collisions
//! → pruning, once per rendered frame.

use std::cmp::Ordering;

use super::collision;
use super::gravity;
use super::spawn;
use super::state::{GameEvent, GamePhase, World};
use crate::{angle_to, normalize_angle};

/// Control state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Start from the title screen, or restart after game over (space/click)
    pub start: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Combine two input sources (keyboard and touch): a control is held if
    /// either source holds it
    pub fn merged(self, other: TickInput) -> TickInput {
        TickInput {
            rotate_left: self.rotate_left || other.rotate_left,
            rotate_right: self.rotate_right || other.rotate_right,
            thrust: self.thrust || other.thrust,
            fire: self.fire || other.fire,
            start: self.start || other.start,
            idle_mode: self.idle_mode || other.idle_mode,
        }
    }
}

/// Advance the world by one frame at clock reading `now_ms`.
///
/// `now_ms` should be monotonic; a reading older than the previous tick is
/// treated as no time passing.
pub fn tick(world: &mut World, input: &TickInput, now_ms: u64) {
    let now_ms = now_ms.max(world.now_ms);
    world.now_ms = now_ms;

    let mut input = *input;
    if input.idle_mode {
        autopilot(world, &mut input);
    }

    // Backdrop twinkles on every screen
    for star in &mut world.stars {
        star.update();
    }

    if input.start {
        let started = match world.phase {
            GamePhase::NotStarted => world.start_session(now_ms),
            GamePhase::GameOver => world.restart_session(now_ms),
            GamePhase::Running => false,
        };
        if started {
            return;
        }
    }

    // Don't tick entities on the title screen or after game over
    if world.phase != GamePhase::Running {
        return;
    }

    world.time_ticks += 1;

    apply_input(world, &input, now_ms);
    update_entities(world, now_ms);
    spawn::run(world);
    gravity::run(world);
    collision::resolve(world);
    prune(world);
}

fn apply_input(world: &mut World, input: &TickInput, now_ms: u64) {
    let speed = world.tuning.ship_rotation_speed;
    let ship = &mut world.ship;
    ship.thrusting = input.thrust;
    if input.rotate_left {
        ship.rotate(-1.0, speed);
    }
    if input.rotate_right {
        ship.rotate(1.0, speed);
    }

    if input.fire {
        let cooldown = world.tuning.fire_cooldown_ms;
        if let Some(bullet) = world.ship.try_fire(now_ms, cooldown) {
            world.bullets.push(bullet);
            world.emit(GameEvent::Fired);
        }
    }
}

fn update_entities(world: &mut World, now_ms: u64) {
    let bounds = world.bounds;
    let tuning = &world.tuning;

    world
        .ship
        .update(&bounds, tuning.ship_thrust, tuning.ship_friction);

    for rock in &mut world.asteroids {
        rock.update(&bounds);
    }

    world.bullets.retain_mut(|bullet| {
        bullet.update(&bounds);
        !bullet.is_expired()
    });
    world.enemy_bullets.retain_mut(|shot| {
        shot.update(&bounds);
        !shot.is_expired()
    });

    let target = world.ship.body.pos;
    let fire_range = (tuning.enemy_fire_min_ms, tuning.enemy_fire_max_ms);
    let shot = world
        .enemy
        .as_mut()
        .and_then(|enemy| enemy.update(&bounds, target, now_ms, fire_range, &mut world.rng));
    if let Some(shot) = shot {
        world.enemy_bullets.push(shot);
        world.emit(GameEvent::EnemyShot);
    }

    if let Some(well) = world.well.as_mut() {
        well.update(&bounds);
    }
    if let Some(comet) = world.comet.as_mut() {
        comet.update(&bounds, &mut world.rng);
    }
}

/// Drop a comet that left the screen or hit the ship.
///
/// Expired bullets are already dropped while they update.
fn prune(world: &mut World) {
    if world.comet.as_ref().is_some_and(|comet| !comet.active) {
        world.comet = None;
    }
}

/// Demo pilot: start sessions, turn toward the nearest target and shoot
fn autopilot(world: &World, input: &mut TickInput) {
    if world.phase != GamePhase::Running {
        input.start = true;
        return;
    }

    let ship = &world.ship.body;
    let nearest = world
        .asteroids
        .iter()
        .map(|rock| rock.body.pos)
        .chain(world.enemy.iter().map(|enemy| enemy.body.pos))
        .min_by(|a, b| {
            a.distance(ship.pos)
                .partial_cmp(&b.distance(ship.pos))
                .unwrap_or(Ordering::Equal)
        });
    let Some(target) = nearest else {
        return;
    };

    // Oscillating aim offset so demo runs don't settle into a fixed pattern
    let time_factor = world.time_ticks as f32 * 0.01;
    let sway = time_factor.sin() * 0.1 + (time_factor * 0.7).sin() * 0.05;

    let delta = normalize_angle(angle_to(ship.pos, target) + sway - ship.angle);
    input.rotate_left = delta < -0.05;
    input.rotate_right = delta > 0.05;
    input.fire = delta.abs() < 0.2;
    input.thrust = delta.abs() < 0.5 && ship.pos.distance(target) > 250.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bounds;
    use glam::Vec2;

    fn started(seed: u64) -> World {
        let mut world = World::new(seed, Bounds::new(800.0, 600.0));
        tick(
            &mut world,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0,
        );
        world
    }

    #[test]
    fn test_title_screen_holds_still() {
        let mut world = World::new(1, Bounds::default());
        let input = TickInput {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, 16);
        assert_eq!(world.phase, GamePhase::NotStarted);
        assert!(world.bullets.is_empty());
        assert_eq!(world.time_ticks, 0);
    }

    #[test]
    fn test_start_input() {
        let world = started(1);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.asteroids.len(), 5);
        assert_eq!(world.events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_rotation_and_thrust() {
        let mut world = started(2);
        world.asteroids.clear();
        let input = TickInput {
            rotate_right: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input, 16);
        assert!((world.ship.body.angle - 0.1).abs() < 1e-6);
        assert!(world.ship.thrusting);
        assert!(world.ship.body.vel.length() > 0.0);

        tick(
            &mut world,
            &TickInput {
                rotate_left: true,
                ..Default::default()
            },
            32,
        );
        assert!(world.ship.body.angle.abs() < 1e-6);
        assert!(!world.ship.thrusting);
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut world = started(3);
        world.asteroids.clear();
        world.drain_events();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &fire, 1_000);
        tick(&mut world, &fire, 1_050);
        tick(&mut world, &fire, 1_100);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.drain_events(), vec![GameEvent::Fired]);

        tick(&mut world, &fire, 1_251);
        assert_eq!(world.bullets.len(), 2);
    }

    #[test]
    fn test_bullets_expire() {
        let mut world = started(4);
        world.asteroids.clear();
        tick(
            &mut world,
            &TickInput {
                fire: true,
                ..Default::default()
            },
            1,
        );
        assert_eq!(world.bullets.len(), 1);
        for i in 0..99 {
            tick(&mut world, &TickInput::default(), 2 + i);
        }
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_enemy_appears_and_fires() {
        let mut world = started(5);
        world.asteroids.clear();
        let spawn_at = world.enemy_spawn_interval_ms + 1;
        tick(&mut world, &TickInput::default(), spawn_at);
        assert!(world.enemy.is_some());
        world.drain_events();

        // Keep the enemy away from the ship so it survives
        if let Some(enemy) = world.enemy.as_mut() {
            enemy.body.pos = Vec2::new(50.0, 50.0);
            enemy.body.vel = Vec2::ZERO;
        }
        tick(&mut world, &TickInput::default(), spawn_at + 3_001);
        assert_eq!(world.enemy_bullets.len(), 1);
        assert!(world.events.contains(&GameEvent::EnemyShot));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut world = started(6);
        tick(&mut world, &TickInput::default(), 5_000);
        tick(&mut world, &TickInput::default(), 4_000);
        assert_eq!(world.now_ms, 5_000);
    }

    #[test]
    fn test_merged_input() {
        let keyboard = TickInput {
            thrust: true,
            ..Default::default()
        };
        let touch = TickInput {
            fire: true,
            ..Default::default()
        };
        let both = keyboard.merged(touch);
        assert!(both.thrust && both.fire);
        assert!(!both.rotate_left);
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99_999);
        let mut b = started(99_999);
        let inputs = [
            TickInput {
                thrust: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                rotate_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for frame in 1..600u64 {
            let input = &inputs[(frame % 3) as usize];
            tick(&mut a, input, frame * 50);
            tick(&mut b, input, frame * 50);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        assert_eq!(a.ship.body.pos, b.ship.body.pos);
    }

    #[test]
    fn test_idle_mode_plays() {
        let mut world = World::new(7, Bounds::new(800.0, 600.0));
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut world, &idle, 0);
        assert_eq!(world.phase, GamePhase::Running);
        for frame in 1..300u64 {
            tick(&mut world, &idle, frame * 16);
        }
        assert!(world.time_ticks > 0);

        // Demo keeps cycling: a finished session is restarted on the next tick
        world.lives = 1;
        world.lose_life();
        assert_eq!(world.phase, GamePhase::GameOver);
        world.drain_events();
        tick(&mut world, &idle, 300 * 16);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.lives, 3);
        assert_eq!(world.events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_autopilot_aim_sways_over_time() {
        let mut world = started(8);
        world.asteroids.truncate(1);
        world.asteroids[0].body.pos = world.ship.body.pos + Vec2::new(100.0, 0.0);
        world.ship.body.angle = 0.0;

        world.time_ticks = 0;
        let mut steady = TickInput::default();
        autopilot(&world, &mut steady);
        assert!(!steady.rotate_left && !steady.rotate_right);
        assert!(steady.fire);

        // sin(1.57) peaks the offset
        world.time_ticks = 157;
        let mut swayed = TickInput::default();
        autopilot(&world, &mut swayed);
        assert!(swayed.rotate_right);
        assert!(swayed.fire);
    }
}
