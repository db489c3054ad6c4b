use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rock_drift::sim::{
    Bounds, EnemyBullet, GameEvent, GamePhase, GravityWell, PlayerBullet, TickInput, World, tick,
};

fn start_input() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

fn running_world(seed: u64) -> World {
    let mut world = World::new(seed, Bounds::new(800.0, 600.0));
    tick(&mut world, &start_input(), 0);
    world
}

/// Drive a session to game over by parking enemy bullets on the ship
fn play_until_game_over(world: &mut World, mut now: u64) -> u64 {
    let mut guard = 0;
    while world.phase != GamePhase::GameOver {
        let pos = world.ship.body.pos;
        world.enemy_bullets.push(EnemyBullet::new(pos, pos + Vec2::X));
        now += 16;
        tick(world, &TickInput::default(), now);
        guard += 1;
        assert!(guard < 100, "session never ended");
    }
    now
}

#[test]
fn start_session_initial_state() {
    let world = running_world(10);
    assert_eq!(world.phase, GamePhase::Running);
    assert_eq!(world.asteroids.len(), 5);
    assert_eq!(world.score, 0);
    assert_eq!(world.lives, 3);
    assert_eq!(world.ship.body.vel, Vec2::ZERO);
    assert_eq!(world.ship.body.pos, world.bounds.center());
}

#[test]
fn firing_twice_within_100ms_yields_one_bullet() {
    let mut world = running_world(11);
    world.asteroids.clear();
    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    tick(&mut world, &fire, 500);
    tick(&mut world, &fire, 580);
    assert_eq!(world.bullets.len(), 1);
}

#[test]
fn game_over_freezes_entities() {
    let mut world = running_world(12);
    let now = play_until_game_over(&mut world, 0);
    assert_eq!(world.lives, 0);

    let rocks: Vec<Vec2> = world.asteroids.iter().map(|a| a.body.pos).collect();
    let ship = world.ship.body.pos;
    tick(
        &mut world,
        &TickInput {
            thrust: true,
            fire: true,
            ..Default::default()
        },
        now + 16,
    );
    let after: Vec<Vec2> = world.asteroids.iter().map(|a| a.body.pos).collect();
    assert_eq!(rocks, after);
    assert_eq!(world.ship.body.pos, ship);
    assert!(world.bullets.is_empty());
    assert_eq!(world.phase, GamePhase::GameOver);
}

#[test]
fn restart_resets_session() {
    let mut world = running_world(13);
    world.score = 1_200;
    world.enemy_kills = 2;
    let now = play_until_game_over(&mut world, 0);

    world.bullets.push(PlayerBullet::new(Vec2::new(5.0, 5.0), 0.0));
    let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
    world.well = Some(GravityWell::new(Vec2::new(100.0, 100.0), &mut rng));
    world.drain_events();

    tick(&mut world, &start_input(), now + 16);

    assert_eq!(world.phase, GamePhase::Running);
    assert_eq!(world.lives, 3);
    assert_eq!(world.score, 0);
    assert_eq!(world.enemy_kills, 0);
    assert!(world.bullets.is_empty());
    assert!(world.enemy_bullets.is_empty());
    assert!(world.enemy.is_none());
    assert!(world.well.is_none());
    assert!(world.comet.is_none());
    assert_eq!(world.asteroids.len(), 5);
    assert_eq!(world.events, vec![GameEvent::SessionStarted]);
}

#[test]
fn start_while_running_is_ignored() {
    let mut world = running_world(14);
    world.score = 700;
    tick(&mut world, &start_input(), 16);
    assert_eq!(world.score, 700);
    assert_eq!(world.phase, GamePhase::Running);
}

#[test]
fn stars_survive_restarts() {
    let mut world = running_world(15);
    let count = world.stars.len();
    let now = play_until_game_over(&mut world, 0);
    tick(&mut world, &start_input(), now + 16);
    assert_eq!(world.stars.len(), count);
}

#[test]
fn resize_applies_next_tick() {
    let mut world = running_world(16);
    world.asteroids.clear();
    world.set_bounds(Bounds::new(400.0, 300.0));
    world.ship.body.pos = Vec2::new(700.0, 500.0);
    tick(&mut world, &TickInput::default(), 16);
    assert!(world.ship.body.pos.x < 400.0);
    assert!(world.ship.body.pos.y < 300.0);
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(rotate_left, rotate_right, thrust, fire)| TickInput {
            rotate_left,
            rotate_right,
            thrust,
            fire,
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let mut world = running_world(seed);
        let mut last = world.score;
        for (frame, input) in inputs.iter().enumerate() {
            tick(&mut world, input, (frame as u64 + 1) * 50);
            prop_assert!(world.score >= last);
            last = world.score;
        }
    }

    #[test]
    fn wrapped_bodies_stay_on_screen(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let mut world = running_world(seed);
        for (frame, input) in inputs.iter().enumerate() {
            // An enemy enters from beyond an edge and wraps from its first update on
            let enemy_advanced = world.enemy.is_some();
            tick(&mut world, input, (frame as u64 + 1) * 16);
            let b = world.bounds;
            let on_screen = |p: Vec2| p.x >= 0.0 && p.x < b.width && p.y >= 0.0 && p.y < b.height;
            if world.phase == GamePhase::Running {
                prop_assert!(on_screen(world.ship.body.pos));
            }
            for rock in &world.asteroids {
                prop_assert!(on_screen(rock.body.pos));
            }
            for bullet in &world.bullets {
                prop_assert!(on_screen(bullet.body.pos));
            }
            for shot in &world.enemy_bullets {
                prop_assert!(on_screen(shot.body.pos));
            }
            if let Some(enemy) = world.enemy.as_ref().filter(|_| enemy_advanced) {
                prop_assert!(on_screen(enemy.body.pos));
            }
            if let Some(well) = &world.well {
                prop_assert!(on_screen(well.body.pos));
            }
        }
    }
}
