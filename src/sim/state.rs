//! World state and session lifecycle
//!
//! The [`World`] is the only mutable simulation state. It is owned by the
//! driver and mutated exclusively through [`super::tick`] and the session
//! commands below.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::Bounds;
use super::entity::{
    Asteroid, BackgroundStar, Comet, Enemy, EnemyBullet, GravityWell, PlayerBullet, Ship,
};
use super::spawn;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives exhausted, waiting for the restart command
    GameOver,
}

/// Discrete happenings for the audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Ship fired a bullet
    Fired,
    /// Something was shot or swallowed
    Explosion,
    /// Enemy fired at the ship
    EnemyShot,
    /// Ship lost a life
    Crash,
    /// Enemy destroyed; `captured` when the gravity well took it
    EnemyKilled { captured: bool },
    /// Last life lost
    GameOver { score: u64 },
    /// A fresh session began
    SessionStarted,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Playfield size used by the next tick
    pub bounds: Bounds,
    pub phase: GamePhase,

    pub ship: Ship,
    /// Live asteroids, in spawn order
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemy: Option<Enemy>,
    pub well: Option<GravityWell>,
    pub comet: Option<Comet>,
    /// Fixed backdrop, created once per world
    pub stars: Vec<BackgroundStar>,

    pub score: u64,
    pub enemy_kills: u32,
    pub lives: u8,

    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    /// Clock reading of the latest tick
    pub now_ms: u64,
    /// Last enemy spawn or death
    pub last_enemy_event_ms: u64,
    pub enemy_spawn_interval_ms: u64,
    pub last_comet_spawn_ms: u64,

    /// Emitted events not yet drained by a collaborator
    pub events: Vec<GameEvent>,
}

impl World {
    /// Create a world on the title screen with default tuning
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self::with_tuning(seed, bounds, Tuning::default())
    }

    pub fn with_tuning(seed: u64, bounds: Bounds, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                debug_assert!(false, "{err}");
                log::warn!("{err}; using default tuning");
                Tuning::default()
            }
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..tuning.star_count)
            .map(|_| BackgroundStar::new(&bounds, &mut rng))
            .collect();

        Self {
            seed,
            rng,
            lives: tuning.starting_lives,
            ship: Ship::new(bounds.center()),
            bounds,
            phase: GamePhase::NotStarted,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemy: None,
            well: None,
            comet: None,
            stars,
            score: 0,
            enemy_kills: 0,
            time_ticks: 0,
            now_ms: 0,
            last_enemy_event_ms: 0,
            enemy_spawn_interval_ms: tuning.enemy_spawn_min_ms,
            last_comet_spawn_ms: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// NotStarted → Running. No-op in any other phase.
    pub fn start_session(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::NotStarted {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.begin_session(now_ms);
        true
    }

    /// GameOver → Running with a fresh session. No-op in any other phase.
    pub fn restart_session(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.begin_session(now_ms);
        true
    }

    fn begin_session(&mut self, now_ms: u64) {
        self.ship = Ship::new(self.bounds.center());
        self.asteroids.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemy = None;
        self.well = None;
        self.comet = None;
        self.score = 0;
        self.enemy_kills = 0;
        self.lives = self.tuning.starting_lives;
        self.now_ms = now_ms;
        self.last_enemy_event_ms = now_ms;
        self.enemy_spawn_interval_ms = spawn::roll_enemy_interval(self);
        self.last_comet_spawn_ms = now_ms;

        spawn::seed_asteroids(self);

        self.phase = GamePhase::Running;
        self.emit(GameEvent::SessionStarted);
        log::info!(
            "Session started (seed {}, {} asteroids)",
            self.seed,
            self.asteroids.len()
        );
    }

    /// Resize the playfield; takes effect from the next tick
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the pending events to a collaborator
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deduct a life and put the ship back at the centre.
    ///
    /// Ignored once the session is over. Returns true if a life was taken.
    pub fn lose_life(&mut self) -> bool {
        if !self.take_life() {
            return false;
        }
        if self.phase == GamePhase::Running {
            self.ship.reposition(self.bounds.center());
        }
        true
    }

    /// Like [`World::lose_life`] but the ship is rebuilt from scratch
    pub fn lose_life_to_gravity(&mut self) -> bool {
        if !self.take_life() {
            return false;
        }
        if self.phase == GamePhase::Running {
            self.ship = Ship::new(self.bounds.center());
        }
        true
    }

    fn take_life(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.emit(GameEvent::Crash);
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.emit(GameEvent::GameOver { score: self.score });
            log::info!(
                "Game over: score {}, enemies destroyed {}",
                self.score,
                self.enemy_kills
            );
        } else {
            log::debug!("Life lost, {} remaining", self.lives);
        }
        true
    }

    /// Remove the enemy and credit the kill
    pub fn kill_enemy(&mut self, score: u64, captured: bool) {
        if self.enemy.take().is_none() {
            return;
        }
        self.score += score;
        self.enemy_kills += 1;
        self.last_enemy_event_ms = self.now_ms;
        self.emit(GameEvent::EnemyKilled { captured });
    }

    /// Remove the enemy without credit (rammed by the ship)
    pub fn discard_enemy(&mut self) {
        if self.enemy.take().is_some() {
            self.last_enemy_event_ms = self.now_ms;
        }
    }
}
