//! Data-driven game balance
//!
//! Every knob that decides how hard a session is. Defaults reproduce the
//! classic arcade feel; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Game balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Lives at session start
    pub starting_lives: u8,
    /// Background star count (cosmetic)
    pub star_count: usize,

    // === Ship ===
    pub ship_thrust: f32,
    /// Radians per tick while a rotate input is held
    pub ship_rotation_speed: f32,
    /// Per-tick velocity multiplier
    pub ship_friction: f32,
    /// Minimum milliseconds between two shots
    pub fire_cooldown_ms: u64,

    // === Asteroids ===
    pub initial_asteroids: usize,
    /// Replenish only while fewer than this many are alive
    pub asteroid_floor: usize,
    /// Per-tick replenish probability
    pub asteroid_spawn_chance: f64,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    /// Asteroids bigger than this split in two when shot
    pub split_threshold: f32,

    // === Enemy ===
    pub enemy_spawn_min_ms: u64,
    pub enemy_spawn_max_ms: u64,
    pub enemy_fire_min_ms: u64,
    pub enemy_fire_max_ms: u64,
    pub enemy_hit_points: u8,

    // === Hazards ===
    /// Score at which the gravity well may appear
    pub well_score_threshold: u64,
    /// Per-tick well spawn probability once eligible
    pub well_spawn_chance: f64,
    /// Minimum per-axis distance between a fresh well and the ship
    pub well_min_ship_distance: f32,
    pub comet_interval_ms: u64,

    // === Scoring ===
    pub asteroid_score: u64,
    pub enemy_score: u64,
    pub enemy_captured_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            star_count: 150,

            ship_thrust: SHIP_THRUST,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_friction: SHIP_FRICTION,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,

            initial_asteroids: 5,
            asteroid_floor: 5,
            asteroid_spawn_chance: 0.01,
            asteroid_min_radius: 30.0,
            asteroid_max_radius: 50.0,
            split_threshold: 20.0,

            enemy_spawn_min_ms: 15_000,
            enemy_spawn_max_ms: 25_000,
            enemy_fire_min_ms: 2_000,
            enemy_fire_max_ms: 3_000,
            enemy_hit_points: 2,

            well_score_threshold: 1_000,
            well_spawn_chance: 0.001,
            well_min_ship_distance: 200.0,
            comet_interval_ms: 15_000,

            asteroid_score: 100,
            enemy_score: 500,
            enemy_captured_score: 200,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file is unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    /// Check that every range is usable by the spawner
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let floats = [
            ("ship_thrust", self.ship_thrust),
            ("ship_rotation_speed", self.ship_rotation_speed),
            ("ship_friction", self.ship_friction),
            ("asteroid_min_radius", self.asteroid_min_radius),
            ("asteroid_max_radius", self.asteroid_max_radius),
            ("split_threshold", self.split_threshold),
            ("well_min_ship_distance", self.well_min_ship_distance),
        ];
        if let Some((field, _)) = floats.into_iter().find(|(_, value)| !value.is_finite()) {
            return invalid(field, "must be a finite number");
        }

        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.initial_asteroids == 0 {
            return invalid("initial_asteroids", "must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.asteroid_spawn_chance) {
            return invalid("asteroid_spawn_chance", "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.well_spawn_chance) {
            return invalid("well_spawn_chance", "must be within [0, 1]");
        }
        if !(self.asteroid_min_radius > 0.0 && self.asteroid_min_radius < self.asteroid_max_radius) {
            return invalid("asteroid_min_radius", "must be positive and below asteroid_max_radius");
        }
        if self.split_threshold < 0.0 {
            return invalid("split_threshold", "must not be negative");
        }
        if self.enemy_spawn_min_ms >= self.enemy_spawn_max_ms {
            return invalid("enemy_spawn_min_ms", "must be below enemy_spawn_max_ms");
        }
        if self.enemy_fire_min_ms >= self.enemy_fire_max_ms {
            return invalid("enemy_fire_min_ms", "must be below enemy_fire_max_ms");
        }
        if self.enemy_hit_points == 0 {
            return invalid("enemy_hit_points", "must be at least 1");
        }
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return invalid("ship_friction", "must be within (0, 1]");
        }
        Ok(())
    }
}
