//! Entity data and per-type update rules
//!
//! Each entity kind is a plain struct embedding a [`Body`]. Updates never
//! touch other entities; anything an update produces (a fired shot) is
//! returned to the caller.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::body::{Body, Bounds};
use crate::consts::*;
use crate::{angle_to, heading};

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Thrust input was held this tick
    pub thrusting: bool,
    /// Clock reading of the last shot, if any
    pub last_shot_ms: Option<u64>,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, SHIP_RADIUS),
            thrusting: false,
            last_shot_ms: None,
        }
    }

    /// Turn by `direction` (-1 left, +1 right) times `speed` radians
    pub fn rotate(&mut self, direction: f32, speed: f32) {
        self.body.angle += direction * speed;
    }

    /// Apply thrust and friction, then move
    pub fn update(&mut self, bounds: &Bounds, thrust: f32, friction: f32) {
        if self.thrusting {
            self.body.vel += heading(self.body.angle) * thrust;
        }
        self.body.vel *= friction;
        self.body.advance(bounds);
    }

    /// Fire if the cooldown has elapsed since the last shot
    pub fn try_fire(&mut self, now_ms: u64, cooldown_ms: u64) -> Option<PlayerBullet> {
        let ready = self
            .last_shot_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > cooldown_ms);
        if !ready {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        Some(PlayerBullet::new(self.body.pos, self.body.angle))
    }

    /// Put the ship back at `center`, at rest, keeping its heading
    pub fn reposition(&mut self, center: Vec2) {
        self.body.pos = center;
        self.body.vel = Vec2::ZERO;
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    /// Radians per tick
    pub spin: f32,
    /// Outline vertices relative to the centre, unrotated
    pub outline: Vec<Vec2>,
}

impl Asteroid {
    /// New asteroid with a random heading, speed, spin and outline
    pub fn new<R: Rng + ?Sized>(pos: Vec2, radius: f32, rng: &mut R) -> Self {
        let speed = rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        let direction = rng.random_range(0.0..TAU);
        let spin = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let body = Body::new(pos, radius).with_velocity(heading(direction) * speed);
        let outline = Self::generate_outline(body.radius, rng);
        Self {
            body,
            spin,
            outline,
        }
    }

    fn generate_outline<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec<Vec2> {
        let count = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
        let half = ASTEROID_OUTLINE_VARIANCE / 2.0;
        (0..count)
            .map(|i| {
                let theta = i as f32 / count as f32 * TAU;
                let distance = radius * (1.0 + rng.random_range(-half..half));
                heading(theta) * distance
            })
            .collect()
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.body.advance(bounds);
        self.body.angle += self.spin;
    }

    /// Fragments left behind when shot: two half-size rocks, or none
    pub fn fragments<R: Rng + ?Sized>(&self, split_threshold: f32, rng: &mut R) -> Vec<Asteroid> {
        if self.body.radius <= split_threshold {
            return Vec::new();
        }
        let radius = self.body.radius / 2.0;
        (0..2).map(|_| Asteroid::new(self.body.pos, radius, rng)).collect()
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub body: Body,
    /// Ticks left before the bullet fizzles
    pub lifespan: u32,
}

impl PlayerBullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        let mut body = Body::new(pos, BULLET_RADIUS).with_velocity(heading(angle) * BULLET_SPEED);
        body.angle = angle;
        Self {
            body,
            lifespan: BULLET_LIFESPAN,
        }
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.body.advance(bounds);
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.lifespan == 0
    }
}

/// A shot fired by the enemy, aimed once at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub body: Body,
    pub lifespan: u32,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, target: Vec2) -> Self {
        let angle = angle_to(pos, target);
        let mut body =
            Body::new(pos, ENEMY_BULLET_RADIUS).with_velocity(heading(angle) * ENEMY_BULLET_SPEED);
        body.angle = angle;
        Self {
            body,
            lifespan: ENEMY_BULLET_LIFESPAN,
        }
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.body.advance(bounds);
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.lifespan == 0
    }
}

/// The saucer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub hit_points: u8,
    pub last_shot_ms: u64,
    pub shot_interval_ms: u64,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(
        pos: Vec2,
        hit_points: u8,
        now_ms: u64,
        fire_range_ms: (u64, u64),
        rng: &mut R,
    ) -> Self {
        let vel = Vec2::new(
            rng.random_range(-ENEMY_MAX_AXIS_SPEED..ENEMY_MAX_AXIS_SPEED),
            rng.random_range(-ENEMY_MAX_AXIS_SPEED..ENEMY_MAX_AXIS_SPEED),
        );
        Self {
            body: Body::new(pos, ENEMY_RADIUS).with_velocity(vel),
            hit_points: hit_points.max(1),
            last_shot_ms: now_ms,
            shot_interval_ms: rng.random_range(fire_range_ms.0..fire_range_ms.1),
        }
    }

    /// Move, then fire at `target` once the shot interval has passed
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bounds: &Bounds,
        target: Vec2,
        now_ms: u64,
        fire_range_ms: (u64, u64),
        rng: &mut R,
    ) -> Option<EnemyBullet> {
        self.body.advance(bounds);

        if now_ms.saturating_sub(self.last_shot_ms) <= self.shot_interval_ms {
            return None;
        }
        self.last_shot_ms = now_ms;
        self.shot_interval_ms = rng.random_range(fire_range_ms.0..fire_range_ms.1);
        Some(EnemyBullet::new(self.body.pos, target))
    }

    /// Take one hit; true once destroyed
    pub fn hit(&mut self) -> bool {
        self.hit_points = self.hit_points.saturating_sub(1);
        self.hit_points == 0
    }
}

/// The gravity well hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityWell {
    /// Drift body; its radius is the drawn core
    pub body: Body,
    /// Closer than this and a body is captured
    pub inner_radius: f32,
    /// No pull at or beyond this distance
    pub outer_radius: f32,
    /// Accretion disk rotation (cosmetic)
    pub disk_angle: f32,
}

impl GravityWell {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let drift = Vec2::new(
            rng.random_range(-WELL_MAX_AXIS_DRIFT..WELL_MAX_AXIS_DRIFT),
            rng.random_range(-WELL_MAX_AXIS_DRIFT..WELL_MAX_AXIS_DRIFT),
        );
        Self {
            body: Body::new(pos, WELL_CORE_RADIUS).with_velocity(drift),
            inner_radius: WELL_INNER_RADIUS,
            outer_radius: WELL_OUTER_RADIUS,
            disk_angle: 0.0,
        }
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.body.advance(bounds);
        self.disk_angle = (self.disk_angle + WELL_DISK_SPIN) % TAU;
    }
}

/// Screen edge a hazard enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Random point `offset` pixels beyond this edge (negative offset lands inside)
    pub fn point_beyond<R: Rng + ?Sized>(self, bounds: &Bounds, offset: f32, rng: &mut R) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-offset, rng.random_range(0.0..bounds.height)),
            Edge::Right => Vec2::new(bounds.width + offset, rng.random_range(0.0..bounds.height)),
            Edge::Top => Vec2::new(rng.random_range(0.0..bounds.width), -offset),
            Edge::Bottom => Vec2::new(rng.random_range(0.0..bounds.width), bounds.height + offset),
        }
    }
}

/// Cosmetic particle shed by the comet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Fast hazard that crosses the screen on a line fixed at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comet {
    pub body: Body,
    pub active: bool,
    #[serde(skip)]
    pub particles: Vec<TrailParticle>,
}

impl Comet {
    /// Enter beyond `edge`, heading for `target`
    pub fn new<R: Rng + ?Sized>(edge: Edge, bounds: &Bounds, target: Vec2, rng: &mut R) -> Self {
        let pos = edge.point_beyond(bounds, COMET_SPAWN_OFFSET, rng);
        let angle = angle_to(pos, target);
        let mut body = Body::new(pos, COMET_RADIUS).with_velocity(heading(angle) * COMET_SPEED);
        body.angle = angle;
        Self {
            body,
            active: true,
            particles: Vec::with_capacity(COMET_MAX_PARTICLES),
        }
    }

    /// Move without wrapping; goes inactive once well clear of the screen
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.body.translate();

        if rng.random_bool(COMET_PARTICLE_CHANCE) {
            let back = heading(self.body.angle);
            let distance = rng.random_range(0.0..self.body.radius * 2.0);
            let jitter = Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5));
            self.particles.push(TrailParticle {
                pos: self.body.pos - back * distance,
                vel: jitter - self.body.vel * 0.1,
                size: rng.random_range(2.0..5.0),
                life: 1.0,
            });
        }
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= COMET_PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
        if self.particles.len() > COMET_MAX_PARTICLES {
            let excess = self.particles.len() - COMET_MAX_PARTICLES;
            self.particles.drain(..excess);
        }

        if !bounds.contains_with_margin(self.body.pos, COMET_EXIT_MARGIN) {
            self.active = false;
        }
    }
}

/// Twinkling backdrop star (never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundStar {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
}

impl BackgroundStar {
    pub fn new<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..bounds.width),
                rng.random_range(0.0..bounds.height),
            ),
            size: rng.random_range(0.0..2.0),
            brightness: rng.random(),
            twinkle_speed: rng.random_range(0.03..0.08),
            twinkle_phase: rng.random_range(0.0..TAU),
        }
    }

    pub fn update(&mut self) {
        self.twinkle_phase += self.twinkle_speed;
        if self.twinkle_phase > TAU {
            self.twinkle_phase -= TAU;
        }
    }

    /// Brightness including the twinkle, capped at 1
    pub fn current_brightness(&self) -> f32 {
        let twinkle = (self.twinkle_phase.sin() + 1.0) * 0.3;
        (self.brightness + twinkle).min(1.0)
    }
}
