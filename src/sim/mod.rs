//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock readings arrive as tick arguments, never read globally
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod gravity;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, Bounds};
pub use entity::{
    Asteroid, BackgroundStar, Comet, Edge, Enemy, EnemyBullet, GravityWell, PlayerBullet, Ship,
    TrailParticle,
};
pub use gravity::apply_gravity;
pub use snapshot::{EntityKind, Hud, RenderItem};
pub use state::{GameEvent, GamePhase, World};
pub use tick::{TickInput, tick};
