//! Shared motion primitives
//!
//! Every moving entity embeds a [`Body`]. The playfield is a torus: whatever
//! leaves one edge re-enters from the opposite one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_BODY_RADIUS;
use crate::wrap_coordinate;

/// Playfield size, valid for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_WIDTH, crate::consts::DEFAULT_HEIGHT)
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "bounds must be positive");
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Wrap a point onto the torus
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            wrap_coordinate(pos.x, self.width),
            wrap_coordinate(pos.y, self.height),
        )
    }

    /// Whether `pos` lies inside the playfield grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

/// Position, velocity, orientation and collision radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation (radians)
    pub angle: f32,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive, got {radius}");
        debug_assert!(pos.is_finite(), "body position must be finite");
        let radius = if radius >= MIN_BODY_RADIUS {
            radius
        } else {
            log::warn!("Clamping body radius {radius} to {MIN_BODY_RADIUS}");
            MIN_BODY_RADIUS
        };
        let pos = if pos.is_finite() { pos } else { Vec2::ZERO };
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            radius,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Move one tick and wrap around the playfield
    pub fn advance(&mut self, bounds: &Bounds) {
        self.translate();
        self.pos = bounds.wrap(self.pos);
    }

    /// Move one tick without wrapping
    pub fn translate(&mut self) {
        self.pos += self.vel;
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Circle overlap: strictly closer than the sum of radii
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}
