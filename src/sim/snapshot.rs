//! Read-only views for the HUD and renderer

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, World};

/// What the scoreboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub enemy_kills: u32,
    pub lives: u8,
    pub phase: GamePhase,
}

/// Entity kind tag for draw dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    GravityWell,
    Ship,
    Enemy,
    Asteroid,
    PlayerBullet,
    EnemyBullet,
    Comet,
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderItem {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub angle: f32,
    pub radius: f32,
}

impl World {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            enemy_kills: self.enemy_kills,
            lives: self.lives,
            phase: self.phase,
        }
    }

    /// Gameplay entities in back-to-front draw order (stars excluded)
    pub fn render_items(&self) -> Vec<RenderItem> {
        if self.phase == GamePhase::NotStarted {
            return Vec::new();
        }

        let mut items = Vec::with_capacity(
            3 + self.asteroids.len() + self.bullets.len() + self.enemy_bullets.len(),
        );
        let mut push = |kind, body: &super::Body| {
            items.push(RenderItem {
                kind,
                pos: body.pos,
                angle: body.angle,
                radius: body.radius,
            })
        };

        if let Some(well) = &self.well {
            push(EntityKind::GravityWell, &well.body);
        }
        push(EntityKind::Ship, &self.ship.body);
        if let Some(enemy) = &self.enemy {
            push(EntityKind::Enemy, &enemy.body);
        }
        for rock in &self.asteroids {
            push(EntityKind::Asteroid, &rock.body);
        }
        for bullet in &self.bullets {
            push(EntityKind::PlayerBullet, &bullet.body);
        }
        for shot in &self.enemy_bullets {
            push(EntityKind::EnemyBullet, &shot.body);
        }
        if let Some(comet) = self.comet.as_ref().filter(|c| c.active) {
            push(EntityKind::Comet, &comet.body);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bounds;

    #[test]
    fn test_hud_tracks_world() {
        let mut world = World::new(3, Bounds::default());
        world.start_session(0);
        world.score = 300;
        let hud = world.hud();
        assert_eq!(hud.score, 300);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.phase, GamePhase::Running);
    }

    #[test]
    fn test_render_items_order() {
        let mut world = World::new(3, Bounds::default());
        assert!(world.render_items().is_empty());

        world.start_session(0);
        let items = world.render_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].kind, EntityKind::Ship);
        assert!(items[1..].iter().all(|i| i.kind == EntityKind::Asteroid));
    }

    #[test]
    fn test_hud_serializes() {
        let world = World::new(3, Bounds::default());
        let json = serde_json::to_string(&world.hud()).unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
    }
}
