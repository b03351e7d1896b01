//! Patrolling ground enemies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::clock::sanitize_delta;
use crate::geometry::Rect;

/// Ground-walker variant. Both share the same patrol behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Mushroom walker.
    Goomba,
    /// Shelled walker.
    Koopa,
}

/// Inclusive `x` bounds within which an enemy reverses direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRange {
    /// Left bound, compared against the enemy's left edge.
    pub min: f32,
    /// Right bound, compared against the enemy's right edge.
    pub max: f32,
}

/// Mutable state of one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Level-unique id.
    pub id: EntityId,
    /// Variant.
    pub kind: EnemyKind,
    /// Top-left corner.
    pub position: Vec2,
    /// Collision extent.
    pub size: Vec2,
    /// Patrol speed (px/s). Forced to `0` on death.
    pub speed: f32,
    /// `-1.0` or `1.0`.
    pub direction: f32,
    /// Optional patrol bounds.
    pub range: Option<PatrolRange>,
    /// Stomped or star-killed.
    pub is_dead: bool,
    /// Time since death (s).
    pub death_timer: f32,
}

impl EnemyState {
    /// Creates a live enemy. Any non-negative `direction` becomes `1.0`.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        position: Vec2,
        size: Vec2,
        speed: f32,
        direction: f32,
        range: Option<PatrolRange>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            speed,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            range,
            is_dead: false,
            death_timer: 0.0,
        }
    }

    /// Collision rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Moves along the patrol, or ages the death animation.
    ///
    /// Reaching a range bound flips the direction without clamping, so a fast
    /// enemy may overshoot a bound by one frame's travel.
    pub fn update(&mut self, dt: f32) {
        let dt = sanitize_delta(dt);
        if self.is_dead {
            self.death_timer += dt;
            return;
        }

        self.position.x += self.speed * self.direction * dt;

        if let Some(range) = self.range {
            if self.position.x <= range.min {
                self.direction = 1.0;
            } else if self.position.x + self.size.x >= range.max {
                self.direction = -1.0;
            }
        }
    }

    /// Kills the enemy. Returns `false` if it was already dead.
    pub fn kill(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        self.death_timer = 0.0;
        self.speed = 0.0;
        true
    }

    /// Dead and past its death animation; no longer drawn or updated.
    #[must_use]
    pub fn is_retired(&self, death_duration: f32) -> bool {
        self.is_dead && self.death_timer > death_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goomba(x: f32, direction: f32, range: Option<PatrolRange>) -> EnemyState {
        EnemyState::new(
            EntityId::new("goomba1"),
            EnemyKind::Goomba,
            Vec2::new(x, 510.0),
            Vec2::new(40.0, 40.0),
            50.0,
            direction,
            range,
        )
    }

    #[test]
    fn moves_by_speed_times_direction() {
        let mut enemy = goomba(400.0, -1.0, None);
        enemy.update(0.1);
        assert!((enemy.position.x - 395.0).abs() < 1e-4);
    }

    #[test]
    fn flips_at_left_bound_without_clamping() {
        let range = PatrolRange {
            min: 300.0,
            max: 600.0,
        };
        let mut enemy = goomba(302.0, -1.0, Some(range));
        enemy.update(0.1);
        assert!((enemy.position.x - 297.0).abs() < 1e-4);
        assert_eq!(enemy.direction, 1.0);
    }

    #[test]
    fn flips_when_right_edge_reaches_bound() {
        let range = PatrolRange {
            min: 300.0,
            max: 600.0,
        };
        let mut enemy = goomba(558.0, 1.0, Some(range));
        enemy.update(0.1);
        assert_eq!(enemy.direction, -1.0);
    }

    #[test]
    fn unbounded_enemy_never_flips() {
        let mut enemy = goomba(10.0, -1.0, None);
        for _ in 0..100 {
            enemy.update(0.05);
        }
        assert_eq!(enemy.direction, -1.0);
        assert!(enemy.position.x < 0.0);
    }

    #[test]
    fn direction_is_normalized() {
        assert_eq!(goomba(0.0, -3.0, None).direction, -1.0);
        assert_eq!(goomba(0.0, 0.0, None).direction, 1.0);
    }

    #[test]
    fn dead_enemy_stops_and_ages() {
        let mut enemy = goomba(400.0, 1.0, None);
        assert!(enemy.kill());
        assert!(!enemy.kill());
        assert_eq!(enemy.speed, 0.0);

        enemy.update(0.6);
        assert_eq!(enemy.position.x, 400.0);
        assert!(!enemy.is_retired(1.0));

        enemy.update(0.6);
        assert!(enemy.is_retired(1.0));
    }
}
