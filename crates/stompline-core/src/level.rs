//! Static level descriptors and the level set.
//!
//! A [`LevelDescriptor`] is immutable once loaded. Entity *state* is derived
//! from it each time a level starts (see [`World::from_level`]), so restarting
//! a level never observes mutations from a previous attempt.
//!
//! # Format
//!
//! Levels are JSON objects using the field names of the authoring tool:
//!
//! ```json
//! {
//!   "id": 1, "width": 2400, "height": 600,
//!   "startPosition": { "x": 50, "y": 450 },
//!   "finishPosition": { "x": 2300, "y": 450 },
//!   "platforms": [{ "id": "q1", "x": 350, "y": 350, "width": 40, "height": 40,
//!                   "type": "question", "containsItem": "coin" }],
//!   "enemies": [{ "id": "goomba1", "x": 400, "y": 510, "width": 40, "height": 40,
//!                 "type": "goomba", "speed": 50, "direction": -1,
//!                 "range": { "min": 300, "max": 600 } }],
//!   "collectibles": [{ "id": "coin1", "x": 300, "y": 500, "width": 30,
//!                      "height": 30, "type": "coin" }]
//! }
//! ```
//!
//! [`World::from_level`]: crate::world::World::from_level

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{
    CollectibleState, EnemyKind, EnemyState, EntityId, ItemKind, PatrolRange, PlatformKind,
    PlatformState,
};
use crate::error::LevelError;

const LEVEL_1: &str = include_str!("../levels/level1.json");
const LEVEL_2: &str = include_str!("../levels/level2.json");

/// A point in level space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Authored platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSpec {
    /// Level-unique id.
    pub id: EntityId,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
    /// Variant.
    #[serde(rename = "type")]
    pub kind: PlatformKind,
    /// Item released when struck from below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_item: Option<ItemKind>,
}

/// Authored enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Level-unique id.
    pub id: EntityId,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
    /// Variant.
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    /// Patrol speed (px/s).
    pub speed: f32,
    /// Initial direction, `-1` or `1`.
    pub direction: f32,
    /// Optional patrol bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<PatrolRange>,
}

/// Authored collectible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpec {
    /// Level-unique id.
    pub id: EntityId,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// One hand-authored level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    /// Level id, starting at 1.
    pub id: u32,
    /// Level extent along `x` (px).
    pub width: f32,
    /// Level extent along `y` (px). Falling below it kills the player.
    pub height: f32,
    /// Player spawn point.
    pub start_position: Point,
    /// Reaching this `x` completes the level.
    pub finish_position: Point,
    /// Static geometry and blocks, in collision priority order.
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,
    /// Enemies.
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    /// Coins and power items.
    #[serde(default)]
    pub collectibles: Vec<CollectibleSpec>,
}

impl LevelDescriptor {
    /// Parses and validates a single level.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Parse`] or [`LevelError::Invalid`].
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Checks the descriptor for authoring mistakes.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Invalid`] for non-positive level or entity
    /// extents, duplicate ids within an entity class, a finish or start
    /// outside the level, or a malformed patrol.
    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |reason: String| LevelError::Invalid {
            level: self.id,
            reason,
        };

        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(invalid(format!(
                "level extent must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=self.width).contains(&self.finish_position.x) {
            return Err(invalid(format!(
                "finish x {} lies outside level width {}",
                self.finish_position.x, self.width
            )));
        }
        if !(0.0..self.finish_position.x).contains(&self.start_position.x) {
            return Err(invalid(format!(
                "start x {} must lie in [0, {})",
                self.start_position.x, self.finish_position.x
            )));
        }

        check_entities(
            "platform",
            self.platforms.iter().map(|p| (&p.id, p.width, p.height)),
        )
        .map_err(invalid)?;
        check_entities(
            "enemy",
            self.enemies.iter().map(|e| (&e.id, e.width, e.height)),
        )
        .map_err(invalid)?;
        check_entities(
            "collectible",
            self.collectibles.iter().map(|c| (&c.id, c.width, c.height)),
        )
        .map_err(invalid)?;

        for enemy in &self.enemies {
            if !(enemy.speed.is_finite() && enemy.speed >= 0.0) {
                return Err(invalid(format!(
                    "enemy '{}' has invalid speed {}",
                    enemy.id, enemy.speed
                )));
            }
            if let Some(range) = enemy.range {
                if range.min >= range.max {
                    return Err(invalid(format!(
                        "enemy '{}' has empty patrol range [{}, {}]",
                        enemy.id, range.min, range.max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Player spawn point as a vector.
    #[must_use]
    pub fn start(&self) -> Vec2 {
        self.start_position.into()
    }

    /// Fresh platform states, in authored order.
    #[must_use]
    pub fn spawn_platforms(&self) -> Vec<PlatformState> {
        self.platforms
            .iter()
            .map(|p| {
                PlatformState::new(
                    p.id.clone(),
                    p.kind,
                    Vec2::new(p.x, p.y),
                    Vec2::new(p.width, p.height),
                    p.contains_item,
                )
            })
            .collect()
    }

    /// Fresh enemy states, in authored order.
    #[must_use]
    pub fn spawn_enemies(&self) -> Vec<EnemyState> {
        self.enemies
            .iter()
            .map(|e| {
                EnemyState::new(
                    e.id.clone(),
                    e.kind,
                    Vec2::new(e.x, e.y),
                    Vec2::new(e.width, e.height),
                    e.speed,
                    e.direction,
                    e.range,
                )
            })
            .collect()
    }

    /// Fresh, uncollected collectible states, in authored order.
    #[must_use]
    pub fn spawn_collectibles(&self) -> Vec<CollectibleState> {
        self.collectibles
            .iter()
            .map(|c| {
                CollectibleState::new(
                    c.id.clone(),
                    c.kind,
                    Vec2::new(c.x, c.y),
                    Vec2::new(c.width, c.height),
                )
            })
            .collect()
    }
}

fn check_entities<'a>(
    class: &str,
    entities: impl Iterator<Item = (&'a EntityId, f32, f32)>,
) -> Result<(), String> {
    let mut seen = HashSet::new();
    for (id, width, height) in entities {
        if !seen.insert(id) {
            return Err(format!("duplicate {class} id '{id}'"));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(format!(
                "{class} '{id}' has non-positive extent {width}x{height}"
            ));
        }
    }
    Ok(())
}

/// An ordered, validated collection of levels.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    levels: Vec<LevelDescriptor>,
}

impl LevelSet {
    /// Builds a set from already-parsed levels, validating each.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::EmptySet`] for no levels, and
    /// [`LevelError::Invalid`] for duplicate level ids or an invalid level.
    pub fn new(levels: Vec<LevelDescriptor>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptySet);
        }
        let mut ids = HashSet::new();
        for level in &levels {
            if !ids.insert(level.id) {
                return Err(LevelError::Invalid {
                    level: level.id,
                    reason: "duplicate level id".to_string(),
                });
            }
            level.validate()?;
        }
        tracing::debug!(count = levels.len(), "level set loaded");
        Ok(Self { levels })
    }

    /// The two levels shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded level data is corrupt.
    pub fn builtin() -> Result<Self, LevelError> {
        let levels = [LEVEL_1, LEVEL_2]
            .into_iter()
            .map(serde_json::from_str::<LevelDescriptor>)
            .collect::<Result<Vec<LevelDescriptor>, _>>()?;
        Self::new(levels)
    }

    /// Parses a JSON array of levels.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Parse`] for malformed JSON, otherwise the same
    /// errors as [`LevelSet::new`].
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Looks up a level by id.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::NotFound`] if no level has this id.
    pub fn get(&self, id: u32) -> Result<&LevelDescriptor, LevelError> {
        self.levels
            .iter()
            .find(|level| level.id == id)
            .ok_or(LevelError::NotFound { id })
    }

    /// Whether a level with this id exists.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.levels.iter().any(|level| level.id == id)
    }

    /// Id of the first level in the set.
    #[must_use]
    pub fn first_id(&self) -> u32 {
        self.levels.first().map_or(1, |level| level.id)
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; an empty set cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in set order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }
}
