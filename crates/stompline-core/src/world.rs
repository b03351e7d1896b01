//! The entity stores owned by the simulation driver.
//!
//! A `World` is rebuilt from its [`LevelDescriptor`] whenever a level starts,
//! so every attempt begins from the authored state. Entity lists keep their
//! authored order; collision passes iterate them front to back.
//!
//! # Lookups
//!
//! Entities are addressed by [`EntityId`]. A lookup of an id that is not in
//! the store returns `None`, and every mutation helper is a no-op for such an
//! id. Ids can legitimately disappear between being observed and being acted
//! on within one frame, so a missing id is never an error.
//!
//! # Example
//!
//! ```
//! use stompline_core::entity::{EntityClass, EntityId};
//! use stompline_core::level::LevelSet;
//! use stompline_core::world::World;
//!
//! let levels = LevelSet::builtin().unwrap();
//! let mut world = World::from_level(levels.get(1).unwrap());
//!
//! assert!(world.has_entity(EntityClass::Enemy, &EntityId::new("goomba1")));
//! assert!(world.kill_enemy(&EntityId::new("goomba1")));
//! assert!(!world.kill_enemy(&EntityId::new("no-such-enemy")));
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{
    BlockStrike, CoinPop, CollectibleState, EnemyState, EntityClass, EntityId, ItemKind,
    PlatformState, PlayerState, PowerTier,
};
use crate::level::LevelDescriptor;

// =============================================================================
// Camera
// =============================================================================

/// Horizontal scroll offset that follows the player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Left edge of the visible area in world space.
    pub x: f32,
}

impl Camera {
    /// Eases toward centering `player_x`, staying inside the level.
    ///
    /// The result is rounded to whole pixels.
    pub fn follow(&mut self, player_x: f32, level_width: f32, viewport_width: f32, smoothing: f32) {
        let max_x = (level_width - viewport_width).max(0.0);
        let target = (player_x - viewport_width / 2.0).clamp(0.0, max_x);
        self.x = (self.x + (target - self.x) * smoothing).round();
    }
}

// =============================================================================
// World
// =============================================================================

/// Mutable entity state for the level being played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    level_id: u32,
    width: f32,
    height: f32,
    start: Vec2,
    finish_x: f32,
    /// The player character.
    pub player: PlayerState,
    /// Enemies, in authored order. Dead enemies stay until the world is rebuilt.
    pub enemies: Vec<EnemyState>,
    /// Platforms, in authored order. Broken bricks stay with zero extent.
    pub platforms: Vec<PlatformState>,
    /// Authored collectibles followed by items released from blocks.
    pub collectibles: Vec<CollectibleState>,
    /// Coin effects popped out of blocks.
    pub coin_pops: Vec<CoinPop>,
    /// Scroll offset.
    pub camera: Camera,
}

impl World {
    /// Instantiates fresh entity state from a level descriptor.
    #[must_use]
    pub fn from_level(level: &LevelDescriptor) -> Self {
        let start = level.start();
        Self {
            level_id: level.id,
            width: level.width,
            height: level.height,
            start,
            finish_x: level.finish_position.x,
            player: PlayerState::new(start),
            enemies: level.spawn_enemies(),
            platforms: level.spawn_platforms(),
            collectibles: level.spawn_collectibles(),
            coin_pops: Vec::new(),
            camera: Camera::default(),
        }
    }

    /// Id of the level this world was built from.
    #[must_use]
    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    /// Level extent along `x`.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Level extent along `y`; the player dies below it.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Player spawn point.
    #[must_use]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Reaching this `x` completes the level.
    #[must_use]
    pub fn finish_x(&self) -> f32 {
        self.finish_x
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Returns the enemy with this id.
    #[must_use]
    pub fn enemy(&self, id: &EntityId) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| &e.id == id)
    }

    /// Returns the enemy with this id, mutably.
    pub fn enemy_mut(&mut self, id: &EntityId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|e| &e.id == id)
    }

    /// Returns the platform with this id.
    #[must_use]
    pub fn platform(&self, id: &EntityId) -> Option<&PlatformState> {
        self.platforms.iter().find(|p| &p.id == id)
    }

    /// Returns the platform with this id, mutably.
    pub fn platform_mut(&mut self, id: &EntityId) -> Option<&mut PlatformState> {
        self.platforms.iter_mut().find(|p| &p.id == id)
    }

    /// Returns the collectible with this id.
    #[must_use]
    pub fn collectible(&self, id: &EntityId) -> Option<&CollectibleState> {
        self.collectibles.iter().find(|c| &c.id == id)
    }

    /// Returns the collectible with this id, mutably.
    pub fn collectible_mut(&mut self, id: &EntityId) -> Option<&mut CollectibleState> {
        self.collectibles.iter_mut().find(|c| &c.id == id)
    }

    /// Whether an entity of `class` with this id exists.
    ///
    /// There is exactly one player; it answers to any id.
    #[must_use]
    pub fn has_entity(&self, class: EntityClass, id: &EntityId) -> bool {
        match class {
            EntityClass::Player => true,
            EntityClass::Enemy => self.enemy(id).is_some(),
            EntityClass::Platform => self.platform(id).is_some(),
            EntityClass::Collectible => self.collectible(id).is_some(),
        }
    }

    /// Live enemies, in authored order.
    pub fn live_enemies(&self) -> impl Iterator<Item = &EnemyState> {
        self.enemies.iter().filter(|e| !e.is_dead)
    }

    /// Collectibles not yet picked up, in store order.
    pub fn active_collectibles(&self) -> impl Iterator<Item = &CollectibleState> {
        self.collectibles.iter().filter(|c| !c.collected)
    }

    // -------------------------------------------------------------------------
    // Mutations by id
    // -------------------------------------------------------------------------

    /// Kills an enemy. Returns `false` if the id is unknown or already dead.
    pub fn kill_enemy(&mut self, id: &EntityId) -> bool {
        match self.enemy_mut(id) {
            Some(enemy) => enemy.kill(),
            None => {
                tracing::trace!(class = %EntityClass::Enemy, %id, "kill of missing entity ignored");
                false
            }
        }
    }

    /// Picks up a collectible. Returns `None` if unknown or already collected.
    pub fn collect(&mut self, id: &EntityId) -> Option<ItemKind> {
        match self.collectible_mut(id) {
            Some(item) => item.collect(),
            None => {
                tracing::trace!(class = %EntityClass::Collectible, %id, "pickup of missing entity ignored");
                None
            }
        }
    }

    /// Strikes a platform from below. Unknown ids are [`BlockStrike::Inert`].
    pub fn strike_block(&mut self, id: &EntityId, tier: PowerTier, bump_duration: f32) -> BlockStrike {
        match self.platform_mut(id) {
            Some(platform) => platform.strike_from_below(tier, bump_duration),
            None => {
                tracing::trace!(class = %EntityClass::Platform, %id, "strike of missing entity ignored");
                BlockStrike::Inert
            }
        }
    }

    /// Releases `item` from the block `id`: coins pop as an effect, anything
    /// else becomes a rising collectible.
    ///
    /// Does nothing for an unknown block.
    pub fn release_item(&mut self, id: &EntityId, item: ItemKind, rise_velocity: f32) {
        let Some(block) = self.platform(id) else {
            return;
        };
        if item == ItemKind::Coin {
            let pop = CoinPop::from_block(block);
            self.coin_pops.push(pop);
        } else {
            let released = CollectibleState::released_from(block, item, rise_velocity);
            self.collectibles.push(released);
        }
    }
}
