//! Entity stores for the platformer simulation.
//!
//! Every entity is a plain data record owned by the [`World`](crate::world::World).
//! Rendering is not part of these records; a renderer reads a snapshot and
//! draws it.
//!
//! - [`PlayerState`]: the player-controlled character and its physics
//! - [`EnemyState`]: patrolling ground walkers
//! - [`PlatformState`]: static geometry, bonus blocks, breakable bricks
//! - [`CollectibleState`]: coins and power items, including items released
//!   from blocks
//! - [`CoinPop`]: short-lived coins that float out of a struck block
//!
//! # Example
//!
//! ```
//! use stompline_core::entity::EntityId;
//!
//! let id = EntityId::new("goomba1");
//! assert_eq!(id.as_str(), "goomba1");
//! assert_eq!(id.to_string(), "goomba1");
//! ```

pub mod collectible;
pub mod enemy;
pub mod platform;
pub mod player;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use collectible::{CoinPop, CollectibleState, ItemKind, ItemMotion};
pub use enemy::{EnemyKind, EnemyState, PatrolRange};
pub use platform::{BlockStrike, PlatformKind, PlatformState};
pub use player::{Facing, PlayerState, PowerKind, PowerTier};

/// Identifier of a level entity.
///
/// Ids come from the level descriptor (`"goomba1"`, `"question3"`) and are
/// unique within one entity class of a level. Items released from blocks get
/// derived ids such as `"question2:item"`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new `EntityId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the id of an item released from this block.
    #[must_use]
    pub fn released_item(&self) -> Self {
        Self(format!("{}:item", self.0))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Entity class, used to label events and lookups.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClass {
    /// The player character.
    Player,
    /// A patrolling enemy.
    Enemy,
    /// Level geometry or a block.
    Platform,
    /// A coin or power item.
    Collectible,
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Platform => write!(f, "Platform"),
            Self::Collectible => write!(f, "Collectible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod entity_id_tests {
        use super::*;

        #[test]
        fn new_keeps_value() {
            let id = EntityId::new("coin4");
            assert_eq!(id.as_str(), "coin4");
        }

        #[test]
        fn equality_and_ordering() {
            let a = EntityId::new("a");
            let b = EntityId::from("b");
            assert_ne!(a, b);
            assert!(a < b);
            assert_eq!(a, EntityId::from("a".to_string()));
        }

        #[test]
        fn hashing() {
            use std::collections::HashSet;

            let mut set = HashSet::new();
            set.insert(EntityId::new("brick1"));
            set.insert(EntityId::new("brick2"));
            set.insert(EntityId::new("brick1"));
            assert_eq!(set.len(), 2);
        }

        #[test]
        fn debug_and_display_format() {
            let id = EntityId::new("koopa2");
            assert_eq!(format!("{id:?}"), "EntityId(koopa2)");
            assert_eq!(format!("{id}"), "koopa2");
        }

        #[test]
        fn released_item_id_is_derived_from_block() {
            let block = EntityId::new("question2");
            assert_eq!(block.released_item().as_str(), "question2:item");
        }

        #[test]
        fn serializes_as_plain_string() {
            let id = EntityId::new("pipe1");
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"pipe1\"");
            let back: EntityId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, id);
        }
    }

    #[test]
    fn entity_class_display() {
        assert_eq!(EntityClass::Player.to_string(), "Player");
        assert_eq!(EntityClass::Enemy.to_string(), "Enemy");
        assert_eq!(EntityClass::Platform.to_string(), "Platform");
        assert_eq!(EntityClass::Collectible.to_string(), "Collectible");
    }
}
