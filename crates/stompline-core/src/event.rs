//! Notable things that happened during a tick.
//!
//! Resolvers and the simulation driver record an [`Event`] for every
//! gameplay-relevant mutation. The game state folds score, coins, and lives
//! out of these events, and hosts use them to trigger sounds and effects.
//! [`TickSummary`] condenses a tick's events into flags for hosts that only
//! need to know *whether* something happened.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, ItemKind};

/// A gameplay event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The player landed on an enemy while falling.
    EnemyStomped {
        /// The enemy that died.
        enemy: EntityId,
        /// Points awarded.
        points: u32,
    },
    /// An enemy touched the player during star power.
    EnemyStarKilled {
        /// The enemy that died.
        enemy: EntityId,
        /// Points awarded.
        points: u32,
    },
    /// An enemy touched a vulnerable player.
    PlayerHit {
        /// The enemy responsible.
        enemy: EntityId,
    },
    /// The player picked up an item.
    ItemCollected {
        /// The collectible.
        item: EntityId,
        /// What it was.
        kind: ItemKind,
        /// Points awarded.
        points: u32,
    },
    /// A growth item was collected while already big.
    ExtraLife {
        /// The collectible.
        item: EntityId,
    },
    /// A block released an item.
    BlockHit {
        /// The block.
        block: EntityId,
        /// What came out.
        released: ItemKind,
    },
    /// A coin popped out of a block and was scored.
    CoinPopped {
        /// The block.
        block: EntityId,
        /// Points awarded.
        points: u32,
    },
    /// A brick shattered.
    BrickBroken {
        /// The brick.
        block: EntityId,
        /// Points awarded.
        points: u32,
    },
    /// The player fell below the level.
    PlayerFell,
    /// The player lost a life.
    PlayerDied {
        /// Lives remaining after the death.
        lives_left: u32,
    },
    /// No lives remain.
    GameOver {
        /// Final score.
        score: u32,
    },
    /// The player reached the finish.
    LevelComplete {
        /// The level just finished.
        level: u32,
        /// The level the next start will load, if any.
        next_level: Option<u32>,
    },
}

impl Event {
    /// Score awarded by this event.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            Self::EnemyStomped { points, .. }
            | Self::EnemyStarKilled { points, .. }
            | Self::ItemCollected { points, .. }
            | Self::CoinPopped { points, .. }
            | Self::BrickBroken { points, .. } => *points,
            _ => 0,
        }
    }

    /// Coins added by this event.
    #[must_use]
    pub fn coins(&self) -> u32 {
        match self {
            Self::ItemCollected {
                kind: ItemKind::Coin,
                ..
            }
            | Self::CoinPopped { .. } => 1,
            _ => 0,
        }
    }

    /// Lives added by this event.
    #[must_use]
    pub fn extra_lives(&self) -> u32 {
        u32::from(matches!(self, Self::ExtraLife { .. }))
    }
}

bitflags::bitflags! {
    /// Flags summarizing one tick's events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TickSummary: u8 {
        /// An enemy was stomped or star-killed.
        const ENEMY_HIT = 1 << 0;
        /// A coin was collected or popped from a block.
        const COIN_COLLECTED = 1 << 1;
        /// A power item was collected.
        const POWER_UP = 1 << 2;
        /// A block released an item or a brick broke.
        const BLOCK_HIT = 1 << 3;
        /// The player lost a life.
        const PLAYER_DIED = 1 << 4;
        /// The level was completed.
        const LEVEL_COMPLETE = 1 << 5;
    }
}

impl Default for TickSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl TickSummary {
    /// Condenses a list of events.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(Self::empty(), |summary, event| {
            summary | Self::from_event(event)
        })
    }

    fn from_event(event: &Event) -> Self {
        match event {
            Event::EnemyStomped { .. } | Event::EnemyStarKilled { .. } => Self::ENEMY_HIT,
            Event::ItemCollected {
                kind: ItemKind::Coin,
                ..
            }
            | Event::CoinPopped { .. } => Self::COIN_COLLECTED,
            Event::ItemCollected { .. } | Event::ExtraLife { .. } => Self::POWER_UP,
            Event::BlockHit { .. } | Event::BrickBroken { .. } => Self::BLOCK_HIT,
            Event::PlayerDied { .. } => Self::PLAYER_DIED,
            Event::LevelComplete { .. } => Self::LEVEL_COMPLETE,
            Event::PlayerHit { .. } | Event::PlayerFell | Event::GameOver { .. } => Self::empty(),
        }
    }

    /// An enemy was stomped or star-killed.
    #[must_use]
    pub fn enemy_hit(self) -> bool {
        self.contains(Self::ENEMY_HIT)
    }

    /// A coin was collected.
    #[must_use]
    pub fn coin_collected(self) -> bool {
        self.contains(Self::COIN_COLLECTED)
    }
}
