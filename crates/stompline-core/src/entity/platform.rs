//! Static level geometry, bonus blocks, and breakable bricks.
//!
//! Only strikes from below mutate a platform. A bonus block dispenses its
//! item at most once; the `hit` flag guards it. A broken brick keeps its id
//! but its extent is zeroed, which removes it from every overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{EntityId, ItemKind, PowerTier};
use crate::clock::sanitize_delta;
use crate::geometry::Rect;

/// Largest extent, on either axis, of a brick that can be broken.
pub const BLOCK_SIZE: f32 = 40.0;

/// Platform variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Solid floor.
    Ground,
    /// Brick ledge or breakable brick block.
    Brick,
    /// Bonus block.
    Question,
    /// Solid obstacle.
    Pipe,
}

/// Outcome of the player striking a platform from below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStrike {
    /// Nothing happens (solid geometry, or an already-spent block).
    Inert,
    /// The block released an item.
    Dispensed(ItemKind),
    /// The block wobbled.
    Bumped,
    /// The brick shattered.
    Broken,
}

/// Mutable state of one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformState {
    /// Level-unique id.
    pub id: EntityId,
    /// Variant.
    pub kind: PlatformKind,
    /// Top-left corner.
    pub position: Vec2,
    /// Collision extent. Zero once broken.
    pub size: Vec2,
    /// The block has been struck and has dispensed its item.
    pub hit: bool,
    /// Remaining bump animation (s).
    pub hit_timer: f32,
    /// Item held by the block, if any.
    pub contains: Option<ItemKind>,
    /// The brick has been shattered.
    pub broken: bool,
}

impl PlatformState {
    /// Creates an intact platform.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: PlatformKind,
        position: Vec2,
        size: Vec2,
        contains: Option<ItemKind>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            hit: false,
            hit_timer: 0.0,
            contains,
            broken: false,
        }
    }

    /// Collision rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Block-sized, as opposed to a long ledge.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.size.x <= BLOCK_SIZE && self.size.y <= BLOCK_SIZE
    }

    /// Applies a head-bump from a player of the given tier.
    ///
    /// # Rules
    ///
    /// - Question block: dispenses its item (a coin when none is declared) the
    ///   first time, then stays inert.
    /// - Brick declaring an item: behaves like a question block.
    /// - Plain brick block: a big player breaks it, a small one bumps it.
    /// - Brick ledges, ground, and pipes: inert.
    pub fn strike_from_below(&mut self, tier: PowerTier, bump_duration: f32) -> BlockStrike {
        if self.broken {
            return BlockStrike::Inert;
        }
        match self.kind {
            PlatformKind::Question => {
                let item = self.contains.unwrap_or(ItemKind::Coin);
                self.dispense(item, bump_duration)
            }
            PlatformKind::Brick => {
                if let Some(item) = self.contains {
                    self.dispense(item, bump_duration)
                } else if !self.is_block() {
                    BlockStrike::Inert
                } else if tier == PowerTier::Big {
                    self.broken = true;
                    self.hit = true;
                    self.size = Vec2::ZERO;
                    BlockStrike::Broken
                } else {
                    self.hit_timer = bump_duration;
                    BlockStrike::Bumped
                }
            }
            PlatformKind::Ground | PlatformKind::Pipe => BlockStrike::Inert,
        }
    }

    fn dispense(&mut self, item: ItemKind, bump_duration: f32) -> BlockStrike {
        if self.hit {
            return BlockStrike::Inert;
        }
        self.hit = true;
        self.hit_timer = bump_duration;
        BlockStrike::Dispensed(item)
    }

    /// Vertical offset of the bump animation (negative is up). Cosmetic.
    #[must_use]
    pub fn bump_offset(&self, bump_duration: f32) -> f32 {
        if self.hit_timer <= 0.0 || bump_duration <= 0.0 {
            return 0.0;
        }
        let t = 1.0 - self.hit_timer / bump_duration;
        -(t * std::f32::consts::PI).sin() * 8.0
    }

    /// Decays the bump animation.
    pub fn update(&mut self, dt: f32) {
        if self.hit_timer > 0.0 {
            self.hit_timer = (self.hit_timer - sanitize_delta(dt)).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: PlatformKind, contains: Option<ItemKind>) -> PlatformState {
        PlatformState::new(
            EntityId::new("block"),
            kind,
            Vec2::new(350.0, 350.0),
            Vec2::new(40.0, 40.0),
            contains,
        )
    }

    mod question_tests {
        use super::*;

        #[test]
        fn dispenses_once() {
            let mut q = block(PlatformKind::Question, Some(ItemKind::Mushroom));
            assert_eq!(
                q.strike_from_below(PowerTier::Small, 0.2),
                BlockStrike::Dispensed(ItemKind::Mushroom)
            );
            assert!(q.hit);
            assert_eq!(q.hit_timer, 0.2);
            assert_eq!(
                q.strike_from_below(PowerTier::Small, 0.2),
                BlockStrike::Inert
            );
        }

        #[test]
        fn defaults_to_coin() {
            let mut q = block(PlatformKind::Question, None);
            assert_eq!(
                q.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Dispensed(ItemKind::Coin)
            );
        }

        #[test]
        fn bump_animation_decays() {
            let mut q = block(PlatformKind::Question, None);
            q.strike_from_below(PowerTier::Small, 0.2);
            q.update(0.1);
            assert!(q.bump_offset(0.2) < 0.0);
            q.update(0.15);
            assert_eq!(q.hit_timer, 0.0);
            assert_eq!(q.bump_offset(0.2), 0.0);
        }
    }

    mod brick_tests {
        use super::*;

        #[test]
        fn brick_with_item_acts_like_bonus_block() {
            let mut brick = block(PlatformKind::Brick, Some(ItemKind::Coin));
            assert_eq!(
                brick.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Dispensed(ItemKind::Coin)
            );
            assert_eq!(
                brick.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Inert
            );
            assert!(!brick.broken);
        }

        #[test]
        fn big_player_breaks_plain_brick() {
            let mut brick = block(PlatformKind::Brick, None);
            assert_eq!(
                brick.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Broken
            );
            assert!(brick.broken);
            assert_eq!(brick.size, Vec2::ZERO);
            assert_eq!(brick.id.as_str(), "block");
            assert_eq!(
                brick.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Inert
            );
        }

        #[test]
        fn small_player_only_bumps() {
            let mut brick = block(PlatformKind::Brick, None);
            assert_eq!(
                brick.strike_from_below(PowerTier::Small, 0.2),
                BlockStrike::Bumped
            );
            assert!(!brick.broken);
            assert!(!brick.hit);
        }

        #[test]
        fn ledges_are_inert() {
            let mut ledge = PlatformState::new(
                EntityId::new("platform1"),
                PlatformKind::Brick,
                Vec2::new(300.0, 450.0),
                Vec2::new(100.0, 20.0),
                None,
            );
            assert_eq!(
                ledge.strike_from_below(PowerTier::Big, 0.2),
                BlockStrike::Inert
            );
            assert!(!ledge.broken);
        }
    }

    #[test]
    fn ground_and_pipe_are_inert() {
        let mut ground = block(PlatformKind::Ground, None);
        let mut pipe = block(PlatformKind::Pipe, None);
        assert_eq!(
            ground.strike_from_below(PowerTier::Big, 0.2),
            BlockStrike::Inert
        );
        assert_eq!(pipe.strike_from_below(PowerTier::Big, 0.2), BlockStrike::Inert);
    }
}
