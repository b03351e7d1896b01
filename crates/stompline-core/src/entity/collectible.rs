//! Coins, power items, and the coin effect popped out of struck blocks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{EntityId, PlatformState};
use crate::clock::sanitize_delta;
use crate::geometry::Rect;

/// Extent of an item released from a block.
pub const ITEM_SIZE: f32 = 40.0;

/// Frames in the collectible spin cycle.
const SPIN_FRAMES: u8 = 4;

/// Kind of collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Adds a coin and score.
    Coin,
    /// Grows the player to the big tier.
    Mushroom,
    /// Grants star power.
    Star,
    /// Grows the player and grants fire power.
    #[serde(rename = "fireflower")]
    FireFlower,
}

/// Vertical motion of an item rising out of a block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemMotion {
    /// Current vertical speed (px/s, negative is up).
    pub velocity_y: f32,
    /// `y` at which the item settles on top of its block.
    pub rest_y: f32,
}

/// Mutable state of one collectible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleState {
    /// Level-unique id.
    pub id: EntityId,
    /// Kind.
    pub kind: ItemKind,
    /// Top-left corner.
    pub position: Vec2,
    /// Collision extent.
    pub size: Vec2,
    /// Picked up. Collected items are neither drawn nor collidable.
    pub collected: bool,
    /// Spin cycle frame.
    pub animation_frame: u8,
    /// Time since the last spin frame (s).
    pub animation_timer: f32,
    /// Present while the item is still rising out of a block.
    pub motion: Option<ItemMotion>,
}

impl CollectibleState {
    /// Creates an uncollected, stationary item.
    #[must_use]
    pub fn new(id: EntityId, kind: ItemKind, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            collected: false,
            animation_frame: 0,
            animation_timer: 0.0,
            motion: None,
        }
    }

    /// Creates the item released by `block`.
    ///
    /// The item starts on top of the block, centered, and is launched upward
    /// with `rise_velocity`. It falls back and settles where it started.
    #[must_use]
    pub fn released_from(block: &PlatformState, kind: ItemKind, rise_velocity: f32) -> Self {
        let rest_y = block.position.y - ITEM_SIZE;
        let x = block.position.x + (block.size.x - ITEM_SIZE) / 2.0;
        let mut item = Self::new(
            block.id.released_item(),
            kind,
            Vec2::new(x, rest_y),
            Vec2::splat(ITEM_SIZE),
        );
        item.motion = Some(ItemMotion {
            velocity_y: -rise_velocity,
            rest_y,
        });
        item
    }

    /// Collision rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Marks the item collected. Returns `None` if it already was.
    pub fn collect(&mut self) -> Option<ItemKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        self.motion = None;
        Some(self.kind)
    }

    /// Advances the rise motion and the spin cycle.
    pub fn update(&mut self, dt: f32, gravity: f32, frame_time: f32) {
        if self.collected {
            return;
        }
        let dt = sanitize_delta(dt);

        if let Some(mut motion) = self.motion {
            motion.velocity_y += gravity * dt;
            self.position.y += motion.velocity_y * dt;
            if motion.velocity_y > 0.0 && self.position.y >= motion.rest_y {
                self.position.y = motion.rest_y;
                self.motion = None;
            } else {
                self.motion = Some(motion);
            }
        }

        self.animation_timer += dt;
        if self.animation_timer >= frame_time {
            self.animation_frame = (self.animation_frame + 1) % SPIN_FRAMES;
            self.animation_timer = 0.0;
        }
    }
}

/// A coin that floats out of a struck block and then disappears.
///
/// The coin is scored the moment it pops; this record only drives the effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinPop {
    /// Block that released the coin.
    pub source: EntityId,
    /// Top-left corner.
    pub position: Vec2,
    /// Distance floated so far (px).
    pub travelled: f32,
    /// Still visible.
    pub active: bool,
}

impl CoinPop {
    /// Starts a coin effect centered above `block`.
    #[must_use]
    pub fn from_block(block: &PlatformState) -> Self {
        let x = block.position.x + (block.size.x - ITEM_SIZE) / 2.0;
        Self {
            source: block.id.clone(),
            position: Vec2::new(x, block.position.y - ITEM_SIZE),
            travelled: 0.0,
            active: true,
        }
    }

    /// Floats upward at `speed` until `distance` has been covered.
    pub fn update(&mut self, dt: f32, speed: f32, distance: f32) {
        if !self.active {
            return;
        }
        let step = speed * sanitize_delta(dt);
        self.position.y -= step;
        self.travelled += step;
        if self.travelled >= distance {
            self.active = false;
        }
    }
}
