//! The player-controlled character and its per-frame physics.
//!
//! # Update Order
//!
//! [`PlayerState::update`] runs, in order:
//!
//! 1. Horizontal acceleration toward the walk or run cap, or friction when no
//!    direction is held
//! 2. Jump start and the variable-height hold window
//! 3. Gravity, capped at the maximum fall speed
//! 4. Position integration, with `x` clamped to the left edge of the level
//! 5. Star, invincibility, and blink timers
//! 6. Cosmetic animation frame bookkeeping
//!
//! Every step is well defined for `dt == 0`; nothing divides by `dt`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::sanitize_delta;
use crate::config::PhysicsConfig;
use crate::geometry::Rect;
use crate::input::Intent;

/// Player width, shared by both tiers.
pub const PLAYER_WIDTH: f32 = 40.0;

/// Number of frames in the walk cycle.
const WALK_FRAMES: u8 = 4;

/// `|vx|` above which the walk cycle animates.
const ANIMATION_SPEED_THRESHOLD: f32 = 10.0;

/// Direction the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Facing toward negative `x`.
    Left,
    /// Facing toward positive `x`.
    #[default]
    Right,
}

/// Size tier of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerTier {
    /// 40×40.
    #[default]
    Small,
    /// 40×80.
    Big,
}

impl PowerTier {
    /// Collision extent for this tier.
    #[must_use]
    pub fn size(self) -> Vec2 {
        match self {
            Self::Small => Vec2::new(PLAYER_WIDTH, 40.0),
            Self::Big => Vec2::new(PLAYER_WIDTH, 80.0),
        }
    }
}

/// Active power-up kind, independent of the size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerKind {
    /// No power-up.
    #[default]
    None,
    /// Fire flower collected.
    Fire,
    /// Star power running.
    Star,
}

/// Mutable state of the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner in world space.
    pub position: Vec2,
    /// Collision extent; always equal to `tier.size()`.
    pub size: Vec2,
    /// Velocity in px/s (`y` positive is downward).
    pub velocity: Vec2,
    /// Standing on a platform this tick. Recomputed by every collision pass.
    pub grounded: bool,
    /// A jump has started and the player has not landed since.
    pub jumping: bool,
    /// Reversing direction at speed. Cosmetic only.
    pub skidding: bool,
    /// Sprite facing.
    pub facing: Facing,
    /// Size tier.
    pub tier: PowerTier,
    /// Power-up kind.
    pub power: PowerKind,
    /// Enemy contact is currently harmless.
    pub invincible: bool,
    /// Remaining post-respawn invincibility (s).
    pub invincible_timer: f32,
    /// Sprite hidden this frame while invincible.
    pub blink: bool,
    /// Time spent invincible, drives `blink` (s).
    pub blink_timer: f32,
    /// Remaining reduced-gravity window of the current jump (s).
    pub jump_hold_timer: f32,
    /// Remaining star power (s).
    pub star_timer: f32,
    /// Walk cycle frame.
    pub animation_frame: u8,
    /// Time since the last walk cycle advance (s).
    pub animation_timer: f32,
}

impl PlayerState {
    /// Creates a small player at rest at `start`.
    #[must_use]
    pub fn new(start: Vec2) -> Self {
        Self {
            position: start,
            size: PowerTier::Small.size(),
            velocity: Vec2::ZERO,
            grounded: false,
            jumping: false,
            skidding: false,
            facing: Facing::Right,
            tier: PowerTier::Small,
            power: PowerKind::None,
            invincible: false,
            invincible_timer: 0.0,
            blink: false,
            blink_timer: 0.0,
            jump_hold_timer: 0.0,
            star_timer: 0.0,
            animation_frame: 0,
            animation_timer: 0.0,
        }
    }

    /// Collision rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Star power is running.
    #[must_use]
    pub fn has_star(&self) -> bool {
        self.power == PowerKind::Star
    }

    /// Enemy contact is harmless this frame.
    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Advances the player by `dt` seconds.
    ///
    /// # Arguments
    ///
    /// * `dt` - Elapsed time; negative or non-finite values are treated as `0`
    /// * `intent` - Held controls for this tick
    /// * `gravity` - Downward acceleration (px/s²)
    /// * `tuning` - Speeds, jump strength, and timer durations
    pub fn update(&mut self, dt: f32, intent: Intent, gravity: f32, tuning: &PhysicsConfig) {
        let dt = sanitize_delta(dt);

        self.apply_horizontal(dt, intent, tuning);
        self.apply_vertical(dt, intent, gravity, tuning);

        self.position += self.velocity * dt;
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = 0.0;
        }

        self.tick_timers(dt, tuning);
        self.animate(dt, tuning.player_frame_time);
    }

    fn apply_horizontal(&mut self, dt: f32, intent: Intent, tuning: &PhysicsConfig) {
        self.skidding = false;
        let direction = intent.horizontal();

        if direction == 0.0 {
            if dt > 0.0 {
                self.velocity.x *= tuning.deceleration;
                if self.velocity.x.abs() < tuning.stop_epsilon {
                    self.velocity.x = 0.0;
                }
            }
            return;
        }

        let running = self.velocity.x.abs() > tuning.run_threshold;
        let max_speed = if running {
            tuning.run_speed
        } else {
            tuning.walk_speed
        };

        if self.velocity.x * direction < 0.0 && self.velocity.x.abs() > tuning.skid_threshold {
            self.skidding = true;
        }

        self.velocity.x = move_towards(
            self.velocity.x,
            direction * max_speed,
            tuning.acceleration * dt,
        );
        self.facing = if direction < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    fn apply_vertical(&mut self, dt: f32, intent: Intent, gravity: f32, tuning: &PhysicsConfig) {
        if intent.jump() && self.grounded && !self.jumping {
            self.velocity.y = -self.jump_velocity(tuning);
            self.jumping = true;
            self.grounded = false;
            self.jump_hold_timer = tuning.jump_hold_time;
        }
        if !intent.jump() {
            self.jump_hold_timer = 0.0;
        }

        let holding = self.velocity.y < 0.0 && self.jump_hold_timer > 0.0 && intent.jump();
        let applied = if holding {
            gravity * tuning.jump_hold_gravity_scale
        } else {
            gravity
        };
        self.jump_hold_timer = (self.jump_hold_timer - dt).max(0.0);

        self.velocity.y = (self.velocity.y + applied * dt).min(tuning.max_fall_speed);
    }

    fn jump_velocity(&self, tuning: &PhysicsConfig) -> f32 {
        match self.tier {
            PowerTier::Small => tuning.jump_velocity_small,
            PowerTier::Big => tuning.jump_velocity_big,
        }
    }

    fn tick_timers(&mut self, dt: f32, tuning: &PhysicsConfig) {
        if self.has_star() {
            self.star_timer -= dt;
            if self.star_timer <= 0.0 {
                self.star_timer = 0.0;
                self.power = PowerKind::None;
                if self.invincible_timer <= 0.0 {
                    self.clear_invincibility();
                }
            }
        }

        if self.invincible_timer > 0.0 {
            self.invincible_timer -= dt;
            if self.invincible_timer <= 0.0 {
                self.invincible_timer = 0.0;
                if !self.has_star() {
                    self.clear_invincibility();
                }
            }
        }

        if self.invincible {
            self.blink_timer += dt;
            // Truncation is the intent: the phase index of the blink cycle.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let phase = (self.blink_timer / tuning.blink_interval) as u32;
            self.blink = phase % 2 == 1;
        }
    }

    fn animate(&mut self, dt: f32, frame_time: f32) {
        if self.velocity.x.abs() > ANIMATION_SPEED_THRESHOLD {
            self.animation_timer += dt;
            if self.animation_timer >= frame_time {
                self.animation_frame = (self.animation_frame + 1) % WALK_FRAMES;
                self.animation_timer = 0.0;
            }
        } else {
            self.animation_frame = 0;
            self.animation_timer = 0.0;
        }
    }

    fn clear_invincibility(&mut self) {
        self.invincible = false;
        self.invincible_timer = 0.0;
        self.blink = false;
        self.blink_timer = 0.0;
    }

    /// Makes enemy contact harmless for `duration` seconds.
    ///
    /// An existing longer window is kept.
    pub fn grant_invincibility(&mut self, duration: f32) {
        self.invincible = true;
        self.invincible_timer = self.invincible_timer.max(duration);
        self.blink_timer = 0.0;
    }

    /// Starts star power for `duration` seconds.
    pub fn activate_star(&mut self, duration: f32) {
        self.power = PowerKind::Star;
        self.star_timer = duration;
        self.invincible = true;
        self.blink_timer = 0.0;
    }

    /// Changes the size tier, keeping the feet where they are.
    pub fn set_tier(&mut self, tier: PowerTier) {
        let bottom = self.position.y + self.size.y;
        self.tier = tier;
        self.size = tier.size();
        self.position.y = bottom - self.size.y;
    }

    /// Puts the player back at `start` as a small, powerless character.
    ///
    /// Lives, score, and coins live in the game state and are not touched.
    pub fn reset(&mut self, start: Vec2) {
        *self = Self::new(start);
    }
}

/// Moves `current` toward `target` by at most `max_delta`.
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}
