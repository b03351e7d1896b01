//! Tunables for player physics, scoring, and the simulation driver.
//!
//! All structs use `#[serde(default)]`, so a partial JSON file only overrides
//! the fields it names.
//!
//! # Coordinate System
//!
//! Screen space: `x` grows to the right, `y` grows downward. Gravity is a
//! positive acceleration and jump velocities are applied as negative `vy`.
//!
//! # Example
//!
//! ```
//! use stompline_core::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "physics": { "gravity": 900.0 } }"#).unwrap();
//! assert_eq!(config.physics.gravity, 900.0);
//! assert_eq!(config.starting_lives, 3);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Physics
// =============================================================================

/// Player and item physics tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration applied every frame (px/s²).
    pub gravity: f32,
    /// Top horizontal speed while walking (px/s).
    pub walk_speed: f32,
    /// Top horizontal speed once the run threshold has been exceeded (px/s).
    pub run_speed: f32,
    /// Horizontal speed above which `run_speed` becomes the cap (px/s).
    pub run_threshold: f32,
    /// Horizontal acceleration while a direction is held (px/s²).
    pub acceleration: f32,
    /// Per-frame multiplier applied to `vx` when no direction is held.
    pub deceleration: f32,
    /// `|vx|` below which the player snaps to a standstill.
    pub stop_epsilon: f32,
    /// Speed above which reversing direction sets the skidding flag.
    pub skid_threshold: f32,
    /// Initial upward jump speed for the small tier (px/s).
    pub jump_velocity_small: f32,
    /// Initial upward jump speed for the big tier (px/s).
    pub jump_velocity_big: f32,
    /// How long holding jump keeps gravity reduced (s).
    pub jump_hold_time: f32,
    /// Gravity multiplier while ascending with the hold timer running.
    pub jump_hold_gravity_scale: f32,
    /// Cap on downward velocity (px/s).
    pub max_fall_speed: f32,
    /// Upward speed given to the player after a stomp (px/s).
    pub stomp_bounce_velocity: f32,
    /// Duration of star power (s).
    pub star_duration: f32,
    /// Invincibility granted after a non-fatal death (s).
    pub respawn_invincibility: f32,
    /// Blink toggle period while invincible (s).
    pub blink_interval: f32,
    /// Time a stomped enemy stays visible before it is retired (s).
    pub enemy_death_duration: f32,
    /// Duration of a block bump animation (s).
    pub block_bump_duration: f32,
    /// Initial upward speed of an item released from a block (px/s).
    pub item_rise_velocity: f32,
    /// Upward speed of a coin popped from a block (px/s).
    pub coin_pop_speed: f32,
    /// Distance a popped coin travels before it disappears (px).
    pub coin_pop_distance: f32,
    /// Seconds per player animation frame.
    pub player_frame_time: f32,
    /// Seconds per collectible animation frame.
    pub collectible_frame_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 600.0,
            walk_speed: 200.0,
            run_speed: 300.0,
            run_threshold: 190.0,
            acceleration: 800.0,
            deceleration: 0.8,
            stop_epsilon: 0.1,
            skid_threshold: 100.0,
            jump_velocity_small: 400.0,
            jump_velocity_big: 450.0,
            jump_hold_time: 0.25,
            jump_hold_gravity_scale: 0.5,
            max_fall_speed: 800.0,
            stomp_bounce_velocity: 300.0,
            star_duration: 10.0,
            respawn_invincibility: 2.0,
            blink_interval: 0.1,
            enemy_death_duration: 1.0,
            block_bump_duration: 0.2,
            item_rise_velocity: 200.0,
            coin_pop_speed: 240.0,
            coin_pop_distance: 64.0,
            player_frame_time: 0.15,
            collectible_frame_time: 0.2,
        }
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Points awarded for each scoring action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Stomping (or star-killing) an enemy.
    pub stomp: u32,
    /// Picking up a coin or popping one from a block.
    pub coin: u32,
    /// Picking up the growth item.
    pub big_item: u32,
    /// Picking up the invincibility item.
    pub star_item: u32,
    /// Picking up the fire item.
    pub fire_item: u32,
    /// Breaking a brick.
    pub brick: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            stomp: 100,
            coin: 50,
            big_item: 200,
            star_item: 500,
            fire_item: 300,
            brick: 50,
        }
    }
}

// =============================================================================
// Game
// =============================================================================

/// Top-level configuration for a [`Simulation`](crate::simulation::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player and item physics.
    pub physics: PhysicsConfig,
    /// Score table.
    pub scoring: ScoringConfig,
    /// Lives at the start of a session.
    pub starting_lives: u32,
    /// Upper bound on a single tick's delta-time (s).
    pub max_delta_time: f32,
    /// Visible width used for camera follow (px).
    pub viewport_width: f32,
    /// Fraction of the remaining camera distance covered per update.
    pub camera_smoothing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            scoring: ScoringConfig::default(),
            starting_lives: 3,
            max_delta_time: 0.05,
            viewport_width: 800.0,
            camera_smoothing: 0.1,
        }
    }
}

impl GameConfig {
    /// Parses and validates a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a tunable is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`GameConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks that every tunable is in its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        positive("physics.gravity", p.gravity)?;
        positive("physics.walk_speed", p.walk_speed)?;
        positive("physics.acceleration", p.acceleration)?;
        positive("physics.max_fall_speed", p.max_fall_speed)?;
        positive("physics.jump_velocity_small", p.jump_velocity_small)?;
        positive("physics.jump_velocity_big", p.jump_velocity_big)?;
        positive("physics.blink_interval", p.blink_interval)?;
        positive("max_delta_time", self.max_delta_time)?;
        positive("viewport_width", self.viewport_width)?;

        if p.run_speed < p.walk_speed {
            return Err(ConfigError::Invalid {
                field: "physics.run_speed",
                reason: format!(
                    "must be at least walk_speed ({}), got {}",
                    p.walk_speed, p.run_speed
                ),
            });
        }
        if !(0.0..1.0).contains(&p.deceleration) {
            return Err(ConfigError::Invalid {
                field: "physics.deceleration",
                reason: format!("must be in [0, 1), got {}", p.deceleration),
            });
        }
        if !(0.0..=1.0).contains(&self.camera_smoothing) {
            return Err(ConfigError::Invalid {
                field: "camera_smoothing",
                reason: format!("must be in [0, 1], got {}", self.camera_smoothing),
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "starting_lives": 5, "scoring": { "coin": 10 } }"#)
                .unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.scoring.coin, 10);
        assert_eq!(config.scoring.stomp, 100);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn rejects_non_positive_gravity() {
        let err = GameConfig::from_json_str(r#"{ "physics": { "gravity": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "physics.gravity",
                ..
            }
        ));
    }

    #[test]
    fn rejects_run_speed_below_walk_speed() {
        let err = GameConfig::from_json_str(
            r#"{ "physics": { "walk_speed": 200.0, "run_speed": 150.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("physics.run_speed"));
    }

    #[test]
    fn rejects_zero_lives() {
        let err = GameConfig::from_json_str(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("starting_lives"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameConfig::from_json_str("{ physics: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
