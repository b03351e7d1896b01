//! # Stompline Core
//!
//! Headless simulation core for a side-scrolling platformer.
//!
//! This crate owns everything that decides what happens in a level: player
//! physics, enemy patrols, block strikes, collision resolution, scoring, and
//! the session status machine. Rendering, audio, and input devices live in the
//! host, which feeds an intent snapshot and a frame delta into
//! [`Simulation::tick`] and reads back state to draw.
//!
//! ## Architecture
//!
//! - **Entities**: the player, enemies, platforms, collectibles ([`entity`])
//! - **World**: the entity stores of the current level ([`world`])
//! - **Resolvers**: per-class collision resolution recording [`Event`]s
//!   ([`resolver`])
//! - **Simulation**: the tick loop and game state ([`simulation`])
//!
//! ## Usage
//!
//! ```rust
//! use stompline_core::{GameConfig, Intent, Simulation};
//!
//! let mut sim = Simulation::with_builtin_levels(GameConfig::default())?;
//! sim.start()?;
//!
//! let report = sim.tick(1.0 / 60.0, Intent::RIGHT | Intent::JUMP);
//! println!("score {} after {} events", sim.state().score, report.events.len());
//! # Ok::<(), stompline_core::LevelError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod level;
pub mod resolver;
pub mod simulation;
pub mod world;

pub use config::GameConfig;
pub use error::{ConfigError, LevelError};
pub use event::{Event, TickSummary};
pub use input::Intent;
pub use level::{LevelDescriptor, LevelSet};
pub use simulation::{GameState, GameStatus, Simulation, TickReport};
pub use world::World;

#[cfg(test)]
pub(crate) mod tests;
