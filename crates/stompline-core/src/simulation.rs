//! The simulation driver: game state, status machine, and the per-tick loop.
//!
//! # Status Machine
//!
//! ```text
//!            start()                 lives reach 0
//!   Ready ───────────▶ Playing ───────────────────▶ GameOver
//!                        │  ▲                           │
//!          finish reached│  │start() (next level)       │start() / restart()
//!                        ▼  │                           │
//!                        Win ◀──────────────────────────┘ (restart re-enters Playing)
//! ```
//!
//! `Win` and `GameOver` are terminal until the host calls
//! [`Simulation::start`] or [`Simulation::restart`].
//!
//! # Tick
//!
//! [`Simulation::tick`] runs, only while `Playing`:
//!
//! 1. **INTENT**: latch the host's intent snapshot
//! 2. **COLLISIONS**: [`Simulation::handle_collisions`] runs the resolvers in
//!    fixed order and folds their events into the game state
//! 3. **UPDATE**: [`Simulation::update`] advances every entity, the camera,
//!    and the finish and fall-out checks
//!
//! Every step runs to completion before the next starts; nothing in a tick
//! suspends.
//!
//! # Example
//!
//! ```
//! use stompline_core::config::GameConfig;
//! use stompline_core::input::Intent;
//! use stompline_core::simulation::{GameStatus, Simulation};
//!
//! let mut sim = Simulation::with_builtin_levels(GameConfig::default()).unwrap();
//! assert_eq!(sim.status(), GameStatus::Ready);
//!
//! sim.start().unwrap();
//! for _ in 0..60 {
//!     sim.tick(1.0 / 60.0, Intent::RIGHT);
//! }
//!
//! assert_eq!(sim.status(), GameStatus::Playing);
//! assert!(sim.world().player.position.x > 50.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{clamp_delta, sanitize_delta};
use crate::config::GameConfig;
use crate::error::LevelError;
use crate::event::{Event, TickSummary};
use crate::input::Intent;
use crate::level::LevelSet;
use crate::resolver::{default_resolvers, Flow, ResolveContext, Resolver};
use crate::world::World;

// =============================================================================
// Game State
// =============================================================================

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// Waiting for the first start.
    #[default]
    Ready,
    /// Ticks advance the world.
    Playing,
    /// No lives left.
    GameOver,
    /// The finish was reached.
    Win,
}

/// Session-wide bookkeeping, polled by the UI every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current status.
    pub status: GameStatus,
    /// Accumulated score.
    pub score: u32,
    /// Remaining lives; reaching 0 ends the game.
    pub lives: u32,
    /// Coins collected.
    pub coins: u32,
    /// Id of the level being played, or to be played on the next start.
    pub level: u32,
}

impl GameState {
    /// Initial state of a session.
    #[must_use]
    pub fn new(lives: u32, level: u32) -> Self {
        Self {
            status: GameStatus::Ready,
            score: 0,
            lives,
            coins: 0,
            level,
        }
    }

    /// Folds score, coins, and extra lives out of `events`.
    pub fn absorb(&mut self, events: &[Event]) {
        for event in events {
            self.score = self.score.saturating_add(event.points());
            self.coins = self.coins.saturating_add(event.coins());
            self.lives = self.lives.saturating_add(event.extra_lives());
        }
    }
}

// =============================================================================
// Tick Report
// =============================================================================

/// Everything notable that happened during a tick, or one phase of it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Events in the order they happened.
    pub events: Vec<Event>,
    /// Flags condensed from `events`.
    pub summary: TickSummary,
}

impl TickReport {
    /// Builds a report from events.
    #[must_use]
    pub fn from_events(events: Vec<Event>) -> Self {
        let summary = TickSummary::from_events(&events);
        Self { events, summary }
    }

    /// Appends another report.
    pub fn merge(&mut self, other: Self) {
        self.summary |= other.summary;
        self.events.extend(other.events);
    }

    /// Nothing happened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// The simulation driver.
///
/// Owns the game state, the entity stores of the current level, and the
/// resolvers. Hosts call [`Simulation::tick`] once per display frame and read
/// [`Simulation::state`] and [`Simulation::world`] to draw.
pub struct Simulation {
    config: GameConfig,
    levels: LevelSet,
    state: GameState,
    world: World,
    intent: Intent,
    resolvers: Vec<Box<dyn Resolver>>,
    frame: u64,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("state", &self.state)
            .field("level", &self.world.level_id())
            .field("intent", &self.intent)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates a simulation in the `Ready` state on the first level of
    /// `levels`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::NotFound`] if the first level cannot be loaded.
    pub fn new(config: GameConfig, levels: LevelSet) -> Result<Self, LevelError> {
        let first = levels.first_id();
        let world = World::from_level(levels.get(first)?);
        let state = GameState::new(config.starting_lives, first);
        Ok(Self {
            config,
            levels,
            state,
            world,
            intent: Intent::empty(),
            resolvers: default_resolvers(),
            frame: 0,
        })
    }

    /// Creates a simulation over the two built-in levels.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded level data is corrupt.
    pub fn with_builtin_levels(config: GameConfig) -> Result<Self, LevelError> {
        Self::new(config, LevelSet::builtin()?)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Session bookkeeping.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable bookkeeping, for hosts restoring a session and tests that
    /// stage one.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Whether ticks currently advance the world.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.status == GameStatus::Playing
    }

    /// Entity stores of the current level.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity stores, for hosts and tests that stage scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Tunables.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Loaded levels.
    #[must_use]
    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Intent used by the next [`Simulation::update`].
    #[must_use]
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Latches the intent for the next [`Simulation::update`].
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Ticks run since construction.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // -------------------------------------------------------------------------
    // Status transitions
    // -------------------------------------------------------------------------

    /// Enters `Playing`.
    ///
    /// From `Ready` or `Win` this loads the level in [`GameState::level`],
    /// keeping score, lives, and coins; after a win with further levels that
    /// is the next level. From `GameOver` it performs a [`Simulation::restart`].
    /// While already playing it does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::NotFound`] if the level is missing. The state is
    /// left unchanged in that case.
    pub fn start(&mut self) -> Result<(), LevelError> {
        match self.state.status {
            GameStatus::Playing => Ok(()),
            GameStatus::GameOver => self.restart(),
            GameStatus::Ready | GameStatus::Win => {
                self.load_level(self.state.level)?;
                self.state.status = GameStatus::Playing;
                tracing::info!(level = self.state.level, score = self.state.score, "game started");
                Ok(())
            }
        }
    }

    /// Resets the session (score 0, starting lives, 0 coins, first level)
    /// and enters `Playing` with fresh entities.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::NotFound`] if the first level is missing. The
    /// state is left unchanged in that case.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        let first = self.levels.first_id();
        self.load_level(first)?;
        self.state = GameState::new(self.config.starting_lives, first);
        self.state.status = GameStatus::Playing;
        self.intent = Intent::empty();
        tracing::info!(level = first, "game restarted");
        Ok(())
    }

    fn load_level(&mut self, id: u32) -> Result<(), LevelError> {
        let level = self.levels.get(id)?;
        self.world = World::from_level(level);
        tracing::info!(
            level = id,
            platforms = self.world.platforms.len(),
            enemies = self.world.enemies.len(),
            collectibles = self.world.collectibles.len(),
            "level loaded"
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Per-frame
    // -------------------------------------------------------------------------

    /// Runs one tick: latch `intent`, resolve collisions, then update.
    ///
    /// `dt` is clamped to `[0, max_delta_time]`. Does nothing unless playing.
    pub fn tick(&mut self, dt: f32, intent: Intent) -> TickReport {
        if !self.is_playing() {
            return TickReport::default();
        }
        self.frame += 1;
        self.intent = intent;
        let dt = clamp_delta(dt, self.config.max_delta_time);

        let mut report = self.handle_collisions();
        if self.is_playing() {
            report.merge(self.update(dt));
        }

        tracing::trace!(
            frame = self.frame,
            dt,
            events = report.events.len(),
            score = self.state.score,
            lives = self.state.lives,
            "tick"
        );
        report
    }

    /// Runs the collision pass: platforms, enemies, then collectibles.
    ///
    /// Resets the player's grounded flag first. All mutations, including
    /// score, coins, lives, and player death, are applied before returning.
    /// Does nothing unless playing.
    pub fn handle_collisions(&mut self) -> TickReport {
        if !self.is_playing() {
            return TickReport::default();
        }
        self.world.player.grounded = false;

        let mut ctx = ResolveContext::new(&self.config.physics, &self.config.scoring);
        let mut hit = false;
        for resolver in &self.resolvers {
            if resolver.resolve(&mut self.world, &mut ctx) == Flow::PlayerHit {
                hit = true;
                break;
            }
        }

        let mut events = ctx.into_events();
        self.state.absorb(&events);
        if hit {
            events.extend(self.handle_player_death());
        }
        TickReport::from_events(events)
    }

    /// Advances every entity by `dt`, follows the player with the camera, and
    /// checks the finish line and the fall-out boundary.
    ///
    /// Negative or non-finite `dt` is treated as `0`. Does nothing unless
    /// playing.
    pub fn update(&mut self, dt: f32) -> TickReport {
        if !self.is_playing() {
            return TickReport::default();
        }
        let dt = sanitize_delta(dt);
        let physics = &self.config.physics;
        let world = &mut self.world;

        world
            .player
            .update(dt, self.intent, physics.gravity, physics);
        for enemy in &mut world.enemies {
            if !enemy.is_retired(physics.enemy_death_duration) {
                enemy.update(dt);
            }
        }
        for item in &mut world.collectibles {
            item.update(dt, physics.gravity, physics.collectible_frame_time);
        }
        for platform in &mut world.platforms {
            platform.update(dt);
        }
        for pop in &mut world.coin_pops {
            pop.update(dt, physics.coin_pop_speed, physics.coin_pop_distance);
        }
        world.coin_pops.retain(|pop| pop.active);

        let (player_x, level_width) = (world.player.position.x, world.width());
        world.camera.follow(
            player_x,
            level_width,
            self.config.viewport_width,
            self.config.camera_smoothing,
        );

        let mut events = Vec::new();
        if self.world.player.position.x >= self.world.finish_x() {
            events.push(self.complete_level());
        } else if self.world.player.position.y > self.world.height() {
            events.push(Event::PlayerFell);
            events.extend(self.handle_player_death());
        }
        TickReport::from_events(events)
    }

    /// Costs the player a life.
    ///
    /// With lives left, the player respawns at the level start, small and
    /// briefly invincible, and score and coins are kept. At zero lives the
    /// status becomes `GameOver`. Does nothing unless playing.
    pub fn handle_player_death(&mut self) -> Vec<Event> {
        if !self.is_playing() {
            return Vec::new();
        }
        self.state.lives = self.state.lives.saturating_sub(1);
        let mut events = vec![Event::PlayerDied {
            lives_left: self.state.lives,
        }];

        let start = self.world.start();
        self.world.player.reset(start);

        if self.state.lives == 0 {
            self.state.status = GameStatus::GameOver;
            events.push(Event::GameOver {
                score: self.state.score,
            });
            tracing::info!(score = self.state.score, "game over");
        } else {
            self.world
                .player
                .grant_invincibility(self.config.physics.respawn_invincibility);
            tracing::debug!(lives = self.state.lives, "player died");
        }
        events
    }

    fn complete_level(&mut self) -> Event {
        let level = self.state.level;
        let next_level = level
            .checked_add(1)
            .filter(|next| self.levels.contains(*next));
        if let Some(next) = next_level {
            self.state.level = next;
        }
        self.state.status = GameStatus::Win;
        tracing::info!(level, ?next_level, score = self.state.score, "level complete");
        Event::LevelComplete { level, next_level }
    }
}
