//! Replay scripts and the headless runner that plays them.
//!
//! A script is a list of segments, each holding one intent for `repeat`
//! ticks:
//!
//! ```json
//! { "fixed_dt": 0.016666668,
//!   "frames": [ { "right": true, "repeat": 60 },
//!               { "right": true, "jump": true, "repeat": 20, "dt": 0.02 } ] }
//! ```
//!
//! The runner turns segment deltas into host timestamps and reads them back
//! through a [`FrameClock`], so stalls in a script are clamped the same way a
//! live host's would be.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use stompline_core::clock::FrameClock;
use stompline_core::input::{Intent, IntentLatch};
use stompline_core::{Event, GameState, GameStatus, Simulation};

/// Longest step a script may ask for, in seconds.
pub const MAX_STEP: f32 = 3600.0;

/// One run of identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "one")]
    pub repeat: u32,
    /// Overrides the script's `fixed_dt` for this segment.
    #[serde(default)]
    pub dt: Option<f32>,
}

fn one() -> u32 {
    1
}

impl Segment {
    fn intent(&self) -> Intent {
        Intent::from_controls(self.left, self.right, self.jump)
    }
}

/// A recorded input script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub fixed_dt: f32,
    pub frames: Vec<Segment>,
    /// Start the next level after a win instead of stopping.
    #[serde(default)]
    pub continue_on_win: bool,
}

impl ReplayScript {
    /// Parses and validates a script.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(json).context("malformed replay script")?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.fixed_dt.is_finite() && self.fixed_dt > 0.0 && self.fixed_dt <= MAX_STEP,
            "fixed_dt must be in (0, {MAX_STEP}], got {}",
            self.fixed_dt
        );
        for (i, segment) in self.frames.iter().enumerate() {
            if let Some(dt) = segment.dt {
                ensure!(
                    dt.is_finite() && (0.0..=MAX_STEP).contains(&dt),
                    "segment {i}: dt must be in [0, {MAX_STEP}], got {dt}"
                );
            }
        }
        Ok(())
    }

    /// Total ticks the script describes.
    pub fn total_frames(&self) -> u64 {
        self.frames.iter().map(|s| u64::from(s.repeat)).sum()
    }
}

/// What a replay ended with.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub state: GameState,
    pub ticks: u64,
    pub clamped_ticks: u64,
    pub levels_completed: u32,
    pub enemies_defeated: u32,
    pub deaths: u32,
}

/// Plays `script` on `sim`, starting it if needed.
///
/// Stops when the script runs out or the game leaves `Playing` (after a win
/// with `continue_on_win`, the next level is started instead).
pub fn run(sim: &mut Simulation, script: &ReplayScript) -> Result<ReplayOutcome> {
    sim.start().context("failed to start the first level")?;

    let mut clock = FrameClock::new(sim.config().max_delta_time);
    let mut latch = IntentLatch::new();
    let mut timestamp = Duration::ZERO;
    clock.frame(timestamp);

    let mut outcome = ReplayOutcome {
        state: sim.state().clone(),
        ticks: 0,
        clamped_ticks: 0,
        levels_completed: 0,
        enemies_defeated: 0,
        deaths: 0,
    };

    'script: for (i, segment) in script.frames.iter().enumerate() {
        latch.replace(segment.intent());
        let dt = segment.dt.unwrap_or(script.fixed_dt);
        let step = Duration::try_from_secs_f32(dt)
            .with_context(|| format!("segment {i}: dt {dt} is not a valid step"))?;

        for _ in 0..segment.repeat {
            timestamp = timestamp
                .checked_add(step)
                .with_context(|| format!("segment {i}: replay clock overflowed"))?;
            let delta = clock.frame(timestamp);
            let report = sim.tick(delta, latch.snapshot());
            outcome.ticks += 1;

            for event in &report.events {
                match event {
                    Event::EnemyStomped { .. } | Event::EnemyStarKilled { .. } => {
                        outcome.enemies_defeated += 1;
                    }
                    Event::PlayerDied { .. } => outcome.deaths += 1,
                    Event::LevelComplete { .. } => outcome.levels_completed += 1,
                    _ => {}
                }
            }

            match sim.status() {
                GameStatus::Playing => {}
                GameStatus::Win if script.continue_on_win => {
                    let finished = sim.world().level_id();
                    if sim.state().level == finished {
                        tracing::info!(level = finished, "final level complete");
                        break 'script;
                    }
                    sim.start().context("failed to start the next level")?;
                }
                status => {
                    tracing::info!(?status, tick = outcome.ticks, "replay stopped early");
                    break 'script;
                }
            }
        }
    }

    tracing::debug!(changes = latch.take_changes(), "input changes replayed");
    outcome.state = sim.state().clone();
    outcome.clamped_ticks = clock.clamped_frames();
    Ok(outcome)
}
