//! Delta-time measurement and clamping.
//!
//! The simulation is not fixed-step: every tick integrates the wall-clock time
//! since the previous one. Hosts feed monotonically increasing timestamps into
//! a [`FrameClock`], which turns them into a delta-time bounded by
//! `max_delta`. A long stall (suspended tab, debugger break) therefore cannot
//! push an entity through a thin platform in one step.

use std::time::Duration;

/// Coerces a raw delta-time into a usable one: non-finite or negative values
/// become `0.0`.
#[must_use]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Sanitizes `dt` and caps it at `max_delta`, logging when either kicks in.
#[must_use]
pub fn clamp_delta(dt: f32, max_delta: f32) -> f32 {
    if !dt.is_finite() {
        tracing::warn!(dt, "non-finite delta-time treated as zero");
        return 0.0;
    }
    let dt = sanitize_delta(dt);
    if dt > max_delta {
        tracing::warn!(
            "frame took {:.1}ms, clamping delta-time to {:.1}ms",
            dt * 1000.0,
            max_delta * 1000.0
        );
        return max_delta;
    }
    dt
}

/// Turns host timestamps into clamped delta-times.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_delta: f32,
    last: Option<Duration>,
    frame_count: u64,
    clamped_frames: u64,
}

impl FrameClock {
    /// Creates a clock that never reports more than `max_delta` seconds.
    #[must_use]
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta,
            last: None,
            frame_count: 0,
            clamped_frames: 0,
        }
    }

    /// Records a frame at `timestamp` and returns the delta-time to simulate.
    ///
    /// The first frame yields `0.0`. A timestamp earlier than the previous one
    /// also yields `0.0`.
    pub fn frame(&mut self, timestamp: Duration) -> f32 {
        self.frame_count += 1;
        let raw = match self.last.replace(timestamp) {
            Some(previous) => timestamp.saturating_sub(previous).as_secs_f32(),
            None => return 0.0,
        };
        if raw > self.max_delta {
            self.clamped_frames += 1;
        }
        clamp_delta(raw, self.max_delta)
    }

    /// Forgets the previous timestamp, so the next frame yields `0.0`.
    ///
    /// Call this when the loop resumes after being stopped.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames whose delta-time had to be clamped.
    #[must_use]
    pub fn clamped_frames(&self) -> u64 {
        self.clamped_frames
    }

    /// The upper bound on reported delta-time.
    #[must_use]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}
