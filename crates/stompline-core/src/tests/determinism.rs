//! Determinism verification tests.
//!
//! The simulation has no randomness and no hidden clock: the same level set,
//! configuration, intent sequence, and frame deltas always produce the same
//! world. Replays depend on this.

use crate::input::Intent;
use crate::simulation::{Simulation, TickReport};

use super::helpers::{builtin_simulation, DT};

/// Scripted input: run right, hopping every other half second, with a short
/// back-step every few seconds.
fn scripted_intent(frame: usize) -> Intent {
    let jump = (frame / 30) % 2 == 0;
    let back = frame % 240 > 220;
    Intent::from_controls(back, !back, jump)
}

/// Jittery but reproducible deltas around 60 Hz.
fn scripted_delta(frame: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let jitter = (frame % 7) as f32 * 0.001;
    DT + jitter
}

fn play(sim: &mut Simulation, frames: usize) -> Vec<TickReport> {
    (0..frames)
        .map(|frame| sim.tick(scripted_delta(frame), scripted_intent(frame)))
        .collect()
}

#[test]
fn identical_inputs_produce_identical_runs() {
    let mut a = builtin_simulation();
    let mut b = builtin_simulation();

    let reports_a = play(&mut a, 900);
    let reports_b = play(&mut b, 900);

    assert_eq!(reports_a, reports_b);
    assert_eq!(a.world(), b.world());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.frame(), b.frame());
}

#[test]
fn runs_match_frame_by_frame() {
    let mut a = builtin_simulation();
    let mut b = builtin_simulation();

    for frame in 0..600 {
        let dt = scripted_delta(frame);
        let intent = scripted_intent(frame);
        a.tick(dt, intent);
        b.tick(dt, intent);
        assert_eq!(a.world().player, b.world().player, "diverged at frame {frame}");
    }
}

#[test]
fn restart_reproduces_a_fresh_session() {
    let mut played = builtin_simulation();
    play(&mut played, 300);
    played.restart().unwrap();

    let fresh = builtin_simulation();
    assert_eq!(played.world(), fresh.world());
    assert_eq!(played.state(), fresh.state());

    let mut fresh = fresh;
    let after_restart = play(&mut played, 300);
    let from_fresh = play(&mut fresh, 300);
    assert_eq!(after_restart, from_fresh);
    assert_eq!(played.world(), fresh.world());
}

#[test]
fn reports_survive_json() {
    let mut sim = builtin_simulation();
    let reports = play(&mut sim, 600);

    let json = serde_json::to_string(&reports).unwrap();
    let restored: Vec<TickReport> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, reports);

    let state = serde_json::to_value(sim.state()).unwrap();
    assert_eq!(state["level"], sim.state().level);
}
