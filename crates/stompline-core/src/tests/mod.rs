//! Crate-level tests that drive the full simulation.
//!
//! - `scenarios.rs`: end-to-end play through the built-in levels
//! - `determinism.rs`: identical inputs produce identical runs
//! - `properties.rs`: proptest invariants over physics and collisions
//! - `helpers.rs`: worlds and simulations staged for tests

pub mod helpers;

mod determinism;
mod properties;
