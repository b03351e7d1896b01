//! Factories for staged worlds and simulations.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entity::{EnemyKind, EnemyState, EntityId, PlatformKind, PlatformState};
use crate::input::Intent;
use crate::level::{LevelDescriptor, LevelSet, Point};
use crate::simulation::{Simulation, TickReport};
use crate::world::World;

/// Fixed step used by the scenario tests.
pub const DT: f32 = 1.0 / 60.0;

/// A 1000x600 level with no entities. The player starts at (50, 450) and
/// the finish is at x = 900.
pub fn empty_level(id: u32) -> LevelDescriptor {
    LevelDescriptor {
        id,
        width: 1000.0,
        height: 600.0,
        start_position: Point { x: 50.0, y: 450.0 },
        finish_position: Point { x: 900.0, y: 450.0 },
        platforms: Vec::new(),
        enemies: Vec::new(),
        collectibles: Vec::new(),
    }
}

/// World built from [`empty_level`].
pub fn empty_world() -> World {
    World::from_level(&empty_level(1))
}

/// A playing simulation on [`empty_level`] with a floor at y = 500.
pub fn flat_simulation() -> Simulation {
    let levels = LevelSet::new(vec![empty_level(1)]).unwrap();
    let mut sim = Simulation::new(GameConfig::default(), levels).unwrap();
    sim.start().unwrap();
    sim.world_mut().platforms.push(ground(0.0, 500.0, 1000.0));
    sim
}

/// A playing simulation over the built-in levels.
pub fn builtin_simulation() -> Simulation {
    let mut sim = Simulation::with_builtin_levels(GameConfig::default()).unwrap();
    sim.start().unwrap();
    sim
}

/// A ground strip 100 px tall.
pub fn ground(x: f32, y: f32, width: f32) -> PlatformState {
    PlatformState::new(
        EntityId::new(format!("ground@{x}")),
        PlatformKind::Ground,
        Vec2::new(x, y),
        Vec2::new(width, 100.0),
        None,
    )
}

/// A stationary 40x40 goomba.
pub fn parked_goomba(id: &str, x: f32, y: f32) -> EnemyState {
    EnemyState::new(
        EntityId::new(id),
        EnemyKind::Goomba,
        Vec2::new(x, y),
        Vec2::splat(40.0),
        0.0,
        -1.0,
        None,
    )
}

/// Ticks `frames` times with the same intent, merging the reports.
pub fn run_frames(sim: &mut Simulation, frames: usize, intent: Intent) -> TickReport {
    let mut report = TickReport::default();
    for _ in 0..frames {
        report.merge(sim.tick(DT, intent));
    }
    report
}
