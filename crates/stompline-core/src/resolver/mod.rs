//! Collision resolvers for the player against each entity class.
//!
//! Resolvers are the write phase of a tick's collision pass. Each one tests the
//! player against one entity class, applies the resulting mutations to the
//! [`World`] synchronously, and records an [`Event`] for every notable outcome.
//!
//! # Order
//!
//! The simulation runs resolvers in a fixed order:
//!
//! 1. [`PlatformResolver`]: landing, head bumps, walls, block strikes
//! 2. [`EnemyResolver`]: stomps, star kills, lethal contact
//! 3. [`CollectibleResolver`]: pickups
//!
//! A resolver returning [`Flow::PlayerHit`] ends the pass; later resolvers do
//! not run that tick. A resolver records at most one lethal contact, so a tick
//! costs at most one life however many enemies overlap the player.
//!
//! # Invariants
//!
//! - Resolvers MUST iterate entities in store order
//! - Resolvers MUST address entities by id once they start mutating, so an
//!   entity removed earlier in the frame is skipped rather than misapplied
//! - Score, coins, and lives are never touched directly; they are folded from
//!   the recorded events by the driver

mod collectible;
mod enemy;
mod platform;

pub use collectible::CollectibleResolver;
pub use enemy::EnemyResolver;
pub use platform::PlatformResolver;

use crate::config::{PhysicsConfig, ScoringConfig};
use crate::entity::EntityClass;
use crate::event::Event;
use crate::world::World;

/// Whether the collision pass continues after a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next resolver.
    Continue,
    /// The player took a lethal hit; stop the pass.
    PlayerHit,
}

/// Tunables and the event sink shared by the resolvers of one tick.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    /// Physics tunables.
    pub physics: &'a PhysicsConfig,
    /// Score table.
    pub scoring: &'a ScoringConfig,
    events: Vec<Event>,
}

impl<'a> ResolveContext<'a> {
    /// Creates a context with an empty event list.
    #[must_use]
    pub fn new(physics: &'a PhysicsConfig, scoring: &'a ScoringConfig) -> Self {
        Self {
            physics,
            scoring,
            events: Vec::new(),
        }
    }

    /// Records an event.
    pub fn record(&mut self, event: Event) {
        tracing::debug!(?event, "collision event");
        self.events.push(event);
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the context, returning its events in record order.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Resolves the player's contacts with one entity class.
///
/// # Example
///
/// ```
/// use stompline_core::entity::EntityClass;
/// use stompline_core::resolver::{Flow, ResolveContext, Resolver};
/// use stompline_core::world::World;
///
/// struct Inert;
///
/// impl Resolver for Inert {
///     fn class(&self) -> EntityClass {
///         EntityClass::Platform
///     }
///
///     fn resolve(&self, _world: &mut World, _ctx: &mut ResolveContext<'_>) -> Flow {
///         Flow::Continue
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// The entity class this resolver tests the player against.
    fn class(&self) -> EntityClass;

    /// Applies every contact between the player and this class.
    ///
    /// # Arguments
    ///
    /// * `world` - Entity stores (mutated in place)
    /// * `ctx` - Tunables and the event sink
    fn resolve(&self, world: &mut World, ctx: &mut ResolveContext<'_>) -> Flow;
}

/// The resolvers in their fixed run order.
#[must_use]
pub fn default_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(PlatformResolver),
        Box::new(EnemyResolver),
        Box::new(CollectibleResolver),
    ]
}
