//! Player-versus-enemy resolution.
//!
//! # Outcomes
//!
//! For every live enemy overlapping the player, in store order:
//!
//! | Condition | Outcome |
//! |---|---|
//! | contact side `Top` and player falling | stomp: enemy dies, player bounces |
//! | star power active | star kill: enemy dies |
//! | invincible (respawn grace) | contact ignored |
//! | otherwise | lethal hit |
//!
//! "Falling" is read once, before the first enemy is resolved. A stomp
//! bounce therefore does not turn a simultaneous second stomp into a hit.
//!
//! Only the first lethal contact is recorded. Stomps and star kills on the
//! remaining enemies still apply in the same pass.

use crate::entity::{EntityClass, EntityId};
use crate::event::Event;
use crate::geometry::{contact_side, overlaps, ContactSide};
use crate::world::World;

use super::{Flow, ResolveContext, Resolver};

/// Stomps, star kills, and lethal enemy contact.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyResolver;

impl Resolver for EnemyResolver {
    fn class(&self) -> EntityClass {
        EntityClass::Enemy
    }

    fn resolve(&self, world: &mut World, ctx: &mut ResolveContext<'_>) -> Flow {
        let player_rect = world.player.rect();
        let falling = world.player.velocity.y > 0.0;

        let contacts: Vec<(EntityId, ContactSide)> = world
            .live_enemies()
            .filter(|enemy| overlaps(&player_rect, &enemy.rect()))
            .map(|enemy| (enemy.id.clone(), contact_side(&player_rect, &enemy.rect())))
            .collect();

        let mut flow = Flow::Continue;
        for (id, side) in contacts {
            if side == ContactSide::Top && falling {
                if world.kill_enemy(&id) {
                    world.player.velocity.y = -ctx.physics.stomp_bounce_velocity;
                    ctx.record(Event::EnemyStomped {
                        enemy: id,
                        points: ctx.scoring.stomp,
                    });
                }
            } else if world.player.has_star() {
                if world.kill_enemy(&id) {
                    ctx.record(Event::EnemyStarKilled {
                        enemy: id,
                        points: ctx.scoring.stomp,
                    });
                }
            } else if world.player.is_invincible() {
                tracing::trace!(enemy = %id, "contact ignored while invincible");
            } else if flow == Flow::PlayerHit {
                tracing::trace!(enemy = %id, "further lethal contact ignored");
            } else if world.enemy(&id).is_some_and(|enemy| !enemy.is_dead) {
                ctx.record(Event::PlayerHit { enemy: id });
                flow = Flow::PlayerHit;
            }
        }
        flow
    }
}
