//! Player-versus-platform resolution.
//!
//! Only the first overlapping platform, in store order, is resolved each tick.
//! Corner contacts at geometry seams can therefore resolve against the "wrong"
//! platform for one frame; the next tick corrects it.

use crate::entity::{BlockStrike, EntityClass, EntityId, ItemKind};
use crate::event::Event;
use crate::geometry::{contact_side, overlaps, ContactSide, Rect};
use crate::world::World;

use super::{Flow, ResolveContext, Resolver};

/// Lands, blocks, and head-bumps the player against level geometry.
///
/// | Side | Effect |
/// |---|---|
/// | `Top` | `y` snapped onto the platform, `vy = 0`, grounded, jump ends |
/// | `Bottom` | `y` snapped below the platform, `vy = 0`, block struck |
/// | `Left` / `Right` | `x` snapped to the edge, `vx = 0` |
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformResolver;

impl PlatformResolver {
    fn first_contact(world: &World) -> Option<(EntityId, Rect)> {
        let player = world.player.rect();
        world
            .platforms
            .iter()
            .map(|p| (p, p.rect()))
            .find(|(_, rect)| overlaps(&player, rect))
            .map(|(p, rect)| (p.id.clone(), rect))
    }

    fn strike(world: &mut World, block: &EntityId, ctx: &mut ResolveContext<'_>) {
        let tier = world.player.tier;
        match world.strike_block(block, tier, ctx.physics.block_bump_duration) {
            BlockStrike::Dispensed(item) => {
                world.release_item(block, item, ctx.physics.item_rise_velocity);
                ctx.record(Event::BlockHit {
                    block: block.clone(),
                    released: item,
                });
                if item == ItemKind::Coin {
                    ctx.record(Event::CoinPopped {
                        block: block.clone(),
                        points: ctx.scoring.coin,
                    });
                }
            }
            BlockStrike::Broken => ctx.record(Event::BrickBroken {
                block: block.clone(),
                points: ctx.scoring.brick,
            }),
            BlockStrike::Bumped | BlockStrike::Inert => {}
        }
    }
}

impl Resolver for PlatformResolver {
    fn class(&self) -> EntityClass {
        EntityClass::Platform
    }

    fn resolve(&self, world: &mut World, ctx: &mut ResolveContext<'_>) -> Flow {
        let Some((id, rect)) = Self::first_contact(world) else {
            return Flow::Continue;
        };

        let side = contact_side(&world.player.rect(), &rect);
        let player = &mut world.player;
        match side {
            ContactSide::Top => {
                player.position.y = rect.y - player.size.y;
                player.velocity.y = 0.0;
                player.grounded = true;
                player.jumping = false;
            }
            ContactSide::Bottom => {
                player.position.y = rect.bottom();
                player.velocity.y = 0.0;
                Self::strike(world, &id, ctx);
            }
            ContactSide::Left => {
                player.position.x = rect.x - player.size.x;
                player.velocity.x = 0.0;
            }
            ContactSide::Right => {
                player.position.x = rect.right();
                player.velocity.x = 0.0;
            }
        }
        Flow::Continue
    }
}
