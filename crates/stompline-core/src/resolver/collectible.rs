//! Player-versus-collectible resolution.
//!
//! Overlap alone triggers a pickup; the contact side is irrelevant.

use crate::entity::{EntityClass, EntityId, ItemKind, PowerKind, PowerTier};
use crate::event::Event;
use crate::geometry::overlaps;
use crate::world::World;

use super::{Flow, ResolveContext, Resolver};

/// Picks up every overlapping item and applies its effect to the player.
///
/// | Item | Effect | Score |
/// |---|---|---|
/// | coin | +1 coin | `coin` |
/// | mushroom | grow to big; +1 life if already big | `big_item` |
/// | star | star power | `star_item` |
/// | fire flower | grow to big, fire power | `fire_item` |
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectibleResolver;

impl CollectibleResolver {
    fn apply(world: &mut World, id: EntityId, kind: ItemKind, ctx: &mut ResolveContext<'_>) {
        let player = &mut world.player;
        let points = match kind {
            ItemKind::Coin => ctx.scoring.coin,
            ItemKind::Mushroom => {
                if player.tier == PowerTier::Big {
                    ctx.record(Event::ExtraLife { item: id.clone() });
                } else {
                    player.set_tier(PowerTier::Big);
                }
                ctx.scoring.big_item
            }
            ItemKind::Star => {
                player.activate_star(ctx.physics.star_duration);
                ctx.scoring.star_item
            }
            ItemKind::FireFlower => {
                player.set_tier(PowerTier::Big);
                if !player.has_star() {
                    player.power = PowerKind::Fire;
                }
                ctx.scoring.fire_item
            }
        };
        ctx.record(Event::ItemCollected {
            item: id,
            kind,
            points,
        });
    }
}

impl Resolver for CollectibleResolver {
    fn class(&self) -> EntityClass {
        EntityClass::Collectible
    }

    fn resolve(&self, world: &mut World, ctx: &mut ResolveContext<'_>) -> Flow {
        let player_rect = world.player.rect();
        let touched: Vec<EntityId> = world
            .active_collectibles()
            .filter(|item| overlaps(&player_rect, &item.rect()))
            .map(|item| item.id.clone())
            .collect();

        for id in touched {
            if let Some(kind) = world.collect(&id) {
                Self::apply(world, id, kind, ctx);
            }
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::{PhysicsConfig, ScoringConfig};
    use crate::entity::CollectibleState;
    use crate::tests::helpers::empty_world;

    fn item(id: &str, kind: ItemKind, x: f32, y: f32) -> CollectibleState {
        CollectibleState::new(EntityId::new(id), kind, Vec2::new(x, y), Vec2::splat(30.0))
    }

    fn run(world: &mut World) -> Vec<Event> {
        let physics = PhysicsConfig::default();
        let scoring = ScoringConfig::default();
        let mut ctx = ResolveContext::new(&physics, &scoring);
        assert_eq!(CollectibleResolver.resolve(world, &mut ctx), Flow::Continue);
        ctx.into_events()
    }

    #[test]
    fn coin_pickup_scores_and_counts() {
        let mut world = empty_world();
        world.collectibles.push(item("coin1", ItemKind::Coin, 300.0, 500.0));
        world.player.position = Vec2::new(290.0, 480.0);

        let events = run(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].points(), 50);
        assert_eq!(events[0].coins(), 1);
        assert!(world.collectibles[0].collected);
    }

    #[test]
    fn second_pass_does_not_collect_again() {
        let mut world = empty_world();
        world.collectibles.push(item("coin1", ItemKind::Coin, 300.0, 500.0));
        world.player.position = Vec2::new(290.0, 480.0);

        run(&mut world);
        assert!(run(&mut world).is_empty());
    }

    #[test]
    fn mushroom_grows_small_player() {
        let mut world = empty_world();
        world.collectibles.push(item("mushroom1", ItemKind::Mushroom, 300.0, 500.0));
        world.player.position = Vec2::new(290.0, 490.0);

        let events = run(&mut world);
        assert_eq!(world.player.tier, PowerTier::Big);
        assert_eq!(world.player.size, Vec2::new(40.0, 80.0));
        assert_eq!(world.player.position.y, 450.0);
        assert_eq!(events[0].points(), 200);
        assert!(events.iter().all(|e| e.extra_lives() == 0));
    }

    #[test]
    fn mushroom_gives_life_when_big() {
        let mut world = empty_world();
        world.collectibles.push(item("mushroom1", ItemKind::Mushroom, 300.0, 500.0));
        world.player.set_tier(PowerTier::Big);
        world.player.position = Vec2::new(290.0, 460.0);

        let events = run(&mut world);
        assert_eq!(events.iter().map(Event::extra_lives).sum::<u32>(), 1);
        assert_eq!(events.iter().map(Event::points).sum::<u32>(), 200);
    }

    #[test]
    fn star_grants_star_power() {
        let mut world = empty_world();
        world.collectibles.push(item("star1", ItemKind::Star, 300.0, 500.0));
        world.player.position = Vec2::new(290.0, 490.0);

        let events = run(&mut world);
        assert!(world.player.has_star());
        assert!(world.player.is_invincible());
        assert_eq!(world.player.star_timer, 10.0);
        assert_eq!(events[0].points(), 500);
    }

    #[test]
    fn fire_flower_grows_and_grants_fire() {
        let mut world = empty_world();
        world
            .collectibles
            .push(item("flower1", ItemKind::FireFlower, 300.0, 500.0));
        world.player.position = Vec2::new(290.0, 490.0);

        let events = run(&mut world);
        assert_eq!(world.player.tier, PowerTier::Big);
        assert_eq!(world.player.power, PowerKind::Fire);
        assert_eq!(events[0].points(), 300);
    }

    #[test]
    fn touching_several_items_collects_all() {
        let mut world = empty_world();
        world.collectibles.push(item("coin1", ItemKind::Coin, 300.0, 500.0));
        world.collectibles.push(item("coin2", ItemKind::Coin, 320.0, 500.0));
        world.player.position = Vec2::new(300.0, 490.0);

        let events = run(&mut world);
        assert_eq!(events.iter().map(Event::coins).sum::<u32>(), 2);
    }
}
