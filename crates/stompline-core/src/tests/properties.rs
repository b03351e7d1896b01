//! Property tests over physics and collision resolution.

use glam::Vec2;
use proptest::prelude::*;

use crate::config::PhysicsConfig;
use crate::entity::{
    BlockStrike, CollectibleState, EntityId, ItemKind, PlatformKind, PlatformState, PlayerState,
    PowerTier,
};
use crate::event::Event;
use crate::geometry::{overlaps, Rect};
use crate::input::Intent;

use super::helpers::{empty_world, flat_simulation, parked_goomba};

fn rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn item_kind() -> impl Strategy<Value = ItemKind> {
    prop_oneof![
        Just(ItemKind::Coin),
        Just(ItemKind::Mushroom),
        Just(ItemKind::Star),
        Just(ItemKind::FireFlower),
    ]
}

fn tier() -> impl Strategy<Value = PowerTier> {
    prop_oneof![Just(PowerTier::Small), Just(PowerTier::Big)]
}

proptest! {
    #[test]
    fn fall_speed_never_exceeds_cap(
        vy in -1000.0f32..2000.0,
        dt in 0.0f32..1.0,
        jump in any::<bool>(),
        grounded in any::<bool>(),
        steps in 1usize..20,
    ) {
        let tuning = PhysicsConfig::default();
        let mut player = PlayerState::new(Vec2::new(100.0, 100.0));
        player.velocity.y = vy;
        player.grounded = grounded;
        let intent = Intent::from_controls(false, false, jump);

        for _ in 0..steps {
            player.update(dt, intent, tuning.gravity, &tuning);
            prop_assert!(
                player.velocity.y <= tuning.max_fall_speed,
                "vy={} exceeds {}",
                player.velocity.y,
                tuning.max_fall_speed
            );
        }
    }

    #[test]
    fn left_edge_clamps_position_and_velocity(
        x in -50.0f32..-0.01,
        vx in -300.0f32..=0.0,
        dt in 0.0f32..0.1,
        left in any::<bool>(),
    ) {
        let tuning = PhysicsConfig::default();
        let mut player = PlayerState::new(Vec2::new(x, 300.0));
        player.velocity.x = vx;

        player.update(dt, Intent::from_controls(left, false, false), tuning.gravity, &tuning);

        prop_assert_eq!(player.position.x, 0.0);
        prop_assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn overlap_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn stomp_never_costs_a_life(
        enemy_x in 200.0f32..700.0,
        dx in -20.0f32..20.0,
        penetration in 0.5f32..10.0,
        vy in 1.0f32..400.0,
    ) {
        let mut sim = flat_simulation();
        sim.world_mut().enemies.push(parked_goomba("goomba1", enemy_x, 460.0));
        let player = &mut sim.world_mut().player;
        player.position = Vec2::new(enemy_x + dx, 420.0 + penetration);
        player.velocity.y = vy;

        let report = sim.handle_collisions();

        prop_assert_eq!(sim.state().lives, 3);
        prop_assert!(sim.world().enemies[0].is_dead);
        prop_assert!(report.summary.enemy_hit());
    }

    #[test]
    fn lethal_contact_costs_exactly_one_life(
        offsets in proptest::collection::vec((any::<bool>(), 5.0f32..35.0), 1..6),
        vy in -400.0f32..400.0,
    ) {
        let mut sim = flat_simulation();
        for (i, (right, offset)) in offsets.iter().enumerate() {
            let x = if *right { 400.0 + offset } else { 400.0 - offset };
            sim.world_mut().enemies.push(parked_goomba(&format!("goomba{i}"), x, 460.0));
        }
        sim.world_mut().player.position = Vec2::new(400.0, 460.0);
        sim.world_mut().player.velocity.y = vy;

        let report = sim.handle_collisions();

        prop_assert_eq!(sim.state().lives, 2);
        let deaths = report
            .events
            .iter()
            .filter(|e| matches!(e, Event::PlayerDied { .. }))
            .count();
        prop_assert_eq!(deaths, 1);
    }

    #[test]
    fn bonus_block_dispenses_exactly_once(
        contains in proptest::option::of(item_kind()),
        strikes in proptest::collection::vec(tier(), 1..8),
    ) {
        let mut world = empty_world();
        let id = EntityId::new("question1");
        world.platforms.push(PlatformState::new(
            id.clone(),
            PlatformKind::Question,
            Vec2::new(300.0, 300.0),
            Vec2::splat(40.0),
            contains,
        ));

        let dispensed: Vec<ItemKind> = strikes
            .iter()
            .filter_map(|tier| match world.strike_block(&id, *tier, 0.2) {
                BlockStrike::Dispensed(item) => Some(item),
                _ => None,
            })
            .collect();

        prop_assert_eq!(dispensed, vec![contains.unwrap_or(ItemKind::Coin)]);
        prop_assert!(world.platform(&id).is_some_and(|block| block.hit));
    }

    #[test]
    fn second_pickup_has_no_effect(kind in item_kind()) {
        let mut world = empty_world();
        let id = EntityId::new("item1");
        world.collectibles.push(CollectibleState::new(
            id.clone(),
            kind,
            Vec2::new(300.0, 300.0),
            Vec2::splat(30.0),
        ));

        prop_assert_eq!(world.collect(&id), Some(kind));
        prop_assert_eq!(world.collect(&id), None);
        prop_assert_eq!(world.active_collectibles().count(), 0);
    }
}
