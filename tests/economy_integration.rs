//! Integration tests for the ledger and the build commit path
//!
//! - Sequential builds debit exactly and stop when funds run out
//! - Terrain legality is enforced for every caller
//! - Property tests: the ledger never over-debits under arbitrary operation sequences

use ant_colony::city::{attempt_build, BuildingType, Cost, Ledger, ResourceKind};
use ant_colony::core::config::{LedgerConfig, SimulationConfig};
use ant_colony::core::error::{BuildError, PlacementViolation};
use ant_colony::core::types::Vec2;
use ant_colony::world::{Rect, TerrainZone, World, ZoneKind};
use proptest::prelude::*;

fn world_with_ledger(food: u32, wood: u32, fish: u32) -> World {
    let mut config = SimulationConfig::default();
    config.ledger = LedgerConfig { food, wood, fish };
    World::new(config, 3)
}

fn pond() -> TerrainZone {
    TerrainZone::with_outline(
        ZoneKind::Water,
        Rect::new(Vec2::new(200.0, 200.0), 100.0, 100.0),
        vec![
            Vec2::new(250.0, 200.0),
            Vec2::new(300.0, 250.0),
            Vec2::new(250.0, 300.0),
            Vec2::new(200.0, 250.0),
        ],
    )
}

#[test]
fn test_two_homes_then_out_of_food() {
    let mut world = world_with_ledger(20, 20, 0);
    assert_eq!(world.config.costs.cost(BuildingType::Home), &Cost::new(10, 5, 0));

    assert!(attempt_build(&mut world, BuildingType::Home, Vec2::new(400.0, 400.0)).is_ok());
    assert!(attempt_build(&mut world, BuildingType::Home, Vec2::new(500.0, 400.0)).is_ok());
    assert_eq!(world.ledger.get(ResourceKind::Food), 0);
    assert_eq!(world.ledger.get(ResourceKind::Wood), 10);

    let third = attempt_build(&mut world, BuildingType::Home, Vec2::new(600.0, 400.0));
    assert_eq!(
        third,
        Err(BuildError::InsufficientFunds {
            building: BuildingType::Home
        })
    );
    assert_eq!(world.count_buildings(BuildingType::Home), 2);
    assert_eq!(world.ledger.get(ResourceKind::Wood), 10);
}

#[test]
fn test_water_rules_apply_to_every_builder() {
    let mut world = world_with_ledger(100, 100, 0);
    world.add_zone(pond());

    let in_pond = attempt_build(&mut world, BuildingType::Bonfire, Vec2::new(250.0, 250.0));
    assert_eq!(
        in_pond,
        Err(BuildError::IllegalPlacement {
            building: BuildingType::Bonfire,
            reason: PlacementViolation::InsideWater
        })
    );

    let inland = attempt_build(&mut world, BuildingType::FishingHut, Vec2::new(600.0, 600.0));
    assert!(matches!(
        inland,
        Err(BuildError::IllegalPlacement {
            reason: PlacementViolation::NotNearWater,
            ..
        })
    ));

    // just off the pond's eastern tip
    let shore = attempt_build(&mut world, BuildingType::FishingHut, Vec2::new(310.0, 250.0));
    assert!(shore.is_ok());
    assert_eq!(world.ledger.get(ResourceKind::Food), 90);
    assert_eq!(world.ledger.get(ResourceKind::Wood), 85);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut world = world_with_ledger(7, 100, 0);
    world.add_zone(pond());
    let before = world.ledger.clone();

    assert!(attempt_build(&mut world, BuildingType::Home, Vec2::new(700.0, 700.0)).is_err());
    assert!(attempt_build(&mut world, BuildingType::Bonfire, Vec2::new(250.0, 250.0)).is_err());
    assert_eq!(world.ledger, before);
    assert!(world.buildings.is_empty());
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Credit(ResourceKind, u32),
    ConsumeOne(ResourceKind),
    Meal,
    Build(BuildingType),
}

fn resource_kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::ALL.to_vec())
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (resource_kind(), 0u32..30).prop_map(|(k, n)| LedgerOp::Credit(k, n)),
        resource_kind().prop_map(LedgerOp::ConsumeOne),
        Just(LedgerOp::Meal),
        prop::sample::select(BuildingType::ALL.to_vec()).prop_map(LedgerOp::Build),
    ]
}

proptest! {
    #[test]
    fn prop_builds_debit_exactly_or_not_at_all(
        start in (0u32..60, 0u32..60, 0u32..60),
        ops in prop::collection::vec(ledger_op(), 1..80),
    ) {
        let mut world = world_with_ledger(start.0, start.1, start.2);
        let mut x = 60.0;

        for op in ops {
            let before = world.ledger.clone();
            match op {
                LedgerOp::Credit(kind, n) => {
                    world.ledger.credit(kind, n);
                    prop_assert_eq!(world.ledger.get(kind), before.get(kind) + n);
                }
                LedgerOp::ConsumeOne(kind) => {
                    let took = world.ledger.consume_one(kind);
                    prop_assert_eq!(took, before.get(kind) > 0);
                    prop_assert_eq!(world.ledger.get(kind), before.get(kind) - u32::from(took));
                }
                LedgerOp::Meal => {
                    let eaten = world.ledger.consume_meal();
                    prop_assert_eq!(eaten.is_some(), before.has_meal());
                }
                LedgerOp::Build(ty) => {
                    let cost = *world.config.costs.cost(ty);
                    let affordable = before.can_afford(&cost);
                    // no water in this world, so a fishing hut is never legal
                    let legal = ty != BuildingType::FishingHut;
                    x += 1.0;
                    let result = attempt_build(&mut world, ty, Vec2::new(x, 100.0));
                    prop_assert_eq!(result.is_ok(), affordable && legal);
                    if result.is_ok() {
                        prop_assert_eq!(world.ledger.get(ResourceKind::Food), before.get(ResourceKind::Food) - cost.food);
                        prop_assert_eq!(world.ledger.get(ResourceKind::Wood), before.get(ResourceKind::Wood) - cost.wood);
                        prop_assert_eq!(world.ledger.get(ResourceKind::Fish), before.get(ResourceKind::Fish) - cost.fish);
                    } else {
                        prop_assert_eq!(&world.ledger, &before);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_pay_is_all_or_nothing(
        food in 0u32..40, wood in 0u32..40, fish in 0u32..40,
        cost in (0u32..40, 0u32..40, 0u32..40),
    ) {
        let mut ledger = Ledger::from_config(&LedgerConfig { food, wood, fish });
        let cost = Cost::new(cost.0, cost.1, cost.2);
        let paid = ledger.pay(&cost);
        prop_assert_eq!(paid, food >= cost.food && wood >= cost.wood && fish >= cost.fish);
        if paid {
            prop_assert_eq!(ledger.get(ResourceKind::Food), food - cost.food);
            prop_assert_eq!(ledger.get(ResourceKind::Wood), wood - cost.wood);
            prop_assert_eq!(ledger.get(ResourceKind::Fish), fish - cost.fish);
        } else {
            prop_assert_eq!(ledger.get(ResourceKind::Food), food);
            prop_assert_eq!(ledger.get(ResourceKind::Wood), wood);
            prop_assert_eq!(ledger.get(ResourceKind::Fish), fish);
        }
    }
}
