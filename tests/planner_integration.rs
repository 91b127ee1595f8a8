//! Integration tests for the auto-builder
//!
//! - Homelessness outranks every other recommendation
//! - The planner drives real builds through the shared commit path
//! - Builds respect the cooldown and never overdraw the ledger

use ant_colony::city::{BuildingType, Ledger};
use ant_colony::core::config::{LedgerConfig, SimulationConfig};
use ant_colony::core::types::Vec2;
use ant_colony::planner::{analyze_colony, Recommendation};
use ant_colony::simulation::tick::{run_simulation_tick, SimulationEvent};
use ant_colony::world::{generate_world, World};

#[test]
fn test_twelve_homeless_want_three_homes_first() {
    let config = SimulationConfig::default();
    let mut world = World::new(config, 5);
    world.spawn_building(BuildingType::Base, Vec2::new(600.0, 450.0));
    for i in 0..12 {
        world.spawn_ant(Vec2::new(600.0, 450.0), i % 2 == 0);
    }
    for ant in world.ants.iter_mut().take(6) {
        ant.hunger = 95.0;
    }
    // starved of everything, so every shortage rule fires too
    let ledger = Ledger::from_config(&LedgerConfig { food: 0, wood: 0, fish: 0 });

    let analysis = analyze_colony(&world.ants, &world.buildings, &ledger, &world.config);
    assert_eq!(analysis.homeless_ants, 12);

    let recs = analysis.recommendations(&world.config);
    assert_eq!(
        recs[0],
        Recommendation {
            building: BuildingType::Home,
            count: 3,
            priority: 100
        }
    );
    assert!(recs[1..].iter().all(|r| r.priority < 100));
    assert_eq!(recs.len(), 6);
}

#[test]
fn test_planner_builds_a_home_first() {
    let mut world = generate_world(SimulationConfig::default(), 31);
    let interval = world.config.planner.analysis_interval;

    let mut placed = Vec::new();
    for _ in 0..=interval {
        for event in run_simulation_tick(&mut world) {
            if let SimulationEvent::BuildingPlaced { building_type, reason, .. } = event {
                placed.push((world.current_tick, building_type, reason));
            }
        }
    }

    assert_eq!(placed.len(), 1);
    let (tick, building_type, reason) = &placed[0];
    assert_eq!(*tick, interval + 1);
    assert_eq!(*building_type, BuildingType::Home);
    assert_eq!(reason, "Priority 100: home");
    assert_eq!(world.count_buildings(BuildingType::Home), 1);
    assert_eq!(world.planner.last_build_tick(), interval + 1);
}

#[test]
fn test_planner_paces_builds_and_keeps_ledger_sound() {
    let mut world = generate_world(SimulationConfig::default(), 8);
    let cooldown = world.config.planner.build_cooldown;

    let mut build_ticks = Vec::new();
    for _ in 0..2500 {
        for event in run_simulation_tick(&mut world) {
            if let SimulationEvent::BuildingPlaced { .. } = event {
                build_ticks.push(world.current_tick);
            }
        }
    }

    assert!(build_ticks.len() >= 5);
    for pair in build_ticks.windows(2) {
        assert!(pair[1] - pair[0] > cooldown);
    }
    assert!(world.count_buildings(BuildingType::Home) >= 1);
    assert!(world.count_buildings(BuildingType::Hub) >= 1);
}

#[test]
fn test_disabled_planner_leaves_only_the_base() {
    let mut config = SimulationConfig::default();
    config.planner.enabled = false;
    let mut world = generate_world(config, 8);
    for _ in 0..1000 {
        run_simulation_tick(&mut world);
    }
    assert_eq!(world.buildings.len(), 1);
    assert!(world.planner.last_report().is_none());
}
