//! Seeded world bootstrap: terrain, resource nodes, the base and the first ants

use rand::Rng;

use crate::city::building::BuildingType;
use crate::city::ledger::ResourceKind;
use crate::core::config::{SimulationConfig, ZoneSpec};
use crate::core::types::Vec2;
use crate::world::nodes::ResourceNode;
use crate::world::terrain::{Rect, TerrainZone, ZoneKind};
use crate::world::World;

/// Build a fresh world from a config and seed.
///
/// The same pair always yields the same world.
pub fn generate_world(config: SimulationConfig, seed: u64) -> World {
    let mut world = World::new(config, seed);
    let center = world.config.world_center();

    generate_terrain(&mut world, center);
    generate_nodes(&mut world);

    world.spawn_building(BuildingType::Base, center);
    for _ in 0..world.config.world.initial_adults {
        world.spawn_ant(center, true);
    }
    for _ in 0..world.config.world.initial_children {
        world.spawn_ant(center, false);
    }

    tracing::debug!(
        zones = world.zones.len(),
        nodes = world.nodes.len(),
        ants = world.ants.len(),
        seed,
        "world generated"
    );
    world
}

fn generate_terrain(world: &mut World, center: Vec2) {
    let generation = world.config.generation.clone();
    let base_rect = Rect::around(center, generation.base_clearance);
    let (width, height) = (world.config.world.width, world.config.world.height);

    let kinds = [
        (ZoneKind::Water, &generation.water),
        (ZoneKind::Mountain, &generation.mountain),
        (ZoneKind::Sand, &generation.sand),
        (ZoneKind::Flowers, &generation.flowers),
    ];

    for (kind, shape) in kinds {
        let count = sample_u32(&mut world.rng, shape.min_count, shape.max_count);
        for _ in 0..count {
            for _ in 0..generation.zone_tries {
                let bounds = sample_zone_rect(&mut world.rng, shape, width, height);
                let collides = bounds.intersects(&base_rect)
                    || world.zones.iter().any(|zone| zone.bounds.intersects(&bounds));
                if collides {
                    continue;
                }
                let zone = TerrainZone::generate(
                    kind,
                    bounds,
                    generation.outline_vertices,
                    generation.outline_jitter,
                    &mut world.rng,
                );
                world.add_zone(zone);
                break;
            }
        }
    }
}

fn generate_nodes(world: &mut World) {
    let generation = world.config.generation.clone();
    let (width, height) = (world.config.world.width, world.config.world.height);

    let batches = [
        (ResourceKind::Food, generation.food_nodes, generation.food_margin),
        (ResourceKind::Wood, generation.wood_nodes, generation.outer_margin),
        (ResourceKind::Fish, generation.fish_nodes, generation.outer_margin),
    ];

    for (kind, count, margin) in batches {
        for _ in 0..count {
            let x = sample_f32(&mut world.rng, margin, width - margin);
            let y = sample_f32(&mut world.rng, margin, height - margin);
            world.add_node(ResourceNode::new(Vec2::new(x, y), kind));
        }
    }
}

fn sample_zone_rect<R: Rng + ?Sized>(rng: &mut R, shape: &ZoneSpec, width: f32, height: f32) -> Rect {
    let x = sample_f32(rng, 0.0, width - shape.max_width);
    let y = sample_f32(rng, 0.0, height - shape.max_height);
    let w = sample_f32(rng, shape.min_width, shape.max_width);
    let h = sample_f32(rng, shape.min_height, shape.max_height);
    Rect::new(Vec2::new(x, y), w, h)
}

/// Uniform in `[low, high]`, collapsing to `low` when the range is empty
fn sample_f32<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low.max(0.0)
    }
}

fn sample_u32<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_world(SimulationConfig::default(), 99);
        let b = generate_world(SimulationConfig::default(), 99);
        assert_eq!(a.zones, b.zones);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_zones_avoid_base_and_each_other() {
        let world = generate_world(SimulationConfig::default(), 7);
        let clearance = world.config.generation.base_clearance;
        let base_rect = Rect::around(world.config.world_center(), clearance);

        for (i, zone) in world.zones.iter().enumerate() {
            assert!(!zone.bounds.intersects(&base_rect));
            for other in world.zones.iter().skip(i + 1) {
                assert!(!zone.bounds.intersects(&other.bounds));
            }
        }
    }

    #[test]
    fn test_nodes_and_population_seeded() {
        let config = SimulationConfig::default();
        let world = generate_world(config.clone(), 3);

        assert_eq!(
            world.nodes.len() as u32,
            config.generation.food_nodes + config.generation.wood_nodes + config.generation.fish_nodes
        );
        for node in world.nodes.iter().filter(|n| n.kind != ResourceKind::Food) {
            assert!(node.position.x >= config.generation.outer_margin);
            assert!(node.position.x <= config.world.width - config.generation.outer_margin);
        }

        let adults = world.ants.iter().filter(|a| a.is_adult).count() as u32;
        let children = world.ants.len() as u32 - adults;
        assert_eq!(adults, config.world.initial_adults);
        assert_eq!(children, config.world.initial_children);
        assert_eq!(world.count_buildings(BuildingType::Base), 1);
        assert_eq!(world.queen.position, config.world_center());
    }
}
