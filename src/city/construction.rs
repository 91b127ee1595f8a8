//! Construction - the single path by which a paid building enters the world

use crate::city::building::BuildingType;
use crate::core::error::{BuildError, PlacementViolation};
use crate::core::types::{BuildingId, Vec2};
use crate::world::terrain::{TerrainZone, ZoneKind};
use crate::world::World;

/// Check terrain legality for a building at `position`.
///
/// Only fishing huts may stand in water, and a fishing hut must be within
/// `water_reach` of some water zone's edge.
pub fn placement_violation(
    zones: &[TerrainZone],
    building_type: BuildingType,
    position: Vec2,
    water_reach: f32,
) -> Option<PlacementViolation> {
    let mut water = zones.iter().filter(|zone| zone.kind == ZoneKind::Water);

    if building_type == BuildingType::FishingHut {
        if water.any(|zone| zone.near_edge(position, water_reach)) {
            None
        } else {
            Some(PlacementViolation::NotNearWater)
        }
    } else if water.any(|zone| zone.contains(position)) {
        Some(PlacementViolation::InsideWater)
    } else {
        None
    }
}

/// Pay for and place a building.
///
/// On any error the ledger and building list are left untouched.
/// A new base relocates the Queen.
pub fn attempt_build(
    world: &mut World,
    building_type: BuildingType,
    position: Vec2,
) -> Result<BuildingId, BuildError> {
    let cost = *world.config.costs.cost(building_type);
    if !world.ledger.can_afford(&cost) {
        return Err(BuildError::InsufficientFunds {
            building: building_type,
        });
    }

    let reach = world.config.world.water_edge_reach;
    if let Some(reason) = placement_violation(&world.zones, building_type, position, reach) {
        return Err(BuildError::IllegalPlacement {
            building: building_type,
            reason,
        });
    }

    if !world.ledger.pay(&cost) {
        return Err(BuildError::InsufficientFunds {
            building: building_type,
        });
    }
    let id = world.spawn_building(building_type, position);

    tracing::info!(
        tick = world.current_tick,
        building = %building_type,
        x = position.x,
        y = position.y,
        "building placed"
    );
    Ok(id)
}
