//! Colony analysis - the aggregate snapshot the planner decides from

use std::collections::BTreeMap;

use serde::Serialize;

use crate::city::building::{Building, BuildingType};
use crate::city::ledger::{Ledger, ResourceKind};
use crate::core::config::SimulationConfig;
use crate::entity::ant::Ant;

/// A building the planner would like, with how many and how urgently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub building: BuildingType,
    pub count: u32,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColonyAnalysis {
    pub total_ants: usize,
    pub adult_ants: usize,
    pub children: usize,
    pub happy_ants: usize,
    pub building_counts: BTreeMap<BuildingType, usize>,
    pub housing_capacity: usize,
    pub homeless_ants: usize,
    pub resource_shortages: Vec<ResourceKind>,
}

/// Residents all homes together can house
pub fn housing_capacity(buildings: &[Building], config: &SimulationConfig) -> usize {
    let homes = buildings.iter().filter(|b| b.is(BuildingType::Home)).count();
    homes * config.capacity.home as usize
}

/// Snapshot the colony's population, buildings and stock
pub fn analyze_colony(
    ants: &[Ant],
    buildings: &[Building],
    ledger: &Ledger,
    config: &SimulationConfig,
) -> ColonyAnalysis {
    let mut building_counts = BTreeMap::new();
    for building in buildings {
        *building_counts.entry(building.building_type).or_insert(0) += 1;
    }

    let total_ants = ants.len();
    let adult_ants = ants.iter().filter(|a| a.is_adult).count();
    let capacity = housing_capacity(buildings, config);

    let mut resource_shortages = Vec::new();
    if ledger.get(ResourceKind::Food) < config.planner.food_shortage_below {
        resource_shortages.push(ResourceKind::Food);
    }
    if ledger.get(ResourceKind::Wood) < config.planner.wood_shortage_below {
        resource_shortages.push(ResourceKind::Wood);
    }

    ColonyAnalysis {
        total_ants,
        adult_ants,
        children: total_ants - adult_ants,
        happy_ants: ants.iter().filter(|a| a.is_happy(&config.ant)).count(),
        building_counts,
        housing_capacity: capacity,
        homeless_ants: total_ants.saturating_sub(capacity),
        resource_shortages,
    }
}

impl ColonyAnalysis {
    pub fn count(&self, building_type: BuildingType) -> usize {
        self.building_counts.get(&building_type).copied().unwrap_or(0)
    }

    pub fn has_shortage(&self, kind: ResourceKind) -> bool {
        self.resource_shortages.contains(&kind)
    }

    /// Fraction of the colony that is unhappy, 0 for an empty colony
    pub fn unhappy_ratio(&self) -> f32 {
        if self.total_ants == 0 {
            return 0.0;
        }
        1.0 - self.happy_ants as f32 / self.total_ants as f32
    }

    /// Prioritized wish list, highest priority first
    pub fn recommendations(&self, config: &SimulationConfig) -> Vec<Recommendation> {
        let planner = &config.planner;
        let priorities = &planner.priorities;
        let mut out = Vec::new();
        let mut want = |building, count, priority| {
            out.push(Recommendation {
                building,
                count,
                priority,
            })
        };

        if self.homeless_ants > 0 {
            let per_home = config.capacity.home.max(1) as usize;
            let homes = self.homeless_ants.div_ceil(per_home) as u32;
            want(BuildingType::Home, homes, priorities.home);
        }

        let hubs = self.count(BuildingType::Hub);
        if hubs == 0 || self.total_ants > hubs * planner.residents_per_hub as usize {
            want(BuildingType::Hub, 1, priorities.hub);
        }

        if self.has_shortage(ResourceKind::Wood)
            && self.count(BuildingType::LumberCamp) < planner.max_lumber_camps as usize
        {
            want(BuildingType::LumberCamp, 1, priorities.lumber_camp);
        }

        if self.has_shortage(ResourceKind::Food)
            && self.count(BuildingType::FishingHut) < planner.max_fishing_huts as usize
        {
            want(BuildingType::FishingHut, 1, priorities.fishing_hut);
        }

        let seats = self.count(BuildingType::School) * config.capacity.school as usize;
        if self.children > 0 && seats < self.children {
            want(BuildingType::School, 1, priorities.school);
        }

        if self.unhappy_ratio() > planner.unhappy_ratio
            && self.count(BuildingType::Bonfire) < planner.max_bonfires as usize
        {
            want(BuildingType::Bonfire, 1, priorities.bonfire);
        }

        out.sort_by(|a, b| b.priority.cmp(&a.priority));
        out
    }
}
