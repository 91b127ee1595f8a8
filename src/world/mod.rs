//! World - owns every entity list, the ledger, the Queen and the run's RNG

pub mod generation;
pub mod nodes;
pub mod terrain;

pub use generation::generate_world;
pub use nodes::ResourceNode;
pub use terrain::{Rect, TerrainZone, ZoneKind};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::city::building::{Building, BuildingType};
use crate::city::ledger::Ledger;
use crate::core::config::SimulationConfig;
use crate::core::types::{AntId, BuildingId, Tick, Vec2};
use crate::entity::ant::Ant;
use crate::planner::AutoPlayer;
use crate::simulation::queen::Queen;

/// The simulated colony and its surroundings
pub struct World {
    pub config: SimulationConfig,
    pub current_tick: Tick,
    pub ants: Vec<Ant>,
    pub buildings: Vec<Building>,
    pub zones: Vec<TerrainZone>,
    pub nodes: Vec<ResourceNode>,
    pub ledger: Ledger,
    pub queen: Queen,
    pub planner: AutoPlayer,
    pub rng: ChaCha8Rng,
    next_ant_id: u64,
    next_building_id: u64,
}

impl World {
    /// Empty world: no terrain, no nodes, no buildings, no ants.
    /// The ledger starts from the config and the Queen waits at the world centre.
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        let ledger = Ledger::from_config(&config.ledger);
        let queen = Queen::new(config.world_center());
        Self {
            config,
            current_tick: 0,
            ants: Vec::new(),
            buildings: Vec::new(),
            zones: Vec::new(),
            nodes: Vec::new(),
            ledger,
            queen,
            planner: AutoPlayer::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_ant_id: 0,
            next_building_id: 0,
        }
    }

    pub fn spawn_ant(&mut self, position: Vec2, is_adult: bool) -> AntId {
        let id = AntId(self.next_ant_id);
        self.next_ant_id += 1;
        self.ants
            .push(Ant::new(id, position, is_adult, self.config.ant.adult_speed));
        id
    }

    /// Append a building without any cost or legality checks.
    /// Placing a base moves the Queen there.
    pub fn spawn_building(&mut self, building_type: BuildingType, position: Vec2) -> BuildingId {
        let id = BuildingId(self.next_building_id);
        self.next_building_id += 1;
        self.buildings
            .push(Building::new(id, building_type, position, self.current_tick));
        if building_type == BuildingType::Base {
            self.queen.relocate(position);
        }
        id
    }

    pub fn add_zone(&mut self, zone: TerrainZone) {
        self.zones.push(zone);
    }

    pub fn add_node(&mut self, node: ResourceNode) {
        self.nodes.push(node);
    }

    pub fn ant(&self, id: AntId) -> Option<&Ant> {
        self.ants.iter().find(|ant| ant.id == id)
    }

    pub fn ant_mut(&mut self, id: AntId) -> Option<&mut Ant> {
        self.ants.iter_mut().find(|ant| ant.id == id)
    }

    pub fn population(&self) -> usize {
        self.ants.len()
    }

    pub fn count_buildings(&self, building_type: BuildingType) -> usize {
        self.buildings.iter().filter(|b| b.is(building_type)).count()
    }

    /// Position of the first base, if one has been placed
    pub fn base_position(&self) -> Option<Vec2> {
        self.buildings
            .iter()
            .find(|b| b.is(BuildingType::Base))
            .map(|b| b.position)
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut world = World::new(SimulationConfig::default(), 1);
        let a = world.spawn_ant(Vec2::default(), true);
        let b = world.spawn_ant(Vec2::default(), false);
        assert!(a < b);

        let h1 = world.spawn_building(BuildingType::Home, Vec2::new(1.0, 1.0));
        let h2 = world.spawn_building(BuildingType::Home, Vec2::new(1.0, 1.0));
        assert_ne!(h1, h2);
        assert_eq!(world.count_buildings(BuildingType::Home), 2);
    }

    #[test]
    fn test_base_moves_queen() {
        let mut world = World::new(SimulationConfig::default(), 1);
        assert_eq!(world.queen.position, world.config.world_center());
        assert!(world.base_position().is_none());

        world.spawn_building(BuildingType::Base, Vec2::new(100.0, 200.0));
        assert_eq!(world.queen.position, Vec2::new(100.0, 200.0));
        assert_eq!(world.base_position(), Some(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_ledger_starts_from_config() {
        let world = World::new(SimulationConfig::manual(), 1);
        assert_eq!(world.ledger.get(crate::city::ledger::ResourceKind::Food), 50);
    }
}
