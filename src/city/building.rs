//! Buildings and their construction costs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::city::ledger::ResourceKind;
use crate::core::types::{BuildingId, Tick, Vec2};

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    /// Colony seat; the Queen lives here
    Base,
    /// Houses residents and serves meals
    Home,
    /// Resting place
    Hub,
    /// Tutors children toward adulthood
    School,
    /// Fish drop-off, also serves meals while the colony has food
    FishingHut,
    /// Wood drop-off
    LumberCamp,
    /// Morale
    Bonfire,
}

impl BuildingType {
    pub const ALL: [BuildingType; 7] = [
        BuildingType::Base,
        BuildingType::Home,
        BuildingType::Hub,
        BuildingType::School,
        BuildingType::FishingHut,
        BuildingType::LumberCamp,
        BuildingType::Bonfire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingType::Base => "base",
            BuildingType::Home => "home",
            BuildingType::Hub => "hub",
            BuildingType::School => "school",
            BuildingType::FishingHut => "fishing hut",
            BuildingType::LumberCamp => "lumber camp",
            BuildingType::Bonfire => "bonfire",
        }
    }

    /// Parse a building name, accepting spaces, dashes or underscores
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL.into_iter().find(|ty| ty.name() == normalized)
    }

    /// Building where cargo of this kind is dropped off, if any
    pub fn drop_off_for(kind: ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::Fish => Some(BuildingType::FishingHut),
            ResourceKind::Wood => Some(BuildingType::LumberCamp),
            ResourceKind::Food => None,
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed building. Buildings are never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub building_type: BuildingType,
    pub position: Vec2,
    pub built_tick: Tick,
}

impl Building {
    pub fn new(id: BuildingId, building_type: BuildingType, position: Vec2, built_tick: Tick) -> Self {
        Self {
            id,
            building_type,
            position,
            built_tick,
        }
    }

    pub fn is(&self, building_type: BuildingType) -> bool {
        self.building_type == building_type
    }
}

/// Resources required to construct one building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub food: u32,
    pub wood: u32,
    pub fish: u32,
}

impl Cost {
    pub fn new(food: u32, wood: u32, fish: u32) -> Self {
        Self { food, wood, fish }
    }

    /// Non-zero requirements of this cost
    pub fn requirements(&self) -> impl Iterator<Item = (ResourceKind, u32)> {
        [
            (ResourceKind::Food, self.food),
            (ResourceKind::Wood, self.wood),
            (ResourceKind::Fish, self.fish),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
    }
}

/// Cost of every building type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    pub base: Cost,
    pub home: Cost,
    pub hub: Cost,
    pub school: Cost,
    pub fishing_hut: Cost,
    pub lumber_camp: Cost,
    pub bonfire: Cost,
}

impl CostTable {
    pub fn cost(&self, building_type: BuildingType) -> &Cost {
        match building_type {
            BuildingType::Base => &self.base,
            BuildingType::Home => &self.home,
            BuildingType::Hub => &self.hub,
            BuildingType::School => &self.school,
            BuildingType::FishingHut => &self.fishing_hut,
            BuildingType::LumberCamp => &self.lumber_camp,
            BuildingType::Bonfire => &self.bonfire,
        }
    }
}
