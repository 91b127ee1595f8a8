//! Simulation configuration with documented constants
//!
//! Every tunable number the simulation uses lives here, grouped by the
//! system that reads it. Two coherent tuning profiles exist:
//!
//! - [`TuningProfile::Autonomous`] (the default) is tuned for a colony that
//!   the auto-builder keeps supplied with buildings.
//! - [`TuningProfile::Manual`] is tuned for a hand-built colony with scarce
//!   starting resources and a Queen that has to feed herself.
//!
//! A profile is always taken as a whole. TOML files select one with the
//! `profile` key and override individual values on top of it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::city::building::{Cost, CostTable};
use crate::core::error::{ColonyError, Result};
use crate::core::types::Vec2;

/// Named set of thresholds for the ant state machine and the Queen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningProfile {
    #[default]
    Autonomous,
    Manual,
}

/// How the Queen decides she is ready to lay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenPolicy {
    /// Ready exactly when a non-empty colony is entirely happy
    Consensus,
    /// Ready while her own hunger stays under the hungry threshold
    Fed,
}

/// Root configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub profile: TuningProfile,
    pub world: WorldConfig,
    pub generation: GenerationConfig,
    pub capacity: CapacityConfig,
    pub ant: AntConfig,
    pub queen: QueenConfig,
    pub planner: PlannerConfig,
    pub ledger: LedgerConfig,
    pub costs: CostTable,
}

/// World extents, time base and bootstrap population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Ticks per simulated second. Cooldowns expressed in seconds scale with it.
    pub fps: u32,
    pub initial_adults: u32,
    pub initial_children: u32,
    /// Where cargo without a matching drop building is delivered
    pub drop_point: Vec2,
    /// Maximum distance from a water outline for a legal fishing hut
    pub water_edge_reach: f32,
}

/// Range of one terrain zone kind produced at bootstrap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub min_count: u32,
    pub max_count: u32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl ZoneSpec {
    fn new(count: (u32, u32), width: (f32, f32), height: (f32, f32)) -> Self {
        Self {
            min_count: count.0,
            max_count: count.1,
            min_width: width.0,
            max_width: width.1,
            min_height: height.0,
            max_height: height.1,
        }
    }
}

/// Seeded world bootstrap parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub food_nodes: u32,
    pub wood_nodes: u32,
    pub fish_nodes: u32,
    /// Food nodes keep this far from the world edge
    pub food_margin: f32,
    /// Wood and fish nodes keep this far from the world edge
    pub outer_margin: f32,
    /// Half-extent of the square kept clear of terrain around the base
    pub base_clearance: f32,
    /// Placement tries per zone before that zone is skipped
    pub zone_tries: u32,
    pub outline_vertices: usize,
    /// Smallest radius factor of an outline vertex (largest is 1.0)
    pub outline_jitter: f32,
    pub water: ZoneSpec,
    pub mountain: ZoneSpec,
    pub sand: ZoneSpec,
    pub flowers: ZoneSpec,
}

/// Per-type service capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub home: u32,
    pub school: u32,
}

/// Rates and thresholds of the ant state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntConfig {
    /// Adult speed in units per tick. Children always move at half of it.
    pub adult_speed: f32,
    /// Per-axis distance under which a target counts as reached
    pub arrival_tolerance: f32,
    pub maturity_experience: f32,
    pub experience_per_tick: f32,
    pub hunger_per_tick: f32,
    /// Hunger at which an ant starts looking for a meal
    pub hunger_trigger: f32,
    pub meal_value: f32,
    pub stamina_cost_per_tick: f32,
    /// Stamina at or below which an ant starts resting
    pub rest_floor: f32,
    /// Stamina at which a resting ant at the hub gets back to work
    pub rest_recovery: f32,
    pub hub_regen_per_tick: f32,
    /// Regeneration when the colony has no hub
    pub passive_regen_per_tick: f32,
    /// Happy requires hunger strictly below this
    pub happy_hunger_below: f32,
    /// Happy requires stamina strictly above this
    pub happy_stamina_above: f32,
    /// Chance per tick that a gatherer picks a new node
    pub retarget_chance: f64,
    /// Seconds of continuous unhappiness an ant survives
    pub unhappy_tolerance_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueenConfig {
    pub policy: QueenPolicy,
    pub hunger_per_tick: f32,
    /// Hunger at which the Queen takes a meal from the ledger
    pub eat_threshold: f32,
    pub meal_value: f32,
    /// Hunger at which the Queen reports hungry
    pub hungry_threshold: f32,
    /// Seconds of uninterrupted readiness before an egg hatches
    pub lay_delay_secs: u32,
}

/// Build priorities used when ranking recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityTable {
    pub home: u32,
    pub hub: u32,
    pub lumber_camp: u32,
    pub fishing_hut: u32,
    pub school: u32,
    pub bonfire: u32,
}

/// Auto-builder cadence, rules and placement search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub enabled: bool,
    /// Ticks between colony analyses
    pub analysis_interval: u64,
    /// Ticks that must pass after a committed build before the next one
    pub build_cooldown: u64,
    pub food_shortage_below: u32,
    pub wood_shortage_below: u32,
    pub residents_per_hub: u32,
    pub max_lumber_camps: u32,
    pub max_fishing_huts: u32,
    pub max_bonfires: u32,
    /// Unhappy share of the population above which morale buildings are wanted
    pub unhappy_ratio: f32,
    pub priorities: PriorityTable,
    /// Minimum distance between a new building and every existing one
    pub min_separation: f32,
    /// Candidates must lie strictly inside the world shrunk by this margin
    pub bounds_margin: f32,
    pub resource_attempts: u32,
    pub water_attempts: u32,
    pub base_attempts: u32,
    pub random_attempts: u32,
    pub resource_ring: (f32, f32),
    pub mountain_edge_jitter: f32,
    /// How far outward from a water zone's shoreline huts are tried.
    /// Keep this under `world.water_edge_reach` or no candidate is legal.
    pub water_edge_offset: f32,
    pub base_ring: (f32, f32),
}

/// Starting resource counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub food: u32,
    pub wood: u32,
    pub fish: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::autonomous()
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 900.0,
            fps: 60,
            initial_adults: 15,
            initial_children: 15,
            drop_point: Vec2::new(600.0, 450.0),
            water_edge_reach: 20.0,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            food_nodes: 25,
            wood_nodes: 15,
            fish_nodes: 15,
            food_margin: 50.0,
            outer_margin: 100.0,
            base_clearance: 40.0,
            zone_tries: 30,
            outline_vertices: 10,
            outline_jitter: 0.7,
            water: ZoneSpec::new((4, 8), (100.0, 250.0), (80.0, 180.0)),
            mountain: ZoneSpec::new((3, 6), (80.0, 180.0), (80.0, 180.0)),
            sand: ZoneSpec::new((2, 4), (80.0, 150.0), (60.0, 120.0)),
            flowers: ZoneSpec::new((2, 4), (60.0, 120.0), (60.0, 120.0)),
        }
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self { home: 5, school: 5 }
    }
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            adult_speed: 1.0,
            arrival_tolerance: 5.0,
            maturity_experience: 200.0,
            experience_per_tick: 0.1,
            hunger_per_tick: 0.01,
            hunger_trigger: 70.0,
            meal_value: 15.0,
            stamina_cost_per_tick: 0.01,
            rest_floor: 20.0,
            rest_recovery: 80.0,
            hub_regen_per_tick: 3.0,
            passive_regen_per_tick: 1.0,
            happy_hunger_below: 80.0,
            happy_stamina_above: 20.0,
            retarget_chance: 0.01,
            unhappy_tolerance_secs: 20,
        }
    }
}

impl Default for QueenConfig {
    fn default() -> Self {
        Self {
            policy: QueenPolicy::Consensus,
            hunger_per_tick: 0.005,
            eat_threshold: 30.0,
            meal_value: 20.0,
            hungry_threshold: 70.0,
            lay_delay_secs: 10,
        }
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            home: 100,
            hub: 80,
            lumber_camp: 60,
            fishing_hut: 50,
            school: 30,
            bonfire: 20,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            analysis_interval: 120,
            build_cooldown: 60,
            food_shortage_below: 15,
            wood_shortage_below: 10,
            residents_per_hub: 8,
            max_lumber_camps: 3,
            max_fishing_huts: 3,
            max_bonfires: 2,
            unhappy_ratio: 0.3,
            priorities: PriorityTable::default(),
            min_separation: 40.0,
            bounds_margin: 50.0,
            resource_attempts: 20,
            water_attempts: 30,
            base_attempts: 30,
            random_attempts: 50,
            resource_ring: (30.0, 80.0),
            mountain_edge_jitter: 50.0,
            water_edge_offset: 10.0,
            base_ring: (40.0, 120.0),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            food: 500,
            wood: 500,
            fish: 500,
        }
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            base: Cost::default(),
            home: Cost::new(10, 5, 0),
            hub: Cost::new(20, 20, 0),
            school: Cost::new(15, 10, 0),
            fishing_hut: Cost::new(10, 15, 0),
            lumber_camp: Cost::new(8, 20, 0),
            bonfire: Cost::new(5, 10, 0),
        }
    }
}

impl SimulationConfig {
    /// Colony driven by the auto-builder, with a generous starting ledger
    pub fn autonomous() -> Self {
        Self {
            profile: TuningProfile::Autonomous,
            world: WorldConfig::default(),
            generation: GenerationConfig::default(),
            capacity: CapacityConfig::default(),
            ant: AntConfig::default(),
            queen: QueenConfig::default(),
            planner: PlannerConfig::default(),
            ledger: LedgerConfig::default(),
            costs: CostTable::default(),
        }
    }

    /// Hand-built colony: ten ants, a lean ledger and a Queen who must eat
    pub fn manual() -> Self {
        let mut config = Self::autonomous();
        config.profile = TuningProfile::Manual;
        config.world.initial_adults = 5;
        config.world.initial_children = 5;
        config.ledger = LedgerConfig {
            food: 50,
            wood: 50,
            fish: 50,
        };
        config.ant.rest_floor = 0.0;
        config.ant.rest_recovery = 100.0;
        config.ant.hub_regen_per_tick = 2.0;
        config.ant.happy_hunger_below = 70.0;
        config.ant.happy_stamina_above = 30.0;
        config.queen.policy = QueenPolicy::Fed;
        config.planner.enabled = false;
        config
    }

    pub fn for_profile(profile: TuningProfile) -> Self {
        match profile {
            TuningProfile::Autonomous => Self::autonomous(),
            TuningProfile::Manual => Self::manual(),
        }
    }

    /// Consecutive unhappy ticks an ant survives before eviction
    pub fn unhappy_tolerance_ticks(&self) -> u64 {
        u64::from(self.ant.unhappy_tolerance_secs) * u64::from(self.world.fps)
    }

    /// Ticks of uninterrupted readiness before the Queen's egg hatches
    pub fn lay_delay_ticks(&self) -> u64 {
        u64::from(self.queen.lay_delay_secs) * u64::from(self.world.fps)
    }

    pub fn child_speed(&self) -> f32 {
        self.ant.adult_speed / 2.0
    }

    pub fn world_center(&self) -> Vec2 {
        Vec2::new(self.world.width / 2.0, self.world.height / 2.0)
    }

    /// Parse a TOML document layered on top of the profile it names
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: toml::Value = toml::from_str(content)?;
        let profile = match overrides.get("profile") {
            Some(value) => value.clone().try_into::<TuningProfile>()?,
            None => TuningProfile::default(),
        };

        let mut merged = toml::Value::try_from(Self::for_profile(profile))
            .map_err(|e| ColonyError::InvalidConfig(e.to_string()))?;
        merge_toml(&mut merged, overrides);

        let config: Self = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ColonyError::InvalidConfig(msg));

        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return invalid(format!(
                "world bounds must be positive, got {}x{}",
                self.world.width, self.world.height
            ));
        }
        if self.world.fps == 0 {
            return invalid("fps must be at least 1".into());
        }
        if self.ant.adult_speed <= 0.0 {
            return invalid("adult_speed must be positive".into());
        }
        for (name, value) in [
            ("hunger_trigger", self.ant.hunger_trigger),
            ("rest_floor", self.ant.rest_floor),
            ("rest_recovery", self.ant.rest_recovery),
            ("happy_hunger_below", self.ant.happy_hunger_below),
            ("happy_stamina_above", self.ant.happy_stamina_above),
            ("queen.hungry_threshold", self.queen.hungry_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return invalid(format!("{name} ({value}) must lie within [0, 100]"));
            }
        }
        if self.ant.rest_floor >= self.ant.rest_recovery {
            return invalid(format!(
                "rest_floor ({}) should be < rest_recovery ({})",
                self.ant.rest_floor, self.ant.rest_recovery
            ));
        }
        if !(0.0..=1.0).contains(&self.ant.retarget_chance) {
            return invalid("retarget_chance must be a probability".into());
        }
        if self.capacity.school == 0 {
            return invalid("school capacity must be at least 1".into());
        }
        if self.planner.analysis_interval == 0 || self.planner.build_cooldown == 0 {
            return invalid("planner intervals must be positive".into());
        }
        if self.planner.random_attempts == 0 {
            return invalid("random_attempts must be at least 1".into());
        }
        if 2.0 * self.planner.bounds_margin >= self.world.width.min(self.world.height) {
            return invalid(format!(
                "bounds_margin ({}) leaves no buildable area",
                self.planner.bounds_margin
            ));
        }
        if self.planner.base_ring.0 > self.planner.base_ring.1
            || self.planner.resource_ring.0 > self.planner.resource_ring.1
        {
            return invalid("placement rings must have min <= max".into());
        }
        if self.planner.water_edge_offset >= self.world.water_edge_reach {
            return invalid(format!(
                "water_edge_offset ({}) must stay under water_edge_reach ({})",
                self.planner.water_edge_offset, self.world.water_edge_reach
            ));
        }
        Ok(())
    }
}

/// Recursively overlay `overrides` onto `base`, table by table
fn merge_toml(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base_table), toml::Value::Table(override_table)) => {
            for (key, value) in override_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
