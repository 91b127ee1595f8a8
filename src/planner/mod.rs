//! Heuristic planner (AutoPlayer)
//!
//! Architecture: analysis + placement
//! - `analysis` turns colony state into a prioritized wish list
//! - `placement` finds a site for one building type
//! - `AutoPlayer` owns the cadence: analyze every `analysis_interval` ticks,
//!   build at most once per `build_cooldown` ticks since the last committed build

pub mod analysis;
pub mod placement;

pub use analysis::{analyze_colony, housing_capacity, ColonyAnalysis, Recommendation};
pub use placement::{find_placement, Placement, PlacementStrategy};

use rand::Rng;
use serde::Serialize;

use crate::city::building::{Building, BuildingType};
use crate::city::ledger::Ledger;
use crate::core::config::SimulationConfig;
use crate::core::types::{Tick, Vec2};
use crate::entity::ant::Ant;
use crate::world::nodes::ResourceNode;
use crate::world::terrain::TerrainZone;

/// Planner's read-only view of the colony
pub struct PlannerView<'a> {
    pub config: &'a SimulationConfig,
    pub ants: &'a [Ant],
    pub buildings: &'a [Building],
    pub zones: &'a [TerrainZone],
    pub nodes: &'a [ResourceNode],
    pub ledger: &'a Ledger,
}

impl PlannerView<'_> {
    /// First base, or the world centre before one exists
    pub fn base_position(&self) -> Vec2 {
        self.buildings
            .iter()
            .find(|b| b.is(BuildingType::Base))
            .map(|b| b.position)
            .unwrap_or_else(|| self.config.world_center())
    }
}

/// One build the planner wants committed this tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildDecision {
    pub building: BuildingType,
    pub position: Vec2,
    pub priority: u32,
    pub reason: String,
    pub placement: Placement,
}

#[derive(Debug, Clone, Default)]
pub struct AutoPlayer {
    last_analysis: Tick,
    last_build: Tick,
    last_report: Option<ColonyAnalysis>,
    last_action: Option<String>,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent analysis, if one has run
    pub fn last_report(&self) -> Option<&ColonyAnalysis> {
        self.last_report.as_ref()
    }

    /// Reason string of the most recent proposal
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    pub fn last_build_tick(&self) -> Tick {
        self.last_build
    }

    fn should_analyze(&self, tick: Tick, interval: Tick) -> bool {
        tick.saturating_sub(self.last_analysis) > interval
    }

    fn cooling_down(&self, tick: Tick, cooldown: Tick) -> bool {
        tick.saturating_sub(self.last_build) <= cooldown
    }

    /// Analyze on cadence and propose at most one affordable build
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        view: &PlannerView<'_>,
        tick: Tick,
        rng: &mut R,
    ) -> Option<BuildDecision> {
        let config = &view.config.planner;
        if !config.enabled || !self.should_analyze(tick, config.analysis_interval) {
            return None;
        }

        self.last_analysis = tick;
        let analysis = analyze_colony(view.ants, view.buildings, view.ledger, view.config);
        let recommendations = analysis.recommendations(view.config);
        tracing::debug!(
            tick,
            ants = analysis.total_ants,
            homeless = analysis.homeless_ants,
            wishes = recommendations.len(),
            "colony analyzed"
        );
        self.last_report = Some(analysis);

        if self.cooling_down(tick, config.build_cooldown) {
            return None;
        }

        let pick = recommendations
            .into_iter()
            .find(|rec| view.ledger.can_afford(view.config.costs.cost(rec.building)))?;

        let placement = find_placement(pick.building, view, rng);
        let reason = format!("Priority {}: {}", pick.priority, pick.building);
        self.last_action = Some(reason.clone());
        Some(BuildDecision {
            building: pick.building,
            position: placement.position,
            priority: pick.priority,
            reason,
            placement,
        })
    }

    /// Start the build cooldown. Called once a decision has been committed.
    pub fn record_build(&mut self, tick: Tick) {
        self.last_build = tick;
    }
}
