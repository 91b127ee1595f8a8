//! Tick system - orchestrates one simulation step
//!
//! agents -> happiness tally and eviction -> Queen -> reproduction ->
//! planner -> build commit
//!
//! Single-threaded. The ledger is only ever touched through `&mut` on the
//! world, so every debit and credit is serialized by construction.

use serde::Serialize;

use crate::city::building::BuildingType;
use crate::city::construction::attempt_build;
use crate::city::ledger::ResourceKind;
use crate::core::types::{AntId, BuildingId, Tick, Vec2};
use crate::planner::{housing_capacity, PlannerView};
use crate::simulation::behavior::{update_ant, BehaviorContext, SchoolRoster};
use crate::simulation::queen::QueenStatus;
use crate::world::World;

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A child reached the experience threshold
    AntMatured { ant: AntId },
    /// A child took a seat at a school
    AntEnrolled { ant: AntId, school: BuildingId },
    /// An ant ate one unit at a home or fishing hut
    AntAte { ant: AntId, kind: ResourceKind },
    /// Cargo credited to the ledger
    CargoDelivered { ant: AntId, kind: ResourceKind },
    /// Removed after too long unhappy
    AntEvicted { ant: AntId, unhappy_ticks: u64 },
    /// The Queen laid a new child
    AntHatched { ant: AntId, position: Vec2 },
    /// The planner's build was committed
    BuildingPlaced {
        building: BuildingId,
        building_type: BuildingType,
        position: Vec2,
        reason: String,
    },
    /// The planner's build was refused by construction
    BuildRejected {
        building_type: BuildingType,
        position: Vec2,
        error: String,
    },
}

/// Aggregate colony numbers for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColonyStats {
    pub tick: Tick,
    pub population: usize,
    pub adults: usize,
    pub children: usize,
    pub happy: usize,
    pub unhappy: usize,
    pub housed: usize,
    pub homeless: usize,
    pub buildings: usize,
    pub avg_hunger: f32,
    pub avg_stamina: f32,
    pub food: u32,
    pub wood: u32,
    pub fish: u32,
    /// Food and fish together, what ants can eat
    pub meals: u32,
    pub queen: QueenStatus,
    pub last_action: Option<String>,
}

impl ColonyStats {
    pub fn collect(world: &World) -> Self {
        let population = world.ants.len();
        let adults = world.ants.iter().filter(|a| a.is_adult).count();
        let happy = world
            .ants
            .iter()
            .filter(|a| a.is_happy(&world.config.ant))
            .count();
        let housed = population.min(housing_capacity(&world.buildings, &world.config));

        let (avg_hunger, avg_stamina) = if population == 0 {
            (0.0, 0.0)
        } else {
            let n = population as f32;
            (
                world.ants.iter().map(|a| a.hunger).sum::<f32>() / n,
                world.ants.iter().map(|a| a.stamina).sum::<f32>() / n,
            )
        };

        Self {
            tick: world.current_tick,
            population,
            adults,
            children: population - adults,
            happy,
            unhappy: population - happy,
            housed,
            homeless: population - housed,
            buildings: world.buildings.len(),
            avg_hunger,
            avg_stamina,
            food: world.ledger.get(ResourceKind::Food),
            wood: world.ledger.get(ResourceKind::Wood),
            fish: world.ledger.get(ResourceKind::Fish),
            meals: world.ledger.get(ResourceKind::Food) + world.ledger.get(ResourceKind::Fish),
            queen: world.queen.status,
            last_action: world.planner.last_action().map(str::to_owned),
        }
    }
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    world.tick();

    update_ants(world, &mut events);
    let (happy, population) = tally_and_evict(world, &mut events);

    world
        .queen
        .update(&world.config.queen, &mut world.ledger, happy, population);

    reproduce(world, happy, population, &mut events);
    run_planner(world, &mut events);

    events
}

fn update_ants(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let mut roster = SchoolRoster::from_ants(&world.ants, world.config.capacity.school);
    let ctx = BehaviorContext {
        config: &world.config,
        buildings: &world.buildings,
        nodes: &world.nodes,
    };
    for ant in world.ants.iter_mut() {
        update_ant(ant, &ctx, &mut world.ledger, &mut roster, &mut world.rng, events);
    }
}

/// Update unhappy streaks and drop ants past the tolerance.
/// Returns (happy, population) over the survivors.
fn tally_and_evict(world: &mut World, events: &mut Vec<SimulationEvent>) -> (usize, usize) {
    let tolerance = world.config.unhappy_tolerance_ticks();
    let ant_config = &world.config.ant;
    let mut happy = 0;

    world.ants.retain_mut(|ant| {
        if ant.is_happy(ant_config) {
            ant.unhappy_ticks = 0;
            happy += 1;
            return true;
        }
        ant.unhappy_ticks += 1;
        if ant.unhappy_ticks > tolerance {
            tracing::debug!(ant = %ant.id, unhappy_ticks = ant.unhappy_ticks, "ant evicted");
            events.push(SimulationEvent::AntEvicted {
                ant: ant.id,
                unhappy_ticks: ant.unhappy_ticks,
            });
            return false;
        }
        true
    });

    (happy, world.ants.len())
}

fn reproduce(world: &mut World, happy: usize, population: usize, events: &mut Vec<SimulationEvent>) {
    // an empty colony is never "all happy"
    let ready = population > 0 && happy == population && world.queen.can_lay();
    let delay = world.config.lay_delay_ticks();
    if !world.queen.advance_lay_timer(ready, delay) {
        return;
    }

    let position = world.queen.position;
    let ant = world.spawn_ant(position, false);
    tracing::debug!(ant = %ant, tick = world.current_tick, "ant hatched");
    events.push(SimulationEvent::AntHatched { ant, position });
}

fn run_planner(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let tick = world.current_tick;
    let view = PlannerView {
        config: &world.config,
        ants: &world.ants,
        buildings: &world.buildings,
        zones: &world.zones,
        nodes: &world.nodes,
        ledger: &world.ledger,
    };
    let Some(decision) = world.planner.update(&view, tick, &mut world.rng) else {
        return;
    };

    match attempt_build(world, decision.building, decision.position) {
        Ok(id) => {
            world.planner.record_build(tick);
            events.push(SimulationEvent::BuildingPlaced {
                building: id,
                building_type: decision.building,
                position: decision.position,
                reason: decision.reason,
            });
        }
        Err(err) => {
            tracing::debug!(error = %err, fallback = decision.placement.used_fallback(), "planner build rejected");
            events.push(SimulationEvent::BuildRejected {
                building_type: decision.building,
                position: decision.position,
                error: err.to_string(),
            });
        }
    }
}
