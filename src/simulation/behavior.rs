//! Per-ant priority chain
//!
//! Each tick an ant walks the chain top to bottom and stops at the first
//! step that claims it:
//!
//! 1. maturation (never claims the tick)
//! 2. school, for children
//! 3. feeding, once hunger crosses the trigger
//! 4. resting, once stamina drops to the floor
//! 5. delivering carried cargo
//! 6. gathering from a random resource node

use ahash::AHashMap;
use rand::Rng;

use crate::city::building::{Building, BuildingType};
use crate::city::ledger::Ledger;
use crate::core::config::SimulationConfig;
use crate::core::types::{BuildingId, NodeId};
use crate::entity::ant::{Ant, AntState};
use crate::simulation::tick::SimulationEvent;
use crate::spatial::nearest;
use crate::world::nodes::ResourceNode;

/// Enrolled children per school, rebuilt at the start of every tick
#[derive(Debug, Clone, Default)]
pub struct SchoolRoster {
    occupancy: AHashMap<BuildingId, u32>,
    capacity: u32,
}

impl SchoolRoster {
    pub fn new(capacity: u32) -> Self {
        Self {
            occupancy: AHashMap::new(),
            capacity,
        }
    }

    /// Count the children already sitting in each school
    pub fn from_ants(ants: &[Ant], capacity: u32) -> Self {
        let mut roster = Self::new(capacity);
        for school in ants.iter().filter_map(Ant::enrolled_school) {
            *roster.occupancy.entry(school).or_insert(0) += 1;
        }
        roster
    }

    pub fn occupancy(&self, school: BuildingId) -> u32 {
        self.occupancy.get(&school).copied().unwrap_or(0)
    }

    pub fn has_room(&self, school: BuildingId) -> bool {
        self.occupancy(school) < self.capacity
    }

    /// Take a seat if one is free
    pub fn enroll(&mut self, school: BuildingId) -> bool {
        if !self.has_room(school) {
            return false;
        }
        *self.occupancy.entry(school).or_insert(0) += 1;
        true
    }
}

/// Read-only world state an ant decides against
pub struct BehaviorContext<'a> {
    pub config: &'a SimulationConfig,
    pub buildings: &'a [Building],
    pub nodes: &'a [ResourceNode],
}

/// Advance one ant by one tick
pub fn update_ant<R: Rng + ?Sized>(
    ant: &mut Ant,
    ctx: &BehaviorContext<'_>,
    ledger: &mut Ledger,
    roster: &mut SchoolRoster,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) {
    let config = &ctx.config.ant;
    ant.age += 1.0 / ctx.config.world.fps as f32;

    if !ant.is_adult && ant.experience >= config.maturity_experience {
        ant.mature(config.adult_speed);
        tracing::debug!(ant = %ant.id, age = ant.age, "ant matured");
        events.push(SimulationEvent::AntMatured { ant: ant.id });
    }

    if !ant.is_adult && attend_school(ant, ctx, roster, events) {
        return;
    }
    if seek_food(ant, ctx, ledger, events) {
        return;
    }
    if rest(ant, ctx) {
        return;
    }
    if ant.carrying.is_some() {
        deliver(ant, ctx, ledger, events);
        return;
    }
    gather(ant, ctx, rng);
}

/// Returns true while the child is travelling to or sitting in a school.
/// Only seated children are spared hunger and fatigue.
fn attend_school(
    ant: &mut Ant,
    ctx: &BehaviorContext<'_>,
    roster: &mut SchoolRoster,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let config = &ctx.config.ant;

    if ant.enrolled_school().is_some() {
        ant.experience += config.experience_per_tick;
        return true;
    }

    let Some(school) = nearest(ctx.buildings, ant.position, |b| {
        b.is(BuildingType::School) && roster.has_room(b.id)
    }) else {
        return false;
    };

    ant.move_towards(school.position);
    let enrolled =
        ant.arrived_at(school.position, config.arrival_tolerance) && roster.enroll(school.id);
    ant.state = AntState::Schooling {
        school: school.id,
        enrolled,
    };
    if enrolled {
        tracing::trace!(ant = %ant.id, school = %school.id, "enrolled");
        events.push(SimulationEvent::AntEnrolled {
            ant: ant.id,
            school: school.id,
        });
    } else {
        ant.hunger = (ant.hunger + config.hunger_per_tick).min(100.0);
        ant.stamina = (ant.stamina - config.stamina_cost_per_tick).max(0.0);
    }
    true
}

/// Returns true while the ant is hungry enough to look for a meal.
/// Once set, seeking persists until the ant eats.
fn seek_food(
    ant: &mut Ant,
    ctx: &BehaviorContext<'_>,
    ledger: &mut Ledger,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    let config = &ctx.config.ant;
    ant.hunger = (ant.hunger + config.hunger_per_tick).min(100.0);

    if ant.hunger < config.hunger_trigger && !ant.is_seeking_food() {
        return false;
    }

    if ant.is_resting() {
        ant.rest_pending = true;
    }

    let stocked = ledger.has_meal();
    let venue = nearest(ctx.buildings, ant.position, |b| {
        b.is(BuildingType::Home) || (stocked && b.is(BuildingType::FishingHut))
    });

    let Some(venue) = venue else {
        ant.state = AntState::SeekingFood { venue: None };
        return true;
    };

    ant.move_towards(venue.position);
    if ant.arrived_at(venue.position, config.arrival_tolerance) {
        if let Some(kind) = ledger.consume_meal() {
            ant.hunger = (ant.hunger - config.meal_value).max(0.0);
            ant.state = AntState::Idle;
            events.push(SimulationEvent::AntAte { ant: ant.id, kind });
            return true;
        }
    }
    ant.state = AntState::SeekingFood {
        venue: Some(venue.id),
    };
    true
}

/// Returns true while the ant is resting. Burns stamina otherwise.
fn rest(ant: &mut Ant, ctx: &BehaviorContext<'_>) -> bool {
    let config = &ctx.config.ant;

    if !ant.is_resting() && !ant.rest_pending && ant.stamina > config.rest_floor {
        ant.stamina = (ant.stamina - config.stamina_cost_per_tick).max(0.0);
        return false;
    }
    ant.rest_pending = false;

    let hub = nearest(ctx.buildings, ant.position, |b| b.is(BuildingType::Hub));
    match hub {
        Some(hub) => {
            ant.move_towards(hub.position);
            if ant.arrived_at(hub.position, config.arrival_tolerance) {
                ant.stamina = (ant.stamina + config.hub_regen_per_tick).min(100.0);
            }
        }
        None => {
            ant.stamina = (ant.stamina + config.passive_regen_per_tick).min(100.0);
        }
    }

    if ant.stamina >= config.rest_recovery {
        tracing::trace!(ant = %ant.id, stamina = ant.stamina, "rested");
        ant.state = AntState::Idle;
    } else {
        ant.state = AntState::Resting {
            hub: hub.map(|h| h.id),
        };
    }
    true
}

fn deliver(
    ant: &mut Ant,
    ctx: &BehaviorContext<'_>,
    ledger: &mut Ledger,
    events: &mut Vec<SimulationEvent>,
) {
    let Some(cargo) = ant.carrying else {
        return;
    };

    let drop_point = BuildingType::drop_off_for(cargo)
        .and_then(|ty| nearest(ctx.buildings, ant.position, |b| b.is(ty)))
        .map(|b| b.position)
        .unwrap_or(ctx.config.world.drop_point);

    ant.move_towards(drop_point);
    if ant.arrived_at(drop_point, ctx.config.ant.arrival_tolerance) {
        ledger.credit(cargo, 1);
        ant.carrying = None;
        ant.state = AntState::Idle;
        events.push(SimulationEvent::CargoDelivered {
            ant: ant.id,
            kind: cargo,
        });
    } else {
        ant.state = AntState::Carrying { cargo };
    }
}

fn gather<R: Rng + ?Sized>(ant: &mut Ant, ctx: &BehaviorContext<'_>, rng: &mut R) {
    if ctx.nodes.is_empty() {
        ant.target = None;
        ant.state = AntState::Idle;
        return;
    }

    let retarget = match ant.target {
        Some(NodeId(index)) if index < ctx.nodes.len() => {
            rng.gen_bool(ctx.config.ant.retarget_chance)
        }
        _ => true,
    };
    if retarget {
        ant.target = Some(NodeId(rng.gen_range(0..ctx.nodes.len())));
    }

    let Some(node_id) = ant.target else {
        return;
    };
    let node = &ctx.nodes[node_id.0];

    ant.move_towards(node.position);
    if ant.arrived_at(node.position, ctx.config.ant.arrival_tolerance) {
        ant.carrying = Some(node.kind);
    }
    ant.state = AntState::Gathering { node: node_id };
}
