//! Ant - a colony member with hunger, stamina and a maturation clock

use serde::{Deserialize, Serialize};

use crate::city::ledger::ResourceKind;
use crate::core::config::AntConfig;
use crate::core::types::{AntId, BuildingId, NodeId, Vec2};

/// What an ant is doing this tick. Exactly one state is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AntState {
    /// Nothing to do (no school, no nodes, nothing carried)
    Idle,
    /// Child heading to, or sitting in, a school
    Schooling { school: BuildingId, enrolled: bool },
    /// Hungry and looking for a meal. Persists until the ant actually eats.
    SeekingFood { venue: Option<BuildingId> },
    /// Out of stamina and recovering, at the hub when one exists
    Resting { hub: Option<BuildingId> },
    /// Hauling cargo to its drop-off
    Carrying { cargo: ResourceKind },
    /// Walking to a resource node
    Gathering { node: NodeId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub id: AntId,
    pub position: Vec2,
    /// Units per tick. Adults move twice as fast as children.
    pub speed: f32,
    pub state: AntState,
    /// Node the ant is currently wandering toward
    pub target: Option<NodeId>,
    pub carrying: Option<ResourceKind>,
    /// 0 = exhausted, 100 = fresh
    pub stamina: f32,
    /// 0 = fed, 100 = starving
    pub hunger: f32,
    /// A rest cut short by hunger, picked up again after the meal
    #[serde(default)]
    pub rest_pending: bool,
    /// Consecutive ticks spent unhappy
    pub unhappy_ticks: u64,
    /// Simulated seconds lived
    pub age: f32,
    pub is_adult: bool,
    pub experience: f32,
    /// Last non-negligible movement direction
    pub heading: Vec2,
}

impl Ant {
    pub fn new(id: AntId, position: Vec2, is_adult: bool, adult_speed: f32) -> Self {
        Self {
            id,
            position,
            speed: if is_adult { adult_speed } else { adult_speed / 2.0 },
            state: AntState::Idle,
            target: None,
            carrying: None,
            stamina: 100.0,
            hunger: 0.0,
            rest_pending: false,
            unhappy_ticks: 0,
            age: 0.0,
            is_adult,
            experience: 0.0,
            heading: Vec2::new(0.0, -1.0),
        }
    }

    pub fn is_happy(&self, config: &AntConfig) -> bool {
        self.hunger < config.happy_hunger_below && self.stamina > config.happy_stamina_above
    }

    pub fn is_seeking_food(&self) -> bool {
        matches!(self.state, AntState::SeekingFood { .. })
    }

    pub fn is_resting(&self) -> bool {
        matches!(self.state, AntState::Resting { .. })
    }

    /// School the ant is enrolled in, if any
    pub fn enrolled_school(&self) -> Option<BuildingId> {
        match self.state {
            AntState::Schooling { school, enrolled: true } => Some(school),
            _ => None,
        }
    }

    /// Step toward `target` at the ant's speed and remember the heading
    pub fn move_towards(&mut self, target: Vec2) {
        let delta = target - self.position;
        let dist = delta.length().max(1.0);
        self.position = self.position + delta * (self.speed / dist);
        if delta.x.abs() > 1e-3 || delta.y.abs() > 1e-3 {
            self.heading = delta * (1.0 / dist);
        }
    }

    pub fn arrived_at(&self, target: Vec2, tolerance: f32) -> bool {
        self.position.within_box(&target, tolerance)
    }

    /// Grow up: double speed and leave school. One-way.
    pub fn mature(&mut self, adult_speed: f32) {
        if self.is_adult {
            return;
        }
        self.is_adult = true;
        self.speed = adult_speed;
        if matches!(self.state, AntState::Schooling { .. }) {
            self.state = AntState::Idle;
        }
    }
}
