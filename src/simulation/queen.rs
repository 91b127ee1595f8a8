//! Queen - the colony's single reproduction authority

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::city::ledger::Ledger;
use crate::core::config::{QueenConfig, QueenPolicy};
use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenStatus {
    Healthy,
    Hungry,
}

impl fmt::Display for QueenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueenStatus::Healthy => f.write_str("healthy"),
            QueenStatus::Hungry => f.write_str("hungry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queen {
    pub position: Vec2,
    pub hunger: f32,
    /// Consecutive ticks the colony has been ready to grow
    pub lay_timer: u64,
    pub status: QueenStatus,
}

impl Queen {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            hunger: 0.0,
            lay_timer: 0,
            status: QueenStatus::Healthy,
        }
    }

    /// Move the Queen to a new base
    pub fn relocate(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Refresh the Queen's status for this tick.
    ///
    /// `happy` and `population` are the tally of the ants alive after this
    /// tick's evictions.
    pub fn update(&mut self, config: &QueenConfig, ledger: &mut Ledger, happy: usize, population: usize) {
        let ready = match config.policy {
            QueenPolicy::Consensus => population > 0 && happy == population,
            QueenPolicy::Fed => {
                self.hunger = (self.hunger + config.hunger_per_tick).min(100.0);
                if self.hunger >= config.eat_threshold && ledger.consume_meal().is_some() {
                    self.hunger = (self.hunger - config.meal_value).max(0.0);
                }
                self.hunger < config.hungry_threshold
            }
        };
        self.status = if ready { QueenStatus::Healthy } else { QueenStatus::Hungry };
    }

    pub fn can_lay(&self) -> bool {
        self.status == QueenStatus::Healthy
    }

    /// Advance the lay timer. Any tick where `colony_ready` is false resets it.
    /// Returns true on the tick an egg hatches.
    pub fn advance_lay_timer(&mut self, colony_ready: bool, delay_ticks: u64) -> bool {
        if !colony_ready {
            self.lay_timer = 0;
            return false;
        }
        self.lay_timer += 1;
        if self.lay_timer > delay_ticks {
            self.lay_timer = 0;
            return true;
        }
        false
    }
}
