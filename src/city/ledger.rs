//! Ledger - colony-wide counters of fungible resources

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::building::Cost;
use crate::core::config::LedgerConfig;

/// Fungible resource kinds tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Food,
    Wood,
    Fish,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Food, ResourceKind::Wood, ResourceKind::Fish];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Food => "food",
            ResourceKind::Wood => "wood",
            ResourceKind::Fish => "fish",
        }
    }
}

/// Resource counts owned by the simulation driver.
///
/// Counts are unsigned and every debit is guarded, so a count can never go
/// negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    counts: AHashMap<ResourceKind, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        let mut ledger = Self::new();
        ledger.credit(ResourceKind::Food, config.food);
        ledger.credit(ResourceKind::Wood, config.wood);
        ledger.credit(ResourceKind::Fish, config.fish);
        ledger
    }

    /// Current amount of a resource
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Take one unit if any is available
    pub fn consume_one(&mut self, kind: ResourceKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Eat one unit of food, or fish when food has run out.
    /// Returns the kind that was eaten.
    pub fn consume_meal(&mut self) -> Option<ResourceKind> {
        [ResourceKind::Food, ResourceKind::Fish]
            .into_iter()
            .find(|kind| self.consume_one(*kind))
    }

    /// Whether anything edible is in stock
    pub fn has_meal(&self) -> bool {
        self.get(ResourceKind::Food) > 0 || self.get(ResourceKind::Fish) > 0
    }

    /// Check if every requirement of a cost is covered
    pub fn can_afford(&self, cost: &Cost) -> bool {
        cost.requirements().all(|(kind, amount)| self.get(kind) >= amount)
    }

    /// Debit a whole cost. Either everything is debited or nothing is.
    pub fn pay(&mut self, cost: &Cost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (kind, amount) in cost.requirements() {
            if let Some(count) = self.counts.get_mut(&kind) {
                *count -= amount;
            }
        }
        true
    }

    /// Snapshot of all counts in a stable order
    pub fn entries(&self) -> [(ResourceKind, u32); 3] {
        ResourceKind::ALL.map(|kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(food: u32, wood: u32, fish: u32) -> Ledger {
        Ledger::from_config(&LedgerConfig { food, wood, fish })
    }

    #[test]
    fn test_credit_and_get() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.get(ResourceKind::Wood), 0);
        ledger.credit(ResourceKind::Wood, 3);
        ledger.credit(ResourceKind::Wood, 1);
        assert_eq!(ledger.get(ResourceKind::Wood), 4);
    }

    #[test]
    fn test_consume_one_stops_at_zero() {
        let mut ledger = ledger(1, 0, 0);
        assert!(ledger.consume_one(ResourceKind::Food));
        assert!(!ledger.consume_one(ResourceKind::Food));
        assert_eq!(ledger.get(ResourceKind::Food), 0);
        assert!(!ledger.consume_one(ResourceKind::Wood));
    }

    #[test]
    fn test_meal_prefers_food_then_fish() {
        let mut ledger = ledger(1, 0, 1);
        assert_eq!(ledger.consume_meal(), Some(ResourceKind::Food));
        assert_eq!(ledger.consume_meal(), Some(ResourceKind::Fish));
        assert_eq!(ledger.consume_meal(), None);
        assert!(!ledger.has_meal());
    }

    #[test]
    fn test_pay_is_all_or_nothing() {
        let mut ledger = ledger(20, 4, 0);
        let cost = Cost::new(10, 5, 0);
        assert!(!ledger.can_afford(&cost));
        assert!(!ledger.pay(&cost));
        assert_eq!(ledger.get(ResourceKind::Food), 20);
        assert_eq!(ledger.get(ResourceKind::Wood), 4);

        ledger.credit(ResourceKind::Wood, 1);
        assert!(ledger.pay(&cost));
        assert_eq!(ledger.get(ResourceKind::Food), 10);
        assert_eq!(ledger.get(ResourceKind::Wood), 0);
    }

    #[test]
    fn test_free_cost_always_affordable() {
        let mut ledger = Ledger::new();
        assert!(ledger.pay(&Cost::default()));
    }
}
