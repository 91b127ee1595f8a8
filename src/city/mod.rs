//! City layer - buildings, the resource ledger, and construction

pub mod building;
pub mod construction;
pub mod ledger;

pub use building::{Building, BuildingType, Cost, CostTable};
pub use construction::{attempt_build, placement_violation};
pub use ledger::{Ledger, ResourceKind};
