//! Spatial queries shared by the ant state machine, the planner and construction

pub mod query;

pub use query::{nearest, too_close_to_buildings, within_bounds};
