pub mod behavior;
pub mod queen;
pub mod tick;

pub use behavior::{update_ant, BehaviorContext, SchoolRoster};
pub use queen::{Queen, QueenStatus};
pub use tick::{run_simulation_tick, ColonyStats, SimulationEvent};
