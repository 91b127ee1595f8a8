pub mod ant;

pub use ant::{Ant, AntState};
