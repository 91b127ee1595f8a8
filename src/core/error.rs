use thiserror::Error;

use crate::city::building::BuildingType;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid build request: {0}")]
    InvalidBuildRequest(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;

/// Why a position is not a legal site for a building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementViolation {
    /// Only fishing huts may stand inside water
    InsideWater,
    /// Fishing huts must sit on a water edge
    NotNearWater,
}

impl std::fmt::Display for PlacementViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementViolation::InsideWater => write!(f, "inside water"),
            PlacementViolation::NotNearWater => write!(f, "not near a water edge"),
        }
    }
}

/// Rejected build request. Nothing in the world changes when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Cannot afford {building}")]
    InsufficientFunds { building: BuildingType },

    #[error("Cannot place {building} here: {reason}")]
    IllegalPlacement {
        building: BuildingType,
        reason: PlacementViolation,
    },
}
