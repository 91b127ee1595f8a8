//! Resource nodes - fixed, never-depleting harvest points

use serde::{Deserialize, Serialize};

use crate::city::ledger::ResourceKind;
use crate::core::types::Vec2;

/// A harvest point. Gathering picks up one unit of `kind` and leaves the node untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub position: Vec2,
    pub kind: ResourceKind,
}

impl ResourceNode {
    pub fn new(position: Vec2, kind: ResourceKind) -> Self {
        Self { position, kind }
    }
}
