//! Rendering boundary
//!
//! Renderers receive a read-only snapshot of simulation state each frame.
//! This module never modifies simulation state.

use std::io::Write;

use serde::Serialize;

use crate::city::building::Building;
use crate::city::ledger::ResourceKind;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::entity::ant::Ant;
use crate::planner::ColonyAnalysis;
use crate::simulation::queen::Queen;
use crate::simulation::tick::ColonyStats;
use crate::world::nodes::ResourceNode;
use crate::world::terrain::TerrainZone;
use crate::world::World;

/// Everything a frame may draw
#[derive(Debug, Serialize)]
pub struct ColonyView<'a> {
    pub tick: Tick,
    pub stats: ColonyStats,
    pub ledger: [(ResourceKind, u32); 3],
    pub queen: &'a Queen,
    pub ants: &'a [Ant],
    pub buildings: &'a [Building],
    pub zones: &'a [TerrainZone],
    pub nodes: &'a [ResourceNode],
    pub planner: Option<&'a ColonyAnalysis>,
}

impl<'a> ColonyView<'a> {
    pub fn of(world: &'a World) -> Self {
        Self {
            tick: world.current_tick,
            stats: ColonyStats::collect(world),
            ledger: world.ledger.entries(),
            queen: &world.queen,
            ants: &world.ants,
            buildings: &world.buildings,
            zones: &world.zones,
            nodes: &world.nodes,
            planner: world.planner.last_report(),
        }
    }
}

/// Consumer of frames. Has no way to feed back into the simulation.
pub trait Renderer {
    fn render(&mut self, view: &ColonyView<'_>) -> Result<()>;
}

/// Writes one JSON object per frame, one frame per line
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    full: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    /// Stats-only frames
    pub fn summary(out: W) -> Self {
        Self { out, full: false }
    }

    /// Frames with every entity list
    pub fn full(out: W) -> Self {
        Self { out, full: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, view: &ColonyView<'_>) -> Result<()> {
        if self.full {
            serde_json::to_writer(&mut self.out, view)?;
        } else {
            serde_json::to_writer(&mut self.out, &view.stats)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
