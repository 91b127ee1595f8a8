//! Headless colony runner
//!
//! Generates a world, optionally places scripted buildings, runs the
//! simulation for a fixed number of ticks and prints a JSON summary.

use std::io;
use std::path::PathBuf;

use ant_colony::city::{attempt_build, BuildingType};
use ant_colony::core::config::{SimulationConfig, TuningProfile};
use ant_colony::core::error::{ColonyError, Result};
use ant_colony::core::types::Vec2;
use ant_colony::render::{ColonyView, JsonLinesRenderer, Renderer};
use ant_colony::simulation::tick::{run_simulation_tick, ColonyStats, SimulationEvent};
use ant_colony::world::generate_world;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Autonomous,
    Manual,
}

impl From<Profile> for TuningProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Autonomous => TuningProfile::Autonomous,
            Profile::Manual => TuningProfile::Manual,
        }
    }
}

/// A building placed before the first tick, e.g. `home@640,420`
#[derive(Debug, Clone, Copy)]
struct BuildRequest {
    building: BuildingType,
    position: Vec2,
}

fn parse_build_request(raw: &str) -> Result<BuildRequest> {
    let invalid = |msg: String| ColonyError::InvalidBuildRequest(msg);
    let (name, coords) = raw
        .split_once('@')
        .ok_or_else(|| invalid(format!("expected <type>@<x>,<y>, got '{raw}'")))?;
    let building = BuildingType::parse(name)
        .ok_or_else(|| invalid(format!("unknown building type '{name}'")))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| invalid(format!("expected <x>,<y>, got '{coords}'")))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|e| invalid(format!("bad x '{x}': {e}")))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|e| invalid(format!("bad y '{y}': {e}")))?;
    Ok(BuildRequest {
        building,
        position: Vec2::new(x, y),
    })
}

/// Ant colony simulation - headless runner
#[derive(Parser, Debug)]
#[command(name = "colony")]
#[command(about = "Run the ant colony simulation and print a JSON summary")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// TOML file layered over its selected profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tuning profile when no config file is given
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Turn the auto-builder off
    #[arg(long)]
    no_planner: bool,

    /// Emit a JSON frame on stdout every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    frame_every: u64,

    /// Include every entity in emitted frames, not just stats
    #[arg(long)]
    full_frames: bool,

    /// Place a building before the first tick: <type>@<x>,<y>. Repeatable.
    #[arg(long = "build", value_parser = parse_build_request)]
    builds: Vec<BuildRequest>,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    hatched: usize,
    evicted: usize,
    matured: usize,
    buildings_placed: usize,
    builds_rejected: usize,
    final_stats: ColonyStats,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            if args.profile.is_some() {
                tracing::warn!("--profile is ignored when --config is given");
            }
            SimulationConfig::load_from_toml(path)?
        }
        None => SimulationConfig::for_profile(args.profile.map(TuningProfile::from).unwrap_or_default()),
    };
    if args.no_planner {
        config.planner.enabled = false;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "ant_colony=info"
                    .parse()
                    .map_err(|e| ColonyError::InvalidConfig(format!("log filter: {e}")))?,
            ),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = load_config(&args)?;
    tracing::info!(seed, profile = ?config.profile, ticks = args.ticks, "colony starting");

    let mut world = generate_world(config, seed);

    for request in &args.builds {
        match attempt_build(&mut world, request.building, request.position) {
            Ok(id) => tracing::info!(building = %id, kind = %request.building, "scripted build placed"),
            Err(err) => tracing::warn!(error = %err, "scripted build rejected"),
        }
    }

    let mut renderer = if args.full_frames {
        JsonLinesRenderer::full(io::stdout().lock())
    } else {
        JsonLinesRenderer::summary(io::stdout().lock())
    };

    let mut summary = RunSummary {
        seed,
        ticks: args.ticks,
        hatched: 0,
        evicted: 0,
        matured: 0,
        buildings_placed: 0,
        builds_rejected: 0,
        final_stats: ColonyStats::collect(&world),
    };

    for _ in 0..args.ticks {
        for event in run_simulation_tick(&mut world) {
            match event {
                SimulationEvent::AntHatched { .. } => summary.hatched += 1,
                SimulationEvent::AntEvicted { .. } => summary.evicted += 1,
                SimulationEvent::AntMatured { .. } => summary.matured += 1,
                SimulationEvent::BuildingPlaced { .. } => summary.buildings_placed += 1,
                SimulationEvent::BuildRejected { .. } => summary.builds_rejected += 1,
                _ => {}
            }
        }
        if args.frame_every > 0 && world.current_tick % args.frame_every == 0 {
            renderer.render(&ColonyView::of(&world))?;
        }
    }

    drop(renderer);
    summary.final_stats = ColonyStats::collect(&world);
    tracing::info!(
        population = summary.final_stats.population,
        buildings = summary.final_stats.buildings,
        "run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_request() {
        let request = parse_build_request("lumber_camp@640.5,420").unwrap();
        assert_eq!(request.building, BuildingType::LumberCamp);
        assert_eq!(request.position, Vec2::new(640.5, 420.0));
    }

    #[test]
    fn test_bad_build_requests_are_rejected() {
        for raw in ["home", "castle@1,2", "home@1", "home@x,2"] {
            assert!(matches!(
                parse_build_request(raw),
                Err(ColonyError::InvalidBuildRequest(_))
            ));
        }
    }
}
