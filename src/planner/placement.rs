//! Placement search - bounded random retries per building type

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::city::building::BuildingType;
use crate::city::construction::placement_violation;
use crate::city::ledger::ResourceKind;
use crate::core::types::Vec2;
use crate::planner::PlannerView;
use crate::spatial::{too_close_to_buildings, within_bounds};
use crate::world::terrain::ZoneKind;

/// Which search produced a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Ring around a wood node
    NearResource,
    /// Jittered corner of a mountain zone
    NearMountain,
    /// Just off a water zone's shoreline
    NearWater,
    /// Ring around the base
    NearBase,
    /// Random in-bounds point that passed every check
    Random,
    /// Random in-bounds point after every search ran dry; unchecked
    Unconstrained,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub position: Vec2,
    pub strategy: PlacementStrategy,
}

impl Placement {
    /// True when the type-specific heuristic found nothing
    pub fn used_fallback(&self) -> bool {
        matches!(
            self.strategy,
            PlacementStrategy::Random | PlacementStrategy::Unconstrained
        )
    }
}

/// Pick a site for `building`. Never fails: when all retries are spent an
/// unchecked random point is returned and flagged as such.
pub fn find_placement<R: Rng + ?Sized>(
    building: BuildingType,
    view: &PlannerView<'_>,
    rng: &mut R,
) -> Placement {
    let found = match building {
        BuildingType::LumberCamp => near_wood(building, view, rng)
            .map(|p| (p, PlacementStrategy::NearResource))
            .or_else(|| near_mountain(building, view, rng).map(|p| (p, PlacementStrategy::NearMountain))),
        BuildingType::FishingHut => {
            near_water(building, view, rng).map(|p| (p, PlacementStrategy::NearWater))
        }
        BuildingType::Home | BuildingType::Hub | BuildingType::School | BuildingType::Bonfire => {
            near_base(building, view, rng).map(|p| (p, PlacementStrategy::NearBase))
        }
        BuildingType::Base => None,
    };

    if let Some((position, strategy)) = found {
        return Placement { position, strategy };
    }
    if let Some(position) = random_site(building, view, rng) {
        return Placement {
            position,
            strategy: PlacementStrategy::Random,
        };
    }

    let (low_x, high_x, low_y, high_y) = random_ranges(view);
    Placement {
        position: Vec2::new(
            sample(rng, low_x, high_x),
            sample(rng, low_y, high_y),
        ),
        strategy: PlacementStrategy::Unconstrained,
    }
}

/// Candidate passes bounds, separation and terrain legality
fn acceptable(building: BuildingType, position: Vec2, view: &PlannerView<'_>) -> bool {
    let world = &view.config.world;
    let planner = &view.config.planner;
    within_bounds(position, world.width, world.height, planner.bounds_margin)
        && !too_close_to_buildings(position, view.buildings, planner.min_separation)
        && placement_violation(view.zones, building, position, world.water_edge_reach).is_none()
}

fn near_wood<R: Rng + ?Sized>(building: BuildingType, view: &PlannerView<'_>, rng: &mut R) -> Option<Vec2> {
    let planner = &view.config.planner;
    let wood: Vec<_> = view
        .nodes
        .iter()
        .filter(|node| node.kind == ResourceKind::Wood)
        .collect();
    let source = wood.choose(rng)?.position;

    let (inner, outer) = planner.resource_ring;
    (0..planner.resource_attempts)
        .map(|_| ring_point(rng, source, inner, outer))
        .find(|&candidate| acceptable(building, candidate, view))
}

fn near_mountain<R: Rng + ?Sized>(building: BuildingType, view: &PlannerView<'_>, rng: &mut R) -> Option<Vec2> {
    let planner = &view.config.planner;
    let mountains: Vec<_> = view
        .zones
        .iter()
        .filter(|zone| zone.kind == ZoneKind::Mountain)
        .collect();
    let bounds = mountains.choose(rng)?.bounds;

    let jitter = planner.mountain_edge_jitter;
    (0..planner.resource_attempts)
        .map(|_| {
            let corner_x = bounds.origin.x + if rng.gen_bool(0.5) { 0.0 } else { bounds.width };
            let corner_y = bounds.origin.y + if rng.gen_bool(0.5) { 0.0 } else { bounds.height };
            Vec2::new(
                corner_x + sample(rng, -jitter, jitter),
                corner_y + sample(rng, -jitter, jitter),
            )
        })
        .find(|&candidate| acceptable(building, candidate, view))
}

fn near_water<R: Rng + ?Sized>(building: BuildingType, view: &PlannerView<'_>, rng: &mut R) -> Option<Vec2> {
    let planner = &view.config.planner;
    let lakes: Vec<_> = view
        .zones
        .iter()
        .filter(|zone| zone.kind == ZoneKind::Water)
        .collect();
    let lake = lakes.choose(rng)?;
    if lake.outline.is_empty() {
        return None;
    }

    let center = lake.bounds.center();
    let offset = planner.water_edge_offset;
    let outline = &lake.outline;
    (0..planner.water_attempts)
        .map(|_| {
            // random point on a random shoreline segment, pushed away from the middle
            let i = rng.gen_range(0..outline.len());
            let a = outline[i];
            let b = outline[(i + 1) % outline.len()];
            let shore = a + (b - a) * rng.gen_range(0.0f32..=1.0);
            shore + (shore - center).normalize() * offset
        })
        .find(|&candidate| acceptable(building, candidate, view))
}

fn near_base<R: Rng + ?Sized>(building: BuildingType, view: &PlannerView<'_>, rng: &mut R) -> Option<Vec2> {
    let planner = &view.config.planner;
    let base = view.base_position();
    let (inner, outer) = planner.base_ring;
    (0..planner.base_attempts)
        .map(|_| ring_point(rng, base, inner, outer))
        .find(|&candidate| acceptable(building, candidate, view))
}

fn random_site<R: Rng + ?Sized>(building: BuildingType, view: &PlannerView<'_>, rng: &mut R) -> Option<Vec2> {
    let planner = &view.config.planner;
    let (low_x, high_x, low_y, high_y) = random_ranges(view);
    (0..planner.random_attempts)
        .map(|_| Vec2::new(sample(rng, low_x, high_x), sample(rng, low_y, high_y)))
        .find(|&candidate| {
            !too_close_to_buildings(candidate, view.buildings, planner.min_separation)
                && placement_violation(view.zones, building, candidate, view.config.world.water_edge_reach)
                    .is_none()
        })
}

fn random_ranges(view: &PlannerView<'_>) -> (f32, f32, f32, f32) {
    let margin = view.config.planner.bounds_margin;
    let world = &view.config.world;
    (margin, world.width - margin, margin, world.height - margin)
}

fn ring_point<R: Rng + ?Sized>(rng: &mut R, center: Vec2, inner: f32, outer: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = sample(rng, inner, outer);
    Vec2::new(center.x + distance * angle.cos(), center.y + distance * angle.sin())
}

fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::Building;
    use crate::city::ledger::Ledger;
    use crate::core::config::SimulationConfig;
    use crate::core::types::BuildingId;
    use crate::world::nodes::ResourceNode;
    use crate::world::terrain::{Rect, TerrainZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lake(x: f32, y: f32, w: f32, h: f32) -> TerrainZone {
        TerrainZone::with_outline(
            ZoneKind::Water,
            Rect::new(Vec2::new(x, y), w, h),
            vec![
                Vec2::new(x, y),
                Vec2::new(x + w, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x, y + h),
            ],
        )
    }

    struct Scene {
        config: SimulationConfig,
        buildings: Vec<Building>,
        zones: Vec<TerrainZone>,
        nodes: Vec<ResourceNode>,
        ledger: Ledger,
    }

    impl Scene {
        fn new() -> Self {
            let config = SimulationConfig::default();
            let base = Building::new(BuildingId(0), BuildingType::Base, config.world_center(), 0);
            Self {
                ledger: Ledger::from_config(&config.ledger),
                config,
                buildings: vec![base],
                zones: Vec::new(),
                nodes: Vec::new(),
            }
        }

        fn view(&self) -> PlannerView<'_> {
            PlannerView {
                config: &self.config,
                ants: &[],
                buildings: &self.buildings,
                zones: &self.zones,
                nodes: &self.nodes,
                ledger: &self.ledger,
            }
        }
    }

    #[test]
    fn test_home_ringed_around_base() {
        let scene = Scene::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let placement = find_placement(BuildingType::Home, &scene.view(), &mut rng);

        assert_eq!(placement.strategy, PlacementStrategy::NearBase);
        assert!(!placement.used_fallback());
        let d = placement.position.distance(&scene.config.world_center());
        assert!((40.0..=120.0 + 1e-3).contains(&d));
    }

    #[test]
    fn test_lumber_camp_near_wood() {
        let mut scene = Scene::new();
        let tree = Vec2::new(300.0, 300.0);
        scene.nodes.push(ResourceNode::new(tree, ResourceKind::Wood));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let placement = find_placement(BuildingType::LumberCamp, &scene.view(), &mut rng);
        assert_eq!(placement.strategy, PlacementStrategy::NearResource);
        let d = placement.position.distance(&tree);
        assert!((30.0 - 1e-3..=80.0 + 1e-3).contains(&d));
    }

    #[test]
    fn test_fishing_hut_lands_on_shore() {
        let mut scene = Scene::new();
        scene.zones.push(lake(200.0, 200.0, 200.0, 150.0));
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let placement = find_placement(BuildingType::FishingHut, &scene.view(), &mut rng);
        assert_eq!(placement.strategy, PlacementStrategy::NearWater);
        assert!(placement_violation(&scene.zones, BuildingType::FishingHut, placement.position, 20.0).is_none());
    }

    #[test]
    fn test_fishing_hut_without_water_falls_back_unchecked() {
        let scene = Scene::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let placement = find_placement(BuildingType::FishingHut, &scene.view(), &mut rng);
        assert_eq!(placement.strategy, PlacementStrategy::Unconstrained);
        assert!(placement.used_fallback());
        assert!(placement.position.x >= 50.0 && placement.position.x <= 1150.0);
        assert!(placement.position.y >= 50.0 && placement.position.y <= 850.0);
    }

    #[test]
    fn test_candidates_keep_separation() {
        let mut scene = Scene::new();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for i in 1..6 {
            let placement = find_placement(BuildingType::Hub, &scene.view(), &mut rng);
            assert!(!too_close_to_buildings(placement.position, &scene.buildings, 40.0));
            scene
                .buildings
                .push(Building::new(BuildingId(i), BuildingType::Hub, placement.position, 0));
        }
    }
}
