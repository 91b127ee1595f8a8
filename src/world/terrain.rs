//! Terrain zones - polygonal regions that constrain building placement
//!
//! Each zone keeps its axis-aligned bounding box (used by world generation
//! and the planner's placement heuristics) and a jittered blob outline
//! (used for placement legality).

use geo::{Contains, Coord, EuclideanDistance, LineString, Point, Polygon};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Water,
    Mountain,
    Sand,
    Flowers,
    Grass,
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(origin: Vec2, width: f32, height: f32) -> Self {
        Self { origin, width, height }
    }

    /// Square of half-extent `half` around `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(Vec2::new(center.x - half, center.y - half), half * 2.0, half * 2.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.width / 2.0, self.origin.y + self.height / 2.0)
    }

    /// Interiors overlap; rectangles that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.origin.x + other.width
            && other.origin.x < self.origin.x + self.width
            && self.origin.y < other.origin.y + other.height
            && other.origin.y < self.origin.y + self.height
    }
}

/// A terrain region with a closed blob outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainZone {
    pub kind: ZoneKind,
    pub bounds: Rect,
    pub outline: Vec<Vec2>,
}

impl TerrainZone {
    /// Create a zone whose outline is `vertices` points spread evenly around
    /// the ellipse inscribed in `bounds`, each pulled inward by a random
    /// factor in `[jitter, 1.0]`.
    pub fn generate<R: Rng + ?Sized>(
        kind: ZoneKind,
        bounds: Rect,
        vertices: usize,
        jitter: f32,
        rng: &mut R,
    ) -> Self {
        let center = bounds.center();
        let outline = (0..vertices)
            .map(|i| {
                let angle = (i as f32 / vertices as f32) * std::f32::consts::TAU;
                let radius = if jitter < 1.0 { rng.gen_range(jitter..=1.0) } else { 1.0 };
                Vec2::new(
                    center.x + radius * bounds.width / 2.0 * angle.cos(),
                    center.y + radius * bounds.height / 2.0 * angle.sin(),
                )
            })
            .collect();
        Self { kind, bounds, outline }
    }

    pub fn with_outline(kind: ZoneKind, bounds: Rect, outline: Vec<Vec2>) -> Self {
        Self { kind, bounds, outline }
    }

    fn polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .outline
            .iter()
            .map(|v| Coord { x: f64::from(v.x), y: f64::from(v.y) })
            .collect();
        Polygon::new(LineString::from(coords), vec![])
    }

    /// Point lies strictly inside the outline
    pub fn contains(&self, point: Vec2) -> bool {
        if self.outline.len() < 3 {
            return false;
        }
        self.polygon().contains(&to_point(point))
    }

    /// Point lies within `max_distance` of any outline edge, on either side
    pub fn near_edge(&self, point: Vec2, max_distance: f32) -> bool {
        match self.outline.len() {
            0 => false,
            1 => self.outline[0].distance(&point) <= max_distance,
            _ => {
                let ring = self.polygon();
                to_point(point).euclidean_distance(ring.exterior()) <= f64::from(max_distance)
            }
        }
    }
}

fn to_point(v: Vec2) -> Point<f64> {
    Point::new(f64::from(v.x), f64::from(v.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square_zone() -> TerrainZone {
        TerrainZone::with_outline(
            ZoneKind::Water,
            Rect::new(Vec2::new(0.0, 0.0), 100.0, 100.0),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ],
        )
    }

    #[test]
    fn test_contains() {
        let zone = square_zone();
        assert!(zone.contains(Vec2::new(50.0, 50.0)));
        assert!(!zone.contains(Vec2::new(150.0, 50.0)));
        assert!(!zone.contains(Vec2::new(-1.0, 50.0)));
    }

    #[test]
    fn test_near_edge_either_side() {
        let zone = square_zone();
        // Outside, 15 units from the right edge
        assert!(zone.near_edge(Vec2::new(115.0, 50.0), 20.0));
        // Inside, 10 units from the top edge
        assert!(zone.near_edge(Vec2::new(50.0, 10.0), 20.0));
        // Deep inside
        assert!(!zone.near_edge(Vec2::new(50.0, 50.0), 20.0));
        // Far outside
        assert!(!zone.near_edge(Vec2::new(200.0, 200.0), 20.0));
    }

    #[test]
    fn test_generated_outline_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let bounds = Rect::new(Vec2::new(100.0, 200.0), 180.0, 120.0);
        let zone = TerrainZone::generate(ZoneKind::Mountain, bounds, 10, 0.7, &mut rng);

        assert_eq!(zone.outline.len(), 10);
        let center = bounds.center();
        assert!(zone.contains(center));
        for vertex in &zone.outline {
            assert!(vertex.x >= bounds.origin.x - 0.01);
            assert!(vertex.x <= bounds.origin.x + bounds.width + 0.01);
            assert!(vertex.y >= bounds.origin.y - 0.01);
            assert!(vertex.y <= bounds.origin.y + bounds.height + 0.01);
        }
    }

    #[test]
    fn test_rect_intersects_ignores_shared_edges() {
        let a = Rect::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Rect::new(Vec2::new(10.0, 0.0), 10.0, 10.0);
        let c = Rect::new(Vec2::new(5.0, 5.0), 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(Rect::around(Vec2::new(5.0, 5.0), 1.0).intersects(&a));
    }
}
