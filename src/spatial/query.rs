//! Nearest-of-type and separation queries over the building list

use ordered_float::OrderedFloat;

use crate::city::building::Building;
use crate::core::types::Vec2;

/// Closest building to `origin` that satisfies `predicate`, by squared
/// Euclidean distance. Ties go to the building placed first.
pub fn nearest<'a, I, P>(buildings: I, origin: Vec2, mut predicate: P) -> Option<&'a Building>
where
    I: IntoIterator<Item = &'a Building>,
    P: FnMut(&Building) -> bool,
{
    buildings
        .into_iter()
        .filter(|building| predicate(building))
        .min_by_key(|building| OrderedFloat(building.position.distance_squared(&origin)))
}

/// True if any building is strictly closer than `min_distance` to `position`
pub fn too_close_to_buildings(position: Vec2, buildings: &[Building], min_distance: f32) -> bool {
    let min_sq = min_distance * min_distance;
    buildings
        .iter()
        .any(|building| building.position.distance_squared(&position) < min_sq)
}

/// True if `position` lies strictly inside the world shrunk by `margin` on every side
pub fn within_bounds(position: Vec2, width: f32, height: f32, margin: f32) -> bool {
    position.x > margin
        && position.x < width - margin
        && position.y > margin
        && position.y < height - margin
}
