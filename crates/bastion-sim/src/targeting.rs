//! Nearest-target selection shared by towers and allies.

use glam::Vec2;
use hecs::Entity;

/// Nearest candidate within `range` (inclusive) of `origin`.
///
/// Ties on exact distance go to the candidate listed first. Candidate order
/// follows ECS iteration order, so which of two equidistant enemies wins is
/// stable for a given world history but not guaranteed across storage layouts.
pub fn nearest_within(origin: Vec2, range: f32, candidates: &[(Entity, Vec2)]) -> Option<(Entity, Vec2)> {
    let mut best = None;
    let mut best_distance = f32::INFINITY;
    for &(entity, position) in candidates {
        let distance = origin.distance(position);
        if distance <= range && distance < best_distance {
            best = Some((entity, position));
            best_distance = distance;
        }
    }
    best
}

/// Nearest candidate at any distance, with that distance.
pub fn nearest(origin: Vec2, candidates: &[(Entity, Vec2)]) -> Option<(Entity, f32)> {
    candidates
        .iter()
        .map(|&(entity, position)| (entity, origin.distance(position)))
        .fold(None, |best, (entity, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((entity, distance)),
        })
}
