//! Path and placement geometry shared by every subsystem.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An ordered waypoint sequence that enemies walk. Immutable for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub waypoints: Vec<Vec2>,
    /// Rendering tag (ground texture). Ignored by the simulation.
    #[serde(default)]
    pub texture: String,
}

/// Axis-aligned rectangle given by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Route {
    pub fn new(waypoints: Vec<Vec2>, texture: impl Into<String>) -> Self {
        Self {
            waypoints,
            texture: texture.into(),
        }
    }

    /// First waypoint, where enemies on this route spawn.
    pub fn start(&self) -> Option<Vec2> {
        self.waypoints.first().copied()
    }

    /// Consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Shortest distance from `point` to any segment of this route.
    /// A single-waypoint route measures to that point.
    pub fn distance_to(&self, point: Vec2) -> f32 {
        match self.waypoints.as_slice() {
            [] => f32::INFINITY,
            [only] => point.distance(*only),
            _ => self
                .segments()
                .map(|(a, b)| point_to_segment_distance(point, a, b))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle centered on `center` with the given full size, grown by `margin` on every side.
    pub fn around(center: Vec2, size: Vec2, margin: f32) -> Self {
        let half = size / 2.0 + Vec2::splat(margin);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn point_to_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Move from `from` toward `to` by at most `max_step`, never overshooting.
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + delta / distance * max_step
    }
}

/// Waypoint index an enemy should head for after standing at `position`.
///
/// Advances past every waypoint closer than `threshold`, stopping at the last one.
pub fn advance_waypoint(route: &Route, position: Vec2, mut index: usize, threshold: f32) -> usize {
    let last = route.waypoints.len().saturating_sub(1);
    while index < last && position.distance(route.waypoints[index]) < threshold {
        index += 1;
    }
    index.min(last)
}
