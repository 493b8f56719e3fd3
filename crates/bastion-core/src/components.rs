//! ECS components for hecs entities.
//!
//! Components are plain data. `Health` is the exception: all damage and
//! healing goes through its methods so `0 <= current <= max` holds at
//! every mutation site.

use glam::Vec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridCell;

/// Hit points, clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Full health at `max`.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// Health at `current`, clamped into `[0, max]`.
    pub fn with_current(current: f32, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Current as a share of max, for health bars.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Apply damage. Returns true if this hit took the entity from alive to dead.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.is_alive();
        self.current = (self.current - amount.max(0.0)).max(0.0);
        was_alive && !self.is_alive()
    }

    /// Heal up to max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Change max and add the same delta to current (never below zero).
    pub fn rescale_max(&mut self, new_max: f32) {
        let delta = new_max - self.max;
        self.max = new_max.max(0.0);
        self.current = (self.current + delta).clamp(0.0, self.max);
    }
}

/// Hostile unit walking a route.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Index into the session's route list. Fixed at spawn.
    pub route: usize,
    /// Index of the waypoint currently being walked toward.
    pub waypoint: usize,
    pub state: EnemyState,
    /// Tower being shot at. Weak reference, re-validated every tick.
    pub target: Option<Entity>,
    /// Seconds until the next attack is allowed.
    pub attack_cooldown: f32,
}

/// Static defense occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub cell: GridCell,
    pub level: u32,
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub range: f32,
    /// Simulation time of the last shot, if any.
    pub last_fire_secs: Option<f64>,
}

/// Summoned melee defender.
#[derive(Debug, Clone)]
pub struct Ally {
    pub speed: f32,
    pub damage: f32,
    pub attack_range: f32,
    /// Attacks per second.
    pub attack_rate: f32,
    pub attack_cooldown: f32,
    /// Enemy being chased. Weak reference, re-acquired every tick.
    pub target: Option<Entity>,
    /// Unit heading used while no enemy is in range.
    pub wander_heading: Vec2,
    /// Seconds since the wander heading last changed.
    pub wander_timer: f32,
}

/// Arrow in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Unit direction of travel.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Seconds since launch.
    pub age: f32,
    pub lifetime: f32,
    pub owner: Faction,
}
