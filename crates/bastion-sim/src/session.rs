//! Session-level state that lives outside the ECS world.
//!
//! The castle and the running score are single instances owned by the
//! `Simulation`. They are stored here, NOT as ECS entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use bastion_core::components::Health;
use bastion_core::config::CastleConfig;

/// The defended structure. Its destruction ends the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Castle {
    pub position: Vec2,
    pub size: Vec2,
    pub health: Health,
}

impl Castle {
    pub fn new(config: &CastleConfig) -> Self {
        Self {
            position: config.position,
            size: config.size,
            health: Health::new(config.max_health),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        !self.health.is_alive()
    }
}

/// Running statistics for the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub enemies_killed: u32,
    pub towers_built: u32,
    pub allies_summoned: u32,
    /// Arrows loosed by towers.
    pub tower_shots: u32,
    /// Defender arrows that struck an enemy.
    pub arrows_landed: u32,
}
