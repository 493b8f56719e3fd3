//! Per-session configuration: world layout, routes, castle and RNG seed.
//!
//! Every field has a default, so a JSON file only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::geometry::{Bounds, Route};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and intents = same simulation.
    pub seed: u64,
    pub world: WorldLayout,
    pub castle: CastleConfig,
    pub player_start: Vec2,
    pub starting_essence: u32,
    /// Enemy routes. Every route must have at least one waypoint.
    pub routes: Vec<Route>,
    /// When false the wave director never spawns; enemies come only from explicit calls.
    pub auto_waves: bool,
}

/// Screen and grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub width: f32,
    pub height: f32,
    /// Bottom strip reserved for the HUD.
    pub hud_height: f32,
    pub tile_size: f32,
}

/// The defended structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    pub position: Vec2,
    /// Full footprint (width, height).
    pub size: Vec2,
    pub max_health: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world: WorldLayout::default(),
            castle: CastleConfig::default(),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            starting_essence: STARTING_ESSENCE,
            routes: default_routes(),
            auto_waves: true,
        }
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            hud_height: HUD_HEIGHT,
            tile_size: TILE_SIZE,
        }
    }
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(CASTLE_X, CASTLE_Y),
            size: Vec2::splat(CASTLE_SIZE),
            max_health: CASTLE_MAX_HEALTH,
        }
    }
}

/// Three routes entering from the left, right and bottom edges and converging on the castle.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new(
            vec![
                Vec2::new(0.0, 160.0),
                Vec2::new(320.0, 160.0),
                Vec2::new(320.0, 360.0),
                Vec2::new(CASTLE_X, CASTLE_Y),
            ],
            "path_dirt",
        ),
        Route::new(
            vec![
                Vec2::new(WORLD_WIDTH, 200.0),
                Vec2::new(960.0, 200.0),
                Vec2::new(960.0, 360.0),
                Vec2::new(CASTLE_X, CASTLE_Y),
            ],
            "path_stone",
        ),
        Route::new(
            vec![
                Vec2::new(200.0, WORLD_HEIGHT - HUD_HEIGHT),
                Vec2::new(200.0, 540.0),
                Vec2::new(CASTLE_X, 540.0),
                Vec2::new(CASTLE_X, CASTLE_Y),
            ],
            "path_grass",
        ),
    ]
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Invalid("at least one route is required".into()));
        }
        if let Some(index) = self.routes.iter().position(|r| r.waypoints.is_empty()) {
            return Err(ConfigError::Invalid(format!("route {index} has no waypoints")));
        }
        if self.world.tile_size <= 0.0 {
            return Err(ConfigError::Invalid("tile_size must be positive".into()));
        }
        if self.world.hud_height >= self.world.height {
            return Err(ConfigError::Invalid("HUD covers the whole screen".into()));
        }
        if self.castle.max_health <= 0.0 {
            return Err(ConfigError::Invalid("castle max_health must be positive".into()));
        }
        Ok(())
    }

    /// Simulated area: the screen minus the HUD strip.
    pub fn playfield(&self) -> Bounds {
        Bounds::new(
            Vec2::ZERO,
            Vec2::new(self.world.width, self.world.height - self.world.hud_height),
        )
    }

    /// Number of grid columns.
    pub fn grid_columns(&self) -> i32 {
        (self.world.width / self.world.tile_size) as i32
    }

    /// Number of buildable grid rows (HUD rows excluded).
    pub fn grid_rows(&self) -> i32 {
        ((self.world.height - self.world.hud_height) / self.world.tile_size) as i32
    }
}
