//! Game state snapshot: the complete visible state handed to rendering each tick.
//!
//! Rendering reads these views and never touches the simulation directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{GridCell, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Number of the most recently started wave (0 before the first).
    pub wave: u32,
    pub score: u32,
    pub essence: u32,
    pub character_level: u32,
    pub castle: CastleView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub allies: Vec<AllyView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised during this tick.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastleView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health_fraction: f32,
    pub attack_damage: f32,
    pub is_attacking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub route: usize,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub cell: GridCell,
    pub position: Vec2,
    pub level: u32,
    pub health_fraction: f32,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllyView {
    pub position: Vec2,
    pub health_fraction: f32,
    pub engaged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub direction: Vec2,
    pub owner: Faction,
}
