//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy tier. Stats come from the profile table in `bastion-enemy-ai`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak tier, available from the first wave.
    #[default]
    Orc,
    /// Strong tier, mixed in from `URUK_HAI_START_WAVE`.
    UrukHai,
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walking the route.
    #[default]
    Moving,
    /// Walking the route while shooting at a nearby tower.
    AttackingTower,
    /// Parked within siege distance, hitting the castle. Terminal.
    AttackingCastle,
}

/// Side that fired a projectile. Decides which entities it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    /// Towers and allies. Hits enemies only.
    Defender,
    /// Enemy archers. Hits towers only.
    Enemy,
}

/// High-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    /// Castle destroyed. Terminal for the session.
    GameOver,
}
