//! Player intents fed into the simulation by the input layer.
//!
//! Intents are queued and processed at the next tick boundary. Every intent
//! either takes effect or is rejected with a `GameEvent::ActionRejected`.

use serde::{Deserialize, Serialize};

use crate::types::GridCell;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerIntent {
    // --- Avatar ---
    /// Set the avatar's movement direction. Held until replaced; zero stops.
    Move { dx: f32, dy: f32 },
    /// Start a melee swing.
    Attack,

    // --- Construction ---
    /// Build a tower at a grid cell.
    BuildTower { cell: GridCell },
    /// Build a tower at the cell under the avatar.
    BuildNearPlayer,
    /// Select the tower at a cell for later upgrades.
    SelectTower { cell: GridCell },
    /// Upgrade the currently selected tower.
    UpgradeSelected,
    /// Upgrade the tower at a cell.
    UpgradeTower { cell: GridCell },
    /// Repair the tower at a cell.
    RepairTower { cell: GridCell },

    // --- Allies ---
    /// Summon an ally next to the avatar.
    SummonAlly,

    // --- Session control ---
    StartGame,
    Pause,
    Resume,
}
