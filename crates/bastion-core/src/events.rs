//! Events emitted by the simulation for UI, audio and logging consumers.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::error::ActionError;
use crate::types::GridCell;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave began spawning.
    WaveStarted { wave: u32, count: u32 },
    /// An enemy died and its rewards were paid out.
    EnemyKilled {
        kind: EnemyKind,
        score: u32,
        essence: u32,
    },
    /// An enemy settled in for a permanent siege.
    SiegeStarted { kind: EnemyKind },
    CastleDamaged { amount: f32, remaining: f32 },
    TowerBuilt { cell: GridCell },
    TowerUpgraded { cell: GridCell, level: u32 },
    TowerRepaired { cell: GridCell, health: f32 },
    TowerDestroyed { cell: GridCell },
    AllySummoned,
    AllyLost,
    /// The character reached a new level.
    LevelUp { level: u32 },
    /// An intent was refused. State is unchanged.
    ActionRejected { error: ActionError },
    /// The castle fell.
    GameOver { score: u32, wave_reached: u32 },
}
