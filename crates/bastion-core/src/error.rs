//! Error taxonomy shared across crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GridCell;

/// A player action that could not be carried out.
///
/// Never fatal. The simulation state is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum ActionError {
    #[error("not enough essence: need {needed}, have {available}")]
    InsufficientEssence { needed: u32, available: u32 },

    #[error("cell {cell} is outside the buildable grid")]
    CellOutOfBounds { cell: GridCell },

    #[error("cell {cell} is already occupied")]
    CellOccupied { cell: GridCell },

    #[error("cell {cell} is too close to an enemy route")]
    TooCloseToRoute { cell: GridCell },

    #[error("cell {cell} is too close to the castle")]
    TooCloseToCastle { cell: GridCell },

    #[error("tower is already at max level {max_level}")]
    MaxLevel { max_level: u32 },

    #[error("no tower at cell {cell}")]
    NoTowerAt { cell: GridCell },

    #[error("no tower selected")]
    NoTowerSelected,

    #[error("tower is already at full health")]
    FullHealth,

    #[error("attack is still cooling down")]
    AttackNotReady,

    #[error("action requires a game in progress")]
    NotPlaying,
}

/// Failure to load a session configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
