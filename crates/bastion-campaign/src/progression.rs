//! Character progression: level curve, derived stats and experience accrual.
//!
//! Stats are pure functions of level and are recomputed on demand.

use serde::{Deserialize, Serialize};

use bastion_core::constants::*;

/// Experience needed to advance from `level - 1` to `level`.
///
/// Level 1 is free. Level 2 costs `EXP_BASE_REQUIREMENT`; each later level
/// costs `EXP_GROWTH_RATE` times the previous one, truncated.
pub fn exp_required_for_level(level: u32) -> u32 {
    if level <= 1 {
        return 0;
    }
    let exponent = (level - 2).min(i32::MAX as u32) as i32;
    (EXP_BASE_REQUIREMENT * EXP_GROWTH_RATE.powi(exponent)) as u32
}

/// Cumulative experience needed to reach `level` from a fresh character.
pub fn total_exp_for_level(level: u32) -> u64 {
    (2..=level).map(|l| exp_required_for_level(l) as u64).sum()
}

/// Avatar max health at `level`.
pub fn health_at_level(level: u32) -> u32 {
    CHARACTER_BASE_HEALTH + level.saturating_sub(1) * CHARACTER_HEALTH_PER_LEVEL
}

/// Avatar melee damage at `level`.
pub fn attack_at_level(level: u32) -> u32 {
    CHARACTER_BASE_ATTACK + level.saturating_sub(1) * CHARACTER_ATTACK_PER_LEVEL
}

/// Lifetime totals across all sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerTotals {
    pub games_played: u32,
    pub total_enemies_killed: u32,
    pub total_waves_completed: u32,
    pub total_towers_built: u32,
}

/// Persistent character state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProgress {
    pub name: String,
    pub level: u32,
    /// Experience earned toward the next level.
    pub current_exp: u32,
    /// Lifetime experience. Never decreases.
    pub total_exp: u64,
    #[serde(default)]
    pub career: CareerTotals,
}

/// Result of an experience grant that crossed one or more level thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

impl Default for CharacterProgress {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTER_NAME)
    }
}

impl CharacterProgress {
    /// A fresh level-1 character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            current_exp: 0,
            total_exp: 0,
            career: CareerTotals::default(),
        }
    }

    /// Add experience and resolve every level threshold it crosses.
    pub fn add_exp(&mut self, amount: u32) -> Option<LevelUp> {
        let old_level = self.level;
        self.current_exp = self.current_exp.saturating_add(amount);
        self.total_exp = self.total_exp.saturating_add(amount as u64);

        loop {
            let needed = exp_required_for_level(self.level + 1);
            if needed == 0 || self.current_exp < needed {
                break;
            }
            self.current_exp -= needed;
            self.level += 1;
        }

        (self.level > old_level).then_some(LevelUp {
            old_level,
            new_level: self.level,
        })
    }

    /// Experience still missing for the next level.
    pub fn exp_to_next_level(&self) -> u32 {
        exp_required_for_level(self.level + 1).saturating_sub(self.current_exp)
    }

    pub fn max_health(&self) -> u32 {
        health_at_level(self.level)
    }

    pub fn attack(&self) -> u32 {
        attack_at_level(self.level)
    }
}

/// Experience bookkeeping for one play session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub level_start: u32,
    pub exp_gained: u32,
}

impl SessionProgress {
    pub fn start(character: &CharacterProgress) -> Self {
        Self {
            level_start: character.level,
            exp_gained: 0,
        }
    }

    /// Grant experience to `character` and record it against this session.
    pub fn grant(&mut self, character: &mut CharacterProgress, amount: u32) -> Option<LevelUp> {
        self.exp_gained = self.exp_gained.saturating_add(amount);
        character.add_exp(amount)
    }
}
