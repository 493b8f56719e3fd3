//! JSON save store.
//!
//! One directory holds the character, the session history, the high-score
//! table and a single resumable game. Enemies and projectiles are never
//! written: in-flight combat is not resumable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use bastion_core::constants::HIGH_SCORE_SLOTS;
use bastion_core::types::GridCell;

use crate::error::Result;
use crate::progression::CharacterProgress;

const CHARACTER_FILE: &str = "character.json";
const SESSIONS_FILE: &str = "sessions.json";
const HIGH_SCORES_FILE: &str = "high_scores.json";
const SAVED_GAME_FILE: &str = "saved_game.json";

/// End-of-session statistics handed to persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub wave_reached: u32,
    pub enemies_killed: u32,
    pub towers_built: u32,
    pub allies_summoned: u32,
    pub time_elapsed: f64,
    pub exp_gained: u32,
    pub level_start: u32,
    pub level_end: u32,
}

/// A session as stored in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: u64,
    /// Saved for later rather than ended by the castle falling.
    #[serde(default)]
    pub interrupted: bool,
    #[serde(flatten)]
    pub summary: SessionSummary,
}

/// One row of the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub player_name: String,
    pub score: u32,
    pub wave_reached: u32,
    pub character_level: u32,
    pub timestamp: u64,
}

/// A tower as stored in a resumable game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedTower {
    pub cell: GridCell,
    pub level: u32,
    pub health: f32,
}

/// An ally as stored in a resumable game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedAlly {
    pub position: Vec2,
    pub health: f32,
}

/// Mid-game snapshot that can be resumed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub character_name: String,
    pub character_level: u32,
    pub timestamp: u64,
    /// Next wave the director will spawn.
    pub wave_number: u32,
    pub score: u32,
    pub essence: u32,
    pub castle_health: f32,
    pub time_elapsed: f64,
    /// Session counters so far, carried into the resumed session.
    #[serde(default)]
    pub enemies_killed: u32,
    #[serde(default)]
    pub towers_built: u32,
    #[serde(default)]
    pub allies_summoned: u32,
    pub towers: Vec<SavedTower>,
    pub allies: Vec<SavedAlly>,
}

/// File-backed store rooted at one directory.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Offer `entry` to a high-score table capped at `HIGH_SCORE_SLOTS`.
///
/// While the table has room every entry goes in. Once full, the entry
/// replaces the lowest score only if it beats it. The table stays sorted
/// by score, then wave, both descending. Returns whether it was kept.
pub fn insert_high_score(table: &mut Vec<HighScore>, entry: HighScore) -> bool {
    let kept = if table.len() < HIGH_SCORE_SLOTS {
        table.push(entry);
        true
    } else {
        let lowest = table
            .iter()
            .enumerate()
            .min_by_key(|(_, h)| h.score)
            .map(|(i, h)| (i, h.score));
        match lowest {
            Some((index, score)) if entry.score > score => {
                table[index] = entry;
                true
            }
            _ => false,
        }
    };

    table.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.wave_reached.cmp(&a.wave_reached))
    });
    kept
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), json)?;
        Ok(())
    }

    // --- Character ---

    /// Read the stored character, if one exists.
    pub fn try_load_character(&self) -> Result<Option<CharacterProgress>> {
        self.read_json(CHARACTER_FILE)
    }

    /// Load the character, falling back to a fresh one if the file is
    /// missing or unreadable. Never fails.
    pub fn load_character(&self) -> CharacterProgress {
        match self.try_load_character() {
            Ok(Some(character)) => character,
            Ok(None) => CharacterProgress::default(),
            Err(err) => {
                tracing::warn!(%err, dir = %self.dir.display(), "character save unreadable, starting fresh");
                CharacterProgress::default()
            }
        }
    }

    pub fn save_character(&self, character: &CharacterProgress) -> Result<()> {
        self.write_json(CHARACTER_FILE, character)
    }

    // --- Sessions and high scores ---

    /// Persist a session that ended with the castle falling.
    ///
    /// Appends to the history, offers the score to the high-score table,
    /// then adds the session to the career totals and saves the character.
    /// The character is written last so a failed history write never leaves
    /// the totals counting a game the history lacks.
    pub fn record_session(
        &self,
        character: &mut CharacterProgress,
        summary: &SessionSummary,
        timestamp: u64,
    ) -> Result<()> {
        self.append_history(&character.name, summary, timestamp, false)?;

        let career = &mut character.career;
        career.games_played += 1;
        career.total_enemies_killed += summary.enemies_killed;
        career.total_waves_completed += summary.wave_reached;
        career.total_towers_built += summary.towers_built;
        self.save_character(character)
    }

    /// Persist a session that was saved for later.
    ///
    /// The history and high-score table see it now. Career totals wait for
    /// the resumed game to end, whose summary carries the counters forward,
    /// so nothing is counted twice.
    pub fn record_interrupted_session(
        &self,
        character: &CharacterProgress,
        summary: &SessionSummary,
        timestamp: u64,
    ) -> Result<()> {
        self.append_history(&character.name, summary, timestamp, true)?;
        self.save_character(character)
    }

    fn append_history(&self, player_name: &str, summary: &SessionSummary, timestamp: u64, interrupted: bool) -> Result<()> {
        let mut sessions: Vec<SessionRecord> = self.read_list_or_default(SESSIONS_FILE);
        sessions.push(SessionRecord {
            timestamp,
            interrupted,
            summary: summary.clone(),
        });
        self.write_json(SESSIONS_FILE, &sessions)?;

        let mut table = self.read_list_or_default(HIGH_SCORES_FILE);
        let kept = insert_high_score(
            &mut table,
            HighScore {
                player_name: player_name.to_string(),
                score: summary.score,
                wave_reached: summary.wave_reached,
                character_level: summary.level_end,
                timestamp,
            },
        );
        if kept {
            tracing::info!(score = summary.score, "new high score");
            self.write_json(HIGH_SCORES_FILE, &table)?;
        }
        Ok(())
    }

    /// Read a list file, treating a missing or unreadable file as empty.
    fn read_list_or_default<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        match self.read_json(file) {
            Ok(list) => list.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, file, "save file unreadable, starting a fresh list");
                Vec::new()
            }
        }
    }

    /// Session history, oldest first.
    pub fn sessions(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.read_json(SESSIONS_FILE)?.unwrap_or_default())
    }

    /// High-score table, best first.
    pub fn high_scores(&self) -> Result<Vec<HighScore>> {
        Ok(self.read_json(HIGH_SCORES_FILE)?.unwrap_or_default())
    }

    // --- Resumable game ---

    /// Write the single resumable slot, replacing any previous save.
    pub fn save_game(&self, game: &SavedGame) -> Result<()> {
        self.write_json(SAVED_GAME_FILE, game)?;
        tracing::info!(wave = game.wave_number, score = game.score, "game saved");
        Ok(())
    }

    pub fn load_game(&self) -> Result<Option<SavedGame>> {
        self.read_json(SAVED_GAME_FILE)
    }

    pub fn has_saved_game(&self) -> bool {
        self.path(SAVED_GAME_FILE).exists()
    }

    /// Remove the resumable slot. Deleting a missing save is not an error.
    pub fn delete_saved_game(&self) -> Result<()> {
        let path = self.path(SAVED_GAME_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
