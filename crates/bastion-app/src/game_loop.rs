//! Fixed-step game loop: ticks the simulation, feeds it the commander's
//! intents and persists the outcome.
//!
//! Persistence errors are logged and never stop play. At game over the
//! session is fully written before this returns, so the caller can build
//! the next session from what was stored.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use bastion_campaign::progression::CharacterProgress;
use bastion_campaign::save_load::{now_timestamp, SaveStore, SessionSummary};
use bastion_core::constants::TICK_RATE;
use bastion_core::enums::GamePhase;
use bastion_sim::Simulation;

use crate::commander::Commander;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Stop after this many ticks and save the session for later.
    pub max_ticks: u64,
    /// Write the resumable save every this many ticks.
    pub autosave_every: Option<u64>,
    /// Sleep between ticks to run at wall-clock speed.
    pub realtime: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: 60 * 60 * TICK_RATE as u64,
            autosave_every: None,
            realtime: false,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    /// True if the castle fell, false if the tick limit stopped play.
    pub game_over: bool,
    pub ticks: u64,
    /// Character after this session, including career totals when recorded.
    pub character: CharacterProgress,
}

/// Run `sim` until the castle falls or `options.max_ticks` pass.
pub fn run_session(
    sim: &mut Simulation,
    commander: &mut Commander,
    store: &SaveStore,
    options: LoopOptions,
) -> SessionOutcome {
    let mut next_tick_time = Instant::now();
    let mut ticks = 0;

    while ticks < options.max_ticks {
        let snapshot = sim.tick();
        ticks += 1;

        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        sim.queue_intents(commander.plan(&snapshot));

        if let Some(every) = options.autosave_every.filter(|every| *every > 0) {
            if ticks % every == 0 && snapshot.phase == GamePhase::Playing {
                if let Err(err) = store.save_game(&sim.saved_game()) {
                    warn!(%err, "autosave failed");
                }
            }
        }

        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    match sim.take_session_summary() {
        Some(summary) => {
            let mut character = sim.character().clone();
            record_game_over(store, &mut character, &summary);
            SessionOutcome {
                summary,
                game_over: true,
                ticks,
                character,
            }
        }
        None => {
            let character = sim.character().clone();
            let summary = sim.session_summary();
            save_for_later(store, sim, &character, &summary);
            SessionOutcome {
                summary,
                game_over: false,
                ticks,
                character,
            }
        }
    }
}

/// Clear the resumable slot and append the finished session to history.
fn record_game_over(store: &SaveStore, character: &mut CharacterProgress, summary: &SessionSummary) {
    if let Err(err) = store.delete_saved_game() {
        warn!(%err, "could not remove the resumable save");
    }
    match store.record_session(character, summary, now_timestamp()) {
        Ok(()) => info!(
            score = summary.score,
            wave = summary.wave_reached,
            level = character.level,
            "session recorded"
        ),
        Err(err) => warn!(%err, "could not record the session, progress kept in memory"),
    }
}

/// Write the resumable slot and log the interrupted session.
///
/// Career totals are left for the resumed game's own game over.
fn save_for_later(store: &SaveStore, sim: &Simulation, character: &CharacterProgress, summary: &SessionSummary) {
    if let Err(err) = store.save_game(&sim.saved_game()) {
        warn!(%err, "could not write the resumable save");
    }
    if let Err(err) = store.record_interrupted_session(character, summary, now_timestamp()) {
        warn!(%err, "could not record the interrupted session");
    }
}
