//! Simulation engine, the core of the game.
//!
//! `Simulation` owns the hecs ECS world and every piece of session state,
//! processes player intents, runs all systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use bastion_core::commands::PlayerIntent;
use bastion_core::components::{Ally, Health, Tower};
use bastion_core::config::SimConfig;
use bastion_core::constants::*;
use bastion_core::enums::{EnemyKind, GamePhase};
use bastion_core::error::{ActionError, ActionResult};
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{GridCell, Position, SimTime};

use bastion_campaign::economy::{CostTable, Ledger};
use bastion_campaign::progression::{CharacterProgress, SessionProgress};
use bastion_campaign::save_load::{now_timestamp, SavedAlly, SavedGame, SavedTower, SessionSummary};

use crate::player::Player;
use crate::session::{Castle, SessionStats};
use crate::systems;
use crate::systems::snapshot::SessionView;
use crate::systems::wave_director::WaveDirector;
use crate::tower_grid::TowerGrid;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all session state.
pub struct Simulation {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    intent_queue: VecDeque<PlayerIntent>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,

    castle: Castle,
    player: Player,
    towers: TowerGrid,
    director: WaveDirector,
    ledger: Ledger,
    costs: CostTable,

    character: CharacterProgress,
    session: SessionProgress,
    stats: SessionStats,
    /// Filled once at game over, taken by the caller for persistence.
    pending_summary: Option<SessionSummary>,
}

impl Simulation {
    /// Create a fresh session in the `Menu` phase.
    pub fn new(config: SimConfig, character: CharacterProgress) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Menu,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            intent_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            castle: Castle::new(&config.castle),
            player: Player::new(config.player_start, &character),
            towers: TowerGrid::new(),
            director: WaveDirector::new(),
            ledger: Ledger::new(config.starting_essence),
            costs: CostTable::default(),
            session: SessionProgress::start(&character),
            character,
            stats: SessionStats::default(),
            pending_summary: None,
            config,
        }
    }

    /// Rebuild a saved session and put it straight into play.
    ///
    /// Towers, allies and the session counters come back; enemies and
    /// projectiles were never saved, so the field starts clear.
    pub fn resume(config: SimConfig, character: CharacterProgress, saved: &SavedGame) -> Self {
        let mut sim = Self::new(config, character);

        let tick = (saved.time_elapsed / DT).round().max(0.0) as u64;
        sim.time = SimTime {
            tick,
            elapsed_secs: tick as f64 * DT,
        };
        sim.ledger = Ledger::new(saved.essence);
        sim.stats.score = saved.score;
        sim.stats.enemies_killed = saved.enemies_killed;
        sim.stats.towers_built = saved.towers_built;
        sim.stats.allies_summoned = saved.allies_summoned;
        sim.castle.health = Health::with_current(saved.castle_health, sim.castle.health.max());
        sim.director = WaveDirector::resume(saved.wave_number, sim.time.elapsed_secs);

        let tile_size = sim.config.world.tile_size;
        for tower in &saved.towers {
            sim.towers
                .restore(&mut sim.world, tower.cell, tower.level, tower.health, tile_size);
        }
        for ally in &saved.allies {
            world_setup::spawn_ally(&mut sim.world, ally.position, ally.health);
        }

        sim.phase = GamePhase::Playing;
        info!(
            wave = saved.wave_number,
            towers = saved.towers.len(),
            allies = saved.allies.len(),
            "session resumed"
        );
        sim
    }

    /// Queue a player intent for processing at the next tick boundary.
    pub fn queue_intent(&mut self, intent: PlayerIntent) {
        self.intent_queue.push_back(intent);
    }

    /// Queue multiple intents.
    pub fn queue_intents(&mut self, intents: impl IntoIterator<Item = PlayerIntent>) {
        self.intent_queue.extend(intents);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Intents are always processed; systems and the clock only run while
    /// `Playing`.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_intents();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, self.session_view(), events)
    }

    // --- Direct actions. Intents route through these; tests and tools may call them too. ---

    /// Build a level-1 tower on `cell`.
    pub fn place_tower(&mut self, cell: GridCell) -> ActionResult<Entity> {
        let cost = self.costs.tower;
        let entity = self
            .towers
            .place(&mut self.world, cell, &self.config, &mut self.ledger, cost)?;
        self.stats.towers_built += 1;
        self.stats.score += SCORE_PER_TOWER_BUILT;
        self.events.push(GameEvent::TowerBuilt { cell });
        Ok(entity)
    }

    /// Upgrade the tower on `cell`. Returns its new level.
    pub fn upgrade_tower(&mut self, cell: GridCell) -> ActionResult<u32> {
        let level = self.towers.upgrade(&mut self.world, cell, &mut self.ledger)?;
        self.stats.score += SCORE_PER_TOWER_UPGRADE;
        self.events.push(GameEvent::TowerUpgraded { cell, level });
        Ok(level)
    }

    /// Repair the tower on `cell`. Returns its health afterwards.
    pub fn repair_tower(&mut self, cell: GridCell) -> ActionResult<f32> {
        let health = self.towers.repair(&mut self.world, cell, &mut self.ledger)?;
        self.events.push(GameEvent::TowerRepaired { cell, health });
        Ok(health)
    }

    /// Summon an ally near the avatar.
    pub fn summon_ally(&mut self) -> ActionResult<Entity> {
        self.ledger.try_spend(self.costs.ally)?;
        let playfield = self.config.playfield();
        let position = world_setup::ally_spawn_point(&mut self.rng, self.player.position, &playfield);
        let entity = world_setup::spawn_ally(&mut self.world, position, ALLY_HEALTH);
        self.stats.allies_summoned += 1;
        self.events.push(GameEvent::AllySummoned);
        debug!(x = position.x, y = position.y, "ally summoned");
        Ok(entity)
    }

    /// Spawn `count` enemies across the configured routes without touching
    /// the wave counter. Tiers follow the current wave.
    pub fn spawn_wave(&mut self, count: u32) -> Vec<Entity> {
        let wave = self.director.wave_number().max(1);
        let playfield = self.config.playfield();
        systems::wave_director::spawn_wave(
            &mut self.world,
            &mut self.rng,
            &self.config.routes,
            &playfield,
            wave,
            count,
        )
    }

    /// Spawn one enemy exactly on the first waypoint of `route`.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, route: usize) -> Option<Entity> {
        let path = self.config.routes.get(route)?;
        let start = path.start()?;
        Some(world_setup::spawn_enemy(&mut self.world, kind, route, path, start))
    }

    // --- Persistence boundary ---

    /// Resumable snapshot of the durable parts of the session.
    pub fn saved_game(&self) -> SavedGame {
        let towers = self
            .towers
            .iter()
            .filter_map(|(cell, entity)| {
                let tower = self.world.get::<&Tower>(entity).ok()?;
                let health = self.world.get::<&Health>(entity).ok()?;
                Some(SavedTower {
                    cell,
                    level: tower.level,
                    health: health.current(),
                })
            })
            .collect();
        let allies = self
            .world
            .query::<(&Ally, &Position, &Health)>()
            .iter()
            .map(|(_, (_, pos, health))| SavedAlly {
                position: pos.0,
                health: health.current(),
            })
            .collect();

        SavedGame {
            character_name: self.character.name.clone(),
            character_level: self.character.level,
            timestamp: now_timestamp(),
            wave_number: self.director.next_wave(),
            score: self.stats.score,
            essence: self.ledger.balance(),
            castle_health: self.castle.health.current(),
            time_elapsed: self.time.elapsed_secs,
            enemies_killed: self.stats.enemies_killed,
            towers_built: self.stats.towers_built,
            allies_summoned: self.stats.allies_summoned,
            towers,
            allies,
        }
    }

    /// Summary of the session so far.
    pub fn session_summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.stats.score,
            wave_reached: self.director.wave_number(),
            enemies_killed: self.stats.enemies_killed,
            towers_built: self.stats.towers_built,
            allies_summoned: self.stats.allies_summoned,
            time_elapsed: self.time.elapsed_secs,
            exp_gained: self.session.exp_gained,
            level_start: self.session.level_start,
            level_end: self.character.level,
        }
    }

    /// The game-over summary, handed out once.
    pub fn take_session_summary(&mut self) -> Option<SessionSummary> {
        self.pending_summary.take()
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view of the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for test setup.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn castle(&self) -> &Castle {
        &self.castle
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn towers(&self) -> &TowerGrid {
        &self.towers
    }

    pub fn essence(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn character(&self) -> &CharacterProgress {
        &self.character
    }

    /// Most recently started wave, 0 before the first.
    pub fn wave_number(&self) -> u32 {
        self.director.wave_number()
    }

    // --- Tick internals ---

    fn session_view(&self) -> SessionView<'_> {
        SessionView {
            time: self.time,
            phase: self.phase,
            wave: self.director.wave_number(),
            score: self.stats.score,
            essence: self.ledger.balance(),
            character_level: self.character.level,
            castle: &self.castle,
            player: &self.player,
            selected_tower: self.towers.selected(),
        }
    }

    /// Process all queued intents. Rejections become events, never panics.
    fn process_intents(&mut self) {
        while let Some(intent) = self.intent_queue.pop_front() {
            if let Err(error) = self.handle_intent(intent) {
                warn!(%error, "intent rejected");
                self.events.push(GameEvent::ActionRejected { error });
            }
        }
    }

    fn handle_intent(&mut self, intent: PlayerIntent) -> ActionResult<()> {
        match intent {
            PlayerIntent::StartGame => {
                if self.phase == GamePhase::Menu {
                    self.phase = GamePhase::Playing;
                    info!(seed = self.config.seed, "session started");
                }
                Ok(())
            }
            PlayerIntent::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
                Ok(())
            }
            PlayerIntent::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
                Ok(())
            }
            gameplay => {
                if self.phase != GamePhase::Playing {
                    return Err(ActionError::NotPlaying);
                }
                self.handle_gameplay(gameplay)
            }
        }
    }

    fn handle_gameplay(&mut self, intent: PlayerIntent) -> ActionResult<()> {
        match intent {
            PlayerIntent::Move { dx, dy } => {
                self.player.set_move(dx, dy);
                Ok(())
            }
            PlayerIntent::Attack => {
                if self.player.start_attack() {
                    Ok(())
                } else {
                    Err(ActionError::AttackNotReady)
                }
            }
            PlayerIntent::BuildTower { cell } => self.place_tower(cell).map(|_| ()),
            PlayerIntent::BuildNearPlayer => {
                let cell = GridCell::containing(self.player.position, self.config.world.tile_size);
                self.place_tower(cell).map(|_| ())
            }
            PlayerIntent::SelectTower { cell } => self.towers.select(cell),
            PlayerIntent::UpgradeSelected => {
                let cell = self.towers.selected().ok_or(ActionError::NoTowerSelected)?;
                self.upgrade_tower(cell).map(|_| ())
            }
            PlayerIntent::UpgradeTower { cell } => self.upgrade_tower(cell).map(|_| ()),
            PlayerIntent::RepairTower { cell } => self.repair_tower(cell).map(|_| ()),
            PlayerIntent::SummonAlly => self.summon_ally().map(|_| ()),
            PlayerIntent::StartGame | PlayerIntent::Pause | PlayerIntent::Resume => Ok(()),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = DT as f32;
        let playfield = self.config.playfield();

        // 1. Avatar movement and swing timers
        self.player.update(dt, &playfield);

        // 2. Enemy AI (route movement, tower engagement, siege)
        let castle_damage = systems::enemy_ai::run(
            &mut self.world,
            &self.config.routes,
            self.castle.position,
            dt,
            &mut self.events,
        );
        if castle_damage > 0.0 {
            self.castle.health.apply_damage(castle_damage);
            self.events.push(GameEvent::CastleDamaged {
                amount: castle_damage,
                remaining: self.castle.health.current(),
            });
        }

        // 3. Player melee, rewarding its kills before anything else acts
        if self.player.take_swing() {
            systems::melee::run(&mut self.world, &self.player, &playfield);
        }
        self.sweep_casualties();

        // 4. Tower fire control
        self.stats.tower_shots += systems::towers::run(&mut self.world, self.time.elapsed_secs);

        // 5. Allies
        systems::allies::run(&mut self.world, &mut self.rng, dt, &playfield);

        // 6. Projectile flight and collisions
        let report = systems::projectiles::run(&mut self.world, dt, &playfield, &mut self.despawn_buffer);
        self.stats.arrows_landed += report.enemy_hits;

        // 7. Sweep ally, tower and projectile kills
        self.sweep_casualties();

        // 8. Wave director
        if self.config.auto_waves {
            let active = world_setup::enemy_count(&self.world);
            if let Some((wave, count)) = self.director.update(DT, active) {
                self.start_wave(wave, count);
            }
        }

        // 9. Terminal condition
        if self.castle.is_destroyed() {
            self.end_session();
        }
    }

    fn sweep_casualties(&mut self) {
        let casualties = systems::cleanup::sweep(&mut self.world, &mut self.despawn_buffer);
        if casualties.is_empty() {
            return;
        }
        for (kind, max_health) in casualties.enemies {
            self.award_kill(kind, max_health);
        }
        for cell in casualties.towers {
            self.towers.release(cell);
            self.events.push(GameEvent::TowerDestroyed { cell });
            debug!(%cell, "tower destroyed");
        }
        for _ in 0..casualties.allies {
            self.events.push(GameEvent::AllyLost);
        }
    }

    /// Score, essence and experience for one kill.
    fn award_kill(&mut self, kind: EnemyKind, max_health: f32) {
        let score = SCORE_PER_ENEMY_HEALTH * max_health.round() as u32;
        self.stats.score += score;
        self.stats.enemies_killed += 1;
        self.ledger.grant(ESSENCE_PER_KILL);
        self.events.push(GameEvent::EnemyKilled {
            kind,
            score,
            essence: ESSENCE_PER_KILL,
        });

        if let Some(level_up) = self.session.grant(&mut self.character, EXP_PER_KILL) {
            self.player.apply_level(&self.character);
            for level in level_up.old_level + 1..=level_up.new_level {
                self.events.push(GameEvent::LevelUp { level });
            }
            info!(
                level = level_up.new_level,
                health = self.player.health.max(),
                attack = self.player.attack_damage,
                "character leveled up"
            );
        }
    }

    fn start_wave(&mut self, wave: u32, count: u32) {
        let playfield = self.config.playfield();
        systems::wave_director::spawn_wave(
            &mut self.world,
            &mut self.rng,
            &self.config.routes,
            &playfield,
            wave,
            count,
        );
        self.events.push(GameEvent::WaveStarted { wave, count });
        info!(wave, count, "wave started");
    }

    fn end_session(&mut self) {
        self.phase = GamePhase::GameOver;
        let summary = self.session_summary();
        self.events.push(GameEvent::GameOver {
            score: summary.score,
            wave_reached: summary.wave_reached,
        });
        info!(
            score = summary.score,
            wave = summary.wave_reached,
            kills = summary.enemies_killed,
            "castle destroyed, game over"
        );
        self.pending_summary = Some(summary);
    }
}
