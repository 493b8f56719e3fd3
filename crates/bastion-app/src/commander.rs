//! Scripted commander: plays a session by reading snapshots and emitting
//! player intents, the same way a human frontend would.
//!
//! It keeps its own essence budget per plan so it never issues an order
//! the ledger would refuse.

use std::collections::BTreeSet;

use glam::Vec2;

use bastion_campaign::economy::{tower_repair_cost, tower_upgrade_cost, CostTable};
use bastion_core::commands::PlayerIntent;
use bastion_core::config::SimConfig;
use bastion_core::constants::{PLAYER_ATTACK_RANGE, PLAYER_ATTACK_RATE, TICK_RATE, TOWER_MAX_LEVEL, TOWER_RANGE};
use bastion_core::enums::GamePhase;
use bastion_core::state::{EnemyView, GameStateSnapshot};
use bastion_core::types::GridCell;
use bastion_sim::tower_grid::{route_clearance, TowerGrid};

/// Ticks between construction decisions.
const THINK_INTERVAL: u64 = 15;

/// Enemies closer than this to the castle draw the avatar out.
const GUARD_RADIUS: f32 = 300.0;

/// Towers below this health fraction get repaired.
const REPAIR_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Commander {
    /// Statically valid cells covering a route, closest to the castle first.
    build_sites: Vec<GridCell>,
    guard_post: Vec2,
    costs: CostTable,
    max_towers: usize,
    max_allies: usize,
    /// Essence kept back before summoning allies.
    ally_reserve: u32,
    last_move: Vec2,
    last_attack_tick: Option<u64>,
}

impl Commander {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            build_sites: build_sites(config),
            guard_post: config.player_start,
            costs: CostTable::default(),
            max_towers: 8,
            max_allies: 3,
            ally_reserve: 50,
            last_move: Vec2::ZERO,
            last_attack_tick: None,
        }
    }

    pub fn build_sites(&self) -> &[GridCell] {
        &self.build_sites
    }

    /// Intents to queue after seeing `snapshot`.
    pub fn plan(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerIntent> {
        match snapshot.phase {
            GamePhase::Menu => return vec![PlayerIntent::StartGame],
            GamePhase::Playing => {}
            GamePhase::Paused | GamePhase::GameOver => return Vec::new(),
        }

        let mut intents = Vec::new();
        self.plan_avatar(snapshot, &mut intents);
        if snapshot.time.tick % THINK_INTERVAL == 0 {
            self.plan_construction(snapshot, &mut intents);
        }
        intents
    }

    fn plan_avatar(&mut self, snapshot: &GameStateSnapshot, intents: &mut Vec<PlayerIntent>) {
        let player = snapshot.player.position;
        let castle = snapshot.castle.position;

        let threat = snapshot
            .enemies
            .iter()
            .filter(|enemy| enemy.position.distance(castle) <= GUARD_RADIUS)
            .min_by(|a, b| closer(player, a, b));
        let destination = threat.map_or(self.guard_post, |enemy| enemy.position);

        let offset = destination - player;
        let heading = if offset.length() > PLAYER_ATTACK_RANGE * 0.6 {
            offset.normalize_or_zero()
        } else {
            Vec2::ZERO
        };
        if heading != self.last_move {
            intents.push(PlayerIntent::Move {
                dx: heading.x,
                dy: heading.y,
            });
            self.last_move = heading;
        }

        let in_reach = snapshot
            .enemies
            .iter()
            .any(|enemy| enemy.position.distance(player) <= PLAYER_ATTACK_RANGE);
        if in_reach && !snapshot.player.is_attacking && self.attack_ready(snapshot.time.tick) {
            intents.push(PlayerIntent::Attack);
            self.last_attack_tick = Some(snapshot.time.tick);
        }
    }

    fn attack_ready(&self, tick: u64) -> bool {
        // One spare tick over the swing interval.
        let interval = (TICK_RATE as f32 / PLAYER_ATTACK_RATE).ceil() as u64 + 1;
        self.last_attack_tick
            .map_or(true, |last| tick.saturating_sub(last) >= interval)
    }

    fn plan_construction(&self, snapshot: &GameStateSnapshot, intents: &mut Vec<PlayerIntent>) {
        let mut budget = snapshot.essence;

        if let Some(tower) = snapshot
            .towers
            .iter()
            .filter(|tower| tower.health_fraction < REPAIR_THRESHOLD)
            .min_by(|a, b| a.health_fraction.total_cmp(&b.health_fraction))
        {
            let cost = tower_repair_cost(tower.level);
            if cost <= budget {
                intents.push(PlayerIntent::RepairTower { cell: tower.cell });
                budget -= cost;
            }
        }

        let occupied: BTreeSet<GridCell> = snapshot.towers.iter().map(|tower| tower.cell).collect();
        if occupied.len() < self.max_towers {
            let site = self.build_sites.iter().find(|cell| !occupied.contains(cell));
            if let Some(&cell) = site {
                if self.costs.tower <= budget {
                    intents.push(PlayerIntent::BuildTower { cell });
                    budget -= self.costs.tower;
                }
            }
        } else if let Some(tower) = snapshot
            .towers
            .iter()
            .filter(|tower| tower.level < TOWER_MAX_LEVEL)
            .min_by_key(|tower| tower.level)
        {
            if let Some(cost) = tower_upgrade_cost(tower.level + 1).filter(|cost| *cost <= budget) {
                intents.push(PlayerIntent::UpgradeTower { cell: tower.cell });
                budget -= cost;
            }
        }

        if snapshot.allies.len() < self.max_allies && budget >= self.costs.ally + self.ally_reserve {
            intents.push(PlayerIntent::SummonAlly);
        }
    }
}

fn closer(origin: Vec2, a: &EnemyView, b: &EnemyView) -> std::cmp::Ordering {
    a.position
        .distance(origin)
        .total_cmp(&b.position.distance(origin))
}

/// Every cell that passes placement (ignoring cost and occupancy) and sits
/// within half a tower range of some route, nearest the castle first.
fn build_sites(config: &SimConfig) -> Vec<GridCell> {
    let empty = TowerGrid::new();
    let reach = route_clearance() + TOWER_RANGE / 2.0;
    let castle = config.castle.position;

    let mut sites: Vec<(f32, GridCell)> = Vec::new();
    for y in 0..config.grid_rows() {
        for x in 0..config.grid_columns() {
            let cell = GridCell::new(x, y);
            let Ok(center) = empty.validate_placement(cell, config) else {
                continue;
            };
            let covers_route = config
                .routes
                .iter()
                .any(|route| route.distance_to(center) <= reach);
            if covers_route {
                sites.push((center.distance(castle), cell));
            }
        }
    }
    sites.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    sites.into_iter().map(|(_, cell)| cell).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_campaign::progression::CharacterProgress;
    use bastion_core::error::ActionError;
    use bastion_core::events::GameEvent;
    use bastion_sim::Simulation;

    #[test]
    fn starts_the_game_from_the_menu() {
        let mut commander = Commander::new(&SimConfig::default());
        let snapshot = GameStateSnapshot::default();
        assert_eq!(commander.plan(&snapshot), vec![PlayerIntent::StartGame]);
    }

    #[test]
    fn build_sites_are_valid_and_ordered() {
        let config = SimConfig::default();
        let commander = Commander::new(&config);
        let sites = commander.build_sites();
        assert!(!sites.is_empty());

        let grid = TowerGrid::new();
        let mut last = 0.0;
        for &cell in sites {
            let center = grid.validate_placement(cell, &config).expect("site must be buildable");
            let distance = center.distance(config.castle.position);
            assert!(distance >= last);
            last = distance;
        }
    }

    #[test]
    fn never_overspends() {
        let config = SimConfig::default();
        let mut sim = Simulation::new(config.clone(), CharacterProgress::default());
        let mut commander = Commander::new(&config);

        for _ in 0..60 * 60 {
            let snapshot = sim.tick();
            for event in &snapshot.events {
                if let GameEvent::ActionRejected { error } = event {
                    assert!(
                        !matches!(
                            error,
                            ActionError::InsufficientEssence { .. } | ActionError::CellOccupied { .. }
                        ),
                        "commander issued a refused order: {error}"
                    );
                }
            }
            if snapshot.phase == GamePhase::GameOver {
                break;
            }
            sim.queue_intents(commander.plan(&snapshot));
        }
        assert!(sim.stats().towers_built > 0);
    }
}
