//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use bastion_core::components::*;
use bastion_core::enums::GamePhase;
use bastion_core::events::GameEvent;
use bastion_core::state::*;
use bastion_core::types::{GridCell, Position, SimTime};

use crate::player::Player;
use crate::session::Castle;

/// Session-level values that live outside the world.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u32,
    pub essence: u32,
    pub character_level: u32,
    pub castle: &'a Castle,
    pub player: &'a Player,
    pub selected_tower: Option<GridCell>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, session: SessionView<'_>, events: Vec<GameEvent>) -> GameStateSnapshot {
    GameStateSnapshot {
        time: session.time,
        phase: session.phase,
        wave: session.wave,
        score: session.score,
        essence: session.essence,
        character_level: session.character_level,
        castle: CastleView {
            position: session.castle.position,
            health: session.castle.health.current(),
            max_health: session.castle.health.max(),
        },
        player: PlayerView {
            position: session.player.position,
            health_fraction: session.player.health.fraction(),
            attack_damage: session.player.attack_damage,
            is_attacking: session.player.is_attacking(),
        },
        enemies: build_enemies(world),
        towers: build_towers(world, session.selected_tower),
        allies: build_allies(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .map(|(_, (enemy, pos, health))| EnemyView {
            position: pos.0,
            kind: enemy.kind,
            state: enemy.state,
            route: enemy.route,
            health_fraction: health.fraction(),
        })
        .collect()
}

/// Towers sorted by cell so the listing does not depend on spawn order.
fn build_towers(world: &World, selected: Option<GridCell>) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position, &Health)>()
        .iter()
        .map(|(_, (tower, pos, health))| TowerView {
            cell: tower.cell,
            position: pos.0,
            level: tower.level,
            health_fraction: health.fraction(),
            selected: selected == Some(tower.cell),
        })
        .collect();
    towers.sort_by_key(|view| view.cell);
    towers
}

fn build_allies(world: &World) -> Vec<AllyView> {
    world
        .query::<(&Ally, &Position, &Health)>()
        .iter()
        .map(|(_, (ally, pos, health))| AllyView {
            position: pos.0,
            health_fraction: health.fraction(),
            engaged: ally.target.is_some(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            position: pos.0,
            direction: projectile.direction,
            owner: projectile.owner,
        })
        .collect()
}
