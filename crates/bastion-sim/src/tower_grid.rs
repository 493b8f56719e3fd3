//! Tower registry, placement rules, level curves and upgrade/repair economics.
//!
//! `TowerGrid` maps occupied cells to tower entities. Every path that adds
//! or removes a tower goes through it, which keeps the occupied-cell set and
//! the tower entities in bijection.

use std::collections::BTreeMap;

use glam::Vec2;
use hecs::{Entity, World};

use bastion_core::components::{Health, Tower};
use bastion_core::config::SimConfig;
use bastion_core::constants::*;
use bastion_core::error::{ActionError, ActionResult};
use bastion_core::geometry::Bounds;
use bastion_core::types::GridCell;

use bastion_campaign::economy::{tower_repair_cost, tower_upgrade_cost, Ledger};

use crate::world_setup;

/// Level-derived tower stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerStats {
    pub max_health: f32,
    pub damage: f32,
    pub fire_rate: f32,
    pub range: f32,
}

/// Stats for a tower of `level` (1-indexed).
///
/// Health and damage grow every level, fire rate every second level.
/// Range never changes.
pub fn tower_stats(level: u32) -> TowerStats {
    let steps = level.saturating_sub(1);
    TowerStats {
        max_health: TOWER_BASE_HEALTH + steps as f32 * TOWER_HEALTH_PER_LEVEL,
        damage: TOWER_BASE_DAMAGE + steps as f32 * TOWER_DAMAGE_PER_LEVEL,
        fire_rate: TOWER_BASE_FIRE_RATE + (steps / 2) as f32 * TOWER_FIRE_RATE_BONUS_PER_2_LEVELS,
        range: TOWER_RANGE,
    }
}

/// Minimum distance between a tower center and any route segment.
pub fn route_clearance() -> f32 {
    PATH_WIDTH / 2.0 + TOWER_SIZE / 2.0 + PATH_PLACEMENT_MARGIN
}

/// Raise a tower one level in place.
///
/// Recomputes damage and fire rate and grows health by the max-health delta.
/// Fails with no change at max level. Returns the new level.
pub fn apply_upgrade(tower: &mut Tower, health: &mut Health) -> ActionResult<u32> {
    if tower.level >= TOWER_MAX_LEVEL {
        return Err(ActionError::MaxLevel {
            max_level: TOWER_MAX_LEVEL,
        });
    }
    tower.level += 1;
    let stats = tower_stats(tower.level);
    tower.damage = stats.damage;
    tower.fire_rate = stats.fire_rate;
    tower.range = stats.range;
    health.rescale_max(stats.max_health);
    Ok(tower.level)
}

/// Restore a share of max health. Fails with no change at full health.
/// Returns the health after repair.
pub fn apply_repair(health: &mut Health) -> ActionResult<f32> {
    if health.is_full() {
        return Err(ActionError::FullHealth);
    }
    health.heal(health.max() * TOWER_REPAIR_FRACTION);
    Ok(health.current())
}

/// Occupied cells and the selected tower.
#[derive(Debug, Clone, Default)]
pub struct TowerGrid {
    occupied: BTreeMap<GridCell, Entity>,
    selected: Option<GridCell>,
}

impl TowerGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn tower_at(&self, cell: GridCell) -> Option<Entity> {
        self.occupied.get(&cell).copied()
    }

    /// Occupied cells and their towers, in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, Entity)> + '_ {
        self.occupied.iter().map(|(cell, entity)| (*cell, *entity))
    }

    pub fn selected(&self) -> Option<GridCell> {
        self.selected
    }

    /// Select the tower on `cell` for later upgrades.
    pub fn select(&mut self, cell: GridCell) -> ActionResult<()> {
        if !self.occupied.contains_key(&cell) {
            return Err(ActionError::NoTowerAt { cell });
        }
        self.selected = Some(cell);
        Ok(())
    }

    /// Check every placement rule except cost. Returns the tower's world position.
    pub fn validate_placement(&self, cell: GridCell, config: &SimConfig) -> ActionResult<Vec2> {
        if cell.x < 0 || cell.y < 0 || cell.x >= config.grid_columns() || cell.y >= config.grid_rows() {
            return Err(ActionError::CellOutOfBounds { cell });
        }
        if self.occupied.contains_key(&cell) {
            return Err(ActionError::CellOccupied { cell });
        }

        let position = cell.center(config.world.tile_size);
        let clearance = route_clearance();
        if config.routes.iter().any(|route| route.distance_to(position) < clearance) {
            return Err(ActionError::TooCloseToRoute { cell });
        }

        let castle_zone = Bounds::around(
            config.castle.position,
            config.castle.size,
            config.world.tile_size * CASTLE_BUILD_BUFFER_TILES,
        );
        if castle_zone.contains(position) {
            return Err(ActionError::TooCloseToCastle { cell });
        }

        Ok(position)
    }

    /// Validate, charge `cost` and build a level-1 tower on `cell`.
    pub fn place(
        &mut self,
        world: &mut World,
        cell: GridCell,
        config: &SimConfig,
        ledger: &mut Ledger,
        cost: u32,
    ) -> ActionResult<Entity> {
        self.validate_placement(cell, config)?;
        ledger.try_spend(cost)?;

        let entity = world_setup::spawn_tower(world, cell, 1, TOWER_BASE_HEALTH, config.world.tile_size);
        self.occupied.insert(cell, entity);
        tracing::debug!(%cell, "tower built");
        Ok(entity)
    }

    /// Rebuild a saved tower without charging for it or re-validating the cell.
    pub fn restore(&mut self, world: &mut World, cell: GridCell, level: u32, health: f32, tile_size: f32) -> Entity {
        let level = level.clamp(1, TOWER_MAX_LEVEL);
        if let Some(previous) = self.occupied.remove(&cell) {
            let _ = world.despawn(previous);
        }
        let entity = world_setup::spawn_tower(world, cell, level, health, tile_size);
        self.occupied.insert(cell, entity);
        entity
    }

    /// Upgrade the tower on `cell`, charging the table cost for the next level.
    pub fn upgrade(&mut self, world: &mut World, cell: GridCell, ledger: &mut Ledger) -> ActionResult<u32> {
        let entity = self.tower_at(cell).ok_or(ActionError::NoTowerAt { cell })?;
        let (tower, health) = world
            .query_one_mut::<(&mut Tower, &mut Health)>(entity)
            .map_err(|_| ActionError::NoTowerAt { cell })?;

        let cost = tower_upgrade_cost(tower.level + 1).ok_or(ActionError::MaxLevel {
            max_level: TOWER_MAX_LEVEL,
        })?;
        ledger.try_spend(cost)?;

        let level = apply_upgrade(tower, health)?;
        tracing::debug!(%cell, level, cost, "tower upgraded");
        Ok(level)
    }

    /// Repair the tower on `cell`. Returns its health afterwards.
    pub fn repair(&mut self, world: &mut World, cell: GridCell, ledger: &mut Ledger) -> ActionResult<f32> {
        let entity = self.tower_at(cell).ok_or(ActionError::NoTowerAt { cell })?;
        let (tower, health) = world
            .query_one_mut::<(&Tower, &mut Health)>(entity)
            .map_err(|_| ActionError::NoTowerAt { cell })?;

        if health.is_full() {
            return Err(ActionError::FullHealth);
        }
        ledger.try_spend(tower_repair_cost(tower.level))?;

        let restored = apply_repair(health)?;
        tracing::debug!(%cell, health = restored, "tower repaired");
        Ok(restored)
    }

    /// Forget the tower on `cell` after its entity was despawned elsewhere.
    pub fn release(&mut self, cell: GridCell) -> Option<Entity> {
        if self.selected == Some(cell) {
            self.selected = None;
        }
        self.occupied.remove(&cell)
    }

    /// Tear down the tower on `cell`, freeing the cell.
    pub fn remove(&mut self, world: &mut World, cell: GridCell) -> bool {
        match self.release(cell) {
            Some(entity) => {
                let _ = world.despawn(entity);
                true
            }
            None => false,
        }
    }
}
