//! Removal sweep: collects every dead enemy, tower and ally and despawns
//! them in one pass after the systems that deal damage have finished.

use hecs::{Entity, World};

use bastion_core::components::{Ally, Enemy, Health, Tower};
use bastion_core::enums::EnemyKind;
use bastion_core::types::GridCell;

/// What a sweep removed. The engine pays rewards and frees cells from this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Casualties {
    /// Kind and max health of each enemy killed.
    pub enemies: Vec<(EnemyKind, f32)>,
    /// Cells of destroyed towers.
    pub towers: Vec<GridCell>,
    pub allies: u32,
}

impl Casualties {
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.towers.is_empty() && self.allies == 0
    }
}

/// Despawn every entity whose health has reached zero.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn sweep(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> Casualties {
    despawn_buffer.clear();
    let mut casualties = Casualties::default();

    for (entity, (enemy, health)) in world.query_mut::<(&Enemy, &Health)>() {
        if !health.is_alive() {
            casualties.enemies.push((enemy.kind, health.max()));
            despawn_buffer.push(entity);
        }
    }

    for (entity, (tower, health)) in world.query_mut::<(&Tower, &Health)>() {
        if !health.is_alive() {
            casualties.towers.push(tower.cell);
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_ally, health)) in world.query_mut::<(&Ally, &Health)>() {
        if !health.is_alive() {
            casualties.allies += 1;
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    casualties
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::constants::{TILE_SIZE, TOWER_BASE_HEALTH};
    use bastion_core::geometry::Route;
    use glam::Vec2;

    use crate::world_setup::{spawn_ally, spawn_enemy, spawn_tower};

    #[test]
    fn sweep_removes_only_the_dead() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let route = Route::new(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)], "");
        let alive = spawn_enemy(&mut world, EnemyKind::Orc, 0, &route, Vec2::ZERO);
        let dead = spawn_enemy(&mut world, EnemyKind::UrukHai, 0, &route, Vec2::ZERO);
        world.get::<&mut Health>(dead).unwrap().apply_damage(999.0);
        let tower = spawn_tower(&mut world, GridCell::new(4, 4), 1, TOWER_BASE_HEALTH, TILE_SIZE);
        world.get::<&mut Health>(tower).unwrap().apply_damage(999.0);
        spawn_ally(&mut world, Vec2::ZERO, 0.0);

        let casualties = sweep(&mut world, &mut buffer);
        assert_eq!(casualties.enemies, vec![(EnemyKind::UrukHai, 50.0)]);
        assert_eq!(casualties.towers, vec![GridCell::new(4, 4)]);
        assert_eq!(casualties.allies, 1);
        assert!(world.contains(alive));
        assert_eq!(world.len(), 1);

        assert!(sweep(&mut world, &mut buffer).is_empty());
    }
}
