//! Projectile system: flight, expiry and collision.
//!
//! Defender arrows can only hit enemies and enemy arrows can only hit
//! towers. Each arrow lands at most once, on the first live target whose
//! hitbox overlaps its own.

use glam::Vec2;
use hecs::{Component, Entity, World};

use bastion_core::components::{Enemy, Health, Projectile, Tower};
use bastion_core::constants::ARROW_SIZE;
use bastion_core::enums::Faction;
use bastion_core::geometry::Bounds;
use bastion_core::types::{Hitbox, Position};

/// Outcome of one projectile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectileReport {
    /// Defender arrows that struck an enemy.
    pub enemy_hits: u32,
    /// Enemy arrows that struck a tower.
    pub tower_hits: u32,
    pub expired: u32,
}

/// Advance every projectile, then resolve hits and despawn spent arrows.
pub fn run(world: &mut World, dt: f32, playfield: &Bounds, despawn_buffer: &mut Vec<Entity>) -> ProjectileReport {
    despawn_buffer.clear();
    let mut report = ProjectileReport::default();
    let mut in_flight: Vec<(Entity, Vec2, Projectile)> = Vec::new();

    for (entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &mut Position)>() {
        pos.0 += projectile.direction * projectile.speed * dt;
        projectile.age += dt;
        if projectile.age > projectile.lifetime || !playfield.contains(pos.0) {
            despawn_buffer.push(entity);
            report.expired += 1;
        } else {
            in_flight.push((entity, pos.0, *projectile));
        }
    }

    let arrow = Hitbox::new(ARROW_SIZE);
    for (entity, at, projectile) in in_flight {
        let victim = match projectile.owner {
            Faction::Defender => first_overlap::<Enemy>(world, &arrow, at),
            Faction::Enemy => first_overlap::<Tower>(world, &arrow, at),
        };
        let Some(victim) = victim else {
            continue;
        };
        if let Ok(mut health) = world.get::<&mut Health>(victim) {
            health.apply_damage(projectile.damage);
        }
        despawn_buffer.push(entity);
        match projectile.owner {
            Faction::Defender => report.enemy_hits += 1,
            Faction::Enemy => report.tower_hits += 1,
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    report
}

/// First live `T` whose hitbox overlaps an arrow at `at`.
fn first_overlap<T: Component>(world: &World, arrow: &Hitbox, at: Vec2) -> Option<Entity> {
    world
        .query::<(&T, &Position, &Hitbox, &Health)>()
        .iter()
        .find(|(_, (_, pos, hitbox, health))| health.is_alive() && arrow.overlaps(at, hitbox, pos.0))
        .map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::constants::*;
    use bastion_core::enums::EnemyKind;
    use bastion_core::geometry::Route;
    use bastion_core::types::GridCell;

    use crate::world_setup::{spawn_enemy, spawn_projectile, spawn_tower};

    fn playfield() -> Bounds {
        Bounds::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT - HUD_HEIGHT))
    }

    fn route() -> Route {
        Route::new(vec![Vec2::new(0.0, 300.0), Vec2::new(900.0, 300.0)], "")
    }

    #[test]
    fn defender_arrow_hits_enemy_once() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let enemy = spawn_enemy(&mut world, EnemyKind::UrukHai, 0, &route(), Vec2::new(110.0, 300.0));
        let arrow = spawn_projectile(&mut world, Vec2::new(100.0, 300.0), Vec2::X, ARROW_SPEED, 25.0, Faction::Defender);

        let report = run(&mut world, DT as f32, &playfield(), &mut buffer);
        assert_eq!(report.enemy_hits, 1);
        assert_eq!(report.tower_hits, 0);
        assert!(!world.contains(arrow));
        assert_eq!(world.get::<&Health>(enemy).unwrap().current(), 25.0);
    }

    #[test]
    fn enemy_arrow_ignores_enemies_and_hits_towers() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let cell = GridCell::new(3, 9); // center (112, 304)
        let tower = spawn_tower(&mut world, cell, 1, TOWER_BASE_HEALTH, TILE_SIZE);
        let enemy = spawn_enemy(&mut world, EnemyKind::Orc, 0, &route(), Vec2::new(112.0, 304.0));
        spawn_projectile(&mut world, Vec2::new(108.0, 304.0), Vec2::X, 250.0, 1.0, Faction::Enemy);

        let report = run(&mut world, DT as f32, &playfield(), &mut buffer);
        assert_eq!(report.tower_hits, 1);
        assert_eq!(report.enemy_hits, 0);
        assert_eq!(world.get::<&Health>(tower).unwrap().current(), 99.0);
        assert!(world.get::<&Health>(enemy).unwrap().is_full());
    }

    #[test]
    fn dead_targets_are_skipped() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let enemy = spawn_enemy(&mut world, EnemyKind::Orc, 0, &route(), Vec2::new(110.0, 300.0));
        world.get::<&mut Health>(enemy).unwrap().apply_damage(100.0);
        let arrow = spawn_projectile(&mut world, Vec2::new(100.0, 300.0), Vec2::X, ARROW_SPEED, 25.0, Faction::Defender);

        let report = run(&mut world, DT as f32, &playfield(), &mut buffer);
        assert_eq!(report.enemy_hits, 0);
        assert!(world.contains(arrow));
    }

    #[test]
    fn arrows_expire_off_field_and_with_age() {
        let mut world = World::new();
        let mut buffer = Vec::new();
        let leaving = spawn_projectile(&mut world, Vec2::new(2.0, 300.0), -Vec2::X, ARROW_SPEED, 25.0, Faction::Defender);
        let slow = spawn_projectile(&mut world, Vec2::new(600.0, 100.0), Vec2::X, 0.0, 25.0, Faction::Defender);

        let report = run(&mut world, DT as f32, &playfield(), &mut buffer);
        assert_eq!(report.expired, 1);
        assert!(!world.contains(leaving));

        let ticks = (PROJECTILE_LIFETIME * TICK_RATE as f32) as usize + 2;
        for _ in 0..ticks {
            run(&mut world, DT as f32, &playfield(), &mut buffer);
        }
        assert!(!world.contains(slow));
    }
}
