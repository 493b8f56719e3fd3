//! Tower fire control: nearest-enemy acquisition and rate-gated shots.

use glam::Vec2;
use hecs::World;

use bastion_core::components::{Health, Tower};
use bastion_core::constants::ARROW_SPEED;
use bastion_core::enums::Faction;
use bastion_core::types::Position;

use crate::targeting::nearest_within;
use crate::world_setup::{alive_enemies, spawn_projectile};

/// Let every alive, ready tower shoot at the nearest enemy in range.
///
/// `now` is simulation time in seconds. Arrows aim at the target's current
/// position with no lead. Returns the number of arrows fired.
pub fn run(world: &mut World, now: f64) -> u32 {
    let enemies = alive_enemies(world);
    if enemies.is_empty() {
        return 0;
    }

    let mut shots: Vec<(Vec2, Vec2, f32)> = Vec::new();
    for (_entity, (tower, pos, health)) in world.query_mut::<(&mut Tower, &Position, &Health)>() {
        if !health.is_alive() || !is_ready(tower, now) {
            continue;
        }
        let Some((_, target)) = nearest_within(pos.0, tower.range, &enemies) else {
            continue;
        };
        if let Some(direction) = (target - pos.0).try_normalize() {
            shots.push((pos.0, direction, tower.damage));
            tower.last_fire_secs = Some(now);
        }
    }

    let fired = shots.len() as u32;
    for (origin, direction, damage) in shots {
        spawn_projectile(world, origin, direction, ARROW_SPEED, damage, Faction::Defender);
    }
    fired
}

/// A tower may fire once `1 / fire_rate` seconds have passed since its last shot.
pub fn is_ready(tower: &Tower, now: f64) -> bool {
    match tower.last_fire_secs {
        None => true,
        Some(last) => tower.fire_rate > 0.0 && now - last >= 1.0 / tower.fire_rate as f64,
    }
}
