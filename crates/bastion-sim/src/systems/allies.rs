//! Ally AI: wander until an enemy comes into reach, close in, strike.
//!
//! Strikes are instant hits with no projectile. Damage is applied after the
//! pass so one ally's kill cannot disturb the iteration of the others.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{Ally, Health};
use bastion_core::constants::{ALLY_APPROACH_FACTOR, ALLY_WANDER_INTERVAL, ALLY_WANDER_SPEED_FACTOR};
use bastion_core::geometry::Bounds;
use bastion_core::types::Position;

use crate::targeting::nearest_within;
use crate::world_setup::alive_enemies;

/// Update every alive ally. Returns the number of strikes landed.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt: f32, playfield: &Bounds) -> u32 {
    let enemies = alive_enemies(world);
    let mut strikes: Vec<(Entity, f32)> = Vec::new();

    for (_entity, (ally, pos, health)) in world.query_mut::<(&mut Ally, &mut Position, &Health)>() {
        if !health.is_alive() {
            continue;
        }
        ally.attack_cooldown = (ally.attack_cooldown - dt).max(0.0);

        match nearest_within(pos.0, ally.attack_range, &enemies) {
            Some((target, target_pos)) => {
                ally.target = Some(target);
                let distance = pos.distance_to(target_pos);
                if distance > ally.attack_range * ALLY_APPROACH_FACTOR {
                    let heading = (target_pos - pos.0).normalize_or_zero();
                    pos.0 += heading * ally.speed * dt;
                }
                if ally.attack_cooldown <= 0.0 {
                    strikes.push((target, ally.damage));
                    ally.attack_cooldown = 1.0 / ally.attack_rate;
                }
            }
            None => {
                ally.target = None;
                ally.wander_timer += dt;
                if ally.wander_timer >= ALLY_WANDER_INTERVAL {
                    ally.wander_timer = 0.0;
                    ally.wander_heading = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                }
                pos.0 += ally.wander_heading * ally.speed * ALLY_WANDER_SPEED_FACTOR * dt;
            }
        }
        pos.0 = playfield.clamp(pos.0);
    }

    let landed = strikes.len() as u32;
    for (target, damage) in strikes {
        if let Ok(mut health) = world.get::<&mut Health>(target) {
            health.apply_damage(damage);
        }
    }
    landed
}
