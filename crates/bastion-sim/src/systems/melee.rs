//! Player melee: one swing hits every alive enemy within reach.

use hecs::World;

use bastion_core::components::{Enemy, Health};
use bastion_core::constants::{PLAYER_ATTACK_RANGE, PLAYER_KNOCKBACK};
use bastion_core::geometry::Bounds;
use bastion_core::types::Position;

use crate::player::Player;

/// Resolve one swing. Enemies in reach take the player's attack damage and
/// are pushed away from the player. Returns the number of enemies hit.
pub fn run(world: &mut World, player: &Player, playfield: &Bounds) -> u32 {
    let mut hits = 0;
    for (_entity, (_enemy, pos, health)) in world.query_mut::<(&Enemy, &mut Position, &mut Health)>() {
        if !health.is_alive() || pos.distance_to(player.position) > PLAYER_ATTACK_RANGE {
            continue;
        }
        health.apply_damage(player.attack_damage);
        let away = (pos.0 - player.position).normalize_or_zero();
        pos.0 = playfield.clamp(pos.0 + away * PLAYER_KNOCKBACK);
        hits += 1;
    }
    hits
}
