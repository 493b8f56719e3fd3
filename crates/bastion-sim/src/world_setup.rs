//! Entity spawn factories.
//!
//! Every entity kind is created here with its full component bundle, so
//! systems can rely on the bundle shape when querying.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::geometry::{Bounds, Route};
use bastion_core::types::{GridCell, Hitbox, Position};

use bastion_enemy_ai::profiles::get_profile;

use crate::tower_grid::tower_stats;

/// Spawn an enemy of `kind` at `position`, bound to route `route_index` for life.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    route_index: usize,
    route: &Route,
    position: Vec2,
) -> Entity {
    let profile = get_profile(kind);
    // The first waypoint is the spawn point itself; head for the next one.
    let waypoint = route.waypoints.len().saturating_sub(1).min(1);

    world.spawn((
        Enemy {
            kind,
            route: route_index,
            waypoint,
            state: EnemyState::Moving,
            target: None,
            attack_cooldown: 0.0,
        },
        Position(position),
        Health::new(profile.max_health),
        Hitbox::new(profile.size),
    ))
}

/// Spawn a tower of `level` on `cell` with `health` (clamped to the level's max).
pub fn spawn_tower(world: &mut World, cell: GridCell, level: u32, health: f32, tile_size: f32) -> Entity {
    let stats = tower_stats(level);
    world.spawn((
        Tower {
            cell,
            level,
            damage: stats.damage,
            fire_rate: stats.fire_rate,
            range: stats.range,
            last_fire_secs: None,
        },
        Position(cell.center(tile_size)),
        Health::with_current(health, stats.max_health),
        Hitbox::new(TOWER_SIZE),
    ))
}

/// Spawn an ally at `position` with `health` (clamped to the ally max).
pub fn spawn_ally(world: &mut World, position: Vec2, health: f32) -> Entity {
    world.spawn((
        Ally {
            speed: ALLY_SPEED,
            damage: ALLY_DAMAGE,
            attack_range: ALLY_ATTACK_RANGE,
            attack_rate: ALLY_ATTACK_RATE,
            attack_cooldown: 0.0,
            target: None,
            wander_heading: Vec2::ZERO,
            // Pick a heading on the first idle tick.
            wander_timer: ALLY_WANDER_INTERVAL,
        },
        Position(position),
        Health::with_current(health, ALLY_HEALTH),
    ))
}

/// Spawn an arrow flying along `direction` (expected to be unit length).
pub fn spawn_projectile(
    world: &mut World,
    origin: Vec2,
    direction: Vec2,
    speed: f32,
    damage: f32,
    owner: Faction,
) -> Entity {
    world.spawn((
        Projectile {
            direction,
            speed,
            damage,
            age: 0.0,
            lifetime: PROJECTILE_LIFETIME,
            owner,
        },
        Position(origin),
    ))
}

/// Random point 40-80 units from `center` at a random angle, clamped to the playfield.
pub fn ally_spawn_point(rng: &mut ChaCha8Rng, center: Vec2, playfield: &Bounds) -> Vec2 {
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance: f32 = rng.gen_range(ALLY_SPAWN_MIN_DISTANCE..=ALLY_SPAWN_MAX_DISTANCE);
    playfield.clamp(center + Vec2::from_angle(angle) * distance)
}

/// Alive enemy positions, in ECS iteration order.
pub fn alive_enemies(world: &World) -> Vec<(Entity, Vec2)> {
    world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_alive())
        .map(|(entity, (_, pos, _))| (entity, pos.0))
        .collect()
}

/// Alive tower positions, in ECS iteration order.
pub fn alive_towers(world: &World) -> Vec<(Entity, Vec2)> {
    world
        .query::<(&Tower, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_alive())
        .map(|(entity, (_, pos, _))| (entity, pos.0))
        .collect()
}

/// Number of enemies still in the world, dead or alive.
pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}
