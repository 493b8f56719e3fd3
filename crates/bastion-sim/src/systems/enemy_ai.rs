//! Enemy AI system: evaluates the enemy FSM per unit, moves units along
//! their routes and carries out the chosen attack.
//!
//! The FSM itself lives in bastion-enemy-ai and never touches the world.
//! This system builds each unit's context from a tower snapshot taken
//! before the pass, so every enemy sees the same tower set this tick.

use glam::Vec2;
use hecs::{Entity, World};

use bastion_core::components::{Enemy, Health};
use bastion_core::constants::WAYPOINT_REACHED_DISTANCE;
use bastion_core::enums::{EnemyState, Faction};
use bastion_core::events::GameEvent;
use bastion_core::geometry::{advance_waypoint, step_toward, Route};
use bastion_core::types::Position;

use bastion_enemy_ai::fsm::{evaluate, EnemyAction, EnemyContext, TowerSighting};
use bastion_enemy_ai::profiles::get_profile;

use crate::targeting::nearest;
use crate::world_setup::{alive_towers, spawn_projectile};

/// Arrow queued during the pass, spawned once iteration is over.
struct QueuedShot {
    origin: Vec2,
    direction: Vec2,
    speed: f32,
    damage: f32,
}

/// Run one enemy update per alive enemy.
///
/// Returns the total melee damage dealt to the castle this tick; the caller
/// owns the castle and applies it.
pub fn run(
    world: &mut World,
    routes: &[Route],
    castle_position: Vec2,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> f32 {
    let towers = alive_towers(world);
    let mut shots: Vec<QueuedShot> = Vec::new();
    let mut castle_damage = 0.0;

    for (_entity, (enemy, pos, health)) in world.query_mut::<(&mut Enemy, &mut Position, &Health)>() {
        if !health.is_alive() {
            continue;
        }
        let profile = get_profile(enemy.kind);
        enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);

        // Stale or dead targets simply drop out of the tower snapshot.
        let bound_tower = enemy
            .target
            .and_then(|target| towers.iter().find(|(tower, _)| *tower == target))
            .map(|&(_, tower_pos)| tower_pos);

        let ctx = EnemyContext {
            kind: enemy.kind,
            state: enemy.state,
            distance_to_castle: pos.distance_to(castle_position),
            target: enemy.target,
            target_distance: bound_tower.map(|tower_pos| pos.distance_to(tower_pos)),
            nearest_tower: nearest(pos.0, &towers).map(|(tower, distance)| TowerSighting { tower, distance }),
            attack_ready: enemy.attack_cooldown <= 0.0,
        };
        let update = evaluate(&ctx);

        if update.state_changed && update.new_state == EnemyState::AttackingCastle {
            events.push(GameEvent::SiegeStarted { kind: enemy.kind });
        }
        enemy.state = update.new_state;
        enemy.target = update.target;

        match update.action {
            EnemyAction::Shoot { tower } => {
                let aim = tower_position(&towers, tower).and_then(|at| (at - pos.0).try_normalize());
                if let Some(direction) = aim {
                    shots.push(QueuedShot {
                        origin: pos.0,
                        direction,
                        speed: profile.projectile_speed,
                        damage: profile.ranged_damage,
                    });
                    enemy.attack_cooldown = profile.attack_interval();
                }
            }
            EnemyAction::StrikeCastle => {
                castle_damage += profile.contact_damage;
                enemy.attack_cooldown = profile.attack_interval();
            }
            EnemyAction::Hold => {}
        }

        if update.advances {
            if let Some(route) = routes.get(enemy.route) {
                if let Some(&waypoint) = route.waypoints.get(enemy.waypoint) {
                    pos.0 = step_toward(pos.0, waypoint, profile.speed * dt);
                }
                enemy.waypoint = advance_waypoint(route, pos.0, enemy.waypoint, WAYPOINT_REACHED_DISTANCE);
            }
        }
    }

    for shot in shots {
        spawn_projectile(world, shot.origin, shot.direction, shot.speed, shot.damage, Faction::Enemy);
    }

    castle_damage
}

fn tower_position(towers: &[(Entity, Vec2)], tower: Entity) -> Option<Vec2> {
    towers.iter().find(|(entity, _)| *entity == tower).map(|&(_, at)| at)
}
