//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions and attack decisions for
//! one enemy from a snapshot of its surroundings. No world access: the
//! caller gathers distances and applies the result. Tower ids are carried
//! as weak references and are only as valid as the snapshot they came from.

use hecs::Entity;

use bastion_core::enums::{EnemyKind, EnemyState};

use crate::profiles::{get_profile, EnemyProfile};

/// A tower seen by an enemy this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerSighting {
    pub tower: Entity,
    pub distance: f32,
}

/// Input to the enemy FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub distance_to_castle: f32,
    /// Currently bound tower.
    pub target: Option<Entity>,
    /// Distance to the bound tower, or None if it no longer exists or is dead.
    pub target_distance: Option<f32>,
    /// Nearest alive tower, regardless of range.
    pub nearest_tower: Option<TowerSighting>,
    /// Whether the attack cooldown has run out.
    pub attack_ready: bool,
}

/// What the enemy does with its turn after the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    /// Nothing to hit yet, or still cooling down.
    Hold,
    /// Loose an arrow at the bound tower.
    Shoot { tower: Entity },
    /// Melee the castle.
    StrikeCastle,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    pub new_state: EnemyState,
    pub target: Option<Entity>,
    pub state_changed: bool,
    pub action: EnemyAction,
    /// Whether the enemy keeps walking its route this tick.
    pub advances: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let profile = get_profile(ctx.kind);

    let (new_state, target) = match ctx.state {
        EnemyState::AttackingCastle => (EnemyState::AttackingCastle, None),
        EnemyState::Moving => evaluate_moving(ctx, &profile),
        EnemyState::AttackingTower => evaluate_attacking_tower(ctx, &profile),
    };

    let action = choose_action(ctx, &profile, new_state, target);

    EnemyUpdate {
        new_state,
        target,
        state_changed: new_state != ctx.state,
        action,
        advances: new_state != EnemyState::AttackingCastle,
    }
}

fn evaluate_moving(ctx: &EnemyContext, profile: &EnemyProfile) -> (EnemyState, Option<Entity>) {
    if ctx.distance_to_castle <= profile.siege_distance {
        return (EnemyState::AttackingCastle, None);
    }

    match ctx.nearest_tower {
        Some(sighting) if sighting.distance <= profile.detection_range => {
            (EnemyState::AttackingTower, Some(sighting.tower))
        }
        _ => (EnemyState::Moving, None),
    }
}

fn evaluate_attacking_tower(
    ctx: &EnemyContext,
    profile: &EnemyProfile,
) -> (EnemyState, Option<Entity>) {
    // Reaching the castle overrides any tower skirmish.
    if ctx.distance_to_castle <= profile.siege_distance {
        return (EnemyState::AttackingCastle, None);
    }

    match (ctx.target, ctx.target_distance) {
        (Some(tower), Some(distance)) if distance <= profile.detection_range => {
            (EnemyState::AttackingTower, Some(tower))
        }
        // Target died, vanished or walked out of view.
        _ => (EnemyState::Moving, None),
    }
}

fn choose_action(
    ctx: &EnemyContext,
    profile: &EnemyProfile,
    state: EnemyState,
    target: Option<Entity>,
) -> EnemyAction {
    if !ctx.attack_ready {
        return EnemyAction::Hold;
    }

    match state {
        EnemyState::AttackingCastle => EnemyAction::StrikeCastle,
        EnemyState::AttackingTower => {
            // A freshly bound target has no stored distance yet; use the sighting.
            let distance = if ctx.target == target {
                ctx.target_distance
            } else {
                ctx.nearest_tower.map(|s| s.distance)
            };
            match (target, distance) {
                (Some(tower), Some(d)) if d < profile.attack_range => EnemyAction::Shoot { tower },
                _ => EnemyAction::Hold,
            }
        }
        EnemyState::Moving => EnemyAction::Hold,
    }
}
