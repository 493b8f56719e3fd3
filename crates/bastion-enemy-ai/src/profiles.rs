//! Enemy tier profiles.
//!
//! One data-driven stat table keyed by `EnemyKind`, plus the wave-gated
//! factory that picks a tier for each spawned unit.

use rand::Rng;

use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;

/// Combat stats for an enemy tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub max_health: f32,
    /// Walking speed (units/s).
    pub speed: f32,
    /// Melee damage dealt to the castle per strike.
    pub contact_damage: f32,
    /// Damage carried by each arrow shot at a tower.
    pub ranged_damage: f32,
    /// Attacks per second, ranged and melee alike.
    pub attack_rate: f32,
    /// Strict range for shooting at the target tower.
    pub attack_range: f32,
    /// Range at which a tower gets noticed. Always >= `attack_range`.
    pub detection_range: f32,
    /// Distance to the castle that starts a permanent siege.
    pub siege_distance: f32,
    pub projectile_speed: f32,
    /// Hitbox edge length.
    pub size: f32,
}

impl EnemyProfile {
    /// Seconds between attacks.
    pub fn attack_interval(&self) -> f32 {
        1.0 / self.attack_rate
    }
}

/// Get the stat profile for a tier.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    let shared = EnemyProfile {
        max_health: ORC_HEALTH,
        speed: ORC_SPEED,
        contact_damage: ORC_DAMAGE,
        ranged_damage: ENEMY_PROJECTILE_DAMAGE,
        attack_rate: ENEMY_ATTACK_RATE,
        attack_range: ENEMY_ATTACK_RANGE,
        detection_range: ENEMY_DETECTION_RANGE,
        siege_distance: ENEMY_SIEGE_DISTANCE,
        projectile_speed: ENEMY_PROJECTILE_SPEED,
        size: ORC_SIZE,
    };

    match kind {
        EnemyKind::Orc => shared,
        EnemyKind::UrukHai => EnemyProfile {
            max_health: URUK_HAI_HEALTH,
            speed: URUK_HAI_SPEED,
            contact_damage: URUK_HAI_DAMAGE,
            size: URUK_HAI_SIZE,
            ..shared
        },
    }
}

/// Pick the tier for one unit of `wave`.
///
/// Before `URUK_HAI_START_WAVE` only Orcs spawn. From then on each unit is
/// an Orc with probability `ORC_SPAWN_RATIO`.
pub fn roll_kind<R: Rng>(wave: u32, rng: &mut R) -> EnemyKind {
    if wave < URUK_HAI_START_WAVE {
        return EnemyKind::Orc;
    }
    if rng.gen::<f64>() < ORC_SPAWN_RATIO {
        EnemyKind::Orc
    } else {
        EnemyKind::UrukHai
    }
}
