//! The player's avatar: movement, melee swings and level-derived stats.

use glam::Vec2;

use bastion_core::components::Health;
use bastion_core::constants::*;
use bastion_core::geometry::Bounds;

use bastion_campaign::progression::CharacterProgress;

/// Avatar state. A single instance owned by the `Simulation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub health: Health,
    pub attack_damage: f32,
    /// Held movement direction, as last set by a move intent.
    move_input: Vec2,
    /// Seconds until the next swing may start.
    attack_cooldown: f32,
    /// Seconds left in the current swing. Zero when idle.
    swing_timer: f32,
    /// Whether the current swing still has to deal its damage.
    swing_pending: bool,
}

impl Player {
    /// New avatar at `position` with stats for the character's level.
    pub fn new(position: Vec2, character: &CharacterProgress) -> Self {
        Self {
            position,
            health: Health::new(character.max_health() as f32),
            attack_damage: character.attack() as f32,
            move_input: Vec2::ZERO,
            attack_cooldown: 0.0,
            swing_timer: 0.0,
            swing_pending: false,
        }
    }

    pub fn set_move(&mut self, dx: f32, dy: f32) {
        self.move_input = Vec2::new(dx, dy);
    }

    pub fn is_attacking(&self) -> bool {
        self.swing_timer > 0.0
    }

    /// Begin a swing. Returns false while the previous one is cooling down.
    pub fn start_attack(&mut self) -> bool {
        if self.attack_cooldown > 0.0 {
            return false;
        }
        self.attack_cooldown = 1.0 / PLAYER_ATTACK_RATE;
        self.swing_timer = PLAYER_ATTACK_DURATION;
        self.swing_pending = true;
        true
    }

    /// Claim the current swing's damage. True at most once per swing.
    pub fn take_swing(&mut self) -> bool {
        std::mem::take(&mut self.swing_pending)
    }

    /// Advance timers and walk. The avatar stands still while swinging.
    pub fn update(&mut self, dt: f32, playfield: &Bounds) {
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if self.swing_timer > 0.0 {
            self.swing_timer = (self.swing_timer - dt).max(0.0);
            return;
        }
        let direction = self.move_input.normalize_or_zero();
        self.position = playfield.clamp(self.position + direction * PLAYER_SPEED * dt);
    }

    /// Re-derive stats after a level-up: new max health, full heal, new attack.
    pub fn apply_level(&mut self, character: &CharacterProgress) {
        self.health = Health::new(character.max_health() as f32);
        self.attack_damage = character.attack() as f32;
    }
}
