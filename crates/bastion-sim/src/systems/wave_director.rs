//! Wave director: paces waves on clearance plus delay and spawns them
//! across the configured routes.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::constants::{WAVE_BASE_ENEMY_COUNT, WAVE_DELAY_SECS, WAVE_ENEMY_COUNT_MULTIPLIER, SPAWN_JITTER};
use bastion_core::geometry::{Bounds, Route};

use bastion_enemy_ai::profiles::roll_kind;

use crate::world_setup::spawn_enemy;

/// Wave pacing state.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveDirector {
    /// Number the next wave will carry.
    next_wave: u32,
    /// Seconds of play seen by the director.
    wave_timer: f64,
    /// `wave_timer` when the last wave started.
    last_wave_start: f64,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            next_wave: 1,
            wave_timer: 0.0,
            last_wave_start: 0.0,
        }
    }
}

impl WaveDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a saved session. The next wave waits a full delay after resuming.
    pub fn resume(next_wave: u32, elapsed_secs: f64) -> Self {
        Self {
            next_wave: next_wave.max(1),
            wave_timer: elapsed_secs,
            last_wave_start: elapsed_secs,
        }
    }

    /// Most recently started wave, 0 before the first.
    pub fn wave_number(&self) -> u32 {
        self.next_wave - 1
    }

    pub fn next_wave(&self) -> u32 {
        self.next_wave
    }

    /// Advance the timer. Returns `(wave, count)` when a new wave should spawn:
    /// the field must be clear, and unless this is the first wave the delay
    /// since the previous wave's start must have passed.
    pub fn update(&mut self, dt: f64, active_enemies: usize) -> Option<(u32, u32)> {
        self.wave_timer += dt;
        if active_enemies > 0 {
            return None;
        }
        if self.next_wave > 1 && self.wave_timer - self.last_wave_start < WAVE_DELAY_SECS {
            return None;
        }
        Some(self.begin_wave())
    }

    /// Start the next wave now, bypassing the pacing rules.
    pub fn begin_wave(&mut self) -> (u32, u32) {
        let wave = self.next_wave;
        self.next_wave += 1;
        self.last_wave_start = self.wave_timer;
        (wave, enemy_count_for_wave(wave))
    }
}

/// `base * multiplier^(wave - 1)`, truncated.
pub fn enemy_count_for_wave(wave: u32) -> u32 {
    let exponent = wave.saturating_sub(1) as i32;
    (WAVE_BASE_ENEMY_COUNT as f64 * WAVE_ENEMY_COUNT_MULTIPLIER.powi(exponent)).floor() as u32
}

/// Spawn `count` enemies for `wave`. Each unit draws its own route and a
/// jittered start point near that route's first waypoint.
pub fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    routes: &[Route],
    playfield: &Bounds,
    wave: u32,
    count: u32,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(count as usize);
    if routes.is_empty() {
        return spawned;
    }

    for _ in 0..count {
        let route_index = rng.gen_range(0..routes.len());
        let route = &routes[route_index];
        let Some(start) = route.start() else {
            continue;
        };
        let jitter = Vec2::new(
            rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER) as f32,
            rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER) as f32,
        );
        let kind = roll_kind(wave, rng);
        let position = playfield.clamp(start + jitter);
        spawned.push(spawn_enemy(world, kind, route_index, route, position));
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::components::Enemy;
    use bastion_core::config::default_routes;
    use bastion_core::constants::DT;
    use bastion_core::enums::EnemyKind;
    use bastion_core::types::Position;
    use rand::SeedableRng;

    #[test]
    fn counts_grow_geometrically() {
        let counts: Vec<u32> = (1..=6).map(enemy_count_for_wave).collect();
        assert_eq!(counts, vec![5, 6, 8, 10, 14, 18]);
    }

    #[test]
    fn first_wave_is_immediate() {
        let mut director = WaveDirector::new();
        assert_eq!(director.wave_number(), 0);
        assert_eq!(director.update(DT, 0), Some((1, 5)));
        assert_eq!(director.wave_number(), 1);
    }

    #[test]
    fn waits_for_clearance_and_delay() {
        let mut director = WaveDirector::new();
        director.update(DT, 0);

        // Field cleared after one second: still inside the delay.
        assert_eq!(director.update(1.0, 0), None);
        // Delay passed, enemies still alive.
        assert_eq!(director.update(10.0, 3), None);
        assert_eq!(director.update(DT, 0), Some((2, 6)));
    }

    #[test]
    fn resume_waits_a_full_delay() {
        let mut director = WaveDirector::resume(4, 120.0);
        assert_eq!(director.wave_number(), 3);
        assert_eq!(director.update(WAVE_DELAY_SECS - 0.5, 0), None);
        assert_eq!(director.update(1.0, 0), Some((4, 10)));
    }

    #[test]
    fn spawn_wave_assigns_configured_routes() {
        let routes = default_routes();
        let playfield = Bounds::new(Vec2::ZERO, Vec2::new(1280.0, 640.0));
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let spawned = spawn_wave(&mut world, &mut rng, &routes, &playfield, 1, 12);
        assert_eq!(spawned.len(), 12);
        for (_, (enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
            let start = routes[enemy.route].waypoints[0];
            assert!(enemy.route < routes.len());
            assert_eq!(enemy.kind, EnemyKind::Orc);
            assert!(playfield.contains(pos.0));
            assert!((pos.0 - start).abs().max_element() <= SPAWN_JITTER as f32);
        }
    }
}
