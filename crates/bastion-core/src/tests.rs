#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerIntent;
    use crate::components::Health;
    use crate::config::SimConfig;
    use crate::enums::*;
    use crate::error::{ActionError, ConfigError};
    use crate::events::GameEvent;
    use crate::geometry::{advance_waypoint, point_to_segment_distance, step_toward, Bounds, Route};
    use crate::state::GameStateSnapshot;
    use crate::types::{GridCell, Hitbox, SimTime};

    // ---- Health ----

    #[test]
    fn test_health_damage_clamps_at_zero() {
        let mut health = Health::new(30.0);
        assert!(!health.apply_damage(10.0));
        assert_eq!(health.current(), 20.0);
        assert!(health.apply_damage(100.0), "lethal hit reports the kill");
        assert_eq!(health.current(), 0.0);
        assert!(!health.apply_damage(5.0), "already dead, not a second kill");
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn test_health_heal_clamps_at_max() {
        let mut health = Health::with_current(40.0, 100.0);
        assert_eq!(health.heal(50.0), 50.0);
        assert_eq!(health.heal(50.0), 10.0);
        assert!(health.is_full());
    }

    #[test]
    fn test_health_negative_amounts_ignored() {
        let mut health = Health::with_current(50.0, 100.0);
        health.apply_damage(-20.0);
        assert_eq!(health.current(), 50.0);
        health.heal(-20.0);
        assert_eq!(health.current(), 50.0);
    }

    #[test]
    fn test_health_rescale_adds_delta() {
        let mut health = Health::with_current(60.0, 100.0);
        health.rescale_max(125.0);
        assert_eq!(health.max(), 125.0);
        assert_eq!(health.current(), 85.0);
    }

    #[test]
    fn test_health_with_current_clamps() {
        assert_eq!(Health::with_current(150.0, 100.0).current(), 100.0);
        assert_eq!(Health::with_current(-3.0, 100.0).current(), 0.0);
    }

    // ---- Geometry ----

    #[test]
    fn test_point_to_segment_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        // Perpendicular foot inside the segment
        assert!((point_to_segment_distance(Vec2::new(50.0, 30.0), a, b) - 30.0).abs() < 1e-4);
        // Past the end: distance to the endpoint
        assert!((point_to_segment_distance(Vec2::new(103.0, 4.0), a, b) - 5.0).abs() < 1e-4);
        // Degenerate segment
        assert!((point_to_segment_distance(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_route_distance_uses_nearest_segment() {
        let route = Route::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)],
            "path_dirt",
        );
        assert!((route.distance_to(Vec2::new(120.0, 50.0)) - 20.0).abs() < 1e-4);
        assert!((route.distance_to(Vec2::new(50.0, -7.0)) - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(10.0, 0.0);
        assert_eq!(step_toward(from, to, 4.0), Vec2::new(4.0, 0.0));
        assert_eq!(step_toward(from, to, 40.0), to);
    }

    #[test]
    fn test_advance_waypoint_threshold() {
        let route = Route::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)],
            "",
        );
        assert_eq!(advance_waypoint(&route, Vec2::new(70.0, 0.0), 1, 20.0), 1);
        assert_eq!(advance_waypoint(&route, Vec2::new(81.0, 0.0), 1, 20.0), 2);
        // Never runs past the final waypoint
        assert_eq!(advance_waypoint(&route, Vec2::new(200.0, 0.0), 2, 20.0), 2);
    }

    #[test]
    fn test_bounds_clamp_and_contains() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::new(100.0, 50.0));
        assert_eq!(bounds.clamp(Vec2::new(-5.0, 70.0)), Vec2::new(0.0, 50.0));
        assert!(bounds.contains(Vec2::new(100.0, 50.0)));
        assert!(!bounds.contains(Vec2::new(100.1, 10.0)));
    }

    #[test]
    fn test_grid_cell_center_and_containing() {
        let cell = GridCell::new(3, 2);
        assert_eq!(cell.center(32.0), Vec2::new(112.0, 80.0));
        assert_eq!(GridCell::containing(Vec2::new(112.0, 80.0), 32.0), cell);
        assert_eq!(GridCell::containing(Vec2::new(-1.0, 5.0), 32.0), GridCell::new(-1, 0));
    }

    #[test]
    fn test_hitbox_overlap_is_strict() {
        let arrow = Hitbox::new(8.0);
        let orc = Hitbox::new(24.0);
        assert!(arrow.overlaps(Vec2::new(0.0, 0.0), &orc, Vec2::new(15.9, 0.0)));
        assert!(!arrow.overlaps(Vec2::new(0.0, 0.0), &orc, Vec2::new(16.0, 0.0)));
        assert!(!arrow.overlaps(Vec2::new(0.0, 0.0), &orc, Vec2::new(10.0, 20.0)));
    }

    // ---- Time ----

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.grid_columns(), 40);
        assert_eq!(config.grid_rows(), 20);
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "seed": 7, "starting_essence": 250 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_essence, 250);
        assert_eq!(config.routes, SimConfig::default().routes);
    }

    #[test]
    fn test_config_rejects_empty_route() {
        let json = r#"{ "routes": [ { "waypoints": [] } ] }"#;
        assert!(matches!(
            SimConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            SimConfig::from_json_str("{ seed: "),
            Err(ConfigError::Parse(_))
        ));
    }

    // ---- Serde ----

    #[test]
    fn test_enemy_state_serde() {
        for v in [
            EnemyState::Moving,
            EnemyState::AttackingTower,
            EnemyState::AttackingCastle,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_intent_tagged_json() {
        let intent = PlayerIntent::BuildTower {
            cell: GridCell::new(4, 9),
        };
        let json = serde_json::to_string(&intent).unwrap();
        assert!(json.contains(r#""type":"BuildTower""#), "got {json}");
        let back: PlayerIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);

        let parsed: PlayerIntent = serde_json::from_str(r#"{"type":"Move","dx":1.0,"dy":0.0}"#).unwrap();
        assert_eq!(parsed, PlayerIntent::Move { dx: 1.0, dy: 0.0 });
    }

    #[test]
    fn test_rejection_event_carries_reason() {
        let event = GameEvent::ActionRejected {
            error: ActionError::InsufficientEssence {
                needed: 50,
                available: 10,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("InsufficientEssence"));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::CellOccupied {
            cell: GridCell::new(1, 2),
        };
        assert_eq!(err.to_string(), "cell (1, 2) is already occupied");
        assert_eq!(
            ActionError::MaxLevel { max_level: 5 }.to_string(),
            "tower is already at max level 5"
        );
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Menu);
        assert_eq!(back.wave, 0);
    }
}
