//! Property tests over random intent streams.

use proptest::prelude::*;

use bastion_core::commands::PlayerIntent;
use bastion_core::components::{Health, Tower};
use bastion_core::config::SimConfig;
use bastion_core::types::GridCell;

use bastion_campaign::progression::CharacterProgress;
use bastion_sim::Simulation;

fn intent() -> impl Strategy<Value = PlayerIntent> {
    let cell = (0i32..40, 0i32..20).prop_map(|(x, y)| GridCell::new(x, y));
    prop_oneof![
        (-1.0f32..1.0, -1.0f32..1.0).prop_map(|(dx, dy)| PlayerIntent::Move { dx, dy }),
        Just(PlayerIntent::Attack),
        cell.clone().prop_map(|cell| PlayerIntent::BuildTower { cell }),
        cell.clone().prop_map(|cell| PlayerIntent::UpgradeTower { cell }),
        cell.prop_map(|cell| PlayerIntent::RepairTower { cell }),
        Just(PlayerIntent::BuildNearPlayer),
        Just(PlayerIntent::SummonAlly),
    ]
}

fn assert_invariants(sim: &Simulation) -> Result<(), TestCaseError> {
    for (_, health) in sim.world().query::<&Health>().iter() {
        prop_assert!(health.current() >= 0.0 && health.current() <= health.max());
    }
    let castle = &sim.castle().health;
    prop_assert!(castle.current() >= 0.0 && castle.current() <= castle.max());
    let player = &sim.player().health;
    prop_assert!(player.current() >= 0.0 && player.current() <= player.max());

    // Occupied cells and tower entities stay in bijection.
    let live_towers = sim.world().query::<&Tower>().iter().count();
    prop_assert_eq!(sim.towers().len(), live_towers);
    for (cell, entity) in sim.towers().iter() {
        let tower = sim.world().get::<&Tower>(entity);
        prop_assert!(tower.map(|t| t.cell == cell).unwrap_or(false));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn invariants_hold_under_random_play(
        seed in any::<u64>(),
        intents in prop::collection::vec(intent(), 1..60),
    ) {
        let config = SimConfig { seed, starting_essence: 400, ..Default::default() };
        let mut sim = Simulation::new(config, CharacterProgress::default());
        sim.queue_intent(PlayerIntent::StartGame);
        sim.tick();

        let mut last_wave = sim.wave_number();
        for tick in 0..600 {
            if tick % 10 == 0 {
                if let Some(intent) = intents.get(tick / 10) {
                    sim.queue_intent(intent.clone());
                }
            }
            sim.tick();
            assert_invariants(&sim)?;
            prop_assert!(sim.wave_number() >= last_wave);
            last_wave = sim.wave_number();
        }
    }
}
