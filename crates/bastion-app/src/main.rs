//! BASTION headless runner.
//!
//! Plays sessions with the scripted commander, persisting character
//! progress, history and high scores between them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use bastion_app::commander::Commander;
use bastion_app::game_loop::{run_session, LoopOptions};
use bastion_app::Result;
use bastion_campaign::save_load::SaveStore;
use bastion_core::config::SimConfig;
use bastion_core::constants::TICK_RATE;
use bastion_sim::Simulation;

/// Run headless BASTION sessions driven by the scripted commander
#[derive(Parser, Debug)]
#[command(name = "bastion")]
struct Args {
    /// Session config (JSON). Built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding character, history, high-score and save files
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Games to play back to back
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a session after this many ticks and save it for later
    #[arg(long, default_value_t = 15 * 60 * TICK_RATE as u64)]
    max_ticks: u64,

    /// Write the resumable save every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    autosave_every: u64,

    /// Continue the saved game instead of starting fresh
    #[arg(long)]
    resume: bool,

    /// Pace ticks at wall-clock speed
    #[arg(long)]
    realtime: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "bastion failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let store = SaveStore::new(&args.save_dir);
    let options = LoopOptions {
        max_ticks: args.max_ticks,
        autosave_every: (args.autosave_every > 0).then_some(args.autosave_every),
        realtime: args.realtime,
    };
    let mut character = store.load_character();
    info!(
        name = %character.name,
        level = character.level,
        dir = %store.dir().display(),
        "character loaded"
    );

    for game in 0..args.games {
        let game_config = SimConfig {
            seed: config.seed.wrapping_add(game as u64),
            ..config.clone()
        };

        let mut sim = if game == 0 && args.resume {
            match store.load_game() {
                Ok(Some(saved)) => Simulation::resume(game_config.clone(), character.clone(), &saved),
                Ok(None) => {
                    info!("no saved game, starting fresh");
                    Simulation::new(game_config.clone(), character.clone())
                }
                Err(err) => {
                    warn!(%err, "saved game unreadable, starting fresh");
                    Simulation::new(game_config.clone(), character.clone())
                }
            }
        } else {
            Simulation::new(game_config.clone(), character.clone())
        };
        let mut commander = Commander::new(&game_config);

        let outcome = run_session(&mut sim, &mut commander, &store, options);
        println!("{}", serde_json::to_string(&outcome.summary)?);
        character = outcome.character;

        if !outcome.game_over {
            info!(ticks = outcome.ticks, "tick limit reached, session saved");
            break;
        }
    }
    Ok(())
}
