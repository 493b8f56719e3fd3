//! Headless combat simulation for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for whatever renders them.

pub mod engine;
pub mod player;
pub mod session;
pub mod systems;
pub mod targeting;
pub mod tower_grid;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::Simulation;
