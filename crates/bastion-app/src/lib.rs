//! BASTION headless application.
//!
//! Wires the simulation to the save store and drives it with a scripted
//! commander at a fixed tick rate.

pub mod commander;
pub mod error;
pub mod game_loop;

pub use bastion_core as core;
pub use error::{AppError, Result};
