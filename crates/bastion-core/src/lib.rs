//! Core types and definitions for the BASTION combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, intents, events, state snapshots, configuration,
//! errors and tuning constants. It holds no simulation logic.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
