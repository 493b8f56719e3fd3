//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` when read-only).
//! Per-entity state lives in components; per-session state is passed in by
//! the engine.

pub mod allies;
pub mod cleanup;
pub mod enemy_ai;
pub mod melee;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod wave_director;
