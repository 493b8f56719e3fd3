//! Enemy AI for BASTION.
//!
//! Implements the per-enemy state machine (route walking, tower
//! harassment, castle siege) and the tier profiles that replace a class
//! hierarchy of enemy types.

pub mod fsm;
pub mod profiles;

pub use bastion_core as core;
