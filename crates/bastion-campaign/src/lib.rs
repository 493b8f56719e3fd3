//! Campaign layer for BASTION.
//!
//! Everything that outlives a single combat tick loop: the essence ledger
//! and cost tables, character progression, and the JSON save store for
//! characters, session history, high scores and resumable games.

pub mod economy;
pub mod error;
pub mod progression;
pub mod save_load;

pub use error::{PersistenceError, Result};
