//! Initiative and turn management.
//!
//! Initiative (`d20 + dex_mod`) fixes the order once per session. The
//! [`TurnManager`] walks that order, skipping fallen participants, ticking
//! effects as each turn begins, and rolling rounds over (AP refill, hazards)
//! when it wraps.
mod error;
mod initiative;
mod manager;

pub use error::TurnError;
pub use initiative::{InitiativeRoll, roll_initiative};
pub use manager::{Advance, TurnManager};

#[cfg(test)]
mod tests;
