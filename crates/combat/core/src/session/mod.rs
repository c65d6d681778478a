//! Combat session lifecycle: `Initializing → Active → Ended`.
//!
//! [`initiate`] seats the combatants and opens round 1, the action engine
//! calls [`evaluate_end`]/[`conclude`] after every resolution, and
//! [`outcome`] turns an ended session into rewards and a report.
mod error;
mod lifecycle;
mod outcome;

pub use error::SessionError;
pub use lifecycle::{Combatant, Initiated, conclude, evaluate_end, initiate};
pub use outcome::{CombatOutcome, LootDrop, experience_for, outcome, summarize};
pub use crate::state::Victor;
