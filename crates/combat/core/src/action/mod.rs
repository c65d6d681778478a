//! Action resolution.
//!
//! A [`CombatAction`] is validated against the session (turn, health, action
//! points, target, resources), executed, charged one action point, logged
//! once, and followed by turn advancement. [`ActionEngine::resolve`] returns
//! the next session value; the input is never mutated.
mod engine;
mod error;
mod flee;
mod kind;
mod request;
mod result;

pub use engine::ActionEngine;
pub use error::ActionError;
pub use flee::flee_chance;
pub use kind::{ActionKind, CombatAction, SpellPayload};
pub use request::{ActionRequest, ActionTag};
pub use result::{ActionOutcome, ActionResult, Resolution};
