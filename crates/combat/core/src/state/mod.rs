//! Session state types.
//!
//! Everything persisted for an encounter lives here. All types derive serde
//! behind the `serde` feature so a session round-trips losslessly.
mod character;
mod common;
mod environment;
mod log;
mod participant;
mod session;

pub use character::{
    Attribute, Attributes, CharacterSnapshot, Skill, Skills, Weapon, attribute_modifier,
};
pub use common::{CharacterId, ParticipantId, Position, ResourceMeter, SessionId};
pub use environment::{Area, Environment, Hazard};
pub use log::{CombatLogEntry, LogSource};
pub use participant::{Controller, Participant, Side};
pub use session::{CombatSession, SessionStatus, Victor};
