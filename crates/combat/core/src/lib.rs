//! Deterministic combat rules for turn-based RPG encounters.
//!
//! `combat-core` defines the canonical rules (stats, effects, initiative,
//! actions, session lifecycle) as pure, synchronous APIs. Randomness and item
//! lookups come in through the oracles in [`env`]; everything else is a plain
//! value, so the async runtime and offline tools share the same engine.
//!
//! Engines are constructed values:
//!
//! ```text
//! EffectCatalog ─Arc─▶ StatusEffectEngine ─▶ TurnManager ─▶ ActionEngine
//! ```
pub mod action;
pub mod combat;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod events;
pub mod session;
pub mod state;
pub mod stats;
pub mod turn;

mod vitals;

#[cfg(test)]
mod testing;

pub use action::{
    ActionEngine, ActionError, ActionKind, ActionOutcome, ActionRequest, ActionResult, ActionTag,
    CombatAction, Resolution, SpellPayload,
};
pub use combat::{AttackOutcome, AttackResult, DamageType, resolve_attack};
pub use config::CombatConfig;
pub use effects::{
    EffectCatalog, EffectCategory, EffectDefinition, EffectDuration, EffectGrant, EffectModifiers,
    HookEffect, StatusEffectEngine, StatusEffectInstance, StatusEffectKind, StatusEffects,
};
pub use env::{CombatEnv, ItemEffect, ItemId, ItemOracle, PcgRng, RngOracle, ScriptedRng};
pub use error::{ErrorSeverity, GameError};
pub use events::CombatEvent;
pub use session::{
    CombatOutcome, Combatant, Initiated, LootDrop, SessionError, conclude, evaluate_end, initiate,
};
pub use state::{
    Attributes, CharacterId, CharacterSnapshot, CombatLogEntry, CombatSession, Controller,
    Environment, Hazard, LogSource, Participant, ParticipantId, Position, ResourceMeter, SessionId,
    SessionStatus, Side, Skills, Victor, Weapon,
};
pub use stats::CombatStats;
pub use turn::{Advance, TurnError, TurnManager};
