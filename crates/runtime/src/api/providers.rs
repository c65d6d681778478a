//! Asynchronous abstractions for the collaborators a session consults.
//!
//! Runtime users plug in [`ActionProvider`] implementations so combat can run
//! with human input, scripted fixtures, or AI policies. Loot and flavor text
//! come from [`LootProvider`] and [`NarrativeGenerator`].
use async_trait::async_trait;
use combat_core::{ActionResult, CombatAction, CombatSession, LootDrop, ParticipantId};

use super::errors::Result;

/// Trait for providing actions based on the current session.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
///
/// The session lock is held while a provider decides, so a slow provider
/// blocks that session (and only that session).
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for the given participant.
    ///
    /// # Arguments
    /// * `actor` - The participant that needs to act
    /// * `session` - Read-only view of the current session
    async fn provide_action(
        &self,
        actor: ParticipantId,
        session: &CombatSession,
    ) -> Result<CombatAction>;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(
        &self,
        actor: ParticipantId,
        _session: &CombatSession,
    ) -> Result<CombatAction> {
        Ok(CombatAction::wait(actor))
    }
}

/// Decides what defeated enemies leave behind when the players win.
#[async_trait]
pub trait LootProvider: Send + Sync {
    async fn loot_for(&self, session: &CombatSession) -> Vec<LootDrop>;
}

/// Loot provider for encounters that never drop anything.
pub struct NoLoot;

#[async_trait]
impl LootProvider for NoLoot {
    async fn loot_for(&self, _session: &CombatSession) -> Vec<LootDrop> {
        Vec::new()
    }
}

/// Turns structured action results into flavor text.
///
/// Returning `None` keeps the engine's own description.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn narrate(&self, result: &ActionResult, session: &CombatSession) -> Option<String>;
}
