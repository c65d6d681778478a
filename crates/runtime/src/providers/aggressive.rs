//! Default AI policy: hit the sturdiest opponent, guard when nearly down.

use async_trait::async_trait;
use combat_core::{CombatAction, CombatSession, ParticipantId};

use crate::api::{ActionProvider, Result};

/// Heuristic AI provider.
///
/// Each decision:
/// 1. Defends when the actor is at or below `defend_threshold` percent
///    health and an opponent is still standing.
/// 2. Otherwise attacks the standing opponent with the most current health
///    (lowest participant id on ties).
/// 3. Waits when no opponent is left.
#[derive(Debug, Clone)]
pub struct AggressiveAiProvider {
    defend_threshold: u32,
}

impl AggressiveAiProvider {
    pub const DEFAULT_DEFEND_THRESHOLD: u32 = 25;

    pub fn new() -> Self {
        Self {
            defend_threshold: Self::DEFAULT_DEFEND_THRESHOLD,
        }
    }

    /// Health percentage at or below which the actor defends instead.
    pub fn with_defend_threshold(mut self, percent: u32) -> Self {
        self.defend_threshold = percent.min(100);
        self
    }

    /// Picks an action without going through the async trait.
    pub fn decide(&self, actor: ParticipantId, session: &CombatSession) -> CombatAction {
        let Some(me) = session.participant(actor) else {
            return CombatAction::wait(actor);
        };

        let target = session
            .opponents_of(actor)
            .max_by(|a, b| {
                a.character
                    .health
                    .current()
                    .cmp(&b.character.health.current())
                    .then(b.id.cmp(&a.id))
            })
            .map(|p| p.id);

        match target {
            None => CombatAction::wait(actor),
            Some(_) if me.character.health.percent() <= self.defend_threshold => {
                tracing::debug!(actor = %actor, "low health, defending");
                CombatAction::defend(actor)
            }
            Some(target) => CombatAction::attack(actor, target),
        }
    }
}

impl Default for AggressiveAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for AggressiveAiProvider {
    async fn provide_action(
        &self,
        actor: ParticipantId,
        session: &CombatSession,
    ) -> Result<CombatAction> {
        let action = self.decide(actor, session);
        tracing::debug!(actor = %actor, action = %action.kind.tag(), "AI selected action");
        Ok(action)
    }
}
