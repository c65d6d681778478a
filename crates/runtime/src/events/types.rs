//! Event envelope and topic routing.

use combat_core::{CombatEvent, SessionId};
use serde::{Deserialize, Serialize};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Session start/end, rounds, turns, defeats, and flights
    Lifecycle,
    /// Resolved actions
    Action,
    /// Status effects and environmental hazards
    Effect,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Lifecycle, Topic::Action, Topic::Effect];
}

/// A combat event tagged with the session it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub session: SessionId,
    pub event: CombatEvent,
}

impl Event {
    pub fn new(session: SessionId, event: CombatEvent) -> Self {
        Self { session, event }
    }

    pub fn topic(&self) -> Topic {
        match self.event {
            CombatEvent::ActionResolved { .. } => Topic::Action,
            CombatEvent::EffectApplied { .. }
            | CombatEvent::EffectTicked { .. }
            | CombatEvent::EffectExpired { .. }
            | CombatEvent::HazardTriggered { .. } => Topic::Effect,
            CombatEvent::SessionStarted { .. }
            | CombatEvent::RoundStarted { .. }
            | CombatEvent::TurnStarted { .. }
            | CombatEvent::ParticipantDefeated { .. }
            | CombatEvent::ParticipantFled { .. }
            | CombatEvent::SessionEnded { .. } => Topic::Lifecycle,
        }
    }
}
