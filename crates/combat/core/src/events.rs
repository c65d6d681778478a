//! Structured events emitted alongside log entries.
//!
//! The log is for humans; events are for subscribers (UIs, analytics,
//! replays). Every resolution returns the events it produced in order.

use crate::action::{ActionOutcome, ActionTag};
use crate::combat::DamageType;
use crate::effects::StatusEffectKind;
use crate::state::{ParticipantId, SessionId, Victor};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    SessionStarted {
        session: SessionId,
        turn_order: Vec<ParticipantId>,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        round: u32,
        participant: ParticipantId,
    },
    ActionResolved {
        actor: ParticipantId,
        action: ActionTag,
        target: Option<ParticipantId>,
        outcome: ActionOutcome,
        damage: u32,
        healing: u32,
    },
    EffectApplied {
        participant: ParticipantId,
        effect: StatusEffectKind,
        stacks: u32,
    },
    EffectTicked {
        participant: ParticipantId,
        effect: StatusEffectKind,
        damage: u32,
        healing: u32,
    },
    EffectExpired {
        participant: ParticipantId,
        effect: StatusEffectKind,
    },
    HazardTriggered {
        hazard: String,
        participant: ParticipantId,
        damage: u32,
        damage_type: DamageType,
    },
    ParticipantDefeated {
        participant: ParticipantId,
    },
    ParticipantFled {
        participant: ParticipantId,
    },
    SessionEnded {
        session: SessionId,
        victor: Victor,
    },
}

impl CombatEvent {
    /// Short machine-readable name, used as a log field and topic key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. } => "session_started",
            Self::RoundStarted { .. } => "round_started",
            Self::TurnStarted { .. } => "turn_started",
            Self::ActionResolved { .. } => "action_resolved",
            Self::EffectApplied { .. } => "effect_applied",
            Self::EffectTicked { .. } => "effect_ticked",
            Self::EffectExpired { .. } => "effect_expired",
            Self::HazardTriggered { .. } => "hazard_triggered",
            Self::ParticipantDefeated { .. } => "participant_defeated",
            Self::ParticipantFled { .. } => "participant_fled",
            Self::SessionEnded { .. } => "session_ended",
        }
    }
}
