use crate::combat::{AttackOutcome, DamageType};
use crate::effects::StatusEffectKind;
use crate::events::CombatEvent;
use crate::state::{CombatLogEntry, CombatSession, ParticipantId};

use super::ActionTag;

/// Terminal outcome of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Hit,
    Miss,
    Critical,
    Fumble,
    Block,
    Parry,
    Dodge,
    /// Non-attack action that completed (defend, move, wait, flee, heals).
    Ongoing,
}

impl From<AttackOutcome> for ActionOutcome {
    fn from(outcome: AttackOutcome) -> Self {
        match outcome {
            AttackOutcome::Hit => Self::Hit,
            AttackOutcome::Miss => Self::Miss,
            AttackOutcome::Critical => Self::Critical,
            AttackOutcome::Fumble => Self::Fumble,
            AttackOutcome::Block => Self::Block,
            AttackOutcome::Parry => Self::Parry,
            AttackOutcome::Dodge => Self::Dodge,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: ParticipantId,
    pub action: ActionTag,
    pub target: Option<ParticipantId>,
    pub outcome: ActionOutcome,
    /// d100 roll behind the outcome, when one was made.
    pub roll: Option<u32>,
    pub damage: u32,
    pub damage_type: Option<DamageType>,
    pub healing: u32,
    pub effects_applied: Vec<StatusEffectKind>,
    /// The target dropped to 0 health.
    pub defeated_target: bool,
    /// The actor left the battlefield.
    pub fled: bool,
    pub description: String,
}

impl ActionResult {
    pub(crate) fn new(actor: ParticipantId, action: ActionTag, outcome: ActionOutcome) -> Self {
        Self {
            actor,
            action,
            target: None,
            outcome,
            roll: None,
            damage: 0,
            damage_type: None,
            healing: 0,
            effects_applied: Vec::new(),
            defeated_target: false,
            fled: false,
            description: String::new(),
        }
    }

    pub(crate) fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Output of [`ActionEngine::resolve`](super::ActionEngine::resolve).
#[derive(Clone, Debug)]
pub struct Resolution {
    /// The session after the action and any turn advancement.
    pub session: CombatSession,
    pub result: ActionResult,
    /// Log entries appended by this resolution, in order.
    pub log: Vec<CombatLogEntry>,
    pub events: Vec<CombatEvent>,
}
