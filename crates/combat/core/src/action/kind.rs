//! Typed combat actions.

use crate::combat::DamageType;
use crate::effects::EffectGrant;
use crate::env::ItemId;
use crate::state::{ParticipantId, Position};

use super::ActionTag;

/// An intent submitted for one participant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub actor: ParticipantId,
    pub kind: ActionKind,
}

impl CombatAction {
    pub fn new(actor: ParticipantId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn attack(actor: ParticipantId, target: ParticipantId) -> Self {
        Self::new(actor, ActionKind::Attack { target })
    }

    pub fn defend(actor: ParticipantId) -> Self {
        Self::new(actor, ActionKind::Defend)
    }

    pub fn wait(actor: ParticipantId) -> Self {
        Self::new(actor, ActionKind::Wait)
    }

    pub fn flee(actor: ParticipantId) -> Self {
        Self::new(actor, ActionKind::Flee)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Attack {
        target: ParticipantId,
    },
    Defend,
    Move {
        destination: Position,
    },
    Cast {
        target: ParticipantId,
        spell: SpellPayload,
    },
    UseItem {
        item: ItemId,
        /// Defaults to the actor.
        target: Option<ParticipantId>,
    },
    Flee,
    Wait,
}

impl ActionKind {
    pub fn tag(&self) -> ActionTag {
        match self {
            Self::Attack { .. } => ActionTag::Attack,
            Self::Defend => ActionTag::Defend,
            Self::Move { .. } => ActionTag::Move,
            Self::Cast { .. } => ActionTag::Cast,
            Self::UseItem { .. } => ActionTag::UseItem,
            Self::Flee => ActionTag::Flee,
            Self::Wait => ActionTag::Wait,
        }
    }

    /// The participant this action is aimed at, if any.
    pub fn target(&self) -> Option<ParticipantId> {
        match self {
            Self::Attack { target } | Self::Cast { target, .. } => Some(*target),
            Self::UseItem { target, .. } => *target,
            _ => None,
        }
    }
}

/// Resolved spell, supplied by the ability catalog.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellPayload {
    pub name: String,
    pub base_damage: u32,
    pub damage_type: DamageType,
    pub healing: u32,
    pub mana_cost: u32,
    /// Granted to the target when the spell lands.
    pub effects: Vec<EffectGrant>,
}

impl SpellPayload {
    pub fn damaging(name: impl Into<String>, base_damage: u32, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            base_damage,
            damage_type,
            ..Self::default()
        }
    }

    pub fn healing(name: impl Into<String>, healing: u32) -> Self {
        Self {
            name: name.into(),
            healing,
            damage_type: DamageType::True,
            ..Self::default()
        }
    }

    pub fn costing(mut self, mana: u32) -> Self {
        self.mana_cost = mana;
        self
    }

    pub fn granting(mut self, grant: EffectGrant) -> Self {
        self.effects.push(grant);
        self
    }

    /// Pure heals skip the hit roll.
    pub fn is_heal(&self) -> bool {
        self.base_damage == 0 && self.healing > 0
    }
}
