//! String-tagged actions for transport-agnostic callers.

use std::str::FromStr;

use crate::env::ItemId;
use crate::state::{ParticipantId, Position};

use super::{ActionError, ActionKind, CombatAction, SpellPayload};

/// Discriminant of [`ActionKind`], parsed from snake_case strings.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionTag {
    Attack,
    Defend,
    Move,
    Cast,
    UseItem,
    Flee,
    Wait,
}

/// Loosely typed action as it arrives from a UI or a wire protocol.
///
/// `kind` is free text; [`into_action`](Self::into_action) rejects tags the
/// engine doesn't know with [`ActionError::UnknownActionKind`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionRequest {
    pub actor: u32,
    pub kind: String,
    pub target: Option<u32>,
    pub destination: Option<Position>,
    pub spell: Option<SpellPayload>,
    pub item: Option<u32>,
}

impl ActionRequest {
    pub fn new(actor: u32, kind: impl Into<String>) -> Self {
        Self {
            actor,
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn targeting(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    pub fn into_action(self) -> Result<CombatAction, ActionError> {
        let tag = ActionTag::from_str(self.kind.trim())
            .map_err(|_| ActionError::UnknownActionKind(self.kind.clone()))?;
        let missing = |field| ActionError::MissingField { kind: tag, field };
        let target = self.target.map(ParticipantId);

        let kind = match tag {
            ActionTag::Attack => ActionKind::Attack {
                target: target.ok_or_else(|| missing("target"))?,
            },
            ActionTag::Defend => ActionKind::Defend,
            ActionTag::Move => ActionKind::Move {
                destination: self.destination.ok_or_else(|| missing("destination"))?,
            },
            ActionTag::Cast => ActionKind::Cast {
                target: target.ok_or_else(|| missing("target"))?,
                spell: self.spell.ok_or_else(|| missing("spell"))?,
            },
            ActionTag::UseItem => ActionKind::UseItem {
                item: self.item.map(ItemId).ok_or_else(|| missing("item"))?,
                target,
            },
            ActionTag::Flee => ActionKind::Flee,
            ActionTag::Wait => ActionKind::Wait,
        };

        Ok(CombatAction::new(ParticipantId(self.actor), kind))
    }
}

impl TryFrom<ActionRequest> for CombatAction {
    type Error = ActionError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        request.into_action()
    }
}
