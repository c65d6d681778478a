use crate::effects::EffectModifiers;

use super::{CharacterSnapshot, ParticipantId, Position, ResourceMeter};

/// Which team a participant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Players,
    Enemies,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Players => Side::Enemies,
            Side::Enemies => Side::Players,
        }
    }
}

/// Who decides this participant's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Player,
    Ai,
}

/// One combatant inside a session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub side: Side,
    pub controller: Controller,
    pub character: CharacterSnapshot,
    pub position: Position,
    /// Current/max action points for this turn.
    pub action_points: ResourceMeter,
    /// Base AP before effect deltas.
    pub base_action_points: u32,
    pub has_acted: bool,
    pub fled: bool,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        side: Side,
        controller: Controller,
        character: CharacterSnapshot,
        position: Position,
        base_action_points: u32,
    ) -> Self {
        let base_action_points = base_action_points.max(1);
        Self {
            id,
            side,
            controller,
            character,
            position,
            action_points: ResourceMeter::full(base_action_points),
            base_action_points,
            has_acted: false,
            fled: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.character.name
    }

    pub fn is_alive(&self) -> bool {
        self.character.is_alive()
    }

    /// Alive and still on the field.
    pub fn is_standing(&self) -> bool {
        self.is_alive() && !self.fled
    }

    /// Max AP after effect deltas, never below 1.
    pub fn max_action_points(&self, modifiers: &EffectModifiers) -> u32 {
        (self.base_action_points as i64 + modifiers.action_points as i64).max(1) as u32
    }

    /// Refills AP for a new round and clears the acted flag.
    pub fn replenish(&mut self, modifiers: &EffectModifiers) {
        self.action_points = ResourceMeter::full(self.max_action_points(modifiers));
        self.has_acted = false;
    }
}
