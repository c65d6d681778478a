//! Canonical combat session state.

use crate::effects::EffectModifiers;

use super::{
    CombatLogEntry, Environment, LogSource, Participant, ParticipantId, Position, SessionId, Side,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    Initializing,
    Active,
    Ended,
}

/// Winner of a concluded session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Victor {
    Players,
    Enemies,
    /// Only reachable through the round limit.
    Draw,
}

/// Full state of one encounter.
///
/// Sessions are values: the action engine never mutates one in place, it
/// returns the next session alongside the action result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub id: SessionId,
    /// Root of every roll made in this session.
    pub seed: u64,
    /// Incremented once per resolved action.
    pub nonce: u64,
    pub participants: Vec<Participant>,
    /// Initiative order, fixed at initiation (fled participants are removed).
    pub turn_order: Vec<ParticipantId>,
    /// Index into `turn_order` of the active participant.
    pub turn_cursor: usize,
    pub round: u32,
    pub active: Option<ParticipantId>,
    pub environment: Environment,
    pub log: Vec<CombatLogEntry>,
    pub status: SessionStatus,
    /// Set once the session has ended.
    pub victor: Option<Victor>,
}

impl CombatSession {
    /// Empty session in the `Initializing` state.
    pub fn new(id: SessionId, seed: u64, environment: Environment) -> Self {
        Self {
            id,
            seed,
            nonce: 0,
            participants: Vec::new(),
            turn_order: Vec::new(),
            turn_cursor: 0,
            round: 0,
            active: None,
            environment,
            log: Vec::new(),
            status: SessionStatus::Initializing,
            victor: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    pub fn active_participant(&self) -> Option<&Participant> {
        self.active.and_then(|id| self.participant(id))
    }

    /// Participants of `side` that are alive and have not fled.
    pub fn standing(&self, side: Side) -> impl Iterator<Item = &Participant> {
        self.participants
            .iter()
            .filter(move |p| p.side == side && p.is_standing())
    }

    /// Standing participants on the other side from `id`.
    pub fn opponents_of(&self, id: ParticipantId) -> impl Iterator<Item = &Participant> {
        let side = self.participant(id).map(|p| p.side.opponent());
        self.participants
            .iter()
            .filter(move |p| Some(p.side) == side && p.is_standing())
    }

    /// Whether a standing participant occupies `position`.
    pub fn occupant(&self, position: Position) -> Option<ParticipantId> {
        self.participants
            .iter()
            .find(|p| p.is_standing() && p.position == position)
            .map(|p| p.id)
    }

    /// Effect aggregate of `participant` with the ambient modifiers folded in.
    pub fn modifiers_of(&self, participant: &Participant) -> EffectModifiers {
        crate::effects::aggregate(&participant.character.effects)
            .combine(&self.environment.ambient)
    }

    /// Stamps `entry` with the current round and nonce and appends it.
    pub(crate) fn record(&mut self, mut entry: CombatLogEntry) {
        entry.round = self.round;
        entry.nonce = self.nonce;
        self.log.push(entry);
    }

    pub(crate) fn note(&mut self, source: LogSource, message: impl Into<String>) {
        self.record(CombatLogEntry::new(source, message));
    }
}
