use std::fmt;

use crate::action::ActionTag;

use super::ParticipantId;

/// What produced a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogSource {
    /// One entry per executed action.
    Action,
    /// Effect hooks and expirations.
    Effect,
    /// Environment hazards.
    Hazard,
    /// Round boundaries.
    Round,
    /// Session start/end.
    Session,
}

/// Append-only combat log line.
///
/// `round` and `nonce` are stamped by the session when the entry is recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub round: u32,
    pub nonce: u64,
    pub source: LogSource,
    pub actor: Option<ParticipantId>,
    pub action: Option<ActionTag>,
    pub target: Option<ParticipantId>,
    /// Damage or healing carried by the entry, 0 if none.
    pub amount: u32,
    pub message: String,
}

impl CombatLogEntry {
    pub fn new(source: LogSource, message: impl Into<String>) -> Self {
        Self {
            round: 0,
            nonce: 0,
            source,
            actor: None,
            action: None,
            target: None,
            amount: 0,
            message: message.into(),
        }
    }

    pub fn by(mut self, actor: ParticipantId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn action(mut self, action: ActionTag) -> Self {
        self.action = Some(action);
        self
    }

    pub fn against(mut self, target: Option<ParticipantId>) -> Self {
        self.target = target;
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }
}

impl fmt::Display for CombatLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[r{:02} {}] {}", self.round, self.source, self.message)
    }
}
