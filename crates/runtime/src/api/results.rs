//! Values returned by [`SessionManager`](crate::SessionManager) operations.

use combat_core::{
    ActionError, ActionResult, CombatEvent, CombatLogEntry, CombatSession, ParticipantId, Victor,
};

/// Result of submitting one action.
///
/// A rejected action leaves the session untouched: `session` is the state the
/// action was checked against and `error` says why it was refused.
#[derive(Clone, Debug)]
pub struct SubmitOutcome {
    pub success: bool,
    pub session: CombatSession,
    pub result: Option<ActionResult>,
    pub log_entries: Vec<CombatLogEntry>,
    pub events: Vec<CombatEvent>,
    /// Flavor text from the configured narrative generator, if any.
    pub narrative: Option<String>,
    pub error: Option<ActionError>,
}

impl SubmitOutcome {
    pub(crate) fn rejected(session: CombatSession, error: ActionError) -> Self {
        Self {
            success: false,
            session,
            result: None,
            log_entries: Vec::new(),
            events: Vec::new(),
            narrative: None,
            error: Some(error),
        }
    }
}

/// Why [`resolve_round`](crate::SessionManager::resolve_round) stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    /// The round rolled over; the session is waiting on the next one.
    Completed,
    /// A player-controlled participant is up and no player provider is set.
    AwaitingPlayer(ParticipantId),
    Ended(Victor),
}

/// Everything that happened while driving one round.
#[derive(Clone, Debug)]
pub struct RoundResult {
    pub session: CombatSession,
    /// The round that was driven.
    pub round: u32,
    pub status: RoundStatus,
    pub results: Vec<ActionResult>,
    pub log_entries: Vec<CombatLogEntry>,
    pub events: Vec<CombatEvent>,
}
