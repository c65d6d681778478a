//! Repository contract for saving and loading combat sessions.

use chrono::{DateTime, Utc};
use combat_core::{CombatOutcome, CombatSession, SessionId};
use serde::{Deserialize, Serialize};

use super::Result;

/// A persisted session snapshot.
///
/// The session is stored whole (participants, effect instances with their
/// stack-resolved modifiers, log), so a reloaded session resolves exactly
/// like the one that was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session: CombatSession,
    pub saved_at: DateTime<Utc>,
    /// Set once the session has been concluded through `end_combat`.
    pub outcome: Option<CombatOutcome>,
}

impl SessionRecord {
    pub fn new(session: CombatSession) -> Self {
        Self {
            session,
            saved_at: Utc::now(),
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: CombatOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn id(&self) -> SessionId {
        self.session.id
    }
}

/// Key-addressed persistence for session records.
///
/// Saves replace the previous record for the same id. Implementations must
/// leave the previous record intact when a save fails.
pub trait SessionRepository: Send + Sync {
    fn save(&self, record: &SessionRecord) -> Result<()>;

    fn load(&self, id: SessionId) -> Result<Option<SessionRecord>>;

    fn exists(&self, id: SessionId) -> bool;

    fn delete(&self, id: SessionId) -> Result<()>;

    /// List all stored session ids, sorted.
    fn list(&self) -> Result<Vec<SessionId>> {
        Ok(vec![])
    }
}
