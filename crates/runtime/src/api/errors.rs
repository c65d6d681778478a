//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat engine, repositories, and action providers
//! so clients can bubble them up with consistent context.
use std::fmt;

use combat_core::{ActionError, ErrorSeverity, GameError, SessionError, SessionId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    /// Only raised for errors the engine classifies as fatal; validation
    /// failures come back as a rejected [`SubmitOutcome`](super::SubmitOutcome).
    #[error(transparent)]
    Action(ActionError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SessionNotFound(_) => ErrorSeverity::Recoverable,
            Self::ProviderNotSet { .. } => ErrorSeverity::Fatal,
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::Action(err) => err.severity(),
            Self::Session(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "RUNTIME_SESSION_NOT_FOUND",
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::Action(err) => err.error_code(),
            Self::Session(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Ai,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Ai => "ai",
        };
        write!(f, "{}", label)
    }
}
