use crate::error::{ErrorSeverity, GameError};
use crate::state::ParticipantId;

/// Errors raised while establishing or advancing the turn order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("session has no participants")]
    NoParticipants,

    #[error("session already has a turn order")]
    AlreadyStarted,

    #[error("participant {0} is not part of the session")]
    UnknownParticipant(ParticipantId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoParticipants => ErrorSeverity::Validation,
            Self::AlreadyStarted | Self::UnknownParticipant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoParticipants => "TURN_NO_PARTICIPANTS",
            Self::AlreadyStarted => "TURN_ALREADY_STARTED",
            Self::UnknownParticipant(_) => "TURN_UNKNOWN_PARTICIPANT",
        }
    }
}
