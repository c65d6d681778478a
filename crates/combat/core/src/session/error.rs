use crate::error::{ErrorSeverity, GameError};
use crate::state::{ParticipantId, Position, SessionStatus, Side};
use crate::turn::TurnError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{0} side has no combatants")]
    EmptySide(Side),

    #[error("{count} combatants exceed the limit of {max}")]
    TooManyParticipants { count: usize, max: usize },

    #[error("combatant {participant} placed out of bounds at {position}")]
    OutOfBounds {
        participant: ParticipantId,
        position: Position,
    },

    #[error("session is {0}, expected it to have ended")]
    NotEnded(SessionStatus),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySide(_) | Self::TooManyParticipants { .. } | Self::OutOfBounds { .. } => {
                ErrorSeverity::Validation
            }
            Self::NotEnded(_) => ErrorSeverity::Recoverable,
            Self::Turn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySide(_) => "SESSION_EMPTY_SIDE",
            Self::TooManyParticipants { .. } => "SESSION_TOO_MANY_PARTICIPANTS",
            Self::OutOfBounds { .. } => "SESSION_OUT_OF_BOUNDS",
            Self::NotEnded(_) => "SESSION_NOT_ENDED",
            Self::Turn(err) => err.error_code(),
        }
    }
}
