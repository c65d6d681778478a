//! Action validation errors.

use crate::error::{ErrorSeverity, GameError};
use crate::env::{ItemId, OracleError};
use crate::state::{ParticipantId, Position};

use super::ActionTag;

/// Reasons an action is rejected. A rejected action never changes the session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("session is not active")]
    SessionNotActive,

    #[error("actor {0} is not in this session")]
    ActorNotFound(ParticipantId),

    #[error("it is not {actor}'s turn")]
    NotActorsTurn {
        actor: ParticipantId,
        active: Option<ParticipantId>,
    },

    #[error("actor {0} is defeated")]
    ActorDead(ParticipantId),

    #[error("actor {0} has no action points left")]
    NoActionPoints(ParticipantId),

    #[error("target {0} is not on the battlefield")]
    TargetNotFound(ParticipantId),

    #[error("target {0} is already defeated")]
    TargetDefeated(ParticipantId),

    #[error("{0} cannot target itself with this action")]
    CannotTargetSelf(ParticipantId),

    #[error("destination {0} is out of bounds")]
    OutOfBounds(Position),

    #[error("destination is {distance} tiles away, limit is {limit}")]
    TooFar { distance: u32, limit: u32 },

    #[error("destination {0} is occupied")]
    Occupied(Position),

    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("{kind} action is missing `{field}`")]
    MissingField {
        kind: ActionTag,
        field: &'static str,
    },

    #[error("unknown action kind `{0}`")]
    UnknownActionKind(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NotActorsTurn { .. } | NoActionPoints(_) | InsufficientMana { .. } => {
                ErrorSeverity::Recoverable
            }
            SessionNotActive | ActorNotFound(_) | ActorDead(_) => ErrorSeverity::Validation,
            TargetNotFound(_) | TargetDefeated(_) | CannotTargetSelf(_) => {
                ErrorSeverity::Validation
            }
            OutOfBounds(_) | TooFar { .. } | Occupied(_) => ErrorSeverity::Validation,
            UnknownItem(_) | MissingField { .. } => ErrorSeverity::Validation,
            Oracle(_) => ErrorSeverity::Internal,
            UnknownActionKind(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            SessionNotActive => "ACTION_SESSION_NOT_ACTIVE",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            NotActorsTurn { .. } => "ACTION_NOT_ACTORS_TURN",
            ActorDead(_) => "ACTION_ACTOR_DEAD",
            NoActionPoints(_) => "ACTION_NO_ACTION_POINTS",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            TargetDefeated(_) => "ACTION_TARGET_DEFEATED",
            CannotTargetSelf(_) => "ACTION_CANNOT_TARGET_SELF",
            OutOfBounds(_) => "ACTION_OUT_OF_BOUNDS",
            TooFar { .. } => "ACTION_TOO_FAR",
            Occupied(_) => "ACTION_OCCUPIED",
            InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            Oracle(_) => "ACTION_ORACLE_UNAVAILABLE",
            MissingField { .. } => "ACTION_MISSING_FIELD",
            UnknownActionKind(_) => "ACTION_UNKNOWN_KIND",
        }
    }
}
