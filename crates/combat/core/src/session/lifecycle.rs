//! Session creation, end conditions, and conclusion.

use tracing::info;

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::events::CombatEvent;
use crate::state::{
    CharacterSnapshot, CombatSession, Controller, Environment, LogSource, Participant,
    ParticipantId, Position, SessionId, SessionStatus, Side, Victor,
};
use crate::turn::TurnManager;

use super::SessionError;

/// A character entering an encounter, with its seat on the battlefield.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub character: CharacterSnapshot,
    pub controller: Controller,
    /// Defaults to the side's starting column when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    /// Defaults to `CombatConfig::default_action_points` when unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_points: Option<u32>,
}

impl Combatant {
    pub fn player(character: CharacterSnapshot) -> Self {
        Self {
            character,
            controller: Controller::Player,
            position: None,
            action_points: None,
        }
    }

    pub fn ai(character: CharacterSnapshot) -> Self {
        Self {
            character,
            controller: Controller::Ai,
            position: None,
            action_points: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_action_points(mut self, action_points: u32) -> Self {
        self.action_points = Some(action_points);
        self
    }
}

/// A freshly initiated session and the events its first turn produced.
#[derive(Clone, Debug)]
pub struct Initiated {
    pub session: CombatSession,
    pub events: Vec<CombatEvent>,
}

/// Builds a session, rolls initiative, and activates the first participant.
///
/// Participant ids are assigned in roster order, players first. Unplaced
/// players line up on the left column and unplaced enemies on the right.
pub fn initiate(
    id: SessionId,
    seed: u64,
    players: Vec<Combatant>,
    enemies: Vec<Combatant>,
    environment: Environment,
    turns: &TurnManager,
    rng: &dyn RngOracle,
) -> Result<Initiated, SessionError> {
    if players.is_empty() {
        return Err(SessionError::EmptySide(Side::Players));
    }
    if enemies.is_empty() {
        return Err(SessionError::EmptySide(Side::Enemies));
    }
    let count = players.len() + enemies.len();
    if count > CombatConfig::MAX_PARTICIPANTS {
        return Err(SessionError::TooManyParticipants {
            count,
            max: CombatConfig::MAX_PARTICIPANTS,
        });
    }

    let config = turns.config();
    let mut session = CombatSession::new(id, seed, environment);
    let right = session.environment.width.saturating_sub(1) as i32;
    let mut next_id = 1;
    for (side, roster, column) in [(Side::Players, players, 0), (Side::Enemies, enemies, right)] {
        for (row, combatant) in roster.into_iter().enumerate() {
            let participant_id = ParticipantId(next_id);
            next_id += 1;
            let position = combatant
                .position
                .unwrap_or(Position::new(column, row as i32));
            if !session.environment.contains(position) {
                return Err(SessionError::OutOfBounds {
                    participant: participant_id,
                    position,
                });
            }
            session.participants.push(Participant::new(
                participant_id,
                side,
                combatant.controller,
                combatant.character,
                position,
                combatant.action_points.unwrap_or(config.default_action_points),
            ));
        }
    }

    let mut events = Vec::new();
    let roster = |side| {
        session
            .participants
            .iter()
            .filter(|p| p.side == side)
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let opening = format!(
        "Combat begins: {} vs {}",
        roster(Side::Players),
        roster(Side::Enemies)
    );
    session.note(LogSource::Session, opening);

    let advance = turns.start(&mut session, rng, &mut events)?;
    session.status = SessionStatus::Active;
    events.insert(
        0,
        CombatEvent::SessionStarted {
            session: session.id,
            turn_order: session.turn_order.clone(),
        },
    );
    info!(
        session = %session.id,
        participants = session.participants.len(),
        "combat session initiated"
    );

    if advance.is_terminal()
        && let Some(victor) = evaluate_end(&session, config)
    {
        conclude(&mut session, victor, &mut events);
    }

    Ok(Initiated { session, events })
}

/// Decides whether the session is over.
///
/// A side with no standing (alive, not fled) combatants loses. Both sides
/// emptied at once, or `max_rounds` passed with both still standing, is a
/// draw.
pub fn evaluate_end(session: &CombatSession, config: &CombatConfig) -> Option<Victor> {
    let players = session.standing(Side::Players).count();
    let enemies = session.standing(Side::Enemies).count();

    if players == 0 && enemies == 0 {
        Some(Victor::Draw)
    } else if players == 0 {
        Some(Victor::Enemies)
    } else if enemies == 0 {
        Some(Victor::Players)
    } else if session.round > config.max_rounds {
        Some(Victor::Draw)
    } else {
        None
    }
}

/// Marks the session ended. Idempotent.
pub fn conclude(session: &mut CombatSession, victor: Victor, events: &mut Vec<CombatEvent>) {
    if session.is_ended() {
        return;
    }
    session.status = SessionStatus::Ended;
    session.victor = Some(victor);
    session.active = None;

    let message = match victor {
        Victor::Players => "Combat ends: the players are victorious".to_owned(),
        Victor::Enemies => "Combat ends: the enemies are victorious".to_owned(),
        Victor::Draw => format!("Combat ends in a draw in round {}", session.round),
    };
    session.note(LogSource::Session, message);
    info!(session = %session.id, %victor, round = session.round, "combat session ended");
    events.push(CombatEvent::SessionEnded {
        session: session.id,
        victor,
    });
}
