//! Rewards and the final report of a concluded session.

use std::fmt::Write as _;

use crate::config::CombatConfig;
use crate::env::ItemId;
use crate::state::{CombatSession, ParticipantId, Side, Victor};

use super::SessionError;

/// Loot awarded for a defeated enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item: ItemId,
    pub name: String,
    pub quantity: u32,
    pub dropped_by: ParticipantId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub victor: Victor,
    /// Alive and still on the field.
    pub survivors: Vec<ParticipantId>,
    pub casualties: Vec<ParticipantId>,
    pub fled: Vec<ParticipantId>,
    pub rounds: u32,
    pub experience_gained: u32,
    pub loot_dropped: Vec<LootDrop>,
    pub summary: String,
}

impl CombatOutcome {
    /// Attaches loot and rewrites the summary to mention it.
    pub fn with_loot(mut self, session: &CombatSession, loot: Vec<LootDrop>) -> Self {
        self.loot_dropped = loot;
        self.summary = summarize(session, &self);
        self
    }
}

/// Experience for a players' victory: `experience_per_level` × the summed
/// levels of defeated enemies. Zero for any other result.
pub fn experience_for(session: &CombatSession, victor: Victor, config: &CombatConfig) -> u32 {
    if victor != Victor::Players {
        return 0;
    }
    session
        .participants
        .iter()
        .filter(|p| p.side == Side::Enemies && !p.is_alive())
        .map(|p| p.character.level)
        .sum::<u32>()
        .saturating_mul(config.experience_per_level)
}

/// Builds the outcome of an ended session (loot left empty).
pub fn outcome(session: &CombatSession, config: &CombatConfig) -> Result<CombatOutcome, SessionError> {
    let victor = match session.victor {
        Some(victor) if session.is_ended() => victor,
        _ => return Err(SessionError::NotEnded(session.status)),
    };

    let ids = |keep: fn(&crate::state::Participant) -> bool| {
        session
            .participants
            .iter()
            .filter(|p| keep(p))
            .map(|p| p.id)
            .collect::<Vec<_>>()
    };

    let mut outcome = CombatOutcome {
        victor,
        survivors: ids(|p| p.is_standing()),
        casualties: ids(|p| !p.is_alive()),
        fled: ids(|p| p.fled && p.is_alive()),
        rounds: session.round.min(config.max_rounds),
        experience_gained: experience_for(session, victor, config),
        loot_dropped: Vec::new(),
        summary: String::new(),
    };
    outcome.summary = summarize(session, &outcome);
    Ok(outcome)
}

fn names(session: &CombatSession, ids: &[ParticipantId]) -> String {
    if ids.is_empty() {
        return "none".to_owned();
    }
    ids.iter()
        .filter_map(|id| session.participant(*id))
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable report.
pub fn summarize(session: &CombatSession, outcome: &CombatOutcome) -> String {
    let mut summary = match outcome.victor {
        Victor::Players => format!("Victory for the players after {} rounds.", outcome.rounds),
        Victor::Enemies => format!("The enemies prevail after {} rounds.", outcome.rounds),
        Victor::Draw => format!("Stalemate: no side prevailed in {} rounds.", outcome.rounds),
    };
    let _ = write!(summary, " Survivors: {}.", names(session, &outcome.survivors));
    let _ = write!(summary, " Fallen: {}.", names(session, &outcome.casualties));
    if !outcome.fled.is_empty() {
        let _ = write!(summary, " Fled: {}.", names(session, &outcome.fled));
    }
    if outcome.experience_gained > 0 {
        let _ = write!(summary, " Experience gained: {}.", outcome.experience_gained);
    }
    if !outcome.loot_dropped.is_empty() {
        let loot = outcome
            .loot_dropped
            .iter()
            .map(|drop| format!("{} x{}", drop.name, drop.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(summary, " Loot: {loot}.");
    }
    summary
}
