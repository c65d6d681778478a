//! Plain-text rendering of a finished encounter.
use std::collections::BTreeMap;
use std::fmt::Write;

use combat_core::{CombatOutcome, CombatSession, Participant};
use runtime::{Event, Topic};

/// One line per participant: side, name, health, and any lingering effects.
pub fn roster(session: &CombatSession) -> String {
    let mut out = String::new();
    for participant in &session.participants {
        let _ = writeln!(out, "  {}", participant_line(participant));
    }
    out
}

fn participant_line(participant: &Participant) -> String {
    let state = if participant.fled {
        "fled"
    } else if participant.is_alive() {
        "standing"
    } else {
        "down"
    };
    let mut line = format!(
        "{:<8} {:<20} HP {:>7}  {}",
        participant.side.to_string(),
        participant.name(),
        participant.character.health.to_string(),
        state
    );
    let effects: Vec<String> = participant
        .character
        .effects
        .iter()
        .map(|effect| match effect.stacks {
            1 => effect.kind.to_string(),
            n => format!("{} x{n}", effect.kind),
        })
        .collect();
    if !effects.is_empty() {
        let _ = write!(line, "  [{}]", effects.join(", "));
    }
    line
}

/// Event counts per topic, in topic order.
pub fn event_tally(events: &[Event]) -> String {
    let mut counts: BTreeMap<usize, (Topic, usize)> = BTreeMap::new();
    for event in events {
        let topic = event.topic();
        let index = Topic::ALL.iter().position(|t| *t == topic).unwrap_or(0);
        counts.entry(index).or_insert((topic, 0)).1 += 1;
    }
    counts
        .values()
        .map(|(topic, count)| format!("{topic:?}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn outcome(outcome: &CombatOutcome) -> String {
    format!(
        "Result: {} in {} rounds\n{}",
        outcome.victor, outcome.rounds, outcome.summary
    )
}
