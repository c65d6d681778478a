use std::collections::HashSet;

use super::*;
use crate::config::CombatConfig;
use crate::effects::{EffectDuration, StatusEffectKind};
use crate::env::{PcgRng, ScriptedRng};
use crate::events::CombatEvent;
use crate::session::evaluate_end;
use crate::state::{CombatSession, Environment, Hazard, LogSource, ParticipantId, Victor};
use crate::testing::{fighter, start, turns, with_dex};
use crate::combat::DamageType;

fn kill(session: &mut CombatSession, id: u32) {
    let participant = session.participant_mut(ParticipantId(id)).unwrap();
    let max = participant.character.health.max();
    participant.character.health.deplete(max);
}

#[test]
fn turn_order_is_unique_and_active_participant_is_standing() {
    let turns = turns(CombatConfig::default());
    let session = start(
        &turns,
        vec![fighter(1, "Aria"), fighter(2, "Bram"), fighter(3, "Cyra")],
        vec![fighter(4, "Goblin"), fighter(5, "Orc"), fighter(6, "Troll")],
        Environment::default(),
        &PcgRng,
    );

    let unique: HashSet<_> = session.turn_order.iter().collect();
    assert_eq!(unique.len(), 6);
    assert_eq!(session.turn_order.len(), 6);
    assert!(session.turn_order.iter().all(|id| session.participant(*id).is_some()));
    assert!(session.active_participant().unwrap().is_standing());
    assert_eq!(session.round, 1);
}

#[test]
fn initiative_ties_break_by_dexterity_then_roster_order() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([10, 10, 10]);
    let session = start(
        &turns,
        vec![with_dex(fighter(1, "Aria"), 12), with_dex(fighter(2, "Bram"), 13)],
        vec![with_dex(fighter(3, "Goblin"), 12)],
        Environment::default(),
        &rng,
    );

    assert_eq!(
        session.turn_order,
        vec![ParticipantId(2), ParticipantId(1), ParticipantId(3)]
    );
    assert_eq!(session.active, Some(ParticipantId(2)));
}

#[test]
fn advancement_skips_fallen_participants() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([20, 15, 10]);
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria")],
        vec![fighter(2, "Goblin"), fighter(3, "Orc")],
        Environment::default(),
        &rng,
    );
    assert_eq!(session.active, Some(ParticipantId(1)));

    kill(&mut session, 2);
    let mut events = Vec::new();
    let advance = turns.advance(&mut session, &mut events);
    assert_eq!(
        advance,
        Advance::Turn {
            participant: ParticipantId(3),
            new_round: false
        }
    );
}

#[test]
fn rollover_replenishes_action_points_with_effect_delta() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([20, 10]);
    let mut hero = fighter(1, "Aria");
    turns
        .effects()
        .apply(&mut hero.effects, StatusEffectKind::Hasted, None);
    let mut session = start(
        &turns,
        vec![hero],
        vec![fighter(2, "Goblin")],
        Environment::default(),
        &rng,
    );
    let hero = session.participant(ParticipantId(1)).unwrap();
    assert_eq!(hero.action_points.max(), 2);
    assert_eq!(session.participant(ParticipantId(2)).unwrap().action_points.max(), 1);

    let mut events = Vec::new();
    session.participant_mut(ParticipantId(1)).unwrap().action_points.deplete(2);
    turns.advance(&mut session, &mut events);
    let advance = turns.advance(&mut session, &mut events);

    assert_eq!(
        advance,
        Advance::Turn {
            participant: ParticipantId(1),
            new_round: true
        }
    );
    assert_eq!(session.round, 2);
    assert_eq!(session.participant(ParticipantId(1)).unwrap().action_points.current(), 2);
    assert!(events.contains(&CombatEvent::RoundStarted { round: 2 }));
}

#[test]
fn effects_tick_when_a_turn_begins() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([1, 20]);
    let mut goblin = fighter(2, "Goblin");
    for _ in 0..3 {
        turns
            .effects()
            .apply(&mut goblin.effects, StatusEffectKind::Poisoned, None);
    }
    let initiated = crate::session::initiate(
        crate::state::SessionId(1),
        7,
        vec![crate::session::Combatant::ai(fighter(1, "Aria"))],
        vec![crate::session::Combatant::ai(goblin)],
        Environment::default(),
        &turns,
        &rng,
    )
    .unwrap();
    let session = initiated.session;

    assert_eq!(session.active, Some(ParticipantId(2)));
    let goblin = session.participant(ParticipantId(2)).unwrap();
    assert_eq!(goblin.character.health.current(), 24);
    let poison = goblin.character.effects.get(StatusEffectKind::Poisoned).unwrap();
    assert_eq!(poison.stacks, 3);
    assert_eq!(poison.remaining, EffectDuration::Turns(4));

    assert!(session
        .log
        .iter()
        .any(|entry| entry.source == LogSource::Effect && entry.amount == 6));
    assert!(initiated.events.contains(&CombatEvent::EffectTicked {
        participant: ParticipantId(2),
        effect: StatusEffectKind::Poisoned,
        damage: 6,
        healing: 0,
    }));
}

#[test]
fn lethal_tick_passes_the_turn_on() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([20, 15, 10]);
    let mut frail = fighter(2, "Goblin").with_health(2);
    turns
        .effects()
        .apply(&mut frail.effects, StatusEffectKind::Poisoned, None);
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria")],
        vec![frail, fighter(3, "Orc")],
        Environment::default(),
        &rng,
    );

    let mut events = Vec::new();
    let advance = turns.advance(&mut session, &mut events);

    assert_eq!(
        advance,
        Advance::Turn {
            participant: ParticipantId(3),
            new_round: false
        }
    );
    let goblin = session.participant(ParticipantId(2)).unwrap();
    assert!(!goblin.is_alive());
    assert!(goblin.character.effects.is_empty());
    assert!(events.contains(&CombatEvent::ParticipantDefeated {
        participant: ParticipantId(2)
    }));
}

#[test]
fn hazards_strike_on_round_rollover() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([20, 10]);
    let arena = Environment::default().with_hazard(Hazard::new("Embers", 3, DamageType::Fire));
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria")],
        vec![fighter(2, "Goblin")],
        arena,
        &rng,
    );
    assert_eq!(session.participant(ParticipantId(1)).unwrap().character.health.current(), 30);

    let mut events = Vec::new();
    turns.advance(&mut session, &mut events);
    turns.advance(&mut session, &mut events);

    for id in [1, 2] {
        let health = session.participant(ParticipantId(id)).unwrap().character.health;
        assert_eq!(health.current(), 27);
    }
    let hazard_lines = session
        .log
        .iter()
        .filter(|entry| entry.source == LogSource::Hazard)
        .count();
    assert_eq!(hazard_lines, 2);
}

#[test]
fn round_limit_stops_advancement() {
    let turns = turns(CombatConfig::default().with_max_rounds(2));
    let rng = ScriptedRng::new([20, 10]);
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria")],
        vec![fighter(2, "Goblin")],
        Environment::default(),
        &rng,
    );

    let mut events = Vec::new();
    let mut last = Advance::NoLivingParticipants;
    for _ in 0..4 {
        last = turns.advance(&mut session, &mut events);
    }
    assert_eq!(last, Advance::RoundLimit);
    assert_eq!(session.active, None);
    assert_eq!(evaluate_end(&session, turns.config()), Some(Victor::Draw));
}

#[test]
fn withdrawn_participant_hands_turn_to_next_in_order() {
    let turns = turns(CombatConfig::default());
    let rng = ScriptedRng::new([20, 15, 10, 5]);
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria"), fighter(2, "Bram")],
        vec![fighter(3, "Goblin"), fighter(4, "Orc")],
        Environment::default(),
        &rng,
    );
    assert_eq!(session.active, Some(ParticipantId(1)));

    session.participant_mut(ParticipantId(1)).unwrap().fled = true;
    turns.withdraw(&mut session, ParticipantId(1)).unwrap();
    let mut events = Vec::new();
    let advance = turns.resume(&mut session, &mut events);

    assert_eq!(
        advance,
        Advance::Turn {
            participant: ParticipantId(2),
            new_round: false
        }
    );
    assert_eq!(session.turn_order.len(), 3);
    assert_eq!(session.turn_cursor, 0);
    assert_eq!(
        turns.withdraw(&mut session, ParticipantId(1)),
        Err(TurnError::UnknownParticipant(ParticipantId(1)))
    );
}

#[test]
fn empty_field_reports_no_living_participants() {
    let turns = turns(CombatConfig::default());
    let mut session = start(
        &turns,
        vec![fighter(1, "Aria")],
        vec![fighter(2, "Goblin")],
        Environment::default(),
        &PcgRng,
    );
    kill(&mut session, 1);
    kill(&mut session, 2);

    let mut events = Vec::new();
    assert_eq!(
        turns.advance(&mut session, &mut events),
        Advance::NoLivingParticipants
    );
    assert_eq!(session.active, None);
}
