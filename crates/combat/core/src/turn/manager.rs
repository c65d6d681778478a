//! Turn cycling, round rollover, and turn-start effect processing.

use tracing::debug;

use crate::config::CombatConfig;
use crate::effects::{HookTrigger, StatusEffectEngine};
use crate::env::RngOracle;
use crate::events::CombatEvent;
use crate::state::{CombatLogEntry, CombatSession, LogSource, ParticipantId, Side};
use crate::vitals;

use super::{TurnError, roll_initiative};

/// Where control went after an advancement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// `participant` is now active (its effects already ticked).
    Turn {
        participant: ParticipantId,
        new_round: bool,
    },
    /// One side has no standing combatants left.
    SideDefeated,
    /// The round counter passed `max_rounds`.
    RoundLimit,
    /// Nobody is left standing on either side.
    NoLivingParticipants,
}

impl Advance {
    /// True when the session must be concluded instead of continuing.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Advance::Turn { .. })
    }
}

/// Governs whose turn it is.
///
/// Turn order is fixed at [`start`](Self::start). Every activation ticks the
/// incoming participant's effects; every wrap past the end of the order
/// starts a new round (AP refill, hazards).
#[derive(Clone, Debug, Default)]
pub struct TurnManager {
    effects: StatusEffectEngine,
    config: CombatConfig,
}

impl TurnManager {
    pub fn new(effects: StatusEffectEngine, config: CombatConfig) -> Self {
        Self { effects, config }
    }

    pub fn effects(&self) -> &StatusEffectEngine {
        &self.effects
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Rolls initiative, fixes the turn order, opens round 1, and activates
    /// the first standing participant.
    pub fn start(
        &self,
        session: &mut CombatSession,
        rng: &dyn RngOracle,
        events: &mut Vec<CombatEvent>,
    ) -> Result<Advance, TurnError> {
        if session.participants.is_empty() {
            return Err(TurnError::NoParticipants);
        }
        if !session.turn_order.is_empty() {
            return Err(TurnError::AlreadyStarted);
        }

        let rolls = roll_initiative(&session.participants, session.seed, rng, &self.config);
        for roll in &rolls {
            debug!(
                participant = %roll.participant,
                roll = roll.roll,
                modifier = roll.modifier,
                total = roll.total,
                "initiative rolled"
            );
        }
        session.turn_order = rolls.iter().map(|r| r.participant).collect();
        session.turn_cursor = 0;
        session.round = 1;

        self.replenish(session);
        session.note(LogSource::Round, "Round 1 begins");
        events.push(CombatEvent::RoundStarted { round: 1 });

        Ok(self.activate_from(session, 0, events))
    }

    /// Ends the active participant's turn and activates the next one.
    pub fn advance(&self, session: &mut CombatSession, events: &mut Vec<CombatEvent>) -> Advance {
        let next = session.turn_cursor + 1;
        self.activate_from(session, next, events)
    }

    /// Removes a participant from the turn order (after fleeing).
    ///
    /// The cursor keeps pointing at the slot the participant occupied, so
    /// [`resume`](Self::resume) hands the turn to whoever slid into it.
    pub fn withdraw(&self, session: &mut CombatSession, id: ParticipantId) -> Result<(), TurnError> {
        let index = session
            .turn_order
            .iter()
            .position(|&p| p == id)
            .ok_or(TurnError::UnknownParticipant(id))?;
        session.turn_order.remove(index);
        if index < session.turn_cursor {
            session.turn_cursor -= 1;
        }
        if session.active == Some(id) {
            session.active = None;
        }
        Ok(())
    }

    /// Activates the participant at the current cursor (after a withdrawal).
    pub fn resume(&self, session: &mut CombatSession, events: &mut Vec<CombatEvent>) -> Advance {
        let cursor = session.turn_cursor;
        self.activate_from(session, cursor, events)
    }

    fn activate_from(
        &self,
        session: &mut CombatSession,
        mut index: usize,
        events: &mut Vec<CombatEvent>,
    ) -> Advance {
        let mut new_round = false;
        let mut idle_rollovers = 0;

        loop {
            if let Some(done) = Self::decided(session) {
                session.active = None;
                return done;
            }

            if index >= session.turn_order.len() {
                // a full pass found nobody to activate
                if idle_rollovers >= 2 {
                    session.active = None;
                    return Advance::NoLivingParticipants;
                }
                idle_rollovers += 1;
                index = 0;
                new_round = true;
                if let Some(limit) = self.rollover(session, events) {
                    session.active = None;
                    return limit;
                }
                continue;
            }

            let id = session.turn_order[index];
            if session.participant(id).is_some_and(|p| p.is_standing()) {
                idle_rollovers = 0;
                session.turn_cursor = index;
                if self.begin_turn(session, id, events) {
                    return Advance::Turn {
                        participant: id,
                        new_round,
                    };
                }
            }
            index += 1;
        }
    }

    fn decided(session: &CombatSession) -> Option<Advance> {
        let players = session.standing(Side::Players).count();
        let enemies = session.standing(Side::Enemies).count();
        match (players, enemies) {
            (0, 0) => Some(Advance::NoLivingParticipants),
            (0, _) | (_, 0) => Some(Advance::SideDefeated),
            _ => None,
        }
    }

    /// Activates `id` and ticks its effects. Returns false if the tick killed it.
    fn begin_turn(
        &self,
        session: &mut CombatSession,
        id: ParticipantId,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        session.active = Some(id);
        events.push(CombatEvent::TurnStarted {
            round: session.round,
            participant: id,
        });

        let Some(participant) = session.participant_mut(id) else {
            return false;
        };
        let report = self.effects.tick(&mut participant.character.effects);
        if report.is_quiet() {
            return true;
        }
        let name = participant.name().to_owned();

        let mut defeated = false;
        for hook in &report.fired {
            let (wound, healed) = vitals::apply_hooks(session, id, std::slice::from_ref(hook));
            defeated |= wound.defeated;

            let mut parts = Vec::new();
            if wound.applied > 0 {
                parts.push(format!("takes {} {} damage", wound.applied, hook.effect.damage_type));
            }
            if healed > 0 {
                parts.push(format!("recovers {healed} health"));
            }
            if !parts.is_empty() {
                let fading = if hook.trigger == HookTrigger::Remove {
                    " fading"
                } else {
                    ""
                };
                let message = format!("{name} {} from {}{fading}", parts.join(" and "), hook.kind);
                session.record(
                    CombatLogEntry::new(LogSource::Effect, message)
                        .against(Some(id))
                        .amount(wound.applied.max(healed)),
                );
            }
            if hook.trigger == HookTrigger::Tick {
                events.push(CombatEvent::EffectTicked {
                    participant: id,
                    effect: hook.kind,
                    damage: wound.applied,
                    healing: healed,
                });
            }
            if defeated {
                break;
            }
        }

        for kind in &report.expired {
            session.record(
                CombatLogEntry::new(LogSource::Effect, format!("{kind} wears off {name}"))
                    .against(Some(id)),
            );
            events.push(CombatEvent::EffectExpired {
                participant: id,
                effect: *kind,
            });
        }

        if defeated {
            session.record(
                CombatLogEntry::new(LogSource::Effect, format!("{name} succumbs to their afflictions"))
                    .against(Some(id)),
            );
            vitals::settle_defeat(&self.effects, session, id, events);
            return false;
        }
        true
    }

    /// Starts the next round. Returns `RoundLimit` past `max_rounds`.
    fn rollover(&self, session: &mut CombatSession, events: &mut Vec<CombatEvent>) -> Option<Advance> {
        session.round += 1;
        if session.round > self.config.max_rounds {
            session.note(
                LogSource::Round,
                format!("Round limit of {} reached", self.config.max_rounds),
            );
            return Some(Advance::RoundLimit);
        }

        debug!(round = session.round, "round started");
        session.note(LogSource::Round, format!("Round {} begins", session.round));
        events.push(CombatEvent::RoundStarted {
            round: session.round,
        });

        self.replenish(session);
        self.apply_hazards(session, events);
        None
    }

    fn replenish(&self, session: &mut CombatSession) {
        for index in 0..session.participants.len() {
            if !session.participants[index].is_standing() {
                continue;
            }
            let modifiers = session.modifiers_of(&session.participants[index]);
            session.participants[index].replenish(&modifiers);
        }
    }

    fn apply_hazards(&self, session: &mut CombatSession, events: &mut Vec<CombatEvent>) {
        let hazards = session.environment.hazards.clone();
        for hazard in &hazards {
            let victims: Vec<(ParticipantId, String)> = session
                .participants
                .iter()
                .filter(|p| p.is_standing() && hazard.affects(p.position))
                .map(|p| (p.id, p.name().to_owned()))
                .collect();

            for (id, name) in victims {
                let wound = vitals::wound(session, id, hazard.damage);
                let mut message = format!(
                    "{} deals {} {} damage to {name}",
                    hazard.name, wound.applied, hazard.damage_type
                );
                if wound.defeated {
                    message.push_str(&format!("; {name} falls"));
                }
                session.record(
                    CombatLogEntry::new(LogSource::Hazard, message)
                        .against(Some(id))
                        .amount(wound.applied),
                );
                events.push(CombatEvent::HazardTriggered {
                    hazard: hazard.name.clone(),
                    participant: id,
                    damage: wound.applied,
                    damage_type: hazard.damage_type,
                });
                if wound.defeated {
                    vitals::settle_defeat(&self.effects, session, id, events);
                }
            }
        }
    }
}
