//! Validation and execution of combat actions.

use tracing::{debug, warn};

use crate::combat::{AttackOutcome, DamageSource, DamageType, resolve_attack};
use crate::config::CombatConfig;
use crate::effects::{Applied, EffectGrant, StatusEffectEngine, StatusEffectKind};
use crate::env::{CombatEnv, ItemEffect, ItemId, RollContext, compute_seed};
use crate::events::CombatEvent;
use crate::session::{conclude, evaluate_end};
use crate::state::{CombatLogEntry, CombatSession, LogSource, Participant, ParticipantId, Position};
use crate::stats::CombatStats;
use crate::turn::TurnManager;
use crate::vitals;

use super::{
    ActionError, ActionKind, ActionOutcome, ActionResult, ActionTag, CombatAction, Resolution,
    SpellPayload, flee_chance,
};

/// Turns a submitted action into exactly one [`ActionResult`].
///
/// Resolution is functional: the input session is cloned, the clone is
/// mutated, and the new session is returned inside a [`Resolution`]. A
/// rejected action returns an error and produces nothing.
#[derive(Clone, Debug, Default)]
pub struct ActionEngine {
    turns: TurnManager,
}

impl ActionEngine {
    pub fn new(turns: TurnManager) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    pub fn effects(&self) -> &StatusEffectEngine {
        self.turns.effects()
    }

    pub fn config(&self) -> &CombatConfig {
        self.turns.config()
    }

    /// Checks an action against the session without resolving it.
    pub fn validate(
        &self,
        session: &CombatSession,
        action: &CombatAction,
        env: &CombatEnv<'_>,
    ) -> Result<(), ActionError> {
        self.check(session, action, env).map(|_| ())
    }

    pub fn resolve(
        &self,
        session: &CombatSession,
        action: &CombatAction,
        env: &CombatEnv<'_>,
    ) -> Result<Resolution, ActionError> {
        let item = self.check(session, action, env)?;

        let mut next = session.clone();
        next.nonce += 1;
        let log_start = next.log.len();
        let mut events = Vec::new();
        let actor = action.actor;

        let result = match &action.kind {
            ActionKind::Attack { target } => self.attack(&mut next, actor, *target, env, &mut events)?,
            ActionKind::Defend => self.defend(&mut next, actor, &mut events)?,
            ActionKind::Move { destination } => self.relocate(&mut next, actor, *destination)?,
            ActionKind::Cast { target, spell } => {
                self.cast(&mut next, actor, *target, spell, env, &mut events)?
            }
            ActionKind::UseItem { item: id, target } => {
                let effect = item.ok_or(ActionError::UnknownItem(*id))?;
                self.use_item(&mut next, actor, target.unwrap_or(actor), *id, &effect, &mut events)?
            }
            ActionKind::Flee => self.flee(&mut next, actor, env, &mut events)?,
            ActionKind::Wait => {
                let name = participant(&next, actor)?.name().to_owned();
                ActionResult::new(actor, ActionTag::Wait, ActionOutcome::Ongoing)
                    .described(format!("{name} waits"))
            }
        };

        // spend the action point
        let (exhausted, down) = match next.participant_mut(actor) {
            Some(p) => {
                p.action_points.deplete(1);
                p.has_acted = true;
                (p.action_points.is_depleted(), !p.is_standing())
            }
            None => (true, true),
        };

        next.record(
            CombatLogEntry::new(LogSource::Action, result.description.clone())
                .by(actor)
                .action(result.action)
                .against(result.target)
                .amount(result.damage.max(result.healing)),
        );
        events.push(CombatEvent::ActionResolved {
            actor,
            action: result.action,
            target: result.target,
            outcome: result.outcome,
            damage: result.damage,
            healing: result.healing,
        });
        debug!(
            session = %next.id,
            nonce = next.nonce,
            actor = %actor,
            action = %result.action,
            outcome = %result.outcome,
            damage = result.damage,
            "action resolved"
        );

        if result.fled {
            self.turns.resume(&mut next, &mut events);
        } else if exhausted || down {
            self.turns.advance(&mut next, &mut events);
        }

        if let Some(victor) = evaluate_end(&next, self.config()) {
            conclude(&mut next, victor, &mut events);
        }

        let log = next.log[log_start..].to_vec();
        Ok(Resolution {
            session: next,
            result,
            log,
            events,
        })
    }

    // ===== validation =====

    fn check(
        &self,
        session: &CombatSession,
        action: &CombatAction,
        env: &CombatEnv<'_>,
    ) -> Result<Option<ItemEffect>, ActionError> {
        if !session.is_active() {
            return Err(ActionError::SessionNotActive);
        }

        let actor = participant(session, action.actor)?;
        if session.active != Some(actor.id) {
            return Err(ActionError::NotActorsTurn {
                actor: actor.id,
                active: session.active,
            });
        }
        if !actor.is_alive() {
            return Err(ActionError::ActorDead(actor.id));
        }
        if actor.action_points.is_depleted() {
            return Err(ActionError::NoActionPoints(actor.id));
        }

        if let Some(target) = action.kind.target() {
            let target = session
                .participant(target)
                .filter(|p| !p.fled)
                .ok_or(ActionError::TargetNotFound(target))?;
            if !target.is_alive() {
                return Err(ActionError::TargetDefeated(target.id));
            }
            if matches!(action.kind, ActionKind::Attack { .. }) && target.id == actor.id {
                return Err(ActionError::CannotTargetSelf(actor.id));
            }
        }

        match &action.kind {
            ActionKind::Move { destination } => {
                self.check_move(session, actor, *destination)?;
                Ok(None)
            }
            ActionKind::Cast { spell, .. } => {
                let available = actor.character.mana.current();
                if available < spell.mana_cost {
                    return Err(ActionError::InsufficientMana {
                        required: spell.mana_cost,
                        available,
                    });
                }
                Ok(None)
            }
            ActionKind::UseItem { item, .. } => env
                .items()?
                .resolve(*item)
                .map(Some)
                .ok_or(ActionError::UnknownItem(*item)),
            _ => Ok(None),
        }
    }

    fn check_move(
        &self,
        session: &CombatSession,
        actor: &Participant,
        destination: Position,
    ) -> Result<(), ActionError> {
        if !session.environment.contains(destination) {
            return Err(ActionError::OutOfBounds(destination));
        }
        let multiplier = session.modifiers_of(actor).movement_multiplier.max(0.0);
        let limit = (session.environment.max_move_distance as f64 * multiplier).floor() as u32;
        let distance = actor.position.distance(destination);
        if distance > limit {
            return Err(ActionError::TooFar { distance, limit });
        }
        if let Some(occupant) = session.occupant(destination)
            && occupant != actor.id
        {
            return Err(ActionError::Occupied(destination));
        }
        Ok(())
    }

    // ===== execution =====

    fn attack(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        target: ParticipantId,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let attacker = participant(session, actor)?;
        let (source, weapon) = match &attacker.character.weapon {
            Some(weapon) => (
                DamageSource::weapon(weapon.base_damage, weapon.damage_type),
                weapon.name.clone(),
            ),
            None => (
                DamageSource::weapon(self.config().unarmed_damage, DamageType::Physical),
                "bare hands".to_owned(),
            ),
        };
        self.strike(session, actor, target, source, &weapon, ActionTag::Attack, env, events)
    }

    /// Shared attack roll for weapons and damaging spells.
    #[allow(clippy::too_many_arguments)]
    fn strike(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        target: ParticipantId,
        source: DamageSource,
        with: &str,
        tag: ActionTag,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let ambient = &session.environment.ambient;
        let attacker = participant(session, actor)?;
        let defender = session
            .participant(target)
            .ok_or(ActionError::TargetNotFound(target))?;
        let attacker_name = attacker.name().to_owned();
        let target_name = defender.name().to_owned();

        let seed = compute_seed(session.seed, session.nonce, actor.0, RollContext::Hit);
        let roll = env.rng().roll_d100(seed);
        let attack = resolve_attack(
            &CombatStats::of(&attacker.character, ambient),
            &CombatStats::of(&defender.character, ambient),
            &source,
            roll,
            self.config(),
        );

        let wound = vitals::wound(session, target, attack.damage);
        let mut description = match attack.outcome {
            AttackOutcome::Hit => format!(
                "{attacker_name} hits {target_name} with {with} for {} {} damage",
                wound.applied, attack.damage_type
            ),
            AttackOutcome::Critical => format!(
                "{attacker_name} lands a critical hit on {target_name} with {with} for {} {} damage",
                wound.applied, attack.damage_type
            ),
            AttackOutcome::Block => format!("{target_name} blocks {attacker_name}'s {with}"),
            AttackOutcome::Parry => format!("{target_name} parries {attacker_name}'s {with}"),
            AttackOutcome::Dodge => format!("{target_name} dodges {attacker_name}'s {with}"),
            AttackOutcome::Miss => format!("{attacker_name} misses {target_name} with {with}"),
            AttackOutcome::Fumble => format!("{attacker_name} fumbles {with} against {target_name}"),
        };
        if wound.defeated {
            description.push_str(&format!("; {target_name} falls"));
            vitals::settle_defeat(self.effects(), session, target, events);
        }

        let mut result = ActionResult::new(actor, tag, attack.outcome.into());
        result.target = Some(target);
        result.roll = Some(roll);
        result.damage = wound.applied;
        result.damage_type = Some(attack.damage_type);
        result.defeated_target = wound.defeated;
        Ok(result.described(description))
    }

    fn defend(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let name = participant(session, actor)?.name().to_owned();
        let grant = EffectGrant::for_turns(StatusEffectKind::Defending, self.config().defend_duration);

        let mut result = ActionResult::new(actor, ActionTag::Defend, ActionOutcome::Ongoing);
        if self.grant(session, actor, grant, events).is_some() {
            result.effects_applied.push(StatusEffectKind::Defending);
        }
        Ok(result.described(format!("{name} takes a defensive stance")))
    }

    fn relocate(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        destination: Position,
    ) -> Result<ActionResult, ActionError> {
        let mover = session
            .participant_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))?;
        let origin = mover.position;
        mover.position = destination;
        let description = format!("{} moves from {origin} to {destination}", mover.name());
        Ok(ActionResult::new(actor, ActionTag::Move, ActionOutcome::Ongoing).described(description))
    }

    fn cast(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        target: ParticipantId,
        spell: &SpellPayload,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let caster = session
            .participant_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))?;
        caster.character.mana.deplete(spell.mana_cost);
        let caster_name = caster.name().to_owned();

        let mut result = if spell.is_heal() {
            let target_name = participant(session, target)?.name().to_owned();
            let healed = vitals::heal(session, target, spell.healing);
            let mut result = ActionResult::new(actor, ActionTag::Cast, ActionOutcome::Hit);
            result.target = Some(target);
            result.healing = healed;
            result.described(format!(
                "{caster_name} casts {} on {target_name}, restoring {healed} health",
                spell.name
            ))
        } else {
            let source = DamageSource::spell(spell.base_damage, spell.damage_type);
            self.strike(session, actor, target, source, &spell.name, ActionTag::Cast, env, events)?
        };

        let landed = matches!(
            result.outcome,
            ActionOutcome::Hit | ActionOutcome::Critical | ActionOutcome::Block
        );
        if landed && !result.defeated_target {
            for grant in &spell.effects {
                if let Some(applied) = self.grant(session, target, *grant, events) {
                    result.effects_applied.push(applied.kind);
                }
            }
        }
        Ok(result)
    }

    fn use_item(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        target: ParticipantId,
        id: ItemId,
        item: &ItemEffect,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let user = participant(session, actor)?.name().to_owned();
        let target_name = participant(session, target)?.name().to_owned();
        let mut result = ActionResult::new(actor, ActionTag::UseItem, ActionOutcome::Ongoing);
        result.target = Some(target);

        let mut parts = Vec::new();
        if item.damage > 0 {
            let wound = vitals::wound(session, target, item.damage);
            result.damage = wound.applied;
            result.damage_type = Some(item.damage_type);
            result.defeated_target = wound.defeated;
            parts.push(format!("deals {} {} damage", wound.applied, item.damage_type));
        }
        if !result.defeated_target {
            if item.healing > 0 {
                result.healing = vitals::heal(session, target, item.healing);
                parts.push(format!("restores {} health", result.healing));
            }
            if item.mana > 0
                && let Some(p) = session.participant_mut(target)
            {
                let restored = p.character.mana.restore(item.mana);
                parts.push(format!("restores {restored} mana"));
            }
            for kind in &item.cures {
                if self.cure(session, target, *kind, events) {
                    parts.push(format!("cures {kind}"));
                }
            }
            for grant in &item.effects {
                if let Some(applied) = self.grant(session, target, *grant, events) {
                    result.effects_applied.push(applied.kind);
                    parts.push(format!("grants {}", applied.kind));
                }
            }
        }

        let name = if item.name.is_empty() {
            id.to_string()
        } else {
            item.name.clone()
        };
        let mut description = format!("{user} uses {name} on {target_name}");
        if !parts.is_empty() {
            description.push_str(&format!(": {}", parts.join(", ")));
        }
        if result.defeated_target {
            description.push_str(&format!("; {target_name} falls"));
            vitals::settle_defeat(self.effects(), session, target, events);
        }
        Ok(result.described(description))
    }

    fn flee(
        &self,
        session: &mut CombatSession,
        actor: ParticipantId,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<ActionResult, ActionError> {
        let runner = participant(session, actor)?;
        let name = runner.name().to_owned();
        let chance = flee_chance(session, runner, self.config());
        let seed = compute_seed(session.seed, session.nonce, actor.0, RollContext::Flee);
        let roll = env.rng().roll_d100(seed);

        let mut result = ActionResult::new(actor, ActionTag::Flee, ActionOutcome::Ongoing);
        result.roll = Some(roll);
        if roll > chance {
            return Ok(result.described(format!("{name} tries to flee but cannot escape")));
        }

        if let Some(p) = session.participant_mut(actor) {
            p.fled = true;
        }
        if let Err(err) = self.turns.withdraw(session, actor) {
            warn!(participant = %actor, %err, "fled participant missing from turn order");
        }
        events.push(CombatEvent::ParticipantFled { participant: actor });
        result.fled = true;
        Ok(result.described(format!("{name} flees the battle")))
    }

    // ===== effect helpers =====

    /// Applies an effect grant, resolving its `on_apply` hook against health.
    fn grant(
        &self,
        session: &mut CombatSession,
        id: ParticipantId,
        grant: EffectGrant,
        events: &mut Vec<CombatEvent>,
    ) -> Option<Applied> {
        let participant = session.participant_mut(id)?;
        let applied = self.effects().grant(&mut participant.character.effects, grant)?;
        events.push(CombatEvent::EffectApplied {
            participant: id,
            effect: applied.kind,
            stacks: applied.stacks,
        });
        if let Some(hook) = applied.hook {
            let (wound, _) = vitals::apply_hooks(session, id, &[hook]);
            if wound.defeated {
                vitals::settle_defeat(self.effects(), session, id, events);
            }
        }
        Some(applied)
    }

    fn cure(
        &self,
        session: &mut CombatSession,
        id: ParticipantId,
        kind: StatusEffectKind,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let Some(participant) = session.participant_mut(id) else {
            return false;
        };
        let Some(hook) = self.effects().remove(&mut participant.character.effects, kind) else {
            return false;
        };
        events.push(CombatEvent::EffectExpired {
            participant: id,
            effect: kind,
        });
        if let Some(hook) = hook {
            let (wound, _) = vitals::apply_hooks(session, id, &[hook]);
            if wound.defeated {
                vitals::settle_defeat(self.effects(), session, id, events);
            }
        }
        true
    }
}

fn participant(session: &CombatSession, id: ParticipantId) -> Result<&Participant, ActionError> {
    session.participant(id).ok_or(ActionError::ActorNotFound(id))
}
