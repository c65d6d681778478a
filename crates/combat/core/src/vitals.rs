//! Health bookkeeping shared by the action engine and the turn manager.

use crate::effects::{HookFired, StatusEffectEngine};
use crate::events::CombatEvent;
use crate::state::{CombatSession, ParticipantId, ResourceMeter};

/// Damage actually dealt and whether it dropped the participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Wound {
    pub applied: u32,
    pub defeated: bool,
}

/// Deals `amount` to a participant; health clamps at zero.
pub(crate) fn wound(session: &mut CombatSession, id: ParticipantId, amount: u32) -> Wound {
    let Some(participant) = session.participant_mut(id) else {
        return Wound::default();
    };
    if !participant.is_alive() {
        return Wound::default();
    }
    let applied = participant.character.health.deplete(amount);
    Wound {
        applied,
        defeated: !participant.is_alive(),
    }
}

/// Heals a living participant, scaled by its healing multiplier; clamps at max.
pub(crate) fn heal(session: &mut CombatSession, id: ParticipantId, amount: u32) -> u32 {
    let Some(multiplier) = session
        .participant(id)
        .filter(|p| p.is_alive())
        .map(|p| session.modifiers_of(p).healing_multiplier)
    else {
        return 0;
    };
    let scaled = (amount as f64 * multiplier.max(0.0)).floor() as u32;
    session
        .participant_mut(id)
        .map_or(0, |p| p.character.health.restore(scaled))
}

/// Applies hook damage then healing in firing order. Returns totals dealt.
pub(crate) fn apply_hooks(
    session: &mut CombatSession,
    id: ParticipantId,
    fired: &[HookFired],
) -> (Wound, u32) {
    let mut total = Wound::default();
    let mut healed = 0;
    for hook in fired {
        if hook.effect.damage > 0 {
            let wound = wound(session, id, hook.effect.damage);
            total.applied += wound.applied;
            total.defeated |= wound.defeated;
        }
        if hook.effect.healing > 0 {
            healed += heal(session, id, hook.effect.healing);
        }
    }
    (total, healed)
}

/// Strips a fallen participant: effects cleared (remove hooks fire but
/// cannot affect a corpse), action points emptied.
pub(crate) fn settle_defeat(
    effects: &StatusEffectEngine,
    session: &mut CombatSession,
    id: ParticipantId,
    events: &mut Vec<CombatEvent>,
) {
    let Some(participant) = session.participant_mut(id) else {
        return;
    };
    let cleared = effects.clear(&mut participant.character.effects);
    participant.action_points = ResourceMeter::new(0, participant.action_points.max());
    tracing::debug!(participant = %id, cleared = cleared.len(), "participant defeated");
    events.push(CombatEvent::ParticipantDefeated { participant: id });
}
