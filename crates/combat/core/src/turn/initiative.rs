//! Initiative rolls and turn-order construction.

use crate::config::CombatConfig;
use crate::env::{RngOracle, RollContext, compute_seed};
use crate::state::{Attribute, Participant, ParticipantId};

/// One participant's initiative roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitiativeRoll {
    pub participant: ParticipantId,
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
    /// Raw dexterity, the first tie-breaker.
    pub dexterity: i32,
}

/// Rolls initiative for every participant and returns them in turn order.
///
/// Sorted by `d20 + dex_mod` descending, then raw dexterity descending, then
/// roster order (the slice order; players come first).
pub fn roll_initiative(
    participants: &[Participant],
    session_seed: u64,
    rng: &dyn RngOracle,
    config: &CombatConfig,
) -> Vec<InitiativeRoll> {
    let mut rolls: Vec<InitiativeRoll> = participants
        .iter()
        .map(|participant| {
            let seed = compute_seed(session_seed, 0, participant.id.0, RollContext::Initiative);
            let roll = rng.roll_die(seed, config.initiative_die);
            let modifier = participant.character.attributes.modifier(Attribute::Dexterity);
            InitiativeRoll {
                participant: participant.id,
                roll,
                modifier,
                total: roll as i32 + modifier,
                dexterity: participant.character.attributes.dexterity,
            }
        })
        .collect();

    // stable sort keeps roster order for full ties
    rolls.sort_by(|a, b| b.total.cmp(&a.total).then(b.dexterity.cmp(&a.dexterity)));
    rolls
}
