//! Escape chance.

use crate::config::CombatConfig;
use crate::state::{Attribute, CombatSession, Participant};
use crate::stats::CombatStats;

/// Chance (percent) that `actor` escapes.
///
/// ```text
/// chance = flee_base_chance
///        + 5 × (dex_mod + luck_mod − mean standing-opponent dex_mod)
/// clamped to [5, 95]
/// ```
pub fn flee_chance(session: &CombatSession, actor: &Participant, config: &CombatConfig) -> u32 {
    let ambient = &session.environment.ambient;
    let stats = CombatStats::of(&actor.character, ambient);
    let own = stats.modifier(Attribute::Dexterity) + stats.modifier(Attribute::Luck);

    let opponents: Vec<i32> = session
        .opponents_of(actor.id)
        .map(|p| CombatStats::of(&p.character, ambient).modifier(Attribute::Dexterity))
        .collect();
    let mean = if opponents.is_empty() {
        0.0
    } else {
        opponents.iter().sum::<i32>() as f64 / opponents.len() as f64
    };

    let chance = config.flee_base_chance as f64 + 5.0 * (own as f64 - mean);
    chance.round().clamp(5.0, 95.0) as u32
}
