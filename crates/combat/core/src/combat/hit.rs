//! Hit chance and accuracy calculations.

use crate::config::CombatConfig;
use crate::state::{Attribute, Skill};
use crate::stats::CombatStats;

use super::AttackStyle;

/// Hit chance of `attacker` against `target`, in percent.
///
/// # Formula
///
/// ```text
/// hit_chance = base_accuracy
///            + attacker dex_mod + skill + accuracy delta
///            - target dex_mod - target dodge delta
/// clamped to [0, 100]
/// ```
///
/// The skill is `combat` for physical attacks and `magic` for spells.
pub fn calculate_hit_chance(
    attacker: &CombatStats,
    target: &CombatStats,
    style: AttackStyle,
    config: &CombatConfig,
) -> u32 {
    clamp_percent(unclamped_hit_chance(attacker, target, style, config) - target.modifiers.dodge)
}

/// Hit chance ignoring the target's dodge delta; used to classify dodges.
pub(crate) fn hit_chance_without_dodge(
    attacker: &CombatStats,
    target: &CombatStats,
    style: AttackStyle,
    config: &CombatConfig,
) -> u32 {
    clamp_percent(unclamped_hit_chance(attacker, target, style, config))
}

fn unclamped_hit_chance(
    attacker: &CombatStats,
    target: &CombatStats,
    style: AttackStyle,
    config: &CombatConfig,
) -> i32 {
    let skill = match style {
        AttackStyle::Physical => Skill::Combat,
        AttackStyle::Magical => Skill::Magic,
    };

    config.base_accuracy
        + attacker.modifier(Attribute::Dexterity)
        + attacker.skills.get(skill)
        + attacker.modifiers.accuracy
        - target.modifier(Attribute::Dexterity)
}

fn clamp_percent(value: i32) -> u32 {
    value.clamp(0, 100) as u32
}

/// Check if a d100 roll hits. Rolls at or below the hit chance land.
pub fn check_hit(hit_chance: u32, roll: u32) -> bool {
    roll <= hit_chance
}
