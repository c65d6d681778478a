//! Effective combat stats.
//!
//! A [`CombatStats`] is the calculator's read-only view of one combatant:
//! base attributes and skills with every active effect (and the
//! environment's ambient modifiers) folded in. It is rebuilt for every
//! resolution, so expired effects never leak into a roll.

use crate::effects::{EffectModifiers, StatusEffectKind, aggregate};
use crate::state::{Attribute, Attributes, CharacterSnapshot, Skills};

#[derive(Clone, Debug, PartialEq)]
pub struct CombatStats {
    pub attributes: Attributes,
    pub skills: Skills,
    pub modifiers: EffectModifiers,
    pub armor: i32,
    pub magic_resistance: i32,
    /// Holding the Defending stance (misses become parries).
    pub defending: bool,
}

impl CombatStats {
    /// Builds stats from a snapshot, its active effects, and ambient modifiers.
    pub fn of(character: &CharacterSnapshot, ambient: &EffectModifiers) -> Self {
        let modifiers = aggregate(&character.effects).combine(ambient);
        Self {
            attributes: character.attributes.plus(&modifiers.attributes),
            skills: character.skills.plus(&modifiers.skills),
            modifiers,
            armor: character.armor,
            magic_resistance: character.magic_resistance,
            defending: character.effects.has(StatusEffectKind::Defending),
        }
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.attributes.modifier(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::StatusEffectEngine;
    use crate::state::CharacterId;

    #[test]
    fn effects_fold_into_attributes_and_skills() {
        let engine = StatusEffectEngine::standard();
        let mut hero =
            CharacterSnapshot::new(CharacterId(1), "Hero", 1, Attributes::AVERAGE, 20);
        engine.apply(&mut hero.effects, StatusEffectKind::Weakened, None);
        engine.apply(&mut hero.effects, StatusEffectKind::Inspired, None);
        engine.apply(&mut hero.effects, StatusEffectKind::Defending, None);

        let stats = CombatStats::of(&hero, &EffectModifiers::NEUTRAL);
        assert_eq!(stats.attributes.strength, 8);
        assert_eq!(stats.modifier(Attribute::Strength), -1);
        assert_eq!(stats.skills.combat, 5);
        assert!(stats.defending);
    }

    #[test]
    fn ambient_modifiers_apply_on_top() {
        let hero = CharacterSnapshot::new(CharacterId(1), "Hero", 1, Attributes::AVERAGE, 20);
        let fog = EffectModifiers::NEUTRAL.with_accuracy(-10);
        let stats = CombatStats::of(&hero, &fog);
        assert_eq!(stats.modifiers.accuracy, -10);
        assert!(!stats.defending);
    }
}
