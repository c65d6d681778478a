//! Process-wide catalog of effect definitions.
//!
//! A catalog is built once (from [`EffectCatalog::standard`] and optional
//! data-file overrides) and then shared read-only behind an `Arc`.

use std::collections::BTreeMap;

use crate::combat::DamageType;
use crate::state::{Attributes, Skills};

use super::{
    EffectCategory, EffectDefinition, EffectModifiers, HookEffect, StatusEffectKind,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectCatalog {
    definitions: BTreeMap<StatusEffectKind, EffectDefinition>,
}

impl EffectCatalog {
    /// Catalog with no definitions; every apply is an unknown-effect no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in definitions for every [`StatusEffectKind`].
    pub fn standard() -> Self {
        use EffectCategory::*;
        use StatusEffectKind::*;

        let mut catalog = Self::empty();

        // Damage and healing over time
        catalog.insert(
            EffectDefinition::new(Poisoned, Debuff, 5)
                .stacking(10)
                .ticking(1, HookEffect::damage(2, DamageType::Poison)),
        );
        catalog.insert(
            EffectDefinition::new(Burning, Debuff, 3)
                .stacking(3)
                .ticking(1, HookEffect::damage(3, DamageType::Fire)),
        );
        catalog.insert(
            EffectDefinition::new(Bleeding, Debuff, 4)
                .stacking(5)
                .ticking(2, HookEffect::damage(2, DamageType::Physical)),
        );
        catalog.insert(
            EffectDefinition::new(Regenerating, Buff, 5).ticking(1, HookEffect::healing(3)),
        );

        // Buffs
        catalog.insert(
            EffectDefinition::new(Blessed, Buff, 3).with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_accuracy(10)
                    .with_attributes(Attributes {
                        luck: 2,
                        ..Attributes::ZERO
                    }),
            ),
        );
        catalog.insert(
            EffectDefinition::new(Hasted, Buff, 3).stacking(2).with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_movement_multiplier(1.5)
                    .with_action_points(1)
                    .with_dodge(5),
            ),
        );
        catalog.insert(
            EffectDefinition::new(Empowered, Buff, 3)
                .stacking(5)
                .with_modifiers(EffectModifiers::NEUTRAL.with_damage_multiplier(1.2)),
        );
        catalog.insert(
            EffectDefinition::new(Shielded, Buff, 3)
                .with_modifiers(EffectModifiers::NEUTRAL.with_damage_reduction(3)),
        );
        catalog.insert(
            EffectDefinition::new(Defending, Buff, 1).named("Defensive Stance").with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_damage_reduction(2)
                    .with_dodge(10),
            ),
        );
        catalog.insert(
            EffectDefinition::new(Inspired, Buff, 3).stacking(3).with_modifiers(
                EffectModifiers::NEUTRAL.with_skills(Skills {
                    combat: 5,
                    magic: 5,
                    ..Skills::ZERO
                }),
            ),
        );

        // Debuffs
        catalog.insert(
            EffectDefinition::new(Cursed, Debuff, 0)
                .until_cured()
                .with_modifiers(
                    EffectModifiers::NEUTRAL
                        .with_accuracy(-10)
                        .with_attributes(Attributes {
                            luck: -2,
                            ..Attributes::ZERO
                        }),
                ),
        );
        catalog.insert(
            EffectDefinition::new(Slowed, Debuff, 3).stacking(3).with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_movement_multiplier(0.5)
                    .with_dodge(-5),
            ),
        );
        catalog.insert(
            EffectDefinition::new(Weakened, Debuff, 3).stacking(3).with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_damage_multiplier(0.8)
                    .with_attributes(Attributes {
                        strength: -2,
                        ..Attributes::ZERO
                    }),
            ),
        );
        catalog.insert(
            EffectDefinition::new(Frightened, Debuff, 2)
                .with_modifiers(EffectModifiers::NEUTRAL.with_accuracy(-15)),
        );

        // Neutral
        catalog.insert(
            EffectDefinition::new(Concentrating, Neutral, 3).with_modifiers(
                EffectModifiers::NEUTRAL
                    .with_movement_multiplier(0.5)
                    .with_skills(Skills {
                        magic: 10,
                        ..Skills::ZERO
                    }),
            ),
        );

        catalog
    }

    /// Adds or replaces the definition for its kind, returning the previous one.
    pub fn insert(&mut self, definition: EffectDefinition) -> Option<EffectDefinition> {
        self.definitions.insert(definition.kind, definition)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&EffectDefinition> {
        self.definitions.get(&kind)
    }

    pub fn contains(&self, kind: StatusEffectKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn standard_catalog_covers_every_kind() {
        let catalog = EffectCatalog::standard();
        for kind in StatusEffectKind::iter() {
            assert!(catalog.contains(kind), "missing definition for {kind}");
        }
    }

    #[test]
    fn poison_matches_reference_numbers() {
        let catalog = EffectCatalog::standard();
        let poison = catalog.get(StatusEffectKind::Poisoned).unwrap();
        assert!(poison.stackable);
        assert_eq!(poison.max_stacks, 10);
        assert_eq!(poison.tick_interval, 1);
        assert_eq!(poison.on_tick.unwrap().damage, 2);
    }

    #[test]
    fn insert_overrides_existing_definition() {
        let mut catalog = EffectCatalog::standard();
        let previous = catalog.insert(
            EffectDefinition::new(StatusEffectKind::Shielded, EffectCategory::Buff, 9)
                .with_modifiers(EffectModifiers::NEUTRAL.with_damage_reduction(5)),
        );
        assert!(previous.is_some());
        assert_eq!(
            catalog
                .get(StatusEffectKind::Shielded)
                .unwrap()
                .modifiers
                .damage_reduction,
            5
        );
    }
}
