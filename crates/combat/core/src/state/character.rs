//! Character snapshots supplied by the character provider.

use crate::combat::DamageType;
use crate::effects::StatusEffects;

use super::{CharacterId, ResourceMeter};

/// Primary attributes, also used as additive attribute deltas by effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub luck: i32,
}

impl Attributes {
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    pub const AVERAGE: Self = Self::new(10, 10, 10, 10, 10, 10, 10);

    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
        luck: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
            luck,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
            Attribute::Luck => self.luck,
        }
    }

    /// Roll modifier of one attribute: `floor((value - 10) / 2)`.
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        attribute_modifier(self.get(attribute))
    }

    /// Field-wise sum.
    pub fn plus(&self, other: &Attributes) -> Attributes {
        Attributes {
            strength: self.strength + other.strength,
            dexterity: self.dexterity + other.dexterity,
            constitution: self.constitution + other.constitution,
            intelligence: self.intelligence + other.intelligence,
            wisdom: self.wisdom + other.wisdom,
            charisma: self.charisma + other.charisma,
            luck: self.luck + other.luck,
        }
    }

    /// Field-wise multiplication by a scalar.
    pub fn scaled(&self, factor: i32) -> Attributes {
        Attributes {
            strength: self.strength * factor,
            dexterity: self.dexterity * factor,
            constitution: self.constitution * factor,
            intelligence: self.intelligence * factor,
            wisdom: self.wisdom * factor,
            charisma: self.charisma * factor,
            luck: self.luck * factor,
        }
    }
}

/// D&D-style attribute modifier, floored for values below 10.
///
/// - 10-11 → +0
/// - 12-13 → +1
/// - 8-9 → -1
/// - 1 → -5
pub fn attribute_modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
    Luck,
}

/// Skill vector, also used as additive skill deltas by effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Skills {
    pub combat: i32,
    pub magic: i32,
    pub stealth: i32,
    pub diplomacy: i32,
    pub survival: i32,
    pub investigation: i32,
    pub crafting: i32,
    pub lore: i32,
}

impl Skills {
    pub const ZERO: Self = Self {
        combat: 0,
        magic: 0,
        stealth: 0,
        diplomacy: 0,
        survival: 0,
        investigation: 0,
        crafting: 0,
        lore: 0,
    };

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Combat => self.combat,
            Skill::Magic => self.magic,
            Skill::Stealth => self.stealth,
            Skill::Diplomacy => self.diplomacy,
            Skill::Survival => self.survival,
            Skill::Investigation => self.investigation,
            Skill::Crafting => self.crafting,
            Skill::Lore => self.lore,
        }
    }

    pub fn plus(&self, other: &Skills) -> Skills {
        Skills {
            combat: self.combat + other.combat,
            magic: self.magic + other.magic,
            stealth: self.stealth + other.stealth,
            diplomacy: self.diplomacy + other.diplomacy,
            survival: self.survival + other.survival,
            investigation: self.investigation + other.investigation,
            crafting: self.crafting + other.crafting,
            lore: self.lore + other.lore,
        }
    }

    pub fn scaled(&self, factor: i32) -> Skills {
        Skills {
            combat: self.combat * factor,
            magic: self.magic * factor,
            stealth: self.stealth * factor,
            diplomacy: self.diplomacy * factor,
            survival: self.survival * factor,
            investigation: self.investigation * factor,
            crafting: self.crafting * factor,
            lore: self.lore * factor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Combat,
    Magic,
    Stealth,
    Diplomacy,
    Survival,
    Investigation,
    Crafting,
    Lore,
}

/// Equipped weapon, already resolved by the equipment system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
}

impl Weapon {
    pub fn new(name: impl Into<String>, base_damage: u32, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            base_damage,
            damage_type,
        }
    }
}

/// Working copy of a character for the duration of one encounter.
///
/// Equipment bonuses are already folded into `armor`, `magic_resistance`,
/// and `weapon`. The engine mutates health, mana, and effects only.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Skills,
    pub health: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic_resistance: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: StatusEffects,
}

impl CharacterSnapshot {
    /// Creates a character at full health with no equipment or effects.
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        level: u32,
        attributes: Attributes,
        max_health: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            attributes,
            skills: Skills::ZERO,
            health: ResourceMeter::full(max_health),
            mana: ResourceMeter::default(),
            armor: 0,
            magic_resistance: 0,
            weapon: None,
            effects: StatusEffects::empty(),
        }
    }

    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_mana(mut self, max_mana: u32) -> Self {
        self.mana = ResourceMeter::full(max_mana);
        self
    }

    pub fn with_health(mut self, current: u32) -> Self {
        self.health = ResourceMeter::new(current, self.health.max());
        self
    }

    pub fn with_defenses(mut self, armor: i32, magic_resistance: i32) -> Self {
        self.armor = armor;
        self.magic_resistance = magic_resistance;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_floor_below_ten() {
        assert_eq!(attribute_modifier(10), 0);
        assert_eq!(attribute_modifier(11), 0);
        assert_eq!(attribute_modifier(12), 1);
        assert_eq!(attribute_modifier(9), -1);
        assert_eq!(attribute_modifier(8), -1);
        assert_eq!(attribute_modifier(1), -5);
        assert_eq!(attribute_modifier(20), 5);
    }

    #[test]
    fn attribute_deltas_scale_and_sum() {
        let delta = Attributes {
            strength: 2,
            luck: -1,
            ..Attributes::ZERO
        };
        let total = Attributes::AVERAGE.plus(&delta.scaled(3));
        assert_eq!(total.strength, 16);
        assert_eq!(total.luck, 7);
        assert_eq!(total.modifier(Attribute::Strength), 3);
    }

    #[test]
    fn snapshot_health_is_clamped() {
        let hero = CharacterSnapshot::new(CharacterId(1), "Hero", 3, Attributes::AVERAGE, 30)
            .with_health(99);
        assert_eq!(hero.health.current(), 30);
        assert!(hero.is_alive());
    }
}
