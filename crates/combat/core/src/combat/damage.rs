//! Damage sources, types, and defense.

use crate::state::Attribute;
use crate::stats::CombatStats;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type, deciding which defense applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Physical damage (melee, projectiles).
    #[default]
    Physical,
    /// Poison damage (toxins, venom); resisted by armor.
    Poison,
    /// Fire damage (burns, explosions).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Arcane damage (pure magic).
    Arcane,
    /// True damage (ignores all defenses).
    True,
}

/// Which defense a damage type is reduced by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefenseKind {
    Armor,
    MagicResistance,
    None,
}

impl DamageType {
    pub fn defense(self) -> DefenseKind {
        match self {
            Self::Physical | Self::Poison => DefenseKind::Armor,
            Self::Fire | Self::Cold | Self::Lightning | Self::Arcane => DefenseKind::MagicResistance,
            Self::True => DefenseKind::None,
        }
    }

    pub fn is_magical(self) -> bool {
        self.defense() == DefenseKind::MagicResistance
    }
}

// ============================================================================
// Damage Source
// ============================================================================

/// Delivery style of an attack: decides the scaling attribute and the skill
/// used for accuracy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackStyle {
    /// Weapon or unarmed: strength damage, combat skill accuracy.
    Physical,
    /// Spell: intelligence damage, magic skill accuracy.
    Magical,
}

impl AttackStyle {
    pub fn scaling_attribute(self) -> Attribute {
        match self {
            Self::Physical => Attribute::Strength,
            Self::Magical => Attribute::Intelligence,
        }
    }
}

/// Resolved origin of an attack's base damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageSource {
    pub base_damage: u32,
    pub damage_type: DamageType,
    pub style: AttackStyle,
}

impl DamageSource {
    pub const fn weapon(base_damage: u32, damage_type: DamageType) -> Self {
        Self {
            base_damage,
            damage_type,
            style: AttackStyle::Physical,
        }
    }

    pub const fn spell(base_damage: u32, damage_type: DamageType) -> Self {
        Self {
            base_damage,
            damage_type,
            style: AttackStyle::Magical,
        }
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Damage before hit/crit resolution and defenses.
///
/// ```text
/// raw = max(base + attribute_mod, 0) × attacker_damage_multiplier
/// ```
pub fn raw_damage(attacker: &CombatStats, source: &DamageSource) -> u32 {
    let stat_mod = attacker.modifier(source.style.scaling_attribute());
    let base = (source.base_damage as i64 + stat_mod as i64).max(0) as f64;
    (base * attacker.modifiers.damage_multiplier.max(0.0)).floor() as u32
}

/// Flat reduction the target applies against `damage_type`.
///
/// ```text
/// armor:      armor + con_mod + damage_reduction
/// resistance: magic_resistance + con_mod + damage_reduction
/// ```
///
/// Negative totals count as zero; true damage ignores defenses.
pub fn defense_against(target: &CombatStats, damage_type: DamageType) -> u32 {
    let flat = match damage_type.defense() {
        DefenseKind::Armor => target.armor,
        DefenseKind::MagicResistance => target.magic_resistance,
        DefenseKind::None => return 0,
    };
    let total = flat + target.modifier(Attribute::Constitution) + target.modifiers.damage_reduction;
    total.max(0) as u32
}

/// Applies flat defense to incoming damage (clamped at zero).
pub fn mitigate(damage: u32, target: &CombatStats, damage_type: DamageType) -> u32 {
    damage.saturating_sub(defense_against(target, damage_type))
}
