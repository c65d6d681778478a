use crate::combat::DamageType;
use crate::effects::{EffectGrant, StatusEffectKind};

/// Stable identifier of an item in the external inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Resolves usable items into combat effects.
///
/// The inventory itself (ownership, quantities, consumption) stays with the
/// caller; the engine only needs to know what using an item does.
pub trait ItemOracle: Send + Sync {
    fn resolve(&self, item: ItemId) -> Option<ItemEffect>;
}

/// What using an item does to its target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemEffect {
    pub name: String,
    pub healing: u32,
    pub mana: u32,
    pub damage: u32,
    pub damage_type: DamageType,
    pub effects: Vec<EffectGrant>,
    pub cures: Vec<StatusEffectKind>,
}

impl ItemEffect {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = healing;
        self
    }

    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = mana;
        self
    }

    pub fn with_damage(mut self, damage: u32, damage_type: DamageType) -> Self {
        self.damage = damage;
        self.damage_type = damage_type;
        self
    }

    pub fn granting(mut self, grant: EffectGrant) -> Self {
        self.effects.push(grant);
        self
    }

    pub fn curing(mut self, kind: StatusEffectKind) -> Self {
        self.cures.push(kind);
        self
    }
}
