//! Immutable effect definitions and their building blocks.

use crate::combat::DamageType;

use super::{EffectModifiers, StatusEffectKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectCategory {
    Buff,
    Debuff,
    Neutral,
}

/// How long an effect lasts.
///
/// Ordering places every finite duration below `UntilCured`, so refreshing
/// with `max` never shortens an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Remaining turns of the bearer.
    Turns(u32),
    /// Stays until explicitly removed.
    UntilCured,
}

impl EffectDuration {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Turns(0))
    }

    /// One turn shorter; `UntilCured` never changes.
    pub fn decremented(self) -> Self {
        match self {
            Self::Turns(n) => Self::Turns(n.saturating_sub(1)),
            Self::UntilCured => Self::UntilCured,
        }
    }

    pub fn turns(&self) -> Option<u32> {
        match self {
            Self::Turns(n) => Some(*n),
            Self::UntilCured => None,
        }
    }
}

impl std::fmt::Display for EffectDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Turns(n) => write!(f, "{n} turns"),
            Self::UntilCured => write!(f, "until cured"),
        }
    }
}

/// Direct damage and/or healing produced by an effect hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HookEffect {
    pub damage: u32,
    pub healing: u32,
    pub damage_type: DamageType,
}

impl HookEffect {
    pub const fn damage(amount: u32, damage_type: DamageType) -> Self {
        Self {
            damage: amount,
            healing: 0,
            damage_type,
        }
    }

    pub const fn healing(amount: u32) -> Self {
        Self {
            damage: 0,
            healing: amount,
            damage_type: DamageType::True,
        }
    }

    pub fn scaled(&self, stacks: u32) -> Self {
        Self {
            damage: self.damage.saturating_mul(stacks),
            healing: self.healing.saturating_mul(stacks),
            damage_type: self.damage_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.damage == 0 && self.healing == 0
    }
}

/// Catalog entry describing one effect kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub kind: StatusEffectKind,
    pub name: String,
    pub category: EffectCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stacks"))]
    pub max_stacks: u32,
    pub duration: EffectDuration,
    /// Turns between `on_tick` firings; 0 never fires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_interval: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: EffectModifiers,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_apply: Option<HookEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_tick: Option<HookEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_remove: Option<HookEffect>,
}

#[cfg(feature = "serde")]
fn default_max_stacks() -> u32 {
    1
}

impl EffectDefinition {
    /// Non-stacking definition lasting `turns` with no modifiers or hooks.
    pub fn new(kind: StatusEffectKind, category: EffectCategory, turns: u32) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            category,
            stackable: false,
            max_stacks: 1,
            duration: EffectDuration::Turns(turns),
            tick_interval: 0,
            modifiers: EffectModifiers::NEUTRAL,
            on_apply: None,
            on_tick: None,
            on_remove: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn stacking(mut self, max_stacks: u32) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn until_cured(mut self) -> Self {
        self.duration = EffectDuration::UntilCured;
        self
    }

    pub fn ticking(mut self, interval: u32, hook: HookEffect) -> Self {
        self.tick_interval = interval;
        self.on_tick = Some(hook);
        self
    }

    pub fn with_modifiers(mut self, modifiers: EffectModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on_apply(mut self, hook: HookEffect) -> Self {
        self.on_apply = Some(hook);
        self
    }

    pub fn on_remove(mut self, hook: HookEffect) -> Self {
        self.on_remove = Some(hook);
        self
    }

    /// Effective stack ceiling (1 for non-stackable effects).
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stacks.max(1)
        } else {
            1
        }
    }
}

/// Request to apply an effect, as carried by spells and items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectGrant {
    pub kind: StatusEffectKind,
    /// Overrides the definition's default duration when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<EffectDuration>,
}

impl EffectGrant {
    pub const fn new(kind: StatusEffectKind) -> Self {
        Self {
            kind,
            duration: None,
        }
    }

    pub const fn for_turns(kind: StatusEffectKind, turns: u32) -> Self {
        Self {
            kind,
            duration: Some(EffectDuration::Turns(turns)),
        }
    }
}
