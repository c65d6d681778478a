//! Modifier bundles carried by effect definitions and instances.

use crate::state::{Attributes, Skills};

/// Numeric adjustments an effect applies to its bearer.
///
/// Fields ending in `_multiplier` are multiplicative: stacking raises them to
/// the power of the stack count and aggregation multiplies them together.
/// Every other field is an additive delta: stacking multiplies it by the
/// stack count and aggregation sums it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectModifiers {
    pub attributes: Attributes,
    pub skills: Skills,
    pub damage_multiplier: f64,
    pub healing_multiplier: f64,
    pub movement_multiplier: f64,
    pub accuracy: i32,
    pub dodge: i32,
    pub action_points: i32,
    pub damage_reduction: i32,
}

impl EffectModifiers {
    /// Identity bundle: multipliers at 1.0, deltas at zero.
    pub const NEUTRAL: Self = Self {
        attributes: Attributes::ZERO,
        skills: Skills::ZERO,
        damage_multiplier: 1.0,
        healing_multiplier: 1.0,
        movement_multiplier: 1.0,
        accuracy: 0,
        dodge: 0,
        action_points: 0,
        damage_reduction: 0,
    };

    /// Resolves this base bundle at `stacks` applications.
    pub fn stacked(&self, stacks: u32) -> Self {
        let n = stacks.max(1) as i32;
        Self {
            attributes: self.attributes.scaled(n),
            skills: self.skills.scaled(n),
            damage_multiplier: self.damage_multiplier.powi(n),
            healing_multiplier: self.healing_multiplier.powi(n),
            movement_multiplier: self.movement_multiplier.powi(n),
            accuracy: self.accuracy * n,
            dodge: self.dodge * n,
            action_points: self.action_points * n,
            damage_reduction: self.damage_reduction * n,
        }
    }

    /// Composes two bundles as if both were active at once.
    pub fn combine(&self, other: &EffectModifiers) -> Self {
        Self {
            attributes: self.attributes.plus(&other.attributes),
            skills: self.skills.plus(&other.skills),
            damage_multiplier: self.damage_multiplier * other.damage_multiplier,
            healing_multiplier: self.healing_multiplier * other.healing_multiplier,
            movement_multiplier: self.movement_multiplier * other.movement_multiplier,
            accuracy: self.accuracy + other.accuracy,
            dodge: self.dodge + other.dodge,
            action_points: self.action_points + other.action_points,
            damage_reduction: self.damage_reduction + other.damage_reduction,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_damage_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    pub fn with_healing_multiplier(mut self, multiplier: f64) -> Self {
        self.healing_multiplier = multiplier;
        self
    }

    pub fn with_movement_multiplier(mut self, multiplier: f64) -> Self {
        self.movement_multiplier = multiplier;
        self
    }

    pub fn with_accuracy(mut self, accuracy: i32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_dodge(mut self, dodge: i32) -> Self {
        self.dodge = dodge;
        self
    }

    pub fn with_action_points(mut self, action_points: i32) -> Self {
        self.action_points = action_points;
        self
    }

    pub fn with_damage_reduction(mut self, damage_reduction: i32) -> Self {
        self.damage_reduction = damage_reduction;
        self
    }
}

impl Default for EffectModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
