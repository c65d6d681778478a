use crate::effects::StatusEffectKind;

/// Combat balance constants and tunable parameters.
///
/// All percentile values are on the d100 scale (1-100 inclusive).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit chance before attribute, skill, and effect adjustments.
    pub base_accuracy: i32,
    /// Rolls at or below this value always fumble.
    pub fumble_threshold: u32,
    /// Rolls at or above this value always land as critical hits.
    pub critical_threshold: u32,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: u32,
    /// Base damage of an attack made without a weapon.
    pub unarmed_damage: u32,
    /// Sides of the initiative die.
    pub initiative_die: u32,
    /// Baseline flee chance (percent) before relative stats.
    pub flee_base_chance: i32,
    /// Hard cap on rounds; exceeding it ends the session in a draw.
    pub max_rounds: u32,
    /// Experience awarded per level of each defeated enemy.
    pub experience_per_level: u32,
    /// Action points granted to combatants that don't specify their own.
    pub default_action_points: u32,
    /// Duration of the `Defending` effect granted by the Defend action.
    pub defend_duration: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of participants in one session (both sides).
    pub const MAX_PARTICIPANTS: usize = 32;
    /// One slot per effect kind; re-applying an effect never needs a new slot.
    pub const MAX_STATUS_EFFECTS: usize = <StatusEffectKind as strum::EnumCount>::COUNT;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ACCURACY: i32 = 60;
    pub const DEFAULT_FUMBLE_THRESHOLD: u32 = 5;
    pub const DEFAULT_CRITICAL_THRESHOLD: u32 = 95;
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;

    pub fn new() -> Self {
        Self {
            base_accuracy: Self::DEFAULT_BASE_ACCURACY,
            fumble_threshold: Self::DEFAULT_FUMBLE_THRESHOLD,
            critical_threshold: Self::DEFAULT_CRITICAL_THRESHOLD,
            crit_multiplier: 2,
            unarmed_damage: 2,
            initiative_die: 20,
            flee_base_chance: 50,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            experience_per_level: 50,
            default_action_points: 1,
            defend_duration: 1,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_default_action_points(mut self, action_points: u32) -> Self {
        self.default_action_points = action_points.max(1);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
