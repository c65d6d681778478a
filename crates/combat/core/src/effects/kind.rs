/// Closed set of status effects the engine knows how to track.
///
/// Data files and external callers refer to effects by these identifiers
/// (parsed case-insensitively), never by display name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage and healing over time
    // ========================================================================
    /// Poison damage every turn; stacks.
    Poisoned,
    /// Fire damage every turn.
    Burning,
    /// Physical damage every other turn.
    Bleeding,
    /// Healing every turn.
    Regenerating,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Accuracy and luck bonus.
    Blessed,
    /// Extra action point, dodge, and movement.
    Hasted,
    /// Outgoing damage multiplier; stacks multiplicatively.
    Empowered,
    /// Flat damage reduction.
    Shielded,
    /// Short-lived guard granted by the Defend action.
    Defending,
    /// Combat and magic skill bonus.
    Inspired,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Accuracy and luck penalty until cured.
    Cursed,
    /// Reduced movement and dodge.
    Slowed,
    /// Outgoing damage penalty and reduced strength.
    Weakened,
    /// Accuracy penalty.
    Frightened,

    // ========================================================================
    // Neutral
    // ========================================================================
    /// Spell focus: better magic, slower feet.
    Concentrating,
}
