//! Combat resolution.
//!
//! Pure functions over [`CombatStats`](crate::stats::CombatStats): hit
//! chance, raw damage, defense, and the combined [`resolve_attack`]. No
//! randomness happens here; the caller supplies the d100 roll.
mod damage;
mod hit;
mod result;

pub use damage::{
    AttackStyle, DamageSource, DamageType, DefenseKind, defense_against, mitigate, raw_damage,
};
pub use hit::{calculate_hit_chance, check_hit};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
