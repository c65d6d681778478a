//! Status effect engine.
//!
//! Definitions live in an immutable [`EffectCatalog`]; per-character state is
//! a [`StatusEffects`] set of stack-resolved instances. [`StatusEffectEngine`]
//! owns the lifecycle: apply (with stacking), tick, aggregate, remove, clear.
//!
//! # Stacking
//!
//! Multiplicative modifiers compound by exponentiation (`base^stacks`);
//! additive ones scale linearly (`base × stacks`). See [`EffectModifiers`].
mod catalog;
mod definition;
mod engine;
mod instance;
mod kind;
mod modifiers;

pub use catalog::EffectCatalog;
pub use definition::{EffectCategory, EffectDefinition, EffectDuration, EffectGrant, HookEffect};
pub use engine::{
    Applied, ApplyOutcome, HookFired, HookTrigger, StatusEffectEngine, TickReport, aggregate,
};
pub use instance::{StatusEffectInstance, StatusEffects};
pub use kind::StatusEffectKind;
pub use modifiers::EffectModifiers;
