//! Apply/tick/aggregate/remove lifecycle of status effects.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    EffectCatalog, EffectDuration, EffectGrant, EffectModifiers, HookEffect, StatusEffectInstance,
    StatusEffectKind, StatusEffects,
};

/// Which hook produced a [`HookFired`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookTrigger {
    Apply,
    Tick,
    Remove,
}

/// Damage/healing emitted by a hook; the caller applies it to health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookFired {
    pub kind: StatusEffectKind,
    pub trigger: HookTrigger,
    pub effect: HookEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// No instance existed; a new one was attached.
    Created,
    /// Stackable effect gained a stack.
    Stacked,
    /// Stackable effect already at max stacks; only the duration was refreshed.
    Refreshed,
    /// Non-stackable effect replaced the existing instance.
    Replaced,
}

/// Result of a successful apply.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Applied {
    pub kind: StatusEffectKind,
    pub outcome: ApplyOutcome,
    pub stacks: u32,
    pub remaining: EffectDuration,
    pub hook: Option<HookFired>,
}

/// Everything that happened during one tick of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bearer's tick counter after this tick.
    pub turn: u64,
    pub fired: Vec<HookFired>,
    pub expired: Vec<StatusEffectKind>,
}

impl TickReport {
    pub fn total_damage(&self) -> u32 {
        self.fired.iter().map(|h| h.effect.damage).sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.fired.iter().map(|h| h.effect.healing).sum()
    }

    pub fn is_quiet(&self) -> bool {
        self.fired.is_empty() && self.expired.is_empty()
    }
}

/// Status effect service.
///
/// Holds the shared catalog; all per-character state lives in the
/// [`StatusEffects`] values passed in, so one engine can serve any number of
/// sessions concurrently.
#[derive(Clone, Debug)]
pub struct StatusEffectEngine {
    catalog: Arc<EffectCatalog>,
}

impl StatusEffectEngine {
    pub fn new(catalog: Arc<EffectCatalog>) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(EffectCatalog::standard()))
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    /// Applies `kind` to a character.
    ///
    /// `duration` overrides the definition's default when set. Returns `None`
    /// (and logs a warning) if the catalog has no definition for `kind`; the
    /// effect list is left untouched in that case.
    pub fn apply(
        &self,
        effects: &mut StatusEffects,
        kind: StatusEffectKind,
        duration: Option<EffectDuration>,
    ) -> Option<Applied> {
        let Some(definition) = self.catalog.get(kind) else {
            warn!(effect = %kind, "unknown status effect; target left unchanged");
            return None;
        };

        let requested = match duration.unwrap_or(definition.duration) {
            EffectDuration::Turns(n) => EffectDuration::Turns(n.max(1)),
            EffectDuration::UntilCured => EffectDuration::UntilCured,
        };
        let limit = definition.stack_limit();

        let (outcome, stacks, remaining) = match effects.get_mut(kind) {
            Some(existing) if definition.stackable => {
                let stacks = (existing.stacks + 1).min(limit);
                let outcome = if stacks > existing.stacks {
                    ApplyOutcome::Stacked
                } else {
                    ApplyOutcome::Refreshed
                };
                existing.stacks = stacks;
                existing.remaining = existing.remaining.max(requested);
                existing.modifiers = definition.modifiers.stacked(stacks);
                (outcome, stacks, existing.remaining)
            }
            Some(existing) => {
                *existing = StatusEffectInstance {
                    kind,
                    stacks: 1,
                    remaining: requested,
                    modifiers: definition.modifiers.stacked(1),
                };
                (ApplyOutcome::Replaced, 1, requested)
            }
            None => {
                let instance = StatusEffectInstance {
                    kind,
                    stacks: 1,
                    remaining: requested,
                    modifiers: definition.modifiers.stacked(1),
                };
                if !effects.push(instance) {
                    warn!(effect = %kind, "status effect set is full; effect dropped");
                    return None;
                }
                (ApplyOutcome::Created, 1, requested)
            }
        };

        debug!(effect = %kind, ?outcome, stacks, %remaining, "status effect applied");

        let hook = definition.on_apply.map(|effect| HookFired {
            kind,
            trigger: HookTrigger::Apply,
            effect,
        });

        Some(Applied {
            kind,
            outcome,
            stacks,
            remaining,
            hook,
        })
    }

    /// Applies an [`EffectGrant`] from a spell or item.
    pub fn grant(&self, effects: &mut StatusEffects, grant: EffectGrant) -> Option<Applied> {
        self.apply(effects, grant.kind, grant.duration)
    }

    /// Advances a character's effects by one turn.
    ///
    /// Increments the bearer's tick counter, fires `on_tick` for effects whose
    /// interval divides the counter (scaled by stack count), decrements every
    /// finite duration, and removes expired instances (firing `on_remove`).
    pub fn tick(&self, effects: &mut StatusEffects) -> TickReport {
        let turn = effects.advance_turn();
        let mut report = TickReport {
            turn,
            ..TickReport::default()
        };

        for instance in effects.instances_mut() {
            if let Some(definition) = self.catalog.get(instance.kind)
                && definition.tick_interval > 0
                && turn % u64::from(definition.tick_interval) == 0
                && let Some(hook) = definition.on_tick
            {
                let scaled = hook.scaled(instance.stacks);
                if !scaled.is_empty() {
                    report.fired.push(HookFired {
                        kind: instance.kind,
                        trigger: HookTrigger::Tick,
                        effect: scaled,
                    });
                }
            }
            instance.remaining = instance.remaining.decremented();
        }

        effects.retain(|instance| {
            if instance.remaining.is_expired() {
                report.expired.push(instance.kind);
                false
            } else {
                true
            }
        });

        for kind in &report.expired {
            if let Some(hook) = self.removal_hook(*kind) {
                report.fired.push(hook);
            }
        }

        report
    }

    /// Sums every active instance into one bundle.
    ///
    /// Always computed from the current instances; never cache the result
    /// across ticks.
    pub fn aggregate(&self, effects: &StatusEffects) -> EffectModifiers {
        aggregate(effects)
    }

    /// Cures one effect. Returns `None` if it was not active.
    pub fn remove(
        &self,
        effects: &mut StatusEffects,
        kind: StatusEffectKind,
    ) -> Option<Option<HookFired>> {
        effects.take(kind)?;
        debug!(effect = %kind, "status effect removed");
        Some(self.removal_hook(kind))
    }

    /// Removes every effect, firing `on_remove` for each.
    pub fn clear(&self, effects: &mut StatusEffects) -> Vec<HookFired> {
        let removed: Vec<StatusEffectKind> = effects.drain().map(|e| e.kind).collect();
        removed
            .into_iter()
            .filter_map(|kind| self.removal_hook(kind))
            .collect()
    }

    fn removal_hook(&self, kind: StatusEffectKind) -> Option<HookFired> {
        let effect = self.catalog.get(kind)?.on_remove?;
        Some(HookFired {
            kind,
            trigger: HookTrigger::Remove,
            effect,
        })
    }
}

impl Default for StatusEffectEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Combined modifiers of every active instance.
pub fn aggregate(effects: &StatusEffects) -> EffectModifiers {
    effects
        .iter()
        .fold(EffectModifiers::NEUTRAL, |acc, instance| {
            acc.combine(&instance.modifiers)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::effects::{EffectCategory, EffectDefinition};
    use StatusEffectKind::*;

    fn engine() -> StatusEffectEngine {
        StatusEffectEngine::standard()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn stackable_effect_compounds_multipliers_by_power() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        for _ in 0..3 {
            engine.apply(&mut effects, Empowered, None).unwrap();
        }
        let instance = effects.get(Empowered).unwrap();
        assert_eq!(instance.stacks, 3);
        assert!(approx(instance.modifiers.damage_multiplier, 1.2_f64.powi(3)));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn stacks_never_exceed_definition_maximum() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        let mut last = None;
        for _ in 0..5 {
            last = engine.apply(&mut effects, Hasted, None);
        }
        let applied = last.unwrap();
        assert_eq!(applied.stacks, 2);
        assert_eq!(applied.outcome, ApplyOutcome::Refreshed);

        let instance = effects.get(Hasted).unwrap();
        assert_eq!(instance.modifiers.action_points, 2);
        assert_eq!(instance.modifiers.dodge, 10);
        assert!(approx(instance.modifiers.movement_multiplier, 2.25));
    }

    #[test]
    fn additive_fields_scale_linearly_with_stacks() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        for _ in 0..3 {
            engine.apply(&mut effects, Slowed, None);
        }
        let instance = effects.get(Slowed).unwrap();
        assert_eq!(instance.modifiers.dodge, -15);
        assert!(approx(instance.modifiers.movement_multiplier, 0.125));
    }

    #[test]
    fn restacking_keeps_longer_duration() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Poisoned, Some(EffectDuration::Turns(8)));
        let applied = engine.apply(&mut effects, Poisoned, None).unwrap();
        assert_eq!(applied.remaining, EffectDuration::Turns(8));
        assert_eq!(applied.stacks, 2);
    }

    #[test]
    fn non_stackable_reapply_replaces_with_refreshed_duration() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Shielded, None);
        engine.tick(&mut effects);
        assert_eq!(
            effects.get(Shielded).unwrap().remaining,
            EffectDuration::Turns(2)
        );

        let applied = engine.apply(&mut effects, Shielded, None).unwrap();
        assert_eq!(applied.outcome, ApplyOutcome::Replaced);
        assert_eq!(effects.len(), 1);
        let instance = effects.get(Shielded).unwrap();
        assert_eq!(instance.stacks, 1);
        assert_eq!(instance.remaining, EffectDuration::Turns(3));
    }

    #[test]
    fn poison_three_stacks_ticks_for_six() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        for _ in 0..3 {
            engine.apply(&mut effects, Poisoned, None);
        }

        let report = engine.tick(&mut effects);
        assert_eq!(report.total_damage(), 6);
        assert_eq!(report.fired[0].effect.damage_type, DamageType::Poison);
        assert_eq!(
            effects.get(Poisoned).unwrap().remaining,
            EffectDuration::Turns(4)
        );
    }

    #[test]
    fn ticking_duration_times_removes_effect() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Burning, None);

        for _ in 0..2 {
            let report = engine.tick(&mut effects);
            assert!(report.expired.is_empty());
        }
        assert_eq!(
            effects.get(Burning).unwrap().remaining,
            EffectDuration::Turns(1)
        );

        let report = engine.tick(&mut effects);
        assert_eq!(report.expired, vec![Burning]);
        assert!(!effects.has(Burning));
    }

    #[test]
    fn tick_interval_uses_bearer_turn_counter() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Bleeding, None);

        let first = engine.tick(&mut effects);
        let second = engine.tick(&mut effects);
        assert_eq!(first.total_damage(), 0);
        assert_eq!(second.total_damage(), 2);
        assert_eq!(second.turn, 2);
    }

    #[test]
    fn zero_interval_never_ticks_but_still_decays() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Blessed, None);
        let report = engine.tick(&mut effects);
        assert!(report.fired.is_empty());
        assert_eq!(
            effects.get(Blessed).unwrap().remaining,
            EffectDuration::Turns(2)
        );
    }

    #[test]
    fn until_cured_effects_survive_ticks() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Cursed, None);
        for _ in 0..20 {
            engine.tick(&mut effects);
        }
        assert!(effects.has(Cursed));
        assert!(engine.remove(&mut effects, Cursed).is_some());
        assert!(!effects.has(Cursed));
        assert!(engine.remove(&mut effects, Cursed).is_none());
    }

    #[test]
    fn unknown_effect_leaves_list_unchanged() {
        let engine = StatusEffectEngine::new(Arc::new(EffectCatalog::empty()));
        let mut effects = StatusEffects::empty();
        assert!(engine.apply(&mut effects, Poisoned, None).is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn aggregate_composes_across_effects() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Empowered, None);
        engine.apply(&mut effects, Weakened, None);
        engine.apply(&mut effects, Shielded, None);
        engine.apply(&mut effects, Defending, None);

        let total = engine.aggregate(&effects);
        assert!(approx(total.damage_multiplier, 1.2 * 0.8));
        assert_eq!(total.damage_reduction, 5);
        assert_eq!(total.attributes.strength, -2);
    }

    #[test]
    fn aggregate_reflects_expiry() {
        let engine = engine();
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Defending, None);
        assert_eq!(engine.aggregate(&effects).dodge, 10);
        engine.tick(&mut effects);
        assert!(engine.aggregate(&effects).is_neutral());
    }

    #[test]
    fn clear_fires_remove_hooks() {
        let mut catalog = EffectCatalog::standard();
        catalog.insert(
            EffectDefinition::new(Regenerating, EffectCategory::Buff, 2)
                .on_remove(HookEffect::healing(10)),
        );
        let engine = StatusEffectEngine::new(Arc::new(catalog));
        let mut effects = StatusEffects::empty();
        engine.apply(&mut effects, Regenerating, None);
        engine.apply(&mut effects, Poisoned, None);

        let fired = engine.clear(&mut effects);
        assert!(effects.is_empty());
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].trigger, HookTrigger::Remove);
        assert_eq!(fired[0].effect.healing, 10);
    }

    #[test]
    fn apply_hook_is_reported() {
        let mut catalog = EffectCatalog::standard();
        catalog.insert(
            EffectDefinition::new(Burning, EffectCategory::Debuff, 2)
                .on_apply(HookEffect::damage(4, DamageType::Fire)),
        );
        let engine = StatusEffectEngine::new(Arc::new(catalog));
        let mut effects = StatusEffects::empty();
        let applied = engine.apply(&mut effects, Burning, None).unwrap();
        assert_eq!(applied.hook.unwrap().effect.damage, 4);
    }
}
