//! Effects attached to a single character.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

use super::{EffectDuration, EffectModifiers, StatusEffectKind};

/// One active effect on a character.
///
/// `modifiers` is already resolved for `stacks`; it is recomputed only when
/// the stack count changes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectInstance {
    pub kind: StatusEffectKind,
    pub stacks: u32,
    pub remaining: EffectDuration,
    pub modifiers: EffectModifiers,
}

/// Ordered set of active effects plus the bearer's tick counter.
///
/// Holds at most one instance per kind, in application order. Mutation goes
/// through [`StatusEffectEngine`](super::StatusEffectEngine).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    instances: ArrayVec<StatusEffectInstance, { CombatConfig::MAX_STATUS_EFFECTS }>,
    /// Number of tick calls made on this character so far.
    turns: u64,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffectInstance> {
        self.instances.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub(crate) fn get_mut(&mut self, kind: StatusEffectKind) -> Option<&mut StatusEffectInstance> {
        self.instances.iter_mut().find(|e| e.kind == kind)
    }

    /// Returns false when the set is full.
    pub(crate) fn push(&mut self, instance: StatusEffectInstance) -> bool {
        self.instances.try_push(instance).is_ok()
    }

    pub(crate) fn take(&mut self, kind: StatusEffectKind) -> Option<StatusEffectInstance> {
        let index = self.instances.iter().position(|e| e.kind == kind)?;
        Some(self.instances.remove(index))
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = StatusEffectInstance> + '_ {
        self.instances.drain(..)
    }

    pub(crate) fn instances_mut(&mut self) -> impl Iterator<Item = &mut StatusEffectInstance> {
        self.instances.iter_mut()
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&mut StatusEffectInstance) -> bool) {
        self.instances.retain(keep);
    }

    pub(crate) fn advance_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }
}
