//! Provider that replays a fixed list of actions.

use std::collections::VecDeque;

use async_trait::async_trait;
use combat_core::{CombatAction, CombatSession, ParticipantId};
use tokio::sync::Mutex;

use crate::api::{ActionProvider, Result};

/// Hands out queued actions in order, then waits.
///
/// Queued actions keep their own actor id, so a script written for one
/// participant is replayed verbatim even if someone else is asked.
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    script: Mutex<VecDeque<CombatAction>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = CombatAction>) -> Self {
        Self {
            script: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn push(&self, action: CombatAction) {
        self.script.lock().await.push_back(action);
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(
        &self,
        actor: ParticipantId,
        _session: &CombatSession,
    ) -> Result<CombatAction> {
        Ok(self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| CombatAction::wait(actor)))
    }
}
