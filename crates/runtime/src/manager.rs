//! Session manager: tracking, locking, providers, and persistence.
//!
//! The manager owns the combat engines and a table of live sessions. Each
//! session sits behind its own mutex, so actions against one session run
//! strictly in order while different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{
    ActionEngine, ActionRequest, CombatAction, CombatConfig, CombatEnv, CombatEvent,
    CombatOutcome, CombatSession, Combatant, Controller, EffectCatalog, Environment,
    ErrorSeverity, GameError, Initiated, ItemOracle, PcgRng, RngOracle, SessionId,
    StatusEffectEngine, TurnManager, Victor,
};
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info, warn};

use crate::api::{
    ActionProvider, LootProvider, NarrativeGenerator, NoLoot, ProviderKind, Result, RoundResult,
    RoundStatus, RuntimeError, SubmitOutcome,
};
use crate::events::{Event, EventBus};
use crate::providers::AggressiveAiProvider;
use crate::repository::{InMemorySessionRepo, SessionRecord, SessionRepository};

/// Runtime configuration shared by the manager and its engines.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 256,
        }
    }
}

type SessionSlot = Arc<Mutex<CombatSession>>;

/// Entry point for running combat sessions.
///
/// # Locking
///
/// ```text
/// sessions: RwLock<HashMap<SessionId, Arc<Mutex<CombatSession>>>>
///             │                            └─ held for one action or one round
///             └─ held only to look up, insert, or remove a slot
/// ```
///
/// Providers are awaited while the session mutex is held. Persistence and
/// event publishing happen after it is released, on a cloned snapshot.
pub struct SessionManager {
    engine: ActionEngine,
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    repository: Arc<dyn SessionRepository>,
    rng: Arc<dyn RngOracle>,
    items: Option<Arc<dyn ItemOracle>>,
    ai_provider: Arc<dyn ActionProvider>,
    player_provider: Option<Arc<dyn ActionProvider>>,
    loot: Arc<dyn LootProvider>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
    events: EventBus,
}

impl SessionManager {
    /// Create a new manager builder
    pub fn builder() -> SessionManagerBuilder {
        SessionManagerBuilder::new()
    }

    pub fn engine(&self) -> &ActionEngine {
        &self.engine
    }

    pub fn config(&self) -> &CombatConfig {
        self.engine.config()
    }

    /// Event bus carrying every session's events.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to events from all sessions.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe_all()
    }

    fn env(&self) -> CombatEnv<'_> {
        let env = CombatEnv::new(self.rng.as_ref());
        match &self.items {
            Some(items) => env.with_items(items.as_ref()),
            None => env,
        }
    }

    /// Start a session with a random seed.
    pub async fn initiate(
        &self,
        players: Vec<Combatant>,
        enemies: Vec<Combatant>,
        environment: Option<Environment>,
    ) -> Result<CombatSession> {
        self.initiate_seeded(rand::random(), players, enemies, environment)
            .await
    }

    /// Start a session whose rolls all derive from `seed`.
    pub async fn initiate_seeded(
        &self,
        seed: u64,
        players: Vec<Combatant>,
        enemies: Vec<Combatant>,
        environment: Option<Environment>,
    ) -> Result<CombatSession> {
        let (session, events) = {
            let mut sessions = self.sessions.write().await;
            let id = loop {
                let id = SessionId(rand::random());
                if !sessions.contains_key(&id) && !self.repository.exists(id) {
                    break id;
                }
            };

            let Initiated { session, events } = combat_core::initiate(
                id,
                seed,
                players,
                enemies,
                environment.unwrap_or_default(),
                self.engine.turns(),
                self.rng.as_ref(),
            )?;
            sessions.insert(id, Arc::new(Mutex::new(session.clone())));
            (session, events)
        };

        info!(
            session = %session.id,
            seed,
            participants = session.participants.len(),
            "combat session tracked"
        );

        self.publish(session.id, &events);
        self.persist(session.clone())?;
        Ok(session)
    }

    /// Resolve one action against a session.
    ///
    /// Validation failures come back as `SubmitOutcome { success: false }`
    /// with the session untouched. Fatal engine errors are returned as
    /// [`RuntimeError::Action`]. A persistence failure is returned after the
    /// new session has already been committed in memory.
    pub async fn submit_action(&self, id: SessionId, action: CombatAction) -> Result<SubmitOutcome> {
        let slot = self.slot(id).await?;
        let resolution = {
            let mut session = slot.lock().await;
            match self.engine.resolve(&session, &action, &self.env()) {
                Ok(resolution) => {
                    *session = resolution.session.clone();
                    resolution
                }
                Err(err) if err.severity() == ErrorSeverity::Fatal => {
                    return Err(RuntimeError::Action(err));
                }
                Err(err) => {
                    debug!(session = %id, code = err.error_code(), error = %err, "action rejected");
                    return Ok(SubmitOutcome::rejected(session.clone(), err));
                }
            }
        };

        let narrative = match &self.narrator {
            Some(narrator) => narrator.narrate(&resolution.result, &resolution.session).await,
            None => None,
        };

        self.publish(id, &resolution.events);
        self.persist(resolution.session.clone())?;

        Ok(SubmitOutcome {
            success: true,
            session: resolution.session,
            result: Some(resolution.result),
            log_entries: resolution.log,
            events: resolution.events,
            narrative,
            error: None,
        })
    }

    /// Resolve a string-tagged request.
    ///
    /// An unknown `kind` is an integration bug and fails the call; a request
    /// missing a field is rejected like any other invalid action.
    pub async fn submit_request(
        &self,
        id: SessionId,
        request: ActionRequest,
    ) -> Result<SubmitOutcome> {
        match request.into_action() {
            Ok(action) => self.submit_action(id, action).await,
            Err(err) if err.severity() == ErrorSeverity::Fatal => Err(RuntimeError::Action(err)),
            Err(err) => Ok(SubmitOutcome::rejected(self.session(id).await?, err)),
        }
    }

    /// Drive turns until the round rolls over, the session ends, or a player
    /// needs to act and no player provider is configured.
    ///
    /// A provider action the engine rejects is replaced by Wait so the round
    /// always makes progress. If a provider fails mid-round, the actions
    /// already resolved stay committed: their events are published and the
    /// session is saved before the error is returned.
    pub async fn resolve_round(&self, id: SessionId) -> Result<RoundResult> {
        let slot = self.slot(id).await?;
        let mut session = slot.lock().await;
        let round = session.round;
        let env = self.env();

        let mut results = Vec::new();
        let mut log_entries = Vec::new();
        let mut events = Vec::new();

        let status: Result<RoundStatus> = loop {
            if session.is_ended() {
                break Ok(RoundStatus::Ended(session.victor.unwrap_or(Victor::Draw)));
            }
            if session.round != round {
                break Ok(RoundStatus::Completed);
            }
            let Some(active) = session.active_participant() else {
                warn!(session = %id, "active session has no active participant");
                break Ok(RoundStatus::Completed);
            };
            let actor = active.id;

            let provider = match (active.controller, &self.player_provider) {
                (Controller::Ai, _) => Arc::clone(&self.ai_provider),
                (Controller::Player, Some(provider)) => Arc::clone(provider),
                (Controller::Player, None) => break Ok(RoundStatus::AwaitingPlayer(actor)),
            };

            let action = match provider.provide_action(actor, &session).await {
                Ok(action) => action,
                Err(err) => break Err(err),
            };
            let resolution = match self.engine.resolve(&session, &action, &env) {
                Ok(resolution) => resolution,
                Err(err) if err.severity() == ErrorSeverity::Fatal => {
                    break Err(RuntimeError::Action(err));
                }
                Err(err) => {
                    warn!(
                        session = %id,
                        actor = %actor,
                        error = %err,
                        "provider chose an invalid action, waiting instead"
                    );
                    match self.engine.resolve(&session, &CombatAction::wait(actor), &env) {
                        Ok(resolution) => resolution,
                        Err(err) => break Err(RuntimeError::Action(err)),
                    }
                }
            };

            *session = resolution.session;
            results.push(resolution.result);
            log_entries.extend(resolution.log);
            events.extend(resolution.events);
        };

        let snapshot = session.clone();
        drop(session);

        // actions resolved before a failure are already committed
        self.publish(id, &events);
        let status = match status {
            Ok(status) => {
                self.persist(snapshot.clone())?;
                status
            }
            Err(err) => {
                if !results.is_empty() {
                    // persist logs its own failure; the round error wins
                    let _ = self.persist(snapshot);
                }
                return Err(err);
            }
        };

        debug!(session = %id, round, actions = results.len(), ?status, "round resolved");

        Ok(RoundResult {
            session: snapshot,
            round,
            status,
            results,
            log_entries,
            events,
        })
    }

    /// Resolve rounds until the session ends.
    ///
    /// Fails with [`RuntimeError::ProviderNotSet`] when a player-controlled
    /// participant comes up and no player provider is configured.
    pub async fn run_to_end(&self, id: SessionId) -> Result<CombatSession> {
        loop {
            let round = self.resolve_round(id).await?;
            match round.status {
                RoundStatus::Completed => continue,
                RoundStatus::Ended(_) => return Ok(round.session),
                RoundStatus::AwaitingPlayer(_) => {
                    return Err(RuntimeError::ProviderNotSet {
                        kind: ProviderKind::Player,
                    });
                }
            }
        }
    }

    /// Conclude an ended session: rewards, loot, summary.
    ///
    /// The final snapshot and outcome are saved before the session leaves
    /// active tracking. A session that is still being fought is an error.
    pub async fn end_combat(&self, id: SessionId) -> Result<CombatOutcome> {
        let slot = self.slot(id).await?;
        let session = slot.lock().await.clone();

        let outcome = combat_core::session::outcome(&session, self.config())?;
        let loot = if outcome.victor == Victor::Players {
            self.loot.loot_for(&session).await
        } else {
            Vec::new()
        };
        let outcome = outcome.with_loot(&session, loot);

        self.repository
            .save(&SessionRecord::new(session).with_outcome(outcome.clone()))?;
        self.sessions.write().await.remove(&id);

        info!(
            session = %id,
            victor = %outcome.victor,
            rounds = outcome.rounds,
            experience = outcome.experience_gained,
            "combat session concluded"
        );

        Ok(outcome)
    }

    /// Snapshot of a tracked session.
    pub async fn session(&self, id: SessionId) -> Result<CombatSession> {
        let slot = self.slot(id).await?;
        let session = slot.lock().await.clone();
        Ok(session)
    }

    /// Ids of tracked sessions, sorted.
    pub async fn active_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.read().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Return a tracked session, or rehydrate it from the repository.
    ///
    /// Sessions already concluded through [`end_combat`](Self::end_combat)
    /// are returned but not tracked again.
    pub async fn load(&self, id: SessionId) -> Result<CombatSession> {
        if let Ok(session) = self.session(id).await {
            return Ok(session);
        }

        let record = self
            .repository
            .load(id)?
            .ok_or(RuntimeError::SessionNotFound(id))?;

        if record.outcome.is_none() {
            self.sessions
                .write()
                .await
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(record.session.clone())));
            info!(session = %id, saved_at = %record.saved_at, "combat session rehydrated");
        }

        Ok(record.session)
    }

    async fn slot(&self, id: SessionId) -> Result<SessionSlot> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RuntimeError::SessionNotFound(id))
    }

    fn publish(&self, id: SessionId, events: &[CombatEvent]) {
        for event in events {
            self.events.publish(Event::new(id, event.clone()));
        }
    }

    fn persist(&self, session: CombatSession) -> Result<()> {
        let id = session.id;
        self.repository
            .save(&SessionRecord::new(session))
            .map_err(|err| {
                warn!(session = %id, error = %err, "failed to persist session");
                RuntimeError::Repository(err)
            })
    }
}

/// Builder for [`SessionManager`].
pub struct SessionManagerBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<EffectCatalog>>,
    repository: Option<Arc<dyn SessionRepository>>,
    rng: Option<Arc<dyn RngOracle>>,
    items: Option<Arc<dyn ItemOracle>>,
    ai_provider: Option<Arc<dyn ActionProvider>>,
    player_provider: Option<Arc<dyn ActionProvider>>,
    loot: Option<Arc<dyn LootProvider>>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl SessionManagerBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            repository: None,
            rng: None,
            items: None,
            ai_provider: None,
            player_provider: None,
            loot: None,
            narrator: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the combat rules
    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    /// Effect definitions (defaults to the standard catalog)
    pub fn effect_catalog(mut self, catalog: EffectCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Session store (defaults to an in-memory repository)
    pub fn repository(mut self, repository: impl SessionRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Random source (defaults to [`PcgRng`])
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    /// Item resolver; without one every UseItem is rejected
    pub fn items(mut self, items: impl ItemOracle + 'static) -> Self {
        self.items = Some(Arc::new(items));
        self
    }

    /// AI policy (defaults to [`AggressiveAiProvider`])
    pub fn ai_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.ai_provider = Some(Arc::new(provider));
        self
    }

    /// Provider consulted for player-controlled participants in rounds
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Arc::new(provider));
        self
    }

    /// Loot collaborator (defaults to [`NoLoot`])
    pub fn loot(mut self, loot: impl LootProvider + 'static) -> Self {
        self.loot = Some(Arc::new(loot));
        self
    }

    pub fn narrator(mut self, narrator: impl NarrativeGenerator + 'static) -> Self {
        self.narrator = Some(Arc::new(narrator));
        self
    }

    /// Build the manager
    pub fn build(self) -> SessionManager {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(EffectCatalog::standard()));
        let turns = TurnManager::new(StatusEffectEngine::new(catalog), self.config.combat);

        SessionManager {
            engine: ActionEngine::new(turns),
            sessions: RwLock::new(HashMap::new()),
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(InMemorySessionRepo::new())),
            rng: self.rng.unwrap_or_else(|| Arc::new(PcgRng)),
            items: self.items,
            ai_provider: self
                .ai_provider
                .unwrap_or_else(|| Arc::new(AggressiveAiProvider::new())),
            player_provider: self.player_provider,
            loot: self.loot.unwrap_or_else(|| Arc::new(NoLoot)),
            narrator: self.narrator,
            events: EventBus::with_capacity(self.config.event_buffer_size),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::builder().build()
    }
}
