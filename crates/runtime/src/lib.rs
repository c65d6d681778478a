//! Async orchestration for combat sessions.
//!
//! This crate wires the pure `combat-core` engines to the outside world:
//! session tracking with per-session locking, action providers (AI and
//! player), persistence, loot, narration, and an event bus. Consumers embed
//! [`SessionManager`] to start encounters, submit actions, drive rounds, and
//! conclude them.
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the session manager and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for combat events
//! - [`providers`] holds the bundled action providers
//! - [`repository`] persists session snapshots
pub mod api;
pub mod events;
pub mod manager;
pub mod providers;
pub mod repository;

pub use api::{
    ActionProvider, LootProvider, NarrativeGenerator, NoLoot, ProviderKind, Result, RoundResult,
    RoundStatus, RuntimeError, SubmitOutcome, WaitActionProvider,
};
pub use events::{Event, EventBus, Topic};
pub use manager::{RuntimeConfig, SessionManager, SessionManagerBuilder};
pub use providers::{AggressiveAiProvider, ScriptedActionProvider};
pub use repository::{
    FileSessionRepository, InMemorySessionRepo, RepositoryError, SessionFormat, SessionRecord,
    SessionRepository,
};
