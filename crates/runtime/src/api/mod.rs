//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session manager can stay focused on orchestration.

pub mod errors;
pub mod providers;
pub mod results;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{
    ActionProvider, LootProvider, NarrativeGenerator, NoLoot, WaitActionProvider,
};
pub use results::{RoundResult, RoundStatus, SubmitOutcome};
