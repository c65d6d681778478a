//! Read-only collaborators consulted while resolving actions.
//!
//! Oracles expose randomness and item definitions. [`CombatEnv`] bundles them
//! so the action engine can reach everything it needs without hard coupling
//! to concrete implementations.
mod items;
mod rng;

pub use items::{ItemEffect, ItemId, ItemOracle};
pub use rng::{PcgRng, RngOracle, RollContext, ScriptedRng, compute_seed};

/// Errors raised when a required oracle was not supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("item oracle not available")]
    ItemsNotAvailable,
}

/// Aggregates the oracles required by the action pipeline.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    rng: &'a dyn RngOracle,
    items: Option<&'a dyn ItemOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle) -> Self {
        Self { rng, items: None }
    }

    pub fn with_items(mut self, items: &'a dyn ItemOracle) -> Self {
        self.items = Some(items);
        self
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("items", &self.items.is_some())
            .finish_non_exhaustive()
    }
}
