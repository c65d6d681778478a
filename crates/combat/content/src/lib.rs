//! Data-driven combat content and loaders.
//!
//! This crate reads RON/TOML data files into combat-core values:
//! - Balance configuration (TOML)
//! - Effect definitions overriding the standard catalog (RON)
//! - Encounter rosters with their battlefield (RON)
//! - Item catalogs consulted through `ItemOracle` (RON)
//!
//! Content feeds the engines and oracles and never appears in session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, EffectCatalogLoader, Encounter, ItemCatalog,
    ItemDefinition, ItemLoader, LoadResult, RosterLoader,
};
