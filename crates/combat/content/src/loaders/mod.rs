//! Content loaders for reading combat data from files.
//!
//! Each loader turns one RON/TOML file into the combat-core value the
//! runtime wires into its engines. [`ContentFactory`] ties them to a data
//! directory.

pub mod config;
pub mod effects;
pub mod factory;
pub mod items;
pub mod roster;

pub use config::ConfigLoader;
pub use effects::EffectCatalogLoader;
pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemDefinition, ItemLoader};
pub use roster::{CombatantSpec, Encounter, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
