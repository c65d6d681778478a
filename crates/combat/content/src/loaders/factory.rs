//! Content factory for building engines and oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, EffectCatalog};

use crate::loaders::{
    ConfigLoader, EffectCatalogLoader, Encounter, ItemCatalog, ItemLoader, LoadResult,
    RosterLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── effects.ron
/// ├── items.ron
/// └── encounters/
///     └── skirmish.ron
/// ```
///
/// `combat.toml` and `effects.ron` are optional: a missing file yields the
/// built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load effect definitions from `effects.ron` over the standard catalog.
    pub fn load_effects(&self) -> LoadResult<EffectCatalog> {
        let path = self.data_dir.join("effects.ron");
        if !path.exists() {
            return Ok(EffectCatalog::standard());
        }
        EffectCatalogLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load an encounter from `encounters/{name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the encounter file (without `.ron` extension)
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.ron", name));
        RosterLoader::load(&path)
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
