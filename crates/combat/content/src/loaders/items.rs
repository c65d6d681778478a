//! Item catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{DamageType, EffectGrant, ItemEffect, ItemId, ItemOracle, StatusEffectKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One usable item as written in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub healing: u32,
    #[serde(default)]
    pub mana: u32,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub effects: Vec<EffectGrant>,
    #[serde(default)]
    pub cures: Vec<StatusEffectKind>,
}

impl From<ItemDefinition> for ItemEffect {
    fn from(item: ItemDefinition) -> Self {
        ItemEffect {
            name: item.name,
            healing: item.healing,
            mana: item.mana,
            damage: item.damage,
            damage_type: item.damage_type,
            effects: item.effects,
            cures: item.cures,
        }
    }
}

/// Item file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemFile {
    items: Vec<ItemDefinition>,
}

/// Loaded items, keyed by id, answering the engine's item lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemEffect>,
}

impl ItemCatalog {
    pub fn new(items: impl IntoIterator<Item = ItemDefinition>) -> LoadResult<Self> {
        let mut catalog = BTreeMap::new();
        for item in items {
            let id = ItemId(item.id);
            if catalog.insert(id, ItemEffect::from(item)).is_some() {
                anyhow::bail!("Duplicate item id {} in item catalog", id.0);
            }
        }
        Ok(Self { items: catalog })
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemEffect> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn resolve(&self, item: ItemId) -> Option<ItemEffect> {
        self.items.get(&item).cloned()
    }
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        ItemCatalog::new(file.items)
    }
}
