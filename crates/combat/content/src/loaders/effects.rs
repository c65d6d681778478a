//! Effect definition loader.
//!
//! Effect files list definitions that replace the built-in ones for the same
//! kind. Kinds the file doesn't mention keep their standard definition.

use std::path::Path;

use combat_core::{EffectCatalog, EffectDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Effect file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectFile {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for effect catalogs from RON files.
pub struct EffectCatalogLoader;

impl EffectCatalogLoader {
    /// Load the standard catalog with the file's definitions layered on top.
    pub fn load(path: &Path) -> LoadResult<EffectCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectCatalog> {
        let file: EffectFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        let mut catalog = EffectCatalog::standard();
        for definition in file.effects {
            if definition.stackable && definition.max_stacks == 0 {
                anyhow::bail!("Effect {} is stackable with max_stacks = 0", definition.kind);
            }
            let kind = definition.kind;
            if catalog.insert(definition).is_some() {
                debug!(%kind, "effect definition overridden from data file");
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{EffectDuration, StatusEffectKind};

    use super::*;

    const OVERRIDES: &str = r#"(
        effects: [
            (
                kind: Poisoned,
                name: "Venom",
                category: Debuff,
                stackable: true,
                max_stacks: 3,
                duration: Turns(4),
                tick_interval: 1,
                on_tick: Some((damage: 4, damage_type: Poison)),
            ),
            (
                kind: Shielded,
                name: "Stoneskin",
                category: Buff,
                duration: UntilCured,
                modifiers: (damage_reduction: 5),
            ),
        ],
    )"#;

    #[test]
    fn overrides_replace_standard_definitions() {
        let catalog = EffectCatalogLoader::parse(OVERRIDES).unwrap();

        let poison = catalog.get(StatusEffectKind::Poisoned).unwrap();
        assert_eq!(poison.name, "Venom");
        assert_eq!(poison.max_stacks, 3);
        assert_eq!(poison.duration, EffectDuration::Turns(4));
        assert_eq!(poison.on_tick.unwrap().damage, 4);

        let shield = catalog.get(StatusEffectKind::Shielded).unwrap();
        assert_eq!(shield.duration, EffectDuration::UntilCured);
        assert_eq!(shield.modifiers.damage_reduction, 5);
        assert_eq!(shield.modifiers.damage_multiplier, 1.0);
    }

    #[test]
    fn unmentioned_kinds_keep_standard_definitions() {
        let catalog = EffectCatalogLoader::parse(OVERRIDES).unwrap();
        let standard = EffectCatalog::standard();
        assert_eq!(
            catalog.get(StatusEffectKind::Burning),
            standard.get(StatusEffectKind::Burning)
        );
        assert_eq!(catalog.len(), standard.len());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = EffectCatalogLoader::parse(
            "(effects: [(kind: Petrified, name: \"Stone\", category: Debuff, duration: Turns(1))])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("effect catalog"));
    }
}
