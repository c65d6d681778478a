//! Combat balance configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
///
/// Keys missing from the file keep their `CombatConfig::default()` values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.fumble_threshold >= config.critical_threshold {
            anyhow::bail!(
                "fumble_threshold ({}) must be below critical_threshold ({})",
                config.fumble_threshold,
                config.critical_threshold
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("max_rounds = 20\nbase_accuracy = 70\n").unwrap();
        assert_eq!(config.max_rounds, 20);
        assert_eq!(config.base_accuracy, 70);
        assert_eq!(config.critical_threshold, CombatConfig::DEFAULT_CRITICAL_THRESHOLD);
        assert_eq!(config.crit_multiplier, 2);
    }

    #[test]
    fn empty_file_is_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }

    #[test]
    fn overlapping_thresholds_are_rejected() {
        let err = ConfigLoader::parse("fumble_threshold = 96\n").unwrap_err();
        assert!(err.to_string().contains("fumble_threshold"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/combat.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/combat.toml"));
    }
}
