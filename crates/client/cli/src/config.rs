//! Demo configuration read from the environment.
use std::env;
use std::path::PathBuf;

use runtime::SessionFormat;

/// Settings for one demo run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `combat.toml`, `effects.ron`, `items.ron`, and
    /// `encounters/`. `None` uses the data bundled with `combat-content`.
    pub data_dir: Option<PathBuf>,
    /// Encounter file stem under `encounters/`.
    pub encounter: String,
    /// Fixed session seed; random when unset.
    pub seed: Option<u64>,
    /// Where session files are written. `None` uses the platform data dir.
    pub save_dir: Option<PathBuf>,
    pub save_format: SessionFormat,
    /// Also write logs to a file under the platform cache dir.
    pub log_to_file: bool,
    /// Print the combat log as it happened, not just the summary.
    pub show_log: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            encounter: "skirmish".to_owned(),
            seed: None,
            save_dir: None,
            save_format: SessionFormat::Json,
            log_to_file: false,
            show_log: true,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - content directory (default: bundled data)
    /// - `COMBAT_ENCOUNTER` - encounter name (default: `skirmish`)
    /// - `COMBAT_SEED` - session seed (default: random)
    /// - `COMBAT_SAVE_DIR` - session save directory
    /// - `COMBAT_SAVE_FORMAT` - `json` or `bincode` (default: `json`)
    /// - `COMBAT_LOG_FILE` - write a log file as well (default: false)
    /// - `COMBAT_SHOW_LOG` - print the full combat log (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(name) = env::var("COMBAT_ENCOUNTER")
            && !name.trim().is_empty()
        {
            config.encounter = name.trim().to_owned();
        }
        config.seed = read_env::<u64>("COMBAT_SEED");
        if let Ok(dir) = env::var("COMBAT_SAVE_DIR") {
            config.save_dir = Some(PathBuf::from(dir));
        }
        // unknown values keep the default
        if let Ok(format) = env::var("COMBAT_SAVE_FORMAT") {
            match format.to_lowercase().as_str() {
                "json" => config.save_format = SessionFormat::Json,
                "bincode" | "bin" => config.save_format = SessionFormat::Bincode,
                _ => {}
            }
        }
        if let Some(enabled) = read_env_bool("COMBAT_LOG_FILE") {
            config.log_to_file = enabled;
        }
        if let Some(enabled) = read_env_bool("COMBAT_SHOW_LOG") {
            config.show_log = enabled;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
