//! Runs one AI-vs-AI encounter from content files and prints what happened.
mod config;
mod dirs;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use config::CliConfig;
use runtime::{
    AggressiveAiProvider, FileSessionRepository, RuntimeConfig, SessionManager, SessionRepository,
};
use tokio::sync::broadcast::error::TryRecvError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    run(config).await
}

async fn run(config: CliConfig) -> Result<()> {
    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Loading content from {}", content.data_dir().display());

    let combat = content.load_config()?;
    let encounter = content
        .load_encounter(&config.encounter)
        .with_context(|| format!("Failed to load encounter '{}'", config.encounter))?;

    let save_dir = config.save_dir.clone().unwrap_or_else(dirs::save_dir);
    let repository = FileSessionRepository::new(&save_dir, config.save_format)
        .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?;

    let manager = SessionManager::builder()
        .config(RuntimeConfig {
            combat,
            event_buffer_size: 4096,
        })
        .effect_catalog(content.load_effects()?)
        .items(content.load_items()?)
        .repository(repository)
        .player_provider(AggressiveAiProvider::new())
        .build();
    let mut events = manager.subscribe();

    let session = match config.seed {
        Some(seed) => {
            manager
                .initiate_seeded(
                    seed,
                    encounter.players,
                    encounter.enemies,
                    Some(encounter.environment),
                )
                .await?
        }
        None => {
            manager
                .initiate(
                    encounter.players,
                    encounter.enemies,
                    Some(encounter.environment),
                )
                .await?
        }
    };

    println!("Encounter '{}' (session {})", config.encounter, session.id);
    print!("{}", report::roster(&session));
    println!();

    let finished = manager.run_to_end(session.id).await?;
    let outcome = manager.end_combat(session.id).await?;

    if config.show_log {
        for entry in &finished.log {
            println!("{entry}");
        }
        println!();
    }

    print!("{}", report::roster(&finished));
    println!();
    println!("{}", report::outcome(&outcome));

    let mut seen = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => seen.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Event subscriber lagged, {} events skipped", skipped);
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    println!("Events: {}", report::event_tally(&seen));

    let saved = FileSessionRepository::new(&save_dir, config.save_format)?;
    println!(
        "Saved {} session(s) in {}",
        saved.list()?.len(),
        save_dir.display()
    );

    Ok(())
}

/// Logs go to stderr, and to `combat.log` under the cache dir when enabled.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !config.log_to_file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    }

    let log_dir: PathBuf = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "combat.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/combat.log", log_dir.display());

    Ok(Some(guard))
}
