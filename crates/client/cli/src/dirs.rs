//! Platform-specific directories for session saves and log files.
use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "combat")
}

/// Log directory.
///
/// - macOS: `~/Library/Caches/combat/logs`
/// - Linux: `~/.cache/combat/logs` (or `$XDG_CACHE_HOME/combat/logs`)
/// - Windows: `%LOCALAPPDATA%\combat\logs`
/// - Fallback: `/tmp/combat/logs`
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/combat"))
        .join("logs")
}

/// Session save directory.
///
/// - macOS: `~/Library/Application Support/combat/sessions`
/// - Linux: `~/.local/share/combat/sessions` (or `$XDG_DATA_HOME/combat/sessions`)
/// - Windows: `%APPDATA%\combat\sessions`
/// - Fallback: `./save_data/sessions`
pub fn save_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("sessions")
}
