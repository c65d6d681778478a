//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use combat_core::SessionId;

use super::{RepositoryError, Result, SessionRecord, SessionRepository};

/// On-disk encoding of session files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionFormat {
    /// Compact binary encoding.
    #[default]
    Bincode,
    /// Human-readable, handy for inspecting a stuck encounter.
    Json,
}

impl SessionFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bincode => "bin",
            Self::Json => "json",
        }
    }

    fn encode(self, record: &SessionRecord) -> Result<Vec<u8>> {
        match self {
            Self::Bincode => bincode::serialize(record)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => serde_json::to_vec_pretty(record)
                .map_err(|e| RepositoryError::Json(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<SessionRecord> {
        match self {
            Self::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
        }
    }
}

/// File-based implementation of SessionRepository.
///
/// Each session is stored as `session_{id}.{bin|json}` where `id` is the
/// 16-digit hex session id.
///
/// Saves write a temp file and rename it over the previous one, so a failed
/// save leaves the last good record in place.
pub struct FileSessionRepository {
    base_dir: PathBuf,
    format: SessionFormat,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>, format: SessionFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, format })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SessionFormat {
        self.format
    }

    /// Get the path to a session file.
    pub fn session_path(&self, id: SessionId) -> PathBuf {
        self.base_dir
            .join(format!("session_{}.{}", id, self.format.extension()))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, record: &SessionRecord) -> Result<()> {
        let path = self.session_path(record.id());
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.format.encode(record)?;

        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved session[{}] to {}", record.id(), path.display());

        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<SessionRecord>> {
        let path = self.session_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record = self.format.decode(&bytes)?;
        if record.id() != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds session {}",
                path.display(),
                record.id()
            )));
        }

        tracing::debug!("Loaded session[{}] from {}", id, path.display());

        Ok(Some(record))
    }

    fn exists(&self, id: SessionId) -> bool {
        self.session_path(id).exists()
    }

    fn delete(&self, id: SessionId) -> Result<()> {
        let path = self.session_path(id);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted session[{}]", id);
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<SessionId>> {
        let suffix = format!(".{}", self.format.extension());
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("session_")
                    .and_then(|s| s.strip_suffix(suffix.as_str()))
                && let Ok(id) = id_str.parse::<SessionId>()
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
