use crate::domain::level::LevelDescription;
use thiserror::Error;

// Ports the engine and session use cases depend on; adapters live outside the domain.

/// Failure reported by a remote text backend; shown to the player, never fatal.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Remote service behind the password-guessing dialog.
pub trait PasswordBackend: Send + Sync {
    fn check_password(&self, attempt: &str) -> Result<bool, BackendError>;
    fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("level {0} not found")]
    LevelNotFound(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Source of level descriptions (the tile-map collaborator).
pub trait LevelRepository: Send + Sync {
    fn load(&self, level_id: &str) -> Result<LevelDescription, StoreError>;
}

/// Append-only checkpoint log.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, level_id: &str, bytes: &[u8]) -> Result<(), StoreError>;
    /// Newest checkpoint for the level, if any.
    fn latest(&self, level_id: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
