use std::path::PathBuf;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The snapshot could not be read: the file is missing or is not valid JSON.
    #[error("storage unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// The snapshot could not be written.
    #[error("failed to write snapshot to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Serialization failure while encoding a snapshot.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
