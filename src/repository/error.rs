//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A write lost a race or broke a uniqueness rule; nothing was applied
    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The change set itself is malformed; nothing was applied
    #[error("invalid change set: {0}")]
    InvalidChange(String),

    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RepositoryError {
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
