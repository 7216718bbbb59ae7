//! Error types for recall.

use thiserror::Error;

/// Everything that can go wrong outside the scheduler itself.
#[derive(Debug, Error)]
pub enum RecallError {
    /// No problem matches the given name or id
    #[error("Problem not found: {0}")]
    NotFound(String),

    /// A problem with this name is already tracked
    #[error("Problem already exists: {0}")]
    Duplicate(String),

    #[error("Difficulty must be between 1 and 5 (got {0})")]
    InvalidDifficulty(i32),

    /// Malformed user input that cannot be clamped into shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result type alias for recall operations
pub type Result<T> = std::result::Result<T, RecallError>;
