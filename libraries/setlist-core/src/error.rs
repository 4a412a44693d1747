/// Core error types for Set Player
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `SetlistError`
pub type Result<T> = std::result::Result<T, SetlistError>;

/// Core error type for Set Player
#[derive(Error, Debug)]
pub enum SetlistError {
    /// Track is not part of the open set
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Resolver could not produce a playable URL
    #[error("Resolution failed: {0}")]
    Resolution(String),

    /// Persisted settings could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SetlistError {
    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
