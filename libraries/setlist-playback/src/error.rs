//! Error types for playback management

use setlist_core::{SetlistError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track is not part of the open set
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Track carries neither descriptive text nor an embedded source
    #[error("Nothing to resolve for track {0}")]
    EmptyQuery(TrackId),

    /// Resolver could not produce a playable URL
    #[error("Resolution failed: {0}")]
    Resolution(String),

    /// Playback device refused an operation (e.g. autoplay policy)
    #[error("Device error: {0}")]
    Device(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Background work needs a tokio runtime
    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    /// Error reported by a core collaborator
    #[error(transparent)]
    Core(#[from] SetlistError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
