/// Application error types
use setlist_core::SetlistError;
use setlist_playback::PlaybackError;
use setlist_resolver::ResolverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),

    #[error("Storage error: {0}")]
    Core(#[from] SetlistError),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
