//! Error types for the HTTP resolver.

use setlist_core::SetlistError;
use thiserror::Error;

/// Errors that can occur when resolving through the HTTP endpoint.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint is unreachable or timed out
    #[error("Resolver unreachable: {0}")]
    Unreachable(String),

    /// No playable source exists for the query
    #[error("No playable source for \"{0}\"")]
    NotFound(String),

    /// Endpoint answered with an unexpected status
    #[error("Resolver error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse the endpoint's response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid base URL
    #[error("Invalid resolver URL: {0}")]
    InvalidUrl(String),
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;

impl From<ResolverError> for SetlistError {
    fn from(err: ResolverError) -> Self {
        SetlistError::resolution(err.to_string())
    }
}
