//! Wire types and configuration for the resolve-audio endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Path of the resolve endpoint, relative to the base URL
pub const RESOLVE_PATH: &str = "/api/resolve_audio";

/// Connection settings for [`crate::HttpResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base URL of the backend (e.g. `http://127.0.0.1:5000`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ResolverConfig {
    /// Config for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct ResolveRequest<'a> {
    pub query: &'a str,
}

/// Response body
///
/// `{"ok": true, "url": "..."}` on success, `{"ok": false}` otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveResponse {
    pub ok: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl ResolveResponse {
    /// Playable URL, if the response carries one
    pub fn playable_url(self) -> Option<String> {
        if !self.ok {
            return None;
        }

        self.url
            .map(|url| url.trim().to_string())
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }
}
