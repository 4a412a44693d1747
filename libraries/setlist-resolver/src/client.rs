//! HTTP resolver client.

use crate::error::{ResolverError, Result};
use crate::types::{ResolveRequest, ResolveResponse, ResolverConfig, RESOLVE_PATH};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use setlist_core::Resolver;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolver backed by the backend's resolve-audio endpoint.
///
/// Posts `{"query": "artist - title"}` and expects a playable URL back.
///
/// # Example
///
/// ```ignore
/// use setlist_resolver::{HttpResolver, ResolverConfig};
///
/// let resolver = HttpResolver::new(ResolverConfig::new("http://127.0.0.1:5000"))?;
/// let url = resolver.resolve_url("Bicep - Glue").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpResolver {
    http: Client,
    endpoint: String,
}

impl HttpResolver {
    /// Create a resolver for the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let base = config.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ResolverError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = Url::parse(base).map_err(|e| ResolverError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolverError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)))
            .user_agent(format!("SetPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", base, RESOLVE_PATH),
        })
    }

    /// Full URL of the resolve endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve `query` to a playable URL.
    pub async fn resolve_url(&self, query: &str) -> Result<String> {
        debug!(query = %query, "Resolving audio URL");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ResolveRequest { query })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ResolverError::Unreachable(e.to_string())
                } else {
                    ResolverError::Request(e)
                }
            })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ResolverError::NotFound(query.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResolverError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ResolveResponse = response
            .json()
            .await
            .map_err(|e| ResolverError::ParseError(e.to_string()))?;

        body.playable_url()
            .ok_or_else(|| ResolverError::NotFound(query.to_string()))
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    async fn resolve(&self, query: &str) -> setlist_core::Result<String> {
        Ok(self.resolve_url(query).await?)
    }
}
