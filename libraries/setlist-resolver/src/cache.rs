//! Memoising resolver decorator.

use async_trait::async_trait;
use lru::LruCache;
use setlist_core::Resolver;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// Default number of memoised queries
pub const DEFAULT_CACHE_SIZE: usize = 500;

/// Wraps a resolver and remembers successful results per query.
///
/// Failures are not cached, so a later attempt can still succeed.
pub struct CachingResolver<R> {
    inner: R,
    cache: Mutex<LruCache<String, String>>,
}

impl<R: Resolver> CachingResolver<R> {
    /// Wrap `inner`, remembering up to `capacity` queries (at least one)
    pub fn new(inner: R, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of memoised queries
    pub fn len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Whether nothing is memoised yet
    pub fn is_empty(&self) -> bool {
        self.lock_cache().is_empty()
    }

    /// Forget all memoised results
    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    /// Wrapped resolver
    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<String, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<R: Resolver> Resolver for CachingResolver<R> {
    async fn resolve(&self, query: &str) -> setlist_core::Result<String> {
        let cached = self.lock_cache().get(query).cloned();
        if let Some(url) = cached {
            trace!(query = %query, "Resolver cache hit");
            return Ok(url);
        }

        let url = self.inner.resolve(query).await?;
        self.lock_cache().put(query.to_string(), url.clone());
        Ok(url)
    }
}
