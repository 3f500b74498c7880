//! Optional credential map cache
//!
//! Not wired in by default: the gate re-resolves the source on every request
//! unless a TTL is configured. When enabled, concurrent refreshes for the
//! same key coalesce into one in-flight fetch, which keeps a recovering
//! store from being hammered the moment it comes back.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ResolveError;
use crate::store::resolver::CredentialResolver;

/// TTL-bounded cache over a [`CredentialResolver`]
pub struct CachedResolver {
    inner: Arc<CredentialResolver>,
    cache: Cache<String, Vec<u8>>,
}

impl CachedResolver {
    pub fn new(inner: Arc<CredentialResolver>, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }

    /// Resolves through the cache; failed resolutions are never cached
    pub async fn resolve(&self, key: &str) -> Result<Vec<u8>, ResolveError> {
        let inner = Arc::clone(&self.inner);
        let owned_key = key.to_string();
        self.cache
            .try_get_with(owned_key.clone(), async move {
                inner.resolve(&owned_key).await
            })
            .await
            .map_err(|e: Arc<ResolveError>| e.as_ref().clone())
    }

    /// Explicitly drops a cached entry so the next resolve hits the source
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
