//! Two-tier credential source resolver
//!
//! Tries the remote store first; a found value is used exclusively and never
//! combined with local data. Not-found or unreachable falls back to reading
//! the local file exactly once. Both failing means authentication cannot
//! proceed and the gate fails closed upstream.

use log::{debug, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ResolveError;
use crate::store::file::FileSource;
use crate::store::{CredentialStore, StoreValue};

/// Resolves raw credential bytes from the remote store or the fallback file
pub struct CredentialResolver {
    store: Arc<dyn CredentialStore>,
    fallback: FileSource,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn CredentialStore>, fallback_path: PathBuf, timeout: Duration) -> Self {
        Self {
            store,
            fallback: FileSource::new(fallback_path, timeout),
        }
    }

    /// Resolves the credential bytes stored under `key`
    pub async fn resolve(&self, key: &str) -> Result<Vec<u8>, ResolveError> {
        let remote_failure = match self.store.get(key).await {
            Ok(StoreValue::Found(value)) => {
                debug!("Credential key {} served by remote store", key);
                return Ok(value.into_bytes());
            }
            Ok(StoreValue::NotFound) => {
                warn!("Credential key {} absent from remote store", key);
                format!("key {} not found", key)
            }
            Err(e) => {
                warn!("Remote store failed for key {}: {}", key, e);
                e.to_string()
            }
        };

        match self.fallback.read().await {
            Ok(bytes) => {
                debug!(
                    "Credential key {} served by fallback file {}",
                    key,
                    self.fallback.path().display()
                );
                Ok(bytes)
            }
            Err(local_failure) => Err(ResolveError::Unavailable {
                remote: remote_failure,
                local: local_failure.to_string(),
            }),
        }
    }
}
