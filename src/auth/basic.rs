//! Default username/password authenticator
//!
//! Per-request pipeline, stateless across requests:
//!
//! EXTRACT → RESOLVE_SOURCE → PARSE → LOOKUP → VERIFY → {ALLOW | DENY}
//!
//! Missing credentials short-circuit to Deny at extract. A failed source
//! resolution or a malformed credential map is a SystemError, never a Deny:
//! neither says anything about the requester's legitimacy.

use async_trait::async_trait;
use log::error;
use std::sync::Arc;

use crate::auth::{AuthOutcome, AuthRequest, Authenticator};
use crate::config::GateConfig;
use crate::credentials;
use crate::error::{DenyReason, SystemErrorKind};
use crate::hash;
use crate::store::{CachedResolver, CredentialResolver, CredentialStore};

/// HTTP-basic authenticator over a two-tier credential source
pub struct BasicAuthenticator {
    resolver: Arc<CredentialResolver>,
    cache: Option<CachedResolver>,
    credentials_key: String,
}

impl BasicAuthenticator {
    /// Wires the authenticator against an injected store handle.
    ///
    /// The store is passed in explicitly; nothing here reaches for a
    /// process-global client. Caching stays off unless the configuration
    /// carries a non-zero TTL.
    pub fn new(store: Arc<dyn CredentialStore>, config: &GateConfig) -> Self {
        let resolver = Arc::new(CredentialResolver::new(
            store,
            config.fallback_path_buf(),
            config.store_timeout(),
        ));
        let cache = config
            .cache_ttl()
            .map(|ttl| CachedResolver::new(Arc::clone(&resolver), ttl));

        Self {
            resolver,
            cache,
            credentials_key: config.credentials_key.clone(),
        }
    }

    async fn resolve_credential_bytes(&self) -> Result<Vec<u8>, crate::error::ResolveError> {
        match &self.cache {
            Some(cache) => cache.resolve(&self.credentials_key).await,
            None => self.resolver.resolve(&self.credentials_key).await,
        }
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> AuthOutcome {
        // EXTRACT
        let (Some(username), Some(secret)) = (&request.username, &request.secret) else {
            return AuthOutcome::Deny(DenyReason::MissingCredentials);
        };

        // RESOLVE_SOURCE
        let bytes = match self.resolve_credential_bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Credential resolution failed: {}", e);
                return AuthOutcome::SystemError(SystemErrorKind::CredentialSourceUnavailable);
            }
        };

        // PARSE
        let map = match credentials::parse(&bytes) {
            Ok(map) => map,
            Err(e) => {
                error!("Stored credential data rejected: {}", e);
                return AuthOutcome::SystemError(SystemErrorKind::SchemaError);
            }
        };

        // LOOKUP + VERIFY
        match map.get(username) {
            Some(credential) => {
                if hash::verify(secret, &credential.hash) {
                    AuthOutcome::Allow
                } else {
                    AuthOutcome::Deny(DenyReason::BadCredentials)
                }
            }
            None => {
                // Unknown user burns the same bcrypt work as a wrong
                // secret, closing the enumeration timing channel.
                hash::verify_dummy(secret);
                AuthOutcome::Deny(DenyReason::BadCredentials)
            }
        }
    }
}
