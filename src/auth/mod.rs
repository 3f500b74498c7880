//! Authentication system
//!
//! The gate runs every inbound request through one process-wide
//! authenticator chosen at startup. Implementations are stateless across
//! requests and safe to share between concurrent handlers.

pub mod allowlist;
pub mod authenticator;
pub mod basic;
pub mod registry;

pub use allowlist::AllowlistAuthenticator;
pub use authenticator::{AuthOutcome, AuthRequest, Authenticator};
pub use basic::BasicAuthenticator;
pub use registry::AuthenticatorRegistry;

use std::sync::Arc;

use crate::config::GateConfig;
use crate::store::{CredentialStore, EtcdStore};

/// Builds the authenticator named by the startup configuration.
///
/// Selection happens exactly once here; there is no per-request dispatch
/// between variants.
pub fn from_config(config: &GateConfig) -> Result<Arc<dyn Authenticator>, config::ConfigError> {
    config.validate()?;

    match config.authenticator.as_str() {
        "basic" => {
            let store = EtcdStore::new(&config.store_endpoint, config.store_timeout())
                .map_err(|e| config::ConfigError::Message(e.to_string()))?;
            let store: Arc<dyn CredentialStore> = Arc::new(store);
            Ok(Arc::new(BasicAuthenticator::new(store, config)))
        }
        "allowlist" => Ok(Arc::new(AllowlistAuthenticator::new(config.allowed_ips()))),
        other => Err(config::ConfigError::Message(format!(
            "Unknown authenticator kind: {}",
            other
        ))),
    }
}
