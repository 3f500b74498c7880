//! Authenticator registry
//!
//! Process-wide holder of the one active authenticator, fixed at startup.
//! A second install attempt is an error surfaced to the caller, not a panic.

use std::sync::{Arc, OnceLock};

use crate::auth::Authenticator;
use crate::error::RegistryError;

pub struct AuthenticatorRegistry {
    slot: OnceLock<Arc<dyn Authenticator>>,
}

impl AuthenticatorRegistry {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Installs the active authenticator; succeeds at most once
    pub fn install(&self, authenticator: Arc<dyn Authenticator>) -> Result<(), RegistryError> {
        self.slot
            .set(authenticator)
            .map_err(|_| RegistryError::AlreadyInstalled)
    }

    /// Returns the active authenticator, if one has been installed
    pub fn active(&self) -> Option<Arc<dyn Authenticator>> {
        self.slot.get().cloned()
    }
}

impl Default for AuthenticatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry
pub static REGISTRY: AuthenticatorRegistry = AuthenticatorRegistry::new();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AllowlistAuthenticator;

    #[test]
    fn test_empty_registry_has_no_active_authenticator() {
        let registry = AuthenticatorRegistry::new();
        assert!(registry.active().is_none());
    }

    #[test]
    fn test_second_install_is_rejected() {
        let registry = AuthenticatorRegistry::new();
        let first: Arc<dyn Authenticator> =
            Arc::new(AllowlistAuthenticator::new(std::iter::empty()));
        let second: Arc<dyn Authenticator> =
            Arc::new(AllowlistAuthenticator::new(std::iter::empty()));

        assert!(registry.install(first).is_ok());
        assert_eq!(
            registry.install(second),
            Err(RegistryError::AlreadyInstalled)
        );
        assert!(registry.active().is_some());
    }
}
