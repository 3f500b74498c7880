//! Address-allowlist authenticator
//!
//! Admits requests purely by client address; presented credentials are
//! ignored entirely. Suitable for gates fronting trusted internal callers.

use async_trait::async_trait;
use std::collections::HashSet;
use std::net::IpAddr;

use crate::auth::{AuthOutcome, AuthRequest, Authenticator};
use crate::error::DenyReason;

pub struct AllowlistAuthenticator {
    allowed: HashSet<IpAddr>,
}

impl AllowlistAuthenticator {
    pub fn new(allowed: impl IntoIterator<Item = IpAddr>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Authenticator for AllowlistAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> AuthOutcome {
        if self.allowed.contains(&request.client_addr) {
            AuthOutcome::Allow
        } else {
            AuthOutcome::Deny(DenyReason::AddressNotAllowed)
        }
    }
}
