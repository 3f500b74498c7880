//! Authenticator capability
//!
//! A capability-style contract: one operation, `authenticate`, consuming the
//! presented identity, presented secret, and client address. Deny speaks
//! about the untrusted input; SystemError means the subsystem itself failed
//! and is never reported to the caller as a denial.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::net::IpAddr;

use crate::error::{DenyReason, SystemErrorKind};

/// What an authenticator consumes from an inbound request
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub username: Option<String>,
    pub secret: Option<String>,
    pub client_addr: IpAddr,
}

impl AuthRequest {
    pub fn new(username: Option<String>, secret: Option<String>, client_addr: IpAddr) -> Self {
        Self {
            username,
            secret,
            client_addr,
        }
    }

    /// Builds a request from an HTTP `Authorization` header value.
    ///
    /// A missing or malformed header yields a request without credentials,
    /// which the basic authenticator denies at the extract step. Malformed
    /// headers never become errors: they are untrusted input.
    pub fn from_basic_header(header: Option<&str>, client_addr: IpAddr) -> Self {
        let decoded = header
            .and_then(|value| value.strip_prefix("Basic "))
            .and_then(|encoded| BASE64.decode(encoded.trim()).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok());

        match decoded.as_deref().and_then(|pair| pair.split_once(':')) {
            Some((username, secret)) => Self::new(
                Some(username.to_string()),
                Some(secret.to_string()),
                client_addr,
            ),
            None => Self::new(None, None, client_addr),
        }
    }
}

/// Result of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Pass the request through to application logic
    Allow,
    /// Refuse the request; the client sees one uniform forbidden response
    Deny(DenyReason),
    /// The subsystem failed; fail closed and surface to operators
    SystemError(SystemErrorKind),
}

/// Gate contract every concrete authenticator implements.
///
/// Implementations are constructed once at process start, hold no
/// per-request mutable state, and tolerate concurrent invocation.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &AuthRequest) -> AuthOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn addr() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    #[test]
    fn test_well_formed_basic_header() {
        // "alice:secret"
        let request = AuthRequest::from_basic_header(Some("Basic YWxpY2U6c2VjcmV0"), addr());
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert_eq!(request.secret.as_deref(), Some("secret"));
    }

    #[test]
    fn test_secret_may_contain_colons() {
        // "alice:se:cr:et" splits at the first colon only
        let request =
            AuthRequest::from_basic_header(Some("Basic YWxpY2U6c2U6Y3I6ZXQ="), addr());
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert_eq!(request.secret.as_deref(), Some("se:cr:et"));
    }

    #[test]
    fn test_missing_header_yields_empty_credentials() {
        let request = AuthRequest::from_basic_header(None, addr());
        assert!(request.username.is_none());
        assert!(request.secret.is_none());
    }

    #[test]
    fn test_malformed_headers_yield_empty_credentials() {
        for header in [
            "Bearer abcdef",
            "Basic !!!not-base64!!!",
            "Basic",
            // base64 of "no-colon-here"
            "Basic bm8tY29sb24taGVyZQ==",
        ] {
            let request = AuthRequest::from_basic_header(Some(header), addr());
            assert!(request.username.is_none(), "header {:?}", header);
            assert!(request.secret.is_none(), "header {:?}", header);
        }
    }
}
