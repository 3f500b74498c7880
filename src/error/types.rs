//! Error types
//!
//! Defines domain-specific error types for each module of the auth gate.
//! Deny reasons and system-error kinds are kept separate on purpose: a Deny
//! is a statement about untrusted input, a SystemError means the
//! authentication subsystem itself failed and must never be reported to the
//! caller as a denial.

use std::fmt;

/// Remote credential store errors
#[derive(Debug, Clone)]
pub enum StoreError {
    Unreachable(String),
    Timeout(String),
    Protocol(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unreachable(detail) => write!(f, "Store unreachable: {}", detail),
            StoreError::Timeout(detail) => write!(f, "Store request timed out: {}", detail),
            StoreError::Protocol(detail) => write!(f, "Store protocol error: {}", detail),
        }
    }
}

impl std::error::Error for StoreError {}

/// Local fallback file errors
#[derive(Debug, Clone)]
pub enum FileError {
    Io { path: String, detail: String },
    Timeout { path: String },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Io { path, detail } => write!(f, "{}: {}", path, detail),
            FileError::Timeout { path } => write!(f, "{}: read timed out", path),
        }
    }
}

impl std::error::Error for FileError {}

/// Credential source resolution errors
///
/// Raised only when both the remote store and the local fallback file fail;
/// either tier succeeding on its own satisfies a resolution.
#[derive(Debug, Clone)]
pub enum ResolveError {
    Unavailable { remote: String, local: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unavailable { remote, local } => write!(
                f,
                "Credential source unavailable (remote: {}; local: {})",
                remote, local
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Credential map schema errors
#[derive(Debug, Clone)]
pub enum SchemaError {
    InvalidJson(String),
    NotAnObject,
    InvalidEntry { username: String, detail: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::InvalidJson(detail) => write!(f, "Invalid JSON payload: {}", detail),
            SchemaError::NotAnObject => write!(f, "Credential map must be a JSON object"),
            SchemaError::InvalidEntry { username, detail } => {
                write!(f, "Invalid entry for user {}: {}", username, detail)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Why a request was denied; operator-facing only. Clients observe one
/// uniform forbidden response regardless of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingCredentials,
    BadCredentials,
    AddressNotAllowed,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::MissingCredentials => write!(f, "Missing credentials in request"),
            DenyReason::BadCredentials => write!(f, "Unknown user or wrong secret"),
            DenyReason::AddressNotAllowed => write!(f, "Client address not in allowlist"),
        }
    }
}

/// Which part of the authentication subsystem failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemErrorKind {
    CredentialSourceUnavailable,
    SchemaError,
}

impl fmt::Display for SystemErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemErrorKind::CredentialSourceUnavailable => {
                write!(f, "Credential source unavailable")
            }
            SystemErrorKind::SchemaError => write!(f, "Malformed stored credential data"),
        }
    }
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    AlreadyInstalled,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::AlreadyInstalled => {
                write!(f, "An authenticator is already installed")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
