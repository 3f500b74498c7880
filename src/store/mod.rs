//! Credential source resolution
//!
//! The remote store is the intended source of truth; the local fallback file
//! keeps the gate operable before the store is provisioned or during an
//! outage. Exactly one source is authoritative per resolution.

pub mod cache;
pub mod etcd;
pub mod file;
pub mod resolver;

use async_trait::async_trait;

use crate::error::StoreError;

/// Result of a remote store lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    Found(String),
    NotFound,
}

/// Remote key-value credential store
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// Distinguishes found-with-value from not-found; transport and
    /// protocol failures surface as `StoreError`.
    async fn get(&self, key: &str) -> Result<StoreValue, StoreError>;
}

pub use cache::CachedResolver;
pub use etcd::EtcdStore;
pub use file::FileSource;
pub use resolver::CredentialResolver;
