//! Etcd credential store client
//!
//! Speaks the etcd v2 keys API over HTTP. Every request is bounded by the
//! configured per-call timeout so a slow or hung store cannot stall the
//! request-handling pool; responses are scoped and released on every exit
//! path, including errors.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::time::Duration;

use crate::error::StoreError;
use crate::store::{CredentialStore, StoreValue};

/// Etcd v2 GET response body; only the node value matters here
#[derive(Debug, Deserialize)]
struct KeysResponse {
    node: Option<KeyNode>,
}

#[derive(Debug, Deserialize)]
struct KeyNode {
    value: Option<String>,
}

/// HTTP client for an etcd v2 endpoint
pub struct EtcdStore {
    client: reqwest::Client,
    endpoint: String,
}

impl EtcdStore {
    /// Creates a store client against `endpoint` with a per-call timeout
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Protocol(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn key_url(&self, key: &str) -> String {
        format!("{}/v2/keys{}", self.endpoint, key)
    }
}

#[async_trait]
impl CredentialStore for EtcdStore {
    async fn get(&self, key: &str) -> Result<StoreValue, StoreError> {
        let url = self.key_url(key);
        debug!("Fetching credential key from store: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(url.clone())
            } else {
                StoreError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // etcd reports a missing key as 404 with errorCode 100
            return Ok(StoreValue::NotFound);
        }
        if !status.is_success() {
            return Err(StoreError::Unreachable(format!(
                "Store answered {} for {}",
                status, url
            )));
        }

        let body: KeysResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Protocol(e.to_string()))?;

        // A directory node carries no value; treat it like a missing key.
        match body.node.and_then(|node| node.value) {
            Some(value) => Ok(StoreValue::Found(value)),
            None => Ok(StoreValue::NotFound),
        }
    }
}
