//! Credential map parsing and lookup
//!
//! Expected wire/file shape:
//!
//! ```json
//! { "<username>": { "hash": "<bcrypt-hash-string>" }, ... }
//! ```
//!
//! Unrecognized extra fields on an entry are ignored for forward
//! compatibility. Anything else malformed fails the whole map; entries are
//! never silently defaulted or partially accepted.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::SchemaError;

/// On-the-wire entry shape; extra fields are ignored by serde
#[derive(Debug, Deserialize)]
struct RawCredential {
    hash: String,
}

/// A single stored credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    /// Opaque adaptive-hash encoding; salt and cost live inside the string
    pub hash: String,
}

/// Validated username → credential mapping
#[derive(Debug, Clone, Default)]
pub struct CredentialMap {
    entries: HashMap<String, Credential>,
}

impl CredentialMap {
    pub fn get(&self, username: &str) -> Option<&Credential> {
        self.entries.get(username)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses raw credential bytes into a validated map.
///
/// An empty object is valid and denies everyone. A top-level shape other
/// than an object, or any entry without a string `hash` field, fails with
/// `SchemaError`.
pub fn parse(bytes: &[u8]) -> Result<CredentialMap, SchemaError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;

    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;

    let mut entries = HashMap::with_capacity(object.len());
    for (username, entry) in object {
        let raw: RawCredential =
            serde_json::from_value(entry.clone()).map_err(|e| SchemaError::InvalidEntry {
                username: username.clone(),
                detail: e.to_string(),
            })?;
        entries.insert(
            username.clone(),
            Credential {
                username: username.clone(),
                hash: raw.hash,
            },
        );
    }

    Ok(CredentialMap { entries })
}
