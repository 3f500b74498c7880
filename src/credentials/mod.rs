//! Credential data model and schema parsing
//!
//! The credential map is loaded wholesale from exactly one source per
//! resolution and never merged across sources.

pub mod map;

pub use map::{Credential, CredentialMap, parse};
