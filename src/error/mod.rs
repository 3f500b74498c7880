//! Error handling
//!
//! Defines error types and outcome mapping for the auth gate.

pub mod handlers;
pub mod types;

pub use types::*;
