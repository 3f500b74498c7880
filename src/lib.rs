pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod hash;
pub mod store;

pub use auth::{AuthOutcome, AuthRequest, Authenticator};
