//! Outcome handling
//!
//! Maps authentication outcomes to HTTP-style status codes and logs the
//! full detail for operators. Internal error detail never reaches the
//! client: every Deny collapses to the same forbidden status, every
//! SystemError to the same unavailable status (fail closed).

use log::{debug, error, info};
use std::net::IpAddr;

use crate::auth::AuthOutcome;

/// Convert an outcome to the status code the boundary should emit.
/// Allow maps to 200 as "pass the request through".
pub fn outcome_to_http_status(outcome: &AuthOutcome) -> u16 {
    match outcome {
        AuthOutcome::Allow => 200,
        AuthOutcome::Deny(_) => 403,
        AuthOutcome::SystemError(_) => 503,
    }
}

/// Log an outcome with its full internal detail for operators
pub fn log_outcome(client_addr: IpAddr, outcome: &AuthOutcome) {
    match outcome {
        AuthOutcome::Allow => debug!("Client {} authenticated", client_addr),
        AuthOutcome::Deny(reason) => info!("Client {} denied: {}", client_addr, reason),
        AuthOutcome::SystemError(kind) => {
            error!(
                "Authentication subsystem failure handling client {}: {}",
                client_addr, kind
            );
        }
    }
}
