//! Auth Gate - Entry Point
//!
//! Demo gate that runs each inbound connection through the configured
//! authenticator. One `user secret` line per connection, answered with the
//! mapped status line. Keeps the full authentication path exercisable
//! without dragging in an HTTP framework.

use log::{error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use authgate::auth::registry::REGISTRY;
use authgate::auth::{self, AuthRequest, Authenticator};
use authgate::config::GateConfig;
use authgate::error::handlers::{log_outcome, outcome_to_http_status};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching auth gate...");

    let config = match GateConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let authenticator = match auth::from_config(&config) {
        Ok(authenticator) => authenticator,
        Err(e) => {
            error!("Failed to build authenticator: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = REGISTRY.install(Arc::clone(&authenticator)) {
        error!("Failed to install authenticator: {}", e);
        std::process::exit(1);
    }

    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => {
            info!("Gate bound to {}", config.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address, e);
            std::process::exit(1);
        }
    };

    info!(
        "Gating requests with the {} authenticator",
        config.authenticator
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let authenticator = Arc::clone(&authenticator);

                // Spawn a task for each connection so the accept loop
                // doesn't block on slow credential sources
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, authenticator).await {
                        warn!("Failed to handle client {}: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
            }
        }
    }
}

/// Reads one `user secret` line and answers with the mapped status line
async fn handle_connection(
    stream: TcpStream,
    authenticator: Arc<dyn Authenticator>,
) -> Result<(), std::io::Error> {
    let peer = stream.peer_addr()?;
    let mut reader = BufReader::new(stream);
    let mut line = String::new();

    reader.read_line(&mut line).await?;

    let mut parts = line.split_whitespace();
    let username = parts.next().map(str::to_string);
    let secret = parts.next().map(str::to_string);

    let request = AuthRequest::new(username, secret, peer.ip());
    let outcome = authenticator.authenticate(&request).await;
    log_outcome(peer.ip(), &outcome);

    let reply = match outcome_to_http_status(&outcome) {
        200 => "200 OK\r\n",
        403 => "403 Forbidden\r\n",
        _ => "503 Service Unavailable\r\n",
    };

    reader.get_mut().write_all(reply.as_bytes()).await?;
    reader.get_mut().flush().await?;
    Ok(())
}
