//! Binary entrypoint for the azmon web server.
//!
//! Reads configuration from environment variables (see [`ServerConfig`]):
//! - `AZMON_PORT`: Server listen port (default: "2400")
//! - `AZMON_TARGET`: Remotely callable target name (default: "monitor")
//! - `AZMON_LOG_COMMANDS`: Log each `/api` request URL (default: "true")
//!
//! The process table starts empty; a deployment supplies its own
//! `ProcessMonitor` backend.

use std::sync::Arc;

use azmon_core::InMemoryMonitor;
use azmon_server::config::ServerConfig;
use azmon_server::listener::WebServer;
use azmon_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let state = AppState::new(&config, Arc::new(InMemoryMonitor::new()))
        .expect("Failed to initialize application state");

    let server = WebServer::from_config(&config, state);
    let addr = server.start().expect("Failed to start web server");
    tracing::info!("azmon web server listening on {}", addr);

    // The listener thread is detached; exiting main ends it.
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to wait for ctrl-c: {}", e);
    }
    tracing::info!("azmon web server exiting");
}
