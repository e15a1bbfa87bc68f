//! Application state shared by the axum handlers.
//!
//! [`AppState`] holds the [`Dispatcher`] for `/api` requests and the monitor
//! used to render the process list page. The monitor is also the only target
//! registered with the dispatcher, under the configured name.

use std::sync::Arc;

use azmon_core::ProcessMonitor;

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, TargetRegistry};
use crate::error::RegistrationError;
use crate::monitor_target::monitor_target;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// The process monitor. Its thread-safety is the implementation's
    /// responsibility: handlers call it concurrently without extra locking.
    pub monitor: Arc<dyn ProcessMonitor>,
}

impl AppState {
    /// Registers `monitor` as the single remotely callable target named by
    /// `config.target`.
    pub fn new(
        config: &ServerConfig,
        monitor: Arc<dyn ProcessMonitor>,
    ) -> Result<Self, RegistrationError> {
        let registry = TargetRegistry::new();
        registry.register(Arc::new(monitor_target(&config.target, Arc::clone(&monitor))?))?;

        Ok(AppState {
            dispatcher: Dispatcher::new(Arc::new(registry), config.log_commands),
            monitor,
        })
    }
}
