//! Monitor error types for azmon-core.

use thiserror::Error;

use crate::process::ProcessSelector;

/// Errors produced by a [`crate::ProcessMonitor`] backend.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// No process in the table matches the selector.
    #[error("unknown process: {0}")]
    UnknownProcess(ProcessSelector),

    /// Registering a process whose name is already in the table.
    #[error("duplicate process name: '{name}'")]
    DuplicateProcess { name: String },

    /// The backend could not refresh its process table.
    #[error("refresh failed: {reason}")]
    RefreshFailed { reason: String },
}
