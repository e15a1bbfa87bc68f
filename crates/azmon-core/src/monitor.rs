//! The [`ProcessMonitor`] trait: the web server's view of the process table.

use crate::error::MonitorError;
use crate::id::ProcessId;
use crate::process::{ProcessEntry, ProcessSelector};

/// A backend that owns and maintains a table of monitored processes.
///
/// Methods take `&self` and may be called concurrently from several request
/// workers; implementations provide their own synchronization.
pub trait ProcessMonitor: Send + Sync {
    /// Re-reads the process table from its source.
    fn refresh(&self) -> Result<(), MonitorError>;

    /// Returns the current table in display order.
    fn list_processes(&self) -> Vec<ProcessEntry>;

    /// Returns the ids of all processes in the table.
    fn process_ids(&self) -> Vec<ProcessId> {
        self.list_processes().into_iter().map(|p| p.id).collect()
    }

    /// Starts the process named by `selector` and returns its updated entry.
    fn start_process(&self, selector: &ProcessSelector) -> Result<ProcessEntry, MonitorError>;
}
