//! Process model shared by the azmon web server and its monitor backends.
//!
//! The web server never discovers processes itself. It talks to a
//! [`ProcessMonitor`] implementation, which owns the process table and
//! decides what "refresh" and "start" mean for its environment.

pub mod error;
pub mod id;
pub mod memory;
pub mod monitor;
pub mod process;

// Re-export commonly used types
pub use error::MonitorError;
pub use id::ProcessId;
pub use memory::InMemoryMonitor;
pub use monitor::ProcessMonitor;
pub use process::{ProcessEntry, ProcessSelector};
