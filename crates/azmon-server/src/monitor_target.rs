//! The process monitor as a remotely callable target.
//!
//! Exposed methods:
//! - `refresh_processes`: re-read the process table
//! - `list_processes`: the table as JSON objects
//! - `get_ids`: the process ids
//! - `start_process?name=...` or `start_process?cmd_port=...`

use std::sync::Arc;

use azmon_core::{ProcessMonitor, ProcessSelector};

use crate::dispatch::{Arguments, BoundTarget, CapabilityTable};
use crate::error::{InvocationError, RegistrationError};

/// Capability table for any [`ProcessMonitor`].
pub fn monitor_capabilities() -> Result<CapabilityTable<dyn ProcessMonitor>, RegistrationError> {
    CapabilityTable::<dyn ProcessMonitor>::new()
        .register("refresh_processes", |monitor, args| {
            args.expect_none()?;
            monitor.refresh()?;
            Ok(monitor.process_ids().len())
        })?
        .register("list_processes", |monitor, args| {
            args.expect_none()?;
            Ok(monitor.list_processes())
        })?
        .register("get_ids", |monitor, args| {
            args.expect_none()?;
            Ok(monitor.process_ids())
        })?
        .register("start_process", |monitor, args| {
            let selector = selector(args)?;
            Ok(monitor.start_process(&selector)?)
        })
}

/// Binds `monitor` under `name`.
pub fn monitor_target(
    name: &str,
    monitor: Arc<dyn ProcessMonitor>,
) -> Result<BoundTarget<dyn ProcessMonitor>, RegistrationError> {
    BoundTarget::new(name, monitor, monitor_capabilities()?)
}

/// Reads a `name` or `cmd_port` selector; `name` wins when both are given.
fn selector(args: &Arguments) -> Result<ProcessSelector, InvocationError> {
    args.expect_only(&["name", "cmd_port"])?;
    if let Some(name) = args.get("name") {
        return Ok(ProcessSelector::Name(name.to_string()));
    }
    match args.parse::<u16>("cmd_port")? {
        Some(port) => Ok(ProcessSelector::CmdPort(port)),
        None => Err(InvocationError::MissingArgument("name".to_string())),
    }
}
