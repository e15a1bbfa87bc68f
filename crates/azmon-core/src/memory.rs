//! In-memory process table.
//!
//! [`InMemoryMonitor`] holds a fixed set of configured processes. It does not
//! spawn or inspect operating-system processes: `start_process` only flips the
//! entry's `running` flag. Backends that manage real processes implement
//! [`ProcessMonitor`] themselves.

use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;

use crate::error::MonitorError;
use crate::id::ProcessId;
use crate::monitor::ProcessMonitor;
use crate::process::{ProcessEntry, ProcessSelector};

#[derive(Debug, Default)]
pub struct InMemoryMonitor {
    processes: RwLock<IndexMap<String, ProcessEntry>>,
}

impl InMemoryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a monitor from a list of entries, assigning ids in list order.
    pub fn with_processes(
        entries: impl IntoIterator<Item = ProcessEntry>,
    ) -> Result<Self, MonitorError> {
        let monitor = Self::new();
        for entry in entries {
            monitor.add_process(entry)?;
        }
        monitor.refresh()?;
        Ok(monitor)
    }

    /// Adds a process to the end of the table.
    pub fn add_process(&self, entry: ProcessEntry) -> Result<(), MonitorError> {
        let mut processes = self.processes.write().unwrap_or_else(PoisonError::into_inner);
        if processes.contains_key(&entry.name) {
            return Err(MonitorError::DuplicateProcess { name: entry.name });
        }
        processes.insert(entry.name.clone(), entry);
        Ok(())
    }
}

/// Id for the entry at `index`; ids start at 1.
fn position_id(index: usize) -> Result<ProcessId, MonitorError> {
    index
        .checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .map(ProcessId)
        .ok_or_else(|| MonitorError::RefreshFailed {
            reason: format!("no process id for table position {index}"),
        })
}

impl ProcessMonitor for InMemoryMonitor {
    fn refresh(&self) -> Result<(), MonitorError> {
        let mut processes = self.processes.write().unwrap_or_else(PoisonError::into_inner);
        for (index, entry) in processes.values_mut().enumerate() {
            entry.id = position_id(index)?;
        }
        Ok(())
    }

    fn list_processes(&self) -> Vec<ProcessEntry> {
        let processes = self.processes.read().unwrap_or_else(PoisonError::into_inner);
        processes.values().cloned().collect()
    }

    fn start_process(&self, selector: &ProcessSelector) -> Result<ProcessEntry, MonitorError> {
        let mut processes = self.processes.write().unwrap_or_else(PoisonError::into_inner);
        let entry = processes
            .values_mut()
            .find(|entry| entry.matches(selector))
            .ok_or_else(|| MonitorError::UnknownProcess(selector.clone()))?;
        entry.running = true;
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemoryMonitor {
        InMemoryMonitor::with_processes([
            ProcessEntry::new("vatt4k", "localhost", 2402),
            ProcessEntry::new("mont4k", "localhost", 2412).with_web_port(2413),
        ])
        .unwrap()
    }

    #[test]
    fn ids_follow_table_order() {
        let monitor = sample();
        assert_eq!(monitor.process_ids(), vec![ProcessId(1), ProcessId(2)]);
    }

    #[test]
    fn refresh_renumbers_after_add() {
        let monitor = sample();
        monitor
            .add_process(ProcessEntry::new("90prime", "bok", 2432))
            .unwrap();
        assert_eq!(monitor.list_processes()[2].id, ProcessId(0));

        monitor.refresh().unwrap();
        assert_eq!(monitor.list_processes()[2].id, ProcessId(3));
    }

    #[test]
    fn position_ids_stop_at_u32_range() {
        assert_eq!(position_id(0).unwrap(), ProcessId(1));
        assert_eq!(position_id(u32::MAX as usize - 1).unwrap(), ProcessId(u32::MAX));
        assert!(matches!(
            position_id(u32::MAX as usize),
            Err(MonitorError::RefreshFailed { .. })
        ));
    }

    #[test]
    fn duplicate_name_rejected() {
        let monitor = sample();
        let err = monitor
            .add_process(ProcessEntry::new("vatt4k", "other", 9999))
            .unwrap_err();
        assert!(matches!(err, MonitorError::DuplicateProcess { name } if name == "vatt4k"));
    }

    #[test]
    fn start_by_name_marks_running() {
        let monitor = sample();
        let entry = monitor
            .start_process(&ProcessSelector::Name("mont4k".into()))
            .unwrap();
        assert!(entry.running);
        assert!(monitor.list_processes()[1].running);
        assert!(!monitor.list_processes()[0].running);
    }

    #[test]
    fn start_by_cmd_port() {
        let monitor = sample();
        let entry = monitor
            .start_process(&ProcessSelector::CmdPort(2402))
            .unwrap();
        assert_eq!(entry.name, "vatt4k");
    }

    #[test]
    fn start_unknown_process_fails() {
        let monitor = sample();
        let err = monitor
            .start_process(&ProcessSelector::Name("bcspec".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown process: name=bcspec");
    }
}
