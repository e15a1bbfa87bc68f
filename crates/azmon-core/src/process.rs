//! Process table entries and selectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ProcessId;

/// One monitored process as reported to web clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub id: ProcessId,
    /// Configuration name, e.g. `vatt4k`.
    pub name: String,
    pub host: String,
    /// Port of the process's own command server.
    pub cmd_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    pub running: bool,
}

impl ProcessEntry {
    /// Creates a stopped entry. The id is assigned by the monitor on refresh.
    pub fn new(name: impl Into<String>, host: impl Into<String>, cmd_port: u16) -> Self {
        ProcessEntry {
            id: ProcessId(0),
            name: name.into(),
            host: host.into(),
            cmd_port,
            web_port: None,
            pid: None,
            running: false,
        }
    }

    pub fn with_web_port(mut self, web_port: u16) -> Self {
        self.web_port = Some(web_port);
        self
    }

    /// Returns true if this entry is the one `selector` names.
    pub fn matches(&self, selector: &ProcessSelector) -> bool {
        match selector {
            ProcessSelector::Name(name) => self.name == *name,
            ProcessSelector::CmdPort(port) => self.cmd_port == *port,
        }
    }
}

/// How a remote caller identifies a process to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessSelector {
    Name(String),
    CmdPort(u16),
}

impl fmt::Display for ProcessSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessSelector::Name(name) => write!(f, "name={}", name),
            ProcessSelector::CmdPort(port) => write!(f, "cmd_port={}", port),
        }
    }
}
