use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Running,
    Stopped,
    NotStarted,
    Unknown,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Running => "running",
            ProjectStatus::Stopped => "stopped",
            ProjectStatus::NotStarted => "not_started",
            ProjectStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the management script's `show` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub status: ProjectStatus,
    pub ports: String,
}

impl ProjectRecord {
    pub fn new(name: String, status: ProjectStatus) -> Self {
        Self {
            name,
            status,
            ports: String::new(),
        }
    }

    pub fn with_ports(mut self, ports: String) -> Self {
        self.ports = ports;
        self
    }
}
