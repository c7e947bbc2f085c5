use crate::domain::error::ControlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle operations the management script accepts for a project.
///
/// This is the complete allow-list: any other action name is rejected before
/// a process is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectAction {
    Up,
    Down,
    Stop,
    Start,
    Restart,
    Status,
    Logs,
    Port,
    Top,
    Pull,
    Build,
    Update,
    Config,
    Images,
    Remove,
}

impl ProjectAction {
    pub const ALL: [ProjectAction; 15] = [
        ProjectAction::Up,
        ProjectAction::Down,
        ProjectAction::Stop,
        ProjectAction::Start,
        ProjectAction::Restart,
        ProjectAction::Status,
        ProjectAction::Logs,
        ProjectAction::Port,
        ProjectAction::Top,
        ProjectAction::Pull,
        ProjectAction::Build,
        ProjectAction::Update,
        ProjectAction::Config,
        ProjectAction::Images,
        ProjectAction::Remove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectAction::Up => "up",
            ProjectAction::Down => "down",
            ProjectAction::Stop => "stop",
            ProjectAction::Start => "start",
            ProjectAction::Restart => "restart",
            ProjectAction::Status => "status",
            ProjectAction::Logs => "logs",
            ProjectAction::Port => "port",
            ProjectAction::Top => "top",
            ProjectAction::Pull => "pull",
            ProjectAction::Build => "build",
            ProjectAction::Update => "update",
            ProjectAction::Config => "config",
            ProjectAction::Images => "images",
            ProjectAction::Remove => "remove",
        }
    }

    /// Whether the presentation layer should show this action's output live.
    pub fn supports_streaming(&self) -> bool {
        matches!(
            self,
            ProjectAction::Logs | ProjectAction::Status | ProjectAction::Top
        )
    }

    pub fn streaming() -> impl Iterator<Item = ProjectAction> {
        Self::ALL.into_iter().filter(|a| a.supports_streaming())
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectAction {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ControlError::InvalidAction(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub project: String,
    pub action: ProjectAction,
}

impl ActionRequest {
    pub fn new(project: impl Into<String>, action: ProjectAction) -> Self {
        Self {
            project: project.into(),
            action,
        }
    }
}
