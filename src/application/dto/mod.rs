use crate::domain::entities::{ProjectRecord, ProjectStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub name: String,
    pub status: String,
    pub ports: String,
}

impl From<ProjectRecord> for ProjectDto {
    fn from(project: ProjectRecord) -> Self {
        Self {
            name: project.name,
            status: project.status.to_string(),
            ports: project.ports,
        }
    }
}

/// Projects grouped by status for the dashboard, each group in report order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub running: Vec<ProjectDto>,
    pub stopped: Vec<ProjectDto>,
    pub not_started: Vec<ProjectDto>,
    pub unknown: Vec<ProjectDto>,
    pub fetched_at: Option<String>,
}

impl ProjectOverview {
    pub fn from_projects(projects: Vec<ProjectRecord>) -> Self {
        let mut overview = Self::default();
        for project in projects {
            let bucket = match project.status {
                ProjectStatus::Running => &mut overview.running,
                ProjectStatus::Stopped => &mut overview.stopped,
                ProjectStatus::NotStarted => &mut overview.not_started,
                ProjectStatus::Unknown => &mut overview.unknown,
            };
            bucket.push(project.into());
        }
        overview
    }

    pub fn with_fetched_at(mut self, fetched_at: String) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    pub fn total_count(&self) -> usize {
        self.running.len() + self.stopped.len() + self.not_started.len() + self.unknown.len()
    }
}
