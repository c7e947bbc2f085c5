use crate::domain::{
    entities::{OutputStream, ProjectRecord, ProjectStatus},
    error::ControlError,
    repositories::ProjectRepository,
    services::ActionValidator,
};
use crate::infrastructure::script::command::ScriptCommand;
use crate::infrastructure::script::{ansi, table};
use async_trait::async_trait;

pub struct ScriptProjectRepository {
    command: ScriptCommand,
}

impl ScriptProjectRepository {
    pub fn new(command: ScriptCommand) -> Self {
        Self { command }
    }

    fn parse_projects(&self, report: &str) -> Vec<ProjectRecord> {
        let cleaned = ansi::strip(report);
        let projects = table::parse_table(&cleaned);

        let unknown = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Unknown)
            .count();
        if unknown > 0 {
            tracing::warn!(
                "{} of {} projects reported an unrecognized status",
                unknown,
                projects.len()
            );
        }

        projects
    }
}

#[async_trait]
impl ProjectRepository for ScriptProjectRepository {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ControlError> {
        let report = self.command.show().await?;
        let projects = self.parse_projects(&report);
        tracing::debug!("Parsed {} projects from show report", projects.len());
        Ok(projects)
    }

    async fn run_action(&self, project: &str, action: &str) -> Result<String, ControlError> {
        let request = ActionValidator::validate_request(project, action)?;
        tracing::info!("Running {} for {}", request.action, request.project);

        let output = self.command.manage(&request.project, request.action).await?;
        if !output.is_empty() {
            tracing::info!("{} {} output: {}", request.project, request.action, output.trim_end());
        }

        Ok(output)
    }

    async fn stream_action(
        &self,
        project: &str,
        action: &str,
    ) -> Result<OutputStream, ControlError> {
        let request = ActionValidator::validate_request(project, action)?;
        tracing::info!("Streaming {} for {}", request.action, request.project);

        self.command
            .stream_manage(&request.project, request.action)
            .await
    }
}
