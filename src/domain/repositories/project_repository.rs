use crate::domain::entities::{OutputStream, ProjectRecord};
use crate::domain::error::ControlError;
use async_trait::async_trait;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetches every compose project in report order.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ControlError>;

    /// Runs `action` for `project` to completion and returns its stdout.
    async fn run_action(&self, project: &str, action: &str) -> Result<String, ControlError>;

    /// Starts `action` for `project` and hands back its output as it arrives.
    async fn stream_action(&self, project: &str, action: &str)
    -> Result<OutputStream, ControlError>;
}
