use crate::application::dto::ProjectOverview;
use crate::domain::{
    entities::{OutputStream, ProjectAction, ProjectRecord},
    repositories::ProjectRepository,
    services::ActionValidator,
};
use anyhow::{Result, bail};
use std::sync::Arc;

pub struct ProjectRepositoryUseCase {
    repository: Arc<dyn ProjectRepository>,
}

impl ProjectRepositoryUseCase {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> Arc<dyn ProjectRepository> {
        Arc::clone(&self.repository)
    }
}

pub struct ListProjects {
    use_case: ProjectRepositoryUseCase,
}

impl ListProjects {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            use_case: ProjectRepositoryUseCase::new(repository),
        }
    }

    pub async fn execute(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self.use_case.repository().list_projects().await?)
    }

    pub async fn overview(&self) -> Result<ProjectOverview> {
        let projects = self.execute().await?;
        let fetched_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Ok(ProjectOverview::from_projects(projects).with_fetched_at(fetched_at))
    }
}

pub struct RunAction {
    use_case: ProjectRepositoryUseCase,
}

impl RunAction {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            use_case: ProjectRepositoryUseCase::new(repository),
        }
    }

    pub async fn execute(&self, project: &str, action: &str) -> Result<String> {
        Ok(self.use_case.repository().run_action(project, action).await?)
    }
}

pub struct StreamAction {
    use_case: ProjectRepositoryUseCase,
}

impl StreamAction {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            use_case: ProjectRepositoryUseCase::new(repository),
        }
    }

    /// Starts a live-output action. Only actions flagged as streamable are
    /// accepted here.
    pub async fn execute(&self, project: &str, action: &str) -> Result<OutputStream> {
        let parsed = ActionValidator::validate_action(action)?;
        if !parsed.supports_streaming() {
            let supported: Vec<&str> = ProjectAction::streaming().map(|a| a.as_str()).collect();
            bail!(
                "Invalid streaming action: {} (expected one of: {})",
                action,
                supported.join(", ")
            );
        }
        Ok(self.use_case.repository().stream_action(project, action).await?)
    }

    /// Runs the action and returns everything it printed.
    pub async fn collect(&self, project: &str, action: &str) -> Result<String> {
        Ok(self.execute(project, action).await?.collect_text().await)
    }
}

/// Routes an action the way the dashboard does: streamable actions have their
/// live output collected, everything else runs to completion.
pub struct DispatchAction {
    run: RunAction,
    stream: StreamAction,
}

impl DispatchAction {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            run: RunAction::new(Arc::clone(&repository)),
            stream: StreamAction::new(repository),
        }
    }

    pub async fn execute(&self, project: &str, action: &str) -> Result<String> {
        let parsed = ActionValidator::validate_action(action)?;
        if parsed.supports_streaming() {
            self.stream.collect(project, action).await
        } else {
            self.run.execute(project, action).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProjectStatus;
    use crate::domain::error::ControlError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct FakeRepository {
        calls: Mutex<Vec<String>>,
    }

    impl FakeRepository {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectRepository for FakeRepository {
        async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ControlError> {
            self.calls.lock().unwrap().push("list".to_string());
            Ok(vec![
                ProjectRecord::new("web".to_string(), ProjectStatus::Running),
                ProjectRecord::new("api".to_string(), ProjectStatus::Stopped),
            ])
        }

        async fn run_action(&self, project: &str, action: &str) -> Result<String, ControlError> {
            action.parse::<ProjectAction>()?;
            self.calls.lock().unwrap().push(format!("run {project} {action}"));
            Ok(format!("{action} done\n"))
        }

        async fn stream_action(
            &self,
            project: &str,
            action: &str,
        ) -> Result<OutputStream, ControlError> {
            self.calls.lock().unwrap().push(format!("stream {project} {action}"));
            let (tx, rx) = mpsc::channel(2);
            tx.send(format!("{project} line 1\n")).await.unwrap();
            tx.send(format!("{project} line 2\n")).await.unwrap();
            Ok(OutputStream::new(rx))
        }
    }

    #[tokio::test]
    async fn overview_groups_and_stamps_projects() {
        let repo = Arc::new(FakeRepository::default());
        let overview = ListProjects::new(repo).overview().await.unwrap();

        assert_eq!(overview.running[0].name, "web");
        assert_eq!(overview.stopped[0].name, "api");
        assert!(overview.fetched_at.is_some());
    }

    #[tokio::test]
    async fn dispatch_streams_streamable_actions() {
        let repo = Arc::new(FakeRepository::default());
        let dispatch = DispatchAction::new(Arc::clone(&repo) as Arc<dyn ProjectRepository>);

        let output = dispatch.execute("web", "logs").await.unwrap();
        assert_eq!(output, "web line 1\nweb line 2\n");
        assert_eq!(repo.calls(), vec!["stream web logs"]);
    }

    #[tokio::test]
    async fn dispatch_runs_other_actions_to_completion() {
        let repo = Arc::new(FakeRepository::default());
        let dispatch = DispatchAction::new(Arc::clone(&repo) as Arc<dyn ProjectRepository>);

        let output = dispatch.execute("web", "restart").await.unwrap();
        assert_eq!(output, "restart done\n");
        assert_eq!(repo.calls(), vec!["run web restart"]);
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_actions_up_front() {
        let repo = Arc::new(FakeRepository::default());
        let dispatch = DispatchAction::new(Arc::clone(&repo) as Arc<dyn ProjectRepository>);

        let err = dispatch.execute("web", "hack").await.unwrap_err();
        let control = err.downcast_ref::<ControlError>().unwrap();
        assert!(control.is_invalid_action());
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn stream_use_case_refuses_non_streaming_actions() {
        let repo = Arc::new(FakeRepository::default());
        let stream = StreamAction::new(Arc::clone(&repo) as Arc<dyn ProjectRepository>);

        let err = stream.execute("web", "down").await.err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid streaming action: down (expected one of: status, logs, top)"
        );
        assert!(repo.calls().is_empty());
    }
}
