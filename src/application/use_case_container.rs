use crate::application::use_cases::{DispatchAction, ListProjects, RunAction, StreamAction};
use crate::domain::repositories::ProjectRepository;
use std::sync::Arc;

pub struct UseCaseContainer {
    pub list_projects: Arc<ListProjects>,
    pub run_action: Arc<RunAction>,
    pub stream_action: Arc<StreamAction>,
    pub dispatch_action: Arc<DispatchAction>,
}

impl UseCaseContainer {
    pub fn new(project_repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            list_projects: Arc::new(ListProjects::new(Arc::clone(&project_repository))),
            run_action: Arc::new(RunAction::new(Arc::clone(&project_repository))),
            stream_action: Arc::new(StreamAction::new(Arc::clone(&project_repository))),
            dispatch_action: Arc::new(DispatchAction::new(project_repository)),
        }
    }
}
