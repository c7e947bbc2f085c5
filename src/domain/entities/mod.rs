pub mod action;
pub mod config;
pub mod output;
pub mod project;

pub use action::{ActionRequest, ProjectAction};
pub use config::{ManagerConfig, ScriptLocation};
pub use output::{OutputStream, ScriptOutput};
pub use project::{ProjectRecord, ProjectStatus};
