use thiserror::Error;

/// Failures surfaced by the project control core.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The requested action is not on the allow-list. Nothing was spawned.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A blocking script call exited non-zero. Carries the script's stderr,
    /// or a generic message when stderr was empty.
    #[error("{0}")]
    Execution(String),

    #[error("Failed to execute management script: {0}")]
    Spawn(#[source] std::io::Error),
}

impl ControlError {
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, ControlError::InvalidAction(_))
    }
}
