use crate::domain::entities::{ActionRequest, ProjectAction};
use crate::domain::error::ControlError;

pub struct ActionValidator;

impl ActionValidator {
    pub fn validate_action(action: &str) -> Result<ProjectAction, ControlError> {
        action.parse()
    }

    pub fn validate_request(project: &str, action: &str) -> Result<ActionRequest, ControlError> {
        let action = Self::validate_action(action).inspect_err(|_| {
            tracing::warn!("Rejected action {:?} for project {}", action, project);
        })?;
        Ok(ActionRequest::new(project, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_for_allowed_action() {
        let request = ActionValidator::validate_request("web", "restart").unwrap();
        assert_eq!(request, ActionRequest::new("web", ProjectAction::Restart));
    }

    #[test]
    fn rejects_unknown_action() {
        let err = ActionValidator::validate_request("web", "rm -rf").unwrap_err();
        assert!(err.is_invalid_action());
    }
}
