use crate::domain::entities::ProjectStatus;

const NOT_STARTED_MARKERS: [&str; 2] = ["not started", "created"];
const STOPPED_MARKERS: [&str; 3] = ["stopped", "exited", "down"];
const RUNNING_MARKERS: [&str; 3] = ["running", "started", "up"];

pub struct StatusNormalizer;

impl StatusNormalizer {
    /// Maps free-form report text onto a [`ProjectStatus`].
    ///
    /// Markers overlap ("not started" contains "started"), so the checks run
    /// in a fixed order and the first hit wins.
    pub fn normalize(raw: &str) -> ProjectStatus {
        let status = raw.trim().to_lowercase();

        if contains_any(&status, &NOT_STARTED_MARKERS) {
            ProjectStatus::NotStarted
        } else if contains_any(&status, &STOPPED_MARKERS) {
            ProjectStatus::Stopped
        } else if contains_any(&status, &RUNNING_MARKERS) {
            ProjectStatus::Running
        } else {
            ProjectStatus::Unknown
        }
    }
}

fn contains_any(status: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| status.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_wins_over_running_markers() {
        assert_eq!(
            StatusNormalizer::normalize("Created (will start)"),
            ProjectStatus::NotStarted
        );
        assert_eq!(
            StatusNormalizer::normalize("  NOT STARTED  "),
            ProjectStatus::NotStarted
        );
        assert_eq!(
            StatusNormalizer::normalize("created, 1 up"),
            ProjectStatus::NotStarted
        );
    }

    #[test]
    fn stopped_wins_over_running_markers() {
        assert_eq!(StatusNormalizer::normalize("Exited (1)"), ProjectStatus::Stopped);
        assert_eq!(StatusNormalizer::normalize("down"), ProjectStatus::Stopped);
        assert_eq!(
            StatusNormalizer::normalize("Stopped (was up 2 hours)"),
            ProjectStatus::Stopped
        );
    }

    #[test]
    fn running_markers() {
        assert_eq!(StatusNormalizer::normalize("Up 2 hours"), ProjectStatus::Running);
        assert_eq!(StatusNormalizer::normalize("running(3)"), ProjectStatus::Running);
        assert_eq!(StatusNormalizer::normalize("Started"), ProjectStatus::Running);
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(StatusNormalizer::normalize(""), ProjectStatus::Unknown);
        assert_eq!(StatusNormalizer::normalize("paused"), ProjectStatus::Unknown);
        assert_eq!(StatusNormalizer::normalize("restarting"), ProjectStatus::Unknown);
    }
}
