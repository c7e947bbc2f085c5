use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Location of the compose management script. Relative paths resolve
    /// against the current directory.
    pub script_path: PathBuf,
    pub interpreter: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("manager.sh"),
            interpreter: "bash".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn with_script_path(mut self, script_path: PathBuf) -> Self {
        self.script_path = script_path;
        self
    }

    pub fn with_interpreter(mut self, interpreter: String) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn script_location(&self) -> std::io::Result<ScriptLocation> {
        ScriptLocation::resolve(&self.script_path)
    }
}

/// Absolute script path plus the directory it must run from.
///
/// The management script resolves its compose files relative to its own
/// location, so the working directory is always the script's parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLocation {
    pub script: PathBuf,
    pub workdir: PathBuf,
}

impl ScriptLocation {
    pub fn resolve(script_path: &Path) -> std::io::Result<Self> {
        let script = std::path::absolute(script_path)?;
        let workdir = script
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("script path {:?} has no parent directory", script),
                )
            })?;

        Ok(Self { script, workdir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_location_uses_parent_as_workdir() {
        let config =
            ManagerConfig::default().with_script_path(PathBuf::from("/opt/compose/manager.sh"));

        let location = config.script_location().unwrap();
        assert_eq!(location.script, PathBuf::from("/opt/compose/manager.sh"));
        assert_eq!(location.workdir, PathBuf::from("/opt/compose"));
    }

    #[test]
    fn default_script_location_is_made_absolute() {
        let location = ManagerConfig::default().script_location().unwrap();
        assert!(location.script.is_absolute());
        assert!(location.script.ends_with("manager.sh"));
        assert_eq!(location.workdir, std::env::current_dir().unwrap());
    }

    #[test]
    fn root_has_no_workdir() {
        assert!(ScriptLocation::resolve(Path::new("/")).is_err());
    }
}
