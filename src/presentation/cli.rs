use crate::application::UseCaseContainer;
use crate::domain::entities::ManagerConfig;
use crate::infrastructure::ConfigRepository;
use crate::infrastructure::script::{ScriptCommand, ScriptProjectRepository, TokioProcessRunner};
use crate::presentation::render;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "composedeck",
    version,
    about = "Inspect and control Docker Compose projects through their management script"
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/composedeck/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Management script, overriding the config file
    #[arg(long, env = "COMPOSEDECK_SCRIPT", global = true)]
    pub script: Option<PathBuf>,

    /// Interpreter used to run the script
    #[arg(long, env = "COMPOSEDECK_INTERPRETER", global = true)]
    pub interpreter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every project grouped by status
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run an action; logs, status and top show their full output
    Action { project: String, action: String },
    /// Follow the output of logs, status or top as it is produced
    Stream { project: String, action: String },
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}

impl Cli {
    fn config_repository(&self) -> ConfigRepository {
        match &self.config {
            Some(path) => ConfigRepository::with_path(path.clone()),
            None => ConfigRepository::new(),
        }
    }

    fn effective_config(&self, repository: &ConfigRepository) -> Result<ManagerConfig> {
        let mut config = repository.load()?;
        if let Some(script) = &self.script {
            config = config.with_script_path(script.clone());
        }
        if let Some(interpreter) = &self.interpreter {
            config = config.with_interpreter(interpreter.clone());
        }
        Ok(config)
    }
}

fn build_use_cases(config: &ManagerConfig) -> Result<UseCaseContainer> {
    let location = config
        .script_location()
        .with_context(|| format!("Failed to resolve script path {:?}", config.script_path))?;
    tracing::debug!("Using script {:?} in {:?}", location.script, location.workdir);

    let command = ScriptCommand::new(
        Arc::new(TokioProcessRunner::new()),
        config.interpreter.clone(),
        location,
    );
    let repository = Arc::new(ScriptProjectRepository::new(command));
    Ok(UseCaseContainer::new(repository))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_repository = cli.config_repository();
    let config = cli.effective_config(&config_repository)?;

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                println!("# {}", config_repository.path().display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigCommand::Init => {
                config_repository.save(&config)?;
                println!("Wrote {}", config_repository.path().display());
            }
        },
        Command::List { json } => {
            let use_cases = build_use_cases(&config)?;
            let overview = use_cases.list_projects.overview().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print!("{}", render::render_overview(&overview));
            }
        }
        Command::Action { project, action } => {
            let use_cases = build_use_cases(&config)?;
            let output = use_cases.dispatch_action.execute(&project, &action).await?;
            if output.is_empty() {
                println!("{} executed for {}", action, project);
            } else {
                print!("{}", output);
            }
        }
        Command::Stream { project, action } => {
            let use_cases = build_use_cases(&config)?;
            let mut stream = use_cases.stream_action.execute(&project, &action).await?;
            let mut stdout = std::io::stdout();
            while let Some(line) = stream.next_line().await {
                stdout.write_all(line.as_bytes())?;
                stdout.flush()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let repository = ConfigRepository::with_path(dir.path().join("config.json"));
        let cli = Cli::parse_from([
            "composedeck",
            "--script",
            "/srv/stack/manager.sh",
            "--interpreter",
            "sh",
            "list",
        ]);

        let config = cli.effective_config(&repository).unwrap();
        assert_eq!(config.script_path, PathBuf::from("/srv/stack/manager.sh"));
        assert_eq!(config.interpreter, "sh");
    }

    #[test]
    fn parses_action_arguments() {
        let cli = Cli::parse_from(["composedeck", "action", "web", "restart"]);
        match cli.command {
            Command::Action { project, action } => {
                assert_eq!(project, "web");
                assert_eq!(action, "restart");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_runs_against_configured_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("manager.sh");
        std::fs::write(
            &script,
            "echo 'PROJECT | STATUS | PORTS'\necho 'web | Up | 80:80'\necho 'Summary: 1'\n",
        )
        .unwrap();

        let config = ManagerConfig::default()
            .with_script_path(script)
            .with_interpreter("sh".to_string());
        let overview = build_use_cases(&config)
            .unwrap()
            .list_projects
            .overview()
            .await
            .unwrap();

        assert_eq!(overview.running.len(), 1);
        assert_eq!(overview.running[0].ports, "80:80");
    }
}
