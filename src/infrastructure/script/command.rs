use crate::domain::entities::{OutputStream, ProjectAction, ScriptLocation, ScriptOutput};
use crate::domain::error::ControlError;
use async_trait::async_trait;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::mpsc;

const STREAM_BUFFER: usize = 256;

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawns `program` in `workdir` and waits for it to exit, keeping stdout
    /// and stderr apart.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<ScriptOutput, ControlError>;

    /// Spawns `program` in `workdir` with stderr redirected into stdout and
    /// returns the combined output line by line.
    async fn stream(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<OutputStream, ControlError>;
}

pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<ScriptOutput, ControlError> {
        tracing::debug!("Running: {} {} (in {:?})", program, args.join(" "), workdir);

        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(ControlError::Spawn)?;

        // A signal-terminated child has no exit code.
        let exit_code = output.status.code().unwrap_or(-1);
        let result = ScriptOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if result.success() {
            tracing::debug!("{} returned {} bytes", program, result.stdout.len());
        } else {
            tracing::error!(
                "{} {} exited with {}: {}",
                program,
                args.join(" "),
                output.status,
                result.stderr.trim()
            );
        }

        Ok(result)
    }

    async fn stream(
        &self,
        program: &str,
        args: &[String],
        workdir: &Path,
    ) -> Result<OutputStream, ControlError> {
        tracing::debug!("Streaming: {} {} (in {:?})", program, args.join(" "), workdir);

        // One pipe for both descriptors, like `2>&1`: a single reader sees
        // every write in the order the child made it.
        let (reader, writer) = std::io::pipe().map_err(ControlError::Spawn)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(ControlError::Spawn)?)
            .stderr(writer);
        let spawned = command.spawn();
        // The command still owns the parent's write ends; the reader only
        // reaches EOF once they are closed.
        drop(command);
        let mut child = spawned.map_err(ControlError::Spawn)?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let reader_tx = tx.clone();
        let reader_task = tokio::task::spawn_blocking(move || forward_lines(reader, reader_tx));

        let label = format!("{} {}", program, args.join(" "));
        tokio::spawn(async move {
            let abandoned = tokio::select! {
                result = reader_task => result.unwrap_or(false),
                _ = tx.closed() => true,
            };
            // Last sender: dropping it ends the stream for the consumer.
            drop(tx);

            if abandoned {
                tracing::warn!("Output of `{}` abandoned before completion, terminating it", label);
                let _ = child.start_kill();
            }

            match child.wait().await {
                Ok(status) if status.success() => tracing::debug!("`{}` finished", label),
                Ok(status) => tracing::warn!("`{}` exited with {} after streaming", label, status),
                Err(e) => tracing::warn!("Failed to reap `{}`: {}", label, e),
            }
        });

        Ok(OutputStream::new(rx))
    }
}

/// Sends each line of `reader`, terminator included, to `tx` until EOF.
///
/// Returns `true` if it stopped because the receiver went away.
fn forward_lines<R: Read>(reader: R, tx: mpsc::Sender<String>) -> bool {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return false,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.blocking_send(line).is_err() {
                    return true;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read script output: {}", e);
                return false;
            }
        }
    }
}

/// Builds the `show` / `manage` invocations of the management script.
pub struct ScriptCommand {
    runner: Arc<dyn ProcessRunner>,
    interpreter: String,
    location: ScriptLocation,
}

impl ScriptCommand {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        interpreter: String,
        location: ScriptLocation,
    ) -> Self {
        Self {
            runner,
            interpreter,
            location,
        }
    }

    fn script_args(&self, extra: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(self.location.script.to_string_lossy().into_owned());
        args.extend(extra.iter().map(|a| a.to_string()));
        args
    }

    pub async fn show(&self) -> Result<String, ControlError> {
        let args = self.script_args(&["show"]);
        self.runner
            .run(&self.interpreter, &args, &self.location.workdir)
            .await?
            .into_stdout("Show command failed")
    }

    pub async fn manage(
        &self,
        project: &str,
        action: ProjectAction,
    ) -> Result<String, ControlError> {
        let args = self.script_args(&["manage", project, action.as_str()]);
        self.runner
            .run(&self.interpreter, &args, &self.location.workdir)
            .await?
            .into_stdout("Command failed")
    }

    pub async fn stream_manage(
        &self,
        project: &str,
        action: ProjectAction,
    ) -> Result<OutputStream, ControlError> {
        let args = self.script_args(&["manage", project, action.as_str()]);
        self.runner
            .stream(&self.interpreter, &args, &self.location.workdir)
            .await
    }
}
