use crate::domain::error::ControlError;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Captured result of a blocking script call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns stdout, or an `Execution` error carrying stderr (falling back
    /// to `fallback` when stderr is empty) if the script exited non-zero.
    pub fn into_stdout(self, fallback: &str) -> Result<String, ControlError> {
        if self.success() {
            return Ok(self.stdout);
        }

        if self.stderr.is_empty() {
            Err(ControlError::Execution(fallback.to_string()))
        } else {
            Err(ControlError::Execution(self.stderr))
        }
    }
}

/// Lines produced by a streaming script call, stdout and stderr merged.
///
/// Each line keeps its terminator exactly as written; only a final
/// unterminated line lacks one. One-shot and forward-only. The sequence ends
/// once the child closes its output; a non-zero exit does not surface here.
#[derive(Debug)]
pub struct OutputStream {
    receiver: mpsc::Receiver<String>,
}

impl OutputStream {
    pub fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    pub async fn next_line(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Drains the stream into the child's output, byte for byte.
    pub async fn collect_text(mut self) -> String {
        let mut text = String::new();
        while let Some(line) = self.next_line().await {
            text.push_str(&line);
        }
        text
    }
}

impl Stream for OutputStream {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn output(exit_code: i32, stdout: &str, stderr: &str) -> ScriptOutput {
        ScriptOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn successful_output_yields_stdout() {
        assert_eq!(output(0, "ok\n", "warn").into_stdout("x").unwrap(), "ok\n");
    }

    #[test]
    fn failed_output_carries_stderr_verbatim() {
        let err = output(1, "", "boom").into_stdout("Command failed").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn failed_output_without_stderr_uses_fallback() {
        let err = output(2, "partial", "").into_stdout("Command failed").unwrap_err();
        assert!(matches!(err, ControlError::Execution(ref m) if m == "Command failed"));
    }

    #[tokio::test]
    async fn stream_yields_lines_in_order_then_ends() {
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            for line in ["one", "two", "three"] {
                tx.send(line.to_string()).await.unwrap();
            }
        });

        let lines: Vec<String> = OutputStream::new(rx).collect().await;
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn collect_text_keeps_output_unchanged() {
        let (tx, rx) = mpsc::channel(4);
        tx.send("a\r\n".to_string()).await.unwrap();
        tx.send("b".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(OutputStream::new(rx).collect_text().await, "a\r\nb");
    }
}
