// ABOUTME: Runs external commands with tokio::process under a uniform timeout.
// ABOUTME: Supports captured (blocking) and streaming output modes.

use async_trait::async_trait;
use snafu::ResultExt;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::command::{CommandOutput, CommandSpec};
use super::error::{CommandError, SpawnSnafu, StreamSnafu, TimeoutSnafu};

/// How a command's output is handled while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Wait for completion and return the captured output.
    Capture,
    /// Forward output line by line as it is produced, capturing it as well.
    Stream,
}

/// Runs external commands.
///
/// Implementations report a non-zero exit as `Ok` with `success == false`;
/// deciding whether that is fatal is left to [`execute`](super::execute).
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec, mode: OutputMode)
    -> Result<CommandOutput, CommandError>;
}

/// Runs commands as local child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    /// Create a runner that aborts any command running longer than `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.args_iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let child = Self::command(spec).spawn().context(SpawnSnafu {
            command: spec.to_string(),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                TimeoutSnafu {
                    command: spec.to_string(),
                    timeout: self.timeout,
                }
                .build()
            })?
            .context(StreamSnafu {
                command: spec.to_string(),
            })?;

        Ok(CommandOutput::from(output))
    }

    async fn stream(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let mut child = Self::command(spec).spawn().context(SpawnSnafu {
            command: spec.to_string(),
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let run = async {
            let (out, err) = tokio::join!(forward(stdout, false), forward(stderr, true));
            let status = child.wait().await?;
            Ok::<_, io::Error>(CommandOutput {
                code: status.code(),
                success: status.success(),
                stdout: out?,
                stderr: err?,
            })
        };

        // On timeout the child is dropped here, which kills it.
        tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                TimeoutSnafu {
                    command: spec.to_string(),
                    timeout: self.timeout,
                }
                .build()
            })?
            .context(StreamSnafu {
                command: spec.to_string(),
            })
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        mode: OutputMode,
    ) -> Result<CommandOutput, CommandError> {
        match mode {
            OutputMode::Capture => self.capture(command).await,
            OutputMode::Stream => self.stream(command).await,
        }
    }
}

/// Echo each line of `reader` to our own stdout/stderr and return everything read.
async fn forward<R: AsyncRead + Unpin>(reader: Option<R>, to_stderr: bool) -> io::Result<String> {
    let mut captured = String::new();
    let Some(reader) = reader else {
        return Ok(captured);
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if to_stderr {
            eprint!("{line}");
        } else {
            print!("{line}");
        }
        captured.push_str(&line);
    }
    Ok(captured)
}
