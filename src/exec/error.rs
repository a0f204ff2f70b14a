// ABOUTME: External command error types with SNAFU pattern.
// ABOUTME: Distinguishes spawn failures, timeouts, non-zero exits and stream I/O errors.

use snafu::Snafu;
use std::time::Duration;

use super::command::CommandOutput;

/// Failure running an external command.
///
/// `command` is always the redacted command line.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CommandError {
    #[snafu(display("failed to start `{command}`: {source}"))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` timed out after {timeout:?}"))]
    Timeout { command: String, timeout: Duration },

    #[snafu(display("`{command}` failed with {}", output.exit_description()))]
    Failed {
        command: String,
        output: CommandOutput,
    },

    #[snafu(display("failed reading output of `{command}`: {source}"))]
    Stream {
        command: String,
        source: std::io::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorKind {
    /// The program could not be started (e.g. not installed).
    Spawn,
    /// The configured command timeout elapsed.
    Timeout,
    /// The program ran and exited unsuccessfully.
    Failed,
    /// Reading the program's output failed.
    Stream,
}

impl CommandError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> CommandErrorKind {
        match self {
            CommandError::Spawn { .. } => CommandErrorKind::Spawn,
            CommandError::Timeout { .. } => CommandErrorKind::Timeout,
            CommandError::Failed { .. } => CommandErrorKind::Failed,
            CommandError::Stream { .. } => CommandErrorKind::Stream,
        }
    }

    /// Captured output, if the command ran to completion.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            CommandError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}
