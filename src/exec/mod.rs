// ABOUTME: External command execution: typed commands, runners and failure policy.
// ABOUTME: Every engine, git and service invocation goes through `execute`.

mod command;
mod error;
mod runner;

pub use command::{CommandOutput, CommandSpec};
pub use error::{CommandError, CommandErrorKind};
pub use runner::{CommandRunner, OutputMode, ProcessRunner};

use error::FailedSnafu;

/// What to do when a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the failure as an error.
    Propagate,
    /// Log the failure and hand back the (failed) output.
    Continue,
}

/// Run a command, logging it first and its output on failure.
///
/// Success is judged purely by exit status. Under [`FailurePolicy::Continue`]
/// even spawn failures and timeouts come back as a failed [`CommandOutput`].
pub async fn execute<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &CommandSpec,
    mode: OutputMode,
    policy: FailurePolicy,
) -> Result<CommandOutput, CommandError> {
    tracing::debug!("$ {}", command);

    let output = match runner.run(command, mode).await {
        Ok(output) => output,
        Err(e) if policy == FailurePolicy::Continue => {
            tracing::debug!("{} (continuing)", e);
            return Ok(CommandOutput::not_run(e.to_string()));
        }
        Err(e) => return Err(e),
    };

    if output.success {
        return Ok(output);
    }

    output.log_debug();
    match policy {
        FailurePolicy::Propagate => FailedSnafu {
            command: command.to_string(),
            output,
        }
        .fail(),
        FailurePolicy::Continue => {
            tracing::debug!(
                "`{}` failed with {} (continuing)",
                command,
                output.exit_description()
            );
            Ok(output)
        }
    }
}
