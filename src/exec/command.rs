// ABOUTME: Typed argument-list builder for external commands and their captured results.
// ABOUTME: Renders a redacted command line for logs; secrets reach the process untouched.

use std::fmt;

const REDACTED: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    secret: bool,
}

/// An external command as a program plus an argument list.
///
/// Arguments are never joined into a shell string, so there is no quoting to
/// get wrong. `Display` prints the command line with secret arguments masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<Arg>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: false,
        });
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.arg(value);
        }
        self
    }

    /// Add an argument that must not appear in logs or error messages.
    pub fn secret_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret: true,
        });
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as passed to the process (unredacted).
    pub fn args_iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.value.as_str())
    }

    /// Program followed by its arguments, unredacted.
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.value.clone()))
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.secret {
                write!(f, " {}", REDACTED)?;
            } else {
                write!(f, " {}", arg.value)?;
            }
        }
        Ok(())
    }
}

/// Result of running an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal or never started.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// A command that could not be run at all.
    pub fn not_run(reason: impl Into<String>) -> Self {
        Self {
            code: None,
            success: false,
            stdout: String::new(),
            stderr: reason.into(),
        }
    }

    /// Human-readable exit status.
    pub fn exit_description(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "no exit code".to_string(),
        }
    }

    pub(crate) fn log_debug(&self) {
        if !self.stdout.trim().is_empty() {
            tracing::debug!("stdout:\n{}", self.stdout.trim_end());
        }
        if !self.stderr.trim().is_empty() {
            tracing::debug!("stderr:\n{}", self.stderr.trim_end());
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
