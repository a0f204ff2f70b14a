// ABOUTME: Command runner double that records invocations instead of running them.
// ABOUTME: Responses are scripted per argv prefix; commits echo a fake image id.

use async_trait::async_trait;
use bob_builder::exec::{CommandError, CommandOutput, CommandRunner, CommandSpec, OutputMode};
use parking_lot::Mutex;
use std::path::PathBuf;

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub argv: Vec<String>,
    pub mode: OutputMode,
    /// Whether the watched path existed when the command was issued.
    pub watched_exists: bool,
}

impl Call {
    /// The engine subcommand (`build`, `run`, `commit`, ...).
    pub fn subcommand(&self) -> &str {
        self.argv.get(1).map(String::as_str).unwrap_or("")
    }
}

enum Response {
    Output(CommandOutput),
    SpawnError,
}

/// Records every command and answers from a script.
///
/// Unscripted commands succeed with empty output, except `commit`, which
/// prints `sha256:<container>` so image ids can be traced through a build.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    rules: Vec<(Vec<String>, Response)>,
    watch: Option<PathBuf>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `output`.
    pub fn respond(mut self, prefix: &[&str], output: CommandOutput) -> Self {
        self.rules.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Response::Output(output),
        ));
        self
    }

    /// Make commands starting with `prefix` exit with `code`.
    pub fn fail(self, prefix: &[&str], code: i32) -> Self {
        self.respond(prefix, CommandOutput::failed(code, "scripted failure"))
    }

    /// Make commands starting with `prefix` fail to start.
    pub fn missing(mut self, prefix: &[&str]) -> Self {
        self.rules.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Response::SpawnError,
        ));
        self
    }

    /// Record whether `path` exists at the moment each command is issued.
    pub fn watch(mut self, path: impl Into<PathBuf>) -> Self {
        self.watch = Some(path.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|c| c.argv).collect()
    }

    /// Recorded calls of one engine subcommand.
    pub fn calls_of(&self, subcommand: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.subcommand() == subcommand)
            .collect()
    }

    /// Engine subcommands in the order they were issued.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.subcommand().to_string())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        mode: OutputMode,
    ) -> Result<CommandOutput, CommandError> {
        let argv = command.to_argv();
        self.calls.lock().push(Call {
            argv: argv.clone(),
            mode,
            watched_exists: self.watch.as_ref().is_some_and(|p| p.exists()),
        });

        let rule = self
            .rules
            .iter()
            .find(|(prefix, _)| argv.starts_with(prefix));

        match rule {
            Some((_, Response::Output(output))) => Ok(output.clone()),
            Some((_, Response::SpawnError)) => Err(CommandError::Spawn {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            }),
            None if argv.get(1).map(String::as_str) == Some("commit") => {
                Ok(CommandOutput::ok(format!("sha256:{}\n", argv[2])))
            }
            None => Ok(CommandOutput::ok("")),
        }
    }
}
