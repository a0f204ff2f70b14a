// ABOUTME: Drives one build end to end: buildpack, engine readiness, build, push.
// ABOUTME: Steps run strictly in sequence and the first failure aborts the run.

use crate::build::{Build, BuildRequest, BuildResult};
use crate::buildpack::{self, AcquisitionError, ArchiveFetcher, BuildpackDir, HttpFetcher};
use crate::config::Settings;
use crate::engine::{self, Engine, Readiness};
use crate::error::Result;
use crate::exec::{CommandRunner, ProcessRunner};

/// Runs builds against one engine with one set of settings.
pub struct Orchestrator<R, F> {
    settings: Settings,
    engine: Engine,
    runner: R,
    fetcher: F,
}

impl Orchestrator<ProcessRunner, HttpFetcher> {
    /// Orchestrator running real processes and downloading over HTTP.
    ///
    /// Downloads share the command timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be set up.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let runner = ProcessRunner::new(settings.command_timeout);
        let fetcher =
            HttpFetcher::with_timeout(settings.command_timeout).map_err(AcquisitionError::from)?;
        Ok(Self::new(settings, runner, fetcher))
    }
}

impl<R: CommandRunner, F: ArchiveFetcher> Orchestrator<R, F> {
    pub fn new(settings: Settings, runner: R, fetcher: F) -> Self {
        let engine = Engine::new(settings.engine.clone());
        Self {
            settings,
            engine,
            runner,
            fetcher,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build `request`, pushing afterwards if it asks for that.
    ///
    /// # Errors
    ///
    /// Returns the first acquisition, engine, build or push failure.
    pub async fn run(&self, request: BuildRequest) -> Result<BuildResult> {
        let buildpacks = match request.buildpack_source() {
            Some(source) => {
                let dir = BuildpackDir::new(&self.settings.buildpacks_dir);
                buildpack::acquire(source, &dir, &self.fetcher, &self.runner).await?;
                Some(dir)
            }
            None => None,
        };

        engine::ensure_ready(
            &self.runner,
            &self.engine,
            &self.settings,
            Readiness {
                image: request.image(),
                credentials: request.login_credentials(),
                allow_insecure: request.insecure_allowed(),
            },
        )
        .await?;

        let push = request.push_requested();
        let built = Build::new(request)
            .with_buildpacks(buildpacks)
            .build(&self.runner, &self.engine, &self.settings.builder_image)
            .await?;

        if !push {
            return Ok(built.result());
        }

        let pushed = built.push(&self.runner, &self.engine).await?;
        Ok(pushed.result())
    }
}
