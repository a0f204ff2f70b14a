// ABOUTME: State transition methods for the build lifecycle.
// ABOUTME: Dockerfile or buildpack build from NotStarted, push from Built.

use crate::engine::Engine;
use crate::exec::{CommandOutput, CommandRunner, FailurePolicy, OutputMode, execute};

use super::lifecycle::Build;
use super::error::BuildError;
use super::state::{Built, NotStarted, Pushed};
use super::strategy::BuildStrategy;

// =============================================================================
// NotStarted -> Built
// =============================================================================

impl Build<NotStarted> {
    /// Build the image with the strategy the source tree calls for.
    ///
    /// # Errors
    ///
    /// Returns the [`BuildError`] of the first engine step that fails.
    #[must_use = "build state must be used"]
    pub async fn build<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        engine: &Engine,
        builder_image: &str,
    ) -> Result<Build<Built>, BuildError> {
        let strategy = BuildStrategy::for_source(self.request.source());
        let tag = self.request.effective_tag();

        tracing::info!(
            "Starting build {} of {} ({})",
            self.request.id(),
            self.request.image(),
            strategy
        );

        match strategy {
            BuildStrategy::Dockerfile => self.dockerfile_build(runner, engine, &tag).await?,
            BuildStrategy::Buildpack => {
                self.buildpack_build(runner, engine, builder_image, &tag)
                    .await?
            }
        }

        tracing::info!("{} successfully built!", tag);
        Ok(self.transition(Built { tag, strategy }))
    }

    async fn dockerfile_build<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        engine: &Engine,
        tag: &str,
    ) -> Result<(), BuildError> {
        tracing::info!("Using {} to build {}", engine.program(), self.request.id());

        execute(
            runner,
            &engine.build(self.request.source(), tag),
            OutputMode::Stream,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(BuildError::ImageBuild)?;

        Ok(())
    }

    async fn buildpack_build<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        engine: &Engine,
        builder_image: &str,
        tag: &str,
    ) -> Result<(), BuildError> {
        let id = self.request.id();
        tracing::info!("Using buildpacks to build {}", id);

        let builder = id.builder_container();
        let output = execute(
            runner,
            &engine.run_buildpack_build(
                &builder,
                self.request.source(),
                self.buildpacks.as_ref().map(|dir| dir.root()),
                builder_image,
            ),
            OutputMode::Capture,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(BuildError::BuildpackRun)?;
        output.log_debug();

        let compiled = commit(runner, engine, &builder).await?;

        let web = id.web_container();
        execute(
            runner,
            &engine.create_web(&web, &compiled),
            OutputMode::Capture,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(|error| BuildError::Create {
            container: web.clone(),
            error,
        })?;

        let image = commit(runner, engine, &web).await?;

        execute(
            runner,
            &engine.tag(&image, tag),
            OutputMode::Capture,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(|error| BuildError::Tag {
            tag: tag.to_string(),
            error,
        })?;

        Ok(())
    }
}

/// Commit `container` and return the new image id.
async fn commit<R: CommandRunner + ?Sized>(
    runner: &R,
    engine: &Engine,
    container: &str,
) -> Result<String, BuildError> {
    let output = execute(
        runner,
        &engine.commit(container),
        OutputMode::Capture,
        FailurePolicy::Propagate,
    )
    .await
    .map_err(|error| BuildError::Commit {
        container: container.to_string(),
        error,
    })?;

    image_id(&output).ok_or_else(|| BuildError::EmptyCommit(container.to_string()))
}

fn image_id(output: &CommandOutput) -> Option<String> {
    let id = output.stdout.trim();
    (!id.is_empty()).then(|| id.to_string())
}

// =============================================================================
// Built -> Pushed
// =============================================================================

impl Build<Built> {
    /// Push the built image to its registry.
    ///
    /// Only a successfully built image can be pushed; there is no `push` on an
    /// unbuilt [`Build`]:
    ///
    /// ```compile_fail
    /// use bob_builder::build::{Build, BuildRequest};
    /// use bob_builder::engine::Engine;
    /// use bob_builder::exec::ProcessRunner;
    /// use bob_builder::types::ImageName;
    ///
    /// async fn push_unbuilt() {
    ///     let request = BuildRequest::new(".", ImageName::parse("app").unwrap()).unwrap();
    ///     let runner = ProcessRunner::new(std::time::Duration::from_secs(60));
    ///     let _ = Build::new(request).push(&runner, &Engine::new("docker")).await;
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Push`] if the engine push fails.
    #[must_use = "build state must be used"]
    pub async fn push<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        engine: &Engine,
    ) -> Result<Build<Pushed>, BuildError> {
        let tag = self.state.tag.clone();
        tracing::info!("Pushing {}", tag);

        let output = execute(
            runner,
            &engine.push(&tag),
            OutputMode::Capture,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(|error| BuildError::Push {
            tag: tag.clone(),
            error,
        })?;
        output.log_debug();

        tracing::info!("{} successfully pushed!", tag);
        let strategy = self.state.strategy;
        Ok(self.transition(Pushed { tag, strategy }))
    }
}
