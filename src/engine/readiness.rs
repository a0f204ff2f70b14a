// ABOUTME: Brings the container engine to a usable state before building.
// ABOUTME: Insecure registry trust, service start, optional login, then a health probe.

use crate::config::Settings;
use crate::exec::{CommandError, CommandRunner, FailurePolicy, OutputMode, execute};
use crate::types::{Credentials, ImageName};

use super::commands::Engine;
use super::daemon_config::{DaemonConfigError, DaemonConfigUpdate, allow_insecure_registry};

/// Errors that leave the engine unusable.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The health probe failed; the engine cannot run builds.
    #[error("{engine} is not available: {error}")]
    Unavailable { engine: String, error: CommandError },

    #[error("registry login failed: {0}")]
    Login(CommandError),

    #[error("failed to configure insecure registry: {0}")]
    DaemonConfig(DaemonConfigError),
}

impl From<DaemonConfigError> for EngineError {
    fn from(e: DaemonConfigError) -> Self {
        EngineError::DaemonConfig(e)
    }
}

/// What the engine needs to know about the build to prepare for it.
#[derive(Debug, Clone, Copy)]
pub struct Readiness<'a> {
    pub image: &'a ImageName,
    pub credentials: Option<&'a Credentials>,
    pub allow_insecure: bool,
}

/// Make sure the engine can build and push.
///
/// Steps, in order:
/// 1. Trust the image's registry host as insecure, when allowed and present.
/// 2. `service <engine> start`, tolerating failure, then wait the settle delay.
/// 3. Log in when credentials were supplied.
/// 4. Probe with `<engine> ps`; failure is [`EngineError::Unavailable`].
pub async fn ensure_ready<R: CommandRunner + ?Sized>(
    runner: &R,
    engine: &Engine,
    settings: &Settings,
    readiness: Readiness<'_>,
) -> Result<(), EngineError> {
    if readiness.allow_insecure
        && let Some(host) = readiness.image.registry_host()
    {
        tracing::debug!(
            "Configuring {} to allow insecure registry {}",
            engine.program(),
            host
        );
        match allow_insecure_registry(&settings.daemon_config, host)? {
            DaemonConfigUpdate::Written => {
                tracing::info!("Marked {} as an insecure registry", host)
            }
            DaemonConfigUpdate::AlreadyPresent | DaemonConfigUpdate::Skipped => {}
        }
    }

    tracing::info!("Starting {}", engine.program());
    // Not every platform manages the engine as a service; the probe below decides.
    let started = execute(
        runner,
        &engine.service_start(),
        OutputMode::Capture,
        FailurePolicy::Continue,
    )
    .await
    .is_ok_and(|output| output.success);
    if !started {
        tracing::debug!("service start did not succeed, probing anyway");
    }
    tokio::time::sleep(settings.settle_delay).await;

    if let Some(credentials) = readiness.credentials {
        tracing::info!("Logging in as {}", credentials.username());
        execute(
            runner,
            &engine.login(credentials),
            OutputMode::Capture,
            FailurePolicy::Propagate,
        )
        .await
        .map_err(EngineError::Login)?;
    }

    execute(
        runner,
        &engine.ps(),
        OutputMode::Capture,
        FailurePolicy::Propagate,
    )
    .await
    .map_err(|error| EngineError::Unavailable {
        engine: engine.program().to_string(),
        error,
    })?;

    Ok(())
}
