// ABOUTME: Orchestrator settings: engine program, builder image, timeouts and paths.
// ABOUTME: Loaded from an optional YAML file, then overridden from the environment.

mod env;

pub use env::{ENGINE_VAR, HEROKUISH_IMAGE_VAR, TIMEOUT_VAR};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENGINE: &str = "docker";
pub const DEFAULT_BUILDER_IMAGE: &str = "gliderlabs/herokuish:latest";
pub const DEFAULT_DAEMON_CONFIG: &str = "/etc/docker/daemon.json";
pub const BUILDPACKS_DIR_NAME: &str = "bob-buildpacks";

/// Settings shared by every step of a build.
///
/// Passed explicitly into the orchestrator; nothing here is global.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Container engine CLI program.
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Herokuish-compatible image used for buildpack builds.
    #[serde(default = "default_builder_image")]
    pub builder_image: String,

    /// Limit applied to every external command.
    #[serde(default = "default_command_timeout", with = "humantime_serde")]
    pub command_timeout: Duration,

    /// Pause after starting the engine service.
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,

    /// Engine daemon configuration file receiving insecure registries.
    #[serde(default = "default_daemon_config")]
    pub daemon_config: PathBuf,

    /// Staging directory for custom buildpacks.
    #[serde(default = "default_buildpacks_dir")]
    pub buildpacks_dir: PathBuf,
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_builder_image() -> String {
    DEFAULT_BUILDER_IMAGE.to_string()
}

fn default_command_timeout() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_settle_delay() -> Duration {
    Duration::from_millis(300)
}

fn default_daemon_config() -> PathBuf {
    PathBuf::from(DEFAULT_DAEMON_CONFIG)
}

fn default_buildpacks_dir() -> PathBuf {
    std::env::temp_dir().join(BUILDPACKS_DIR_NAME)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            builder_image: default_builder_image(),
            command_timeout: default_command_timeout(),
            settle_delay: default_settle_delay(),
            daemon_config: default_daemon_config(),
            buildpacks_dir: default_buildpacks_dir(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Load settings from `path` (or defaults) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                Self::from_yaml(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };
        settings.with_env_overrides()
    }

    /// Apply `BOB_ENGINE`, `HEROKUISH_IMAGE` and `BUILD_TIMEOUT` when set.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(engine) = env::string(ENGINE_VAR) {
            self.engine = engine;
        }
        if let Some(image) = env::string(HEROKUISH_IMAGE_VAR) {
            self.builder_image = image;
        }
        if let Some(timeout) = env::seconds(TIMEOUT_VAR)? {
            self.command_timeout = timeout;
        }
        Ok(self)
    }
}
