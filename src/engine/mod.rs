// ABOUTME: Container engine integration driven through its CLI.
// ABOUTME: Typed command builders, daemon configuration and readiness checks.

mod commands;
mod daemon_config;
mod readiness;

pub use commands::{APP_MOUNT, BUILDPACKS_MOUNT, Engine, HEROKUISH_ENTRYPOINT, WEB_PORT};
pub use daemon_config::{DaemonConfigError, DaemonConfigUpdate, allow_insecure_registry};
pub use readiness::{EngineError, Readiness, ensure_ready};
