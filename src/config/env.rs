// ABOUTME: Environment variable overrides for settings.
// ABOUTME: Empty values are treated as unset.

use crate::error::{Error, Result};
use std::time::Duration;

pub const ENGINE_VAR: &str = "BOB_ENGINE";
pub const HEROKUISH_IMAGE_VAR: &str = "HEROKUISH_IMAGE";
pub const TIMEOUT_VAR: &str = "BUILD_TIMEOUT";

pub(super) fn string(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Read a whole number of seconds.
pub(super) fn seconds(var: &str) -> Result<Option<Duration>> {
    let Some(raw) = string(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| Error::InvalidConfig(format!("{var} must be a number of seconds, got {raw:?}")))
}
