// ABOUTME: Merges insecure registries into the engine daemon's JSON configuration.
// ABOUTME: Skips silently on platforms without the daemon configuration directory.

use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};

const INSECURE_REGISTRIES: &str = "insecure-registries";

#[derive(Debug, thiserror::Error)]
pub enum DaemonConfigError {
    #[error("failed to read {path}: {error}")]
    Read { path: PathBuf, error: io::Error },

    #[error("failed to write {path}: {error}")]
    Write { path: PathBuf, error: io::Error },

    #[error("{path} is not valid daemon configuration: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Outcome of an insecure-registry update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonConfigUpdate {
    /// The host was added and the file written.
    Written,
    /// The host was already listed; nothing written.
    AlreadyPresent,
    /// The configuration directory does not exist on this platform.
    Skipped,
}

/// Add `host` to the `insecure-registries` list in the daemon config at `path`.
///
/// Existing keys and registries are preserved. A missing file is created.
pub fn allow_insecure_registry(
    path: &Path,
    host: &str,
) -> Result<DaemonConfigUpdate, DaemonConfigError> {
    let parent_exists = path
        .parent()
        .map(|p| p.as_os_str().is_empty() || p.is_dir())
        .unwrap_or(true);
    if !parent_exists {
        tracing::debug!(
            "{} does not exist, skipping insecure registry configuration",
            path.display()
        );
        return Ok(DaemonConfigUpdate::Skipped);
    }

    let mut config = read_config(path)?;
    let registries = config
        .entry(INSECURE_REGISTRIES)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(registries) = registries else {
        return Err(DaemonConfigError::Invalid {
            path: path.to_path_buf(),
            reason: format!("`{}` must be an array", INSECURE_REGISTRIES),
        });
    };

    if registries.iter().any(|r| r.as_str() == Some(host)) {
        return Ok(DaemonConfigUpdate::AlreadyPresent);
    }
    registries.push(Value::String(host.to_string()));

    let json = serde_json::to_string_pretty(&Value::Object(config)).map_err(|e| {
        DaemonConfigError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    std::fs::write(path, json + "\n").map_err(|error| DaemonConfigError::Write {
        path: path.to_path_buf(),
        error,
    })?;

    Ok(DaemonConfigUpdate::Written)
}

fn read_config(path: &Path) -> Result<Map<String, Value>, DaemonConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(error) => {
            return Err(DaemonConfigError::Read {
                path: path.to_path_buf(),
                error,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DaemonConfigError::Invalid {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(DaemonConfigError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
