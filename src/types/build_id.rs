// ABOUTME: Per-invocation build identity used for default tags and container names.
// ABOUTME: Random lowercase hex generated once when a build request is created.

use std::fmt;
use uuid::Uuid;

/// A unique token identifying one orchestrator run.
///
/// Used as the default image tag when the image name carries none, and to name
/// the intermediate containers of a buildpack build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "build identities name containers and tags and should not be ignored"]
pub struct BuildId(String);

impl BuildId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identity string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the throwaway container the buildpack compile step runs in.
    pub fn builder_container(&self) -> String {
        format!("build-{}", self.0)
    }

    /// Name of the container holding the web process configuration.
    pub fn web_container(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
