// ABOUTME: Build strategy selection based on the source tree.
// ABOUTME: A root-level Dockerfile selects a direct build; otherwise buildpacks are used.

use std::fmt;
use std::path::Path;

pub const DOCKERFILE: &str = "Dockerfile";

/// How the image is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    /// `<engine> build` against the source's Dockerfile.
    Dockerfile,

    /// Herokuish buildpack compile, then commit and tag.
    Buildpack,
}

impl BuildStrategy {
    /// Pick the strategy for a source tree.
    ///
    /// Only a regular file named exactly `Dockerfile` directly under `source`
    /// counts.
    pub fn for_source(source: &Path) -> Self {
        if source.join(DOCKERFILE).is_file() {
            BuildStrategy::Dockerfile
        } else {
            BuildStrategy::Buildpack
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStrategy::Dockerfile => write!(f, "dockerfile"),
            BuildStrategy::Buildpack => write!(f, "buildpack"),
        }
    }
}
