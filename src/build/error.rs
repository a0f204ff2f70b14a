// ABOUTME: Error types for build and push steps.
// ABOUTME: Each variant names the engine sub-step that failed.

use crate::exec::CommandError;

/// Errors from building or pushing an image. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// `<engine> build` against a Dockerfile failed.
    #[error("image build failed: {0}")]
    ImageBuild(CommandError),

    /// The herokuish compile container failed.
    #[error("buildpack build failed: {0}")]
    BuildpackRun(CommandError),

    /// Committing a container to an image failed.
    #[error("failed to commit container {container}: {error}")]
    Commit {
        container: String,
        error: CommandError,
    },

    /// Commit succeeded but printed no image id.
    #[error("commit of container {0} produced no image id")]
    EmptyCommit(String),

    /// Creating the web process container failed.
    #[error("failed to create container {container}: {error}")]
    Create {
        container: String,
        error: CommandError,
    },

    /// Tagging the final image failed.
    #[error("failed to tag {tag}: {error}")]
    Tag {
        tag: String,
        error: CommandError,
    },

    /// `<engine> push` failed.
    #[error("failed to push {tag}: {error}")]
    Push {
        tag: String,
        error: CommandError,
    },
}

impl BuildError {
    /// Captured output of the failing command, when it ran to completion.
    pub fn command_output(&self) -> Option<&crate::exec::CommandOutput> {
        match self {
            BuildError::ImageBuild(error)
            | BuildError::BuildpackRun(error)
            | BuildError::Commit { error, .. }
            | BuildError::Create { error, .. }
            | BuildError::Tag { error, .. }
            | BuildError::Push { error, .. } => error.output(),
            BuildError::EmptyCommit(_) => None,
        }
    }
}
