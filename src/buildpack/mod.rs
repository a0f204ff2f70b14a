// ABOUTME: Custom buildpack acquisition for buildpack builds.
// ABOUTME: Source classification, HTTP fetching and the staging directory.

mod acquire;
mod fetch;
mod source;

pub use acquire::{BuildpackDir, acquire, extract_tarball, git_clone};
pub use fetch::{ArchiveFetcher, FetchError, HttpFetcher};
pub use source::BuildpackSource;

use crate::exec::CommandError;
use std::path::PathBuf;

/// Errors acquiring a buildpack. All of them abort the build.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("buildpack source cannot be empty")]
    EmptySource,

    #[error("failed to prepare buildpack directory {path}: {error}")]
    PrepareDir {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("failed to download buildpack: {0}")]
    Download(FetchError),

    #[error("failed to extract buildpack: {0}")]
    Extract(std::io::Error),

    #[error("failed to clone buildpack: {0}")]
    Clone(CommandError),
}

impl From<FetchError> for AcquisitionError {
    fn from(e: FetchError) -> Self {
        AcquisitionError::Download(e)
    }
}
