// ABOUTME: Materializes a custom buildpack into the local staging directory.
// ABOUTME: Tarballs are downloaded and unpacked; everything else is git-cloned.

use bytes::Bytes;
use flate2::read::GzDecoder;
use std::io;
use std::path::{Path, PathBuf};
use tar::Archive;

use crate::exec::{CommandRunner, CommandSpec, FailurePolicy, OutputMode, execute};

use super::fetch::ArchiveFetcher;
use super::{AcquisitionError, BuildpackSource};

const BUILDPACK_SUBDIR: &str = "buildpack";

/// Staging area for a custom buildpack.
///
/// The root is what gets mounted into the builder container; the buildpack
/// itself lives in a `buildpack` subdirectory of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildpackDir {
    root: PathBuf,
}

impl BuildpackDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory mounted as the builder's buildpacks directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the buildpack is extracted or cloned into.
    pub fn target(&self) -> PathBuf {
        self.root.join(BUILDPACK_SUBDIR)
    }

    /// Create an empty target directory, clearing leftovers from earlier runs.
    fn prepare(&self) -> Result<PathBuf, AcquisitionError> {
        let target = self.target();
        let prepare_error = |error| AcquisitionError::PrepareDir {
            path: target.clone(),
            error,
        };

        match std::fs::remove_dir_all(&target) {
            Ok(()) => tracing::debug!("Cleared previous buildpack at {}", target.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(prepare_error(e)),
        }
        std::fs::create_dir_all(&target).map_err(prepare_error)?;

        Ok(target)
    }
}

/// Fetch or clone `source` into `dir`.
pub async fn acquire<R, F>(
    source: &BuildpackSource,
    dir: &BuildpackDir,
    fetcher: &F,
    runner: &R,
) -> Result<(), AcquisitionError>
where
    R: CommandRunner + ?Sized,
    F: ArchiveFetcher + ?Sized,
{
    let target = dir.prepare()?;

    match source {
        BuildpackSource::Tarball(url) => {
            tracing::info!("Downloading buildpack...");
            let archive = fetcher.fetch(url).await?;
            tracing::info!("Extracting buildpack...");
            let dest = target.clone();
            tokio::task::spawn_blocking(move || extract_tarball(archive, &dest))
                .await
                .map_err(|e| AcquisitionError::Extract(io::Error::other(e)))??;
        }
        BuildpackSource::Git(remote) => {
            tracing::info!("Cloning buildpack...");
            execute(
                runner,
                &git_clone(remote, &target),
                OutputMode::Capture,
                FailurePolicy::Propagate,
            )
            .await
            .map_err(AcquisitionError::Clone)?;
        }
    }

    tracing::debug!("Buildpack ready at {}", target.display());
    Ok(())
}

/// `git clone <remote> <dest>`
pub fn git_clone(remote: &str, dest: &Path) -> CommandSpec {
    CommandSpec::new("git")
        .args(["clone", remote])
        .arg(dest.display().to_string())
}

/// Unpack a gzip-compressed tar archive into `dest`.
pub fn extract_tarball(archive: Bytes, dest: &Path) -> Result<(), AcquisitionError> {
    let mut archive = Archive::new(GzDecoder::new(archive.as_ref()));
    archive.unpack(dest).map_err(AcquisitionError::Extract)
}
