// ABOUTME: Classifies a buildpack source as a tarball download or a git remote.
// ABOUTME: Anything not ending in .tgz or .tar.gz is treated as clonable.

use std::fmt;
use std::str::FromStr;

use super::AcquisitionError;

const TARBALL_EXTENSIONS: [&str; 2] = [".tgz", ".tar.gz"];

/// Where a custom buildpack comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildpackSource {
    /// Gzipped tarball fetched over HTTP and extracted.
    Tarball(String),
    /// Remote handed to `git clone`.
    Git(String),
}

impl BuildpackSource {
    pub fn parse(input: &str) -> Result<Self, AcquisitionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AcquisitionError::EmptySource);
        }

        if TARBALL_EXTENSIONS.iter().any(|ext| input.ends_with(ext)) {
            Ok(BuildpackSource::Tarball(input.to_string()))
        } else {
            Ok(BuildpackSource::Git(input.to_string()))
        }
    }

    pub fn location(&self) -> &str {
        match self {
            BuildpackSource::Tarball(url) => url,
            BuildpackSource::Git(remote) => remote,
        }
    }

    pub fn is_tarball(&self) -> bool {
        matches!(self, BuildpackSource::Tarball(_))
    }
}

impl FromStr for BuildpackSource {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BuildpackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.location())
    }
}
