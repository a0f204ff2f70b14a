// ABOUTME: Immutable description of one build invocation.
// ABOUTME: Validates the source path and generates the build identity at construction.

use std::path::{Path, PathBuf};

use crate::buildpack::BuildpackSource;
use crate::error::{Error, Result};
use crate::types::{BuildId, Credentials, ImageName};

/// Everything the orchestrator needs to build (and maybe push) one image.
///
/// Constructed once with [`BuildRequest::new`] and refined with the builder
/// methods before it is handed over; there are no setters afterwards.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    id: BuildId,
    image: ImageName,
    source: PathBuf,
    buildpack: Option<BuildpackSource>,
    credentials: Option<Credentials>,
    allow_insecure: bool,
    push: bool,
}

impl BuildRequest {
    /// Create a request for building `source` into `image`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceNotFound`] if `source` is not an existing directory.
    pub fn new(source: impl AsRef<Path>, image: ImageName) -> Result<Self> {
        let source = source.as_ref();
        if !source.is_dir() {
            return Err(Error::SourceNotFound(source.to_path_buf()));
        }
        let source = source
            .canonicalize()
            .map_err(|_| Error::SourceNotFound(source.to_path_buf()))?;

        Ok(Self {
            id: BuildId::generate(),
            image,
            source,
            buildpack: None,
            credentials: None,
            allow_insecure: false,
            push: false,
        })
    }

    /// Use a custom buildpack for buildpack builds.
    pub fn buildpack(mut self, source: Option<BuildpackSource>) -> Self {
        self.buildpack = source;
        self
    }

    /// Log in to the registry before building.
    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Allow trusting the image's registry host without TLS verification.
    pub fn allow_insecure(mut self, allow: bool) -> Self {
        self.allow_insecure = allow;
        self
    }

    /// Push the image after a successful build.
    pub fn push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    pub fn id(&self) -> &BuildId {
        &self.id
    }

    pub fn image(&self) -> &ImageName {
        &self.image
    }

    /// Absolute path of the source tree.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn buildpack_source(&self) -> Option<&BuildpackSource> {
        self.buildpack.as_ref()
    }

    pub fn login_credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn insecure_allowed(&self) -> bool {
        self.allow_insecure
    }

    pub fn push_requested(&self) -> bool {
        self.push
    }

    /// The tag used for build, commit and push.
    pub fn effective_tag(&self) -> String {
        self.image.effective_tag(&self.id)
    }
}
