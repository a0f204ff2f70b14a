// ABOUTME: Generic build struct parameterized by state marker.
// ABOUTME: Carries the request and staged buildpack through the lifecycle.

use crate::buildpack::BuildpackDir;
use crate::types::BuildId;

use super::request::BuildRequest;
use super::state::{Built, NotStarted, Pushed};
use super::strategy::BuildStrategy;

/// A build in progress, parameterized by its current state.
///
/// Transitions consume the build and return the next state, so a failed step
/// leaves nothing to continue from and `push` only exists once built.
#[derive(Debug)]
pub struct Build<S> {
    pub(crate) request: BuildRequest,
    pub(crate) buildpacks: Option<BuildpackDir>,
    pub(crate) state: S,
}

impl Build<NotStarted> {
    pub fn new(request: BuildRequest) -> Self {
        Build {
            request,
            buildpacks: None,
            state: NotStarted,
        }
    }

    /// Mount an acquired custom buildpack into buildpack builds.
    pub fn with_buildpacks(mut self, buildpacks: Option<BuildpackDir>) -> Self {
        self.buildpacks = buildpacks;
        self
    }
}

impl<S> Build<S> {
    pub fn request(&self) -> &BuildRequest {
        &self.request
    }

    pub fn buildpacks(&self) -> Option<&BuildpackDir> {
        self.buildpacks.as_ref()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub(crate) fn transition<T>(self, state: T) -> Build<T> {
        Build {
            request: self.request,
            buildpacks: self.buildpacks,
            state,
        }
    }
}

/// Outcome of an orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub id: BuildId,
    /// Final tag of the image.
    pub tag: String,
    pub strategy: BuildStrategy,
    pub was_built: bool,
    pub pushed: bool,
}

impl Build<Built> {
    pub fn tag(&self) -> &str {
        self.state.tag()
    }

    pub fn result(&self) -> BuildResult {
        BuildResult {
            id: self.request.id().clone(),
            tag: self.state.tag.clone(),
            strategy: self.state.strategy,
            was_built: true,
            pushed: false,
        }
    }
}

impl Build<Pushed> {
    pub fn tag(&self) -> &str {
        self.state.tag()
    }

    pub fn result(&self) -> BuildResult {
        BuildResult {
            id: self.request.id().clone(),
            tag: self.state.tag.clone(),
            strategy: self.state.strategy,
            was_built: true,
            pushed: true,
        }
    }
}
