// ABOUTME: Build state marker types for the type state pattern.
// ABOUTME: Pushing is only possible from Built, so it cannot precede a successful build.

use super::strategy::BuildStrategy;

/// Initial state: request validated, nothing run yet.
/// Available actions: `build()`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotStarted;

/// Built: the image exists locally under its effective tag.
/// Available actions: `push()`, `result()`
#[derive(Debug, Clone)]
pub struct Built {
    pub(crate) tag: String,
    pub(crate) strategy: BuildStrategy,
}

/// Pushed: the tagged image was published to its registry.
/// Available actions: `result()`
#[derive(Debug, Clone)]
pub struct Pushed {
    pub(crate) tag: String,
    pub(crate) strategy: BuildStrategy,
}

impl Built {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }
}

impl Pushed {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }
}
