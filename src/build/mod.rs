// ABOUTME: Build lifecycle using the type state pattern.
// ABOUTME: Exports the request, strategy, state markers and Build struct.

mod error;
mod lifecycle;
mod request;
mod state;
mod strategy;
mod transitions;

pub use error::BuildError;
pub use lifecycle::{Build, BuildResult};
pub use request::BuildRequest;
pub use state::{Built, NotStarted, Pushed};
pub use strategy::{BuildStrategy, DOCKERFILE};
