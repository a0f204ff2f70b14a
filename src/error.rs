// ABOUTME: Application-wide error types for bob-builder.
// ABOUTME: Uses thiserror; each stage contributes its own error via From.

use std::path::PathBuf;
use thiserror::Error;

use crate::build::BuildError;
use crate::buildpack::AcquisitionError;
use crate::engine::EngineError;
use crate::types::ParseImageNameError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("source path does not exist or is not a directory: {0}")]
    SourceNotFound(PathBuf),

    #[error("invalid image name: {0}")]
    InvalidImageName(#[from] ParseImageNameError),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
