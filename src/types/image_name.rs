// ABOUTME: Target image name handling.
// ABOUTME: Derives the effective tag and the registry host used for insecure-registry trust.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::BuildId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageNameError {
    #[error("image name cannot be empty")]
    Empty,

    #[error("image name cannot contain whitespace: {0:?}")]
    Whitespace(String),
}

/// The image name given on the command line, kept verbatim.
///
/// It may embed a registry host (`registry.example.com/app`) and a tag
/// (`app:v2`). No normalization is applied: the name is passed to the engine
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName(String);

impl ImageName {
    pub fn parse(input: &str) -> Result<Self, ParseImageNameError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageNameError::Empty);
        }
        if input.chars().any(char::is_whitespace) {
            return Err(ParseImageNameError::Whitespace(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name already carries an explicit tag.
    ///
    /// Any `:` counts, including one belonging to a registry port.
    pub fn has_tag(&self) -> bool {
        self.0.contains(':')
    }

    /// The tag used for build, commit and push.
    ///
    /// Returns the name verbatim when it has a tag, otherwise `name:<build id>`.
    pub fn effective_tag(&self, id: &BuildId) -> String {
        if self.has_tag() {
            self.0.clone()
        } else {
            format!("{}:{}", self.0, id)
        }
    }

    /// The registry host implied by the name, if any.
    ///
    /// The first `/`-separated segment is taken as the host whenever there is
    /// more than one segment and that segment is not empty.
    pub fn registry_host(&self) -> Option<&str> {
        self.0
            .split_once('/')
            .map(|(host, _)| host)
            .filter(|host| !host.is_empty())
    }
}

impl FromStr for ImageName {
    type Err = ParseImageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
