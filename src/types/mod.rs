// ABOUTME: Validated domain types for a build invocation.
// ABOUTME: Build identity, target image name and registry credentials.

mod build_id;
mod credentials;
mod image_name;

pub use build_id::BuildId;
pub use credentials::Credentials;
pub use image_name::{ImageName, ParseImageNameError};
