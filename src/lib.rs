// ABOUTME: Library root for bob-builder - exposes the build orchestration for testing.
// ABOUTME: The main binary is in main.rs.

pub mod build;
pub mod buildpack;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
