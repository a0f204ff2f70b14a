// ABOUTME: Test support utilities.
// ABOUTME: Provides a recording command runner, an in-memory fetcher and settings helpers.

use bob_builder::config::Settings;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fetcher;
#[allow(dead_code)]
pub mod runner;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("bob_builder=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Settings that keep every file a build touches inside `dir`.
#[allow(dead_code)]
pub fn test_settings(dir: &Path) -> Settings {
    Settings {
        settle_delay: Duration::ZERO,
        command_timeout: Duration::from_secs(30),
        daemon_config: dir.join("daemon.json"),
        buildpacks_dir: dir.join("buildpacks"),
        ..Settings::default()
    }
}

/// Render an error and its causes the way a chain-walking reporter would.
#[allow(dead_code)]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
