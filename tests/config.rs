// ABOUTME: Integration tests for settings loading.
// ABOUTME: YAML files, defaults and environment overrides.

use bob_builder::config::{ENGINE_VAR, HEROKUISH_IMAGE_VAR, Settings, TIMEOUT_VAR};
use bob_builder::error::Error;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const ALL_VARS: [&str; 3] = [ENGINE_VAR, HEROKUISH_IMAGE_VAR, TIMEOUT_VAR];

fn unset_all<F: FnOnce()>(f: F) {
    temp_env::with_vars_unset(ALL_VARS, f);
}

#[test]
fn load_without_file_uses_defaults() {
    unset_all(|| {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.engine, "docker");
        assert_eq!(settings.command_timeout, Duration::from_secs(3600));
    });
}

#[test]
fn load_reads_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bob.yml");
    fs::write(
        &path,
        r#"
builder_image: registry.local/herokuish:v1
command_timeout: 30m
daemon_config: /tmp/daemon.json
buildpacks_dir: /var/tmp/buildpacks
"#,
    )
    .unwrap();

    unset_all(|| {
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.builder_image, "registry.local/herokuish:v1");
        assert_eq!(settings.command_timeout, Duration::from_secs(1800));
        assert_eq!(settings.daemon_config, std::path::PathBuf::from("/tmp/daemon.json"));
        assert_eq!(
            settings.buildpacks_dir,
            std::path::PathBuf::from("/var/tmp/buildpacks")
        );
    });
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(Some(&dir.path().join("nope.yml"))).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}

#[test]
fn invalid_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bob.yml");
    fs::write(&path, "command_timeout: [not, a, duration]\n").unwrap();

    unset_all(|| {
        assert!(matches!(Settings::load(Some(&path)), Err(Error::Yaml(_))));
    });
}

#[test]
fn environment_overrides_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bob.yml");
    fs::write(&path, "builder_image: from-file\nengine: docker\n").unwrap();

    temp_env::with_vars(
        [
            (ENGINE_VAR, Some("podman")),
            (HEROKUISH_IMAGE_VAR, Some("from-env/herokuish")),
            (TIMEOUT_VAR, Some("120")),
        ],
        || {
            let settings = Settings::load(Some(&path)).unwrap();
            assert_eq!(settings.engine, "podman");
            assert_eq!(settings.builder_image, "from-env/herokuish");
            assert_eq!(settings.command_timeout, Duration::from_secs(120));
        },
    );
}

#[test]
fn empty_environment_values_are_ignored() {
    temp_env::with_vars(
        [
            (ENGINE_VAR, Some("")),
            (HEROKUISH_IMAGE_VAR, Some("  ")),
            (TIMEOUT_VAR, None),
        ],
        || {
            let settings = Settings::load(None).unwrap();
            assert_eq!(settings.engine, "docker");
            assert_eq!(settings.builder_image, Settings::default().builder_image);
        },
    );
}

#[test]
fn malformed_timeout_is_rejected() {
    temp_env::with_var(TIMEOUT_VAR, Some("ten minutes"), || {
        let err = Settings::load(None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains(TIMEOUT_VAR));
    });
}
