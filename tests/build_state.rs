// ABOUTME: Tests for the typestate build lifecycle driven step by step.
// ABOUTME: Verifies state markers, per-step failures and build results.

mod support;

use bob_builder::build::{Build, BuildError, BuildRequest, BuildStrategy, NotStarted};
use bob_builder::buildpack::BuildpackDir;
use bob_builder::engine::Engine;
use bob_builder::exec::CommandOutput;
use bob_builder::types::ImageName;
use std::fs;
use std::mem::size_of;
use support::runner::RecordingRunner;
use tempfile::TempDir;

const BUILDER_IMAGE: &str = "gliderlabs/herokuish:latest";

fn docker() -> Engine {
    Engine::new("docker")
}

fn request(source: &TempDir, image: &str) -> BuildRequest {
    BuildRequest::new(source.path(), ImageName::parse(image).unwrap()).unwrap()
}

#[test]
fn not_started_is_zero_sized() {
    assert_eq!(size_of::<NotStarted>(), 0, "NotStarted should be zero-sized");
}

#[tokio::test]
async fn built_result_reports_was_built() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("Dockerfile"), "FROM scratch\n").unwrap();
    let request = request(&source, "myapp:1");

    let built = Build::new(request)
        .build(&RecordingRunner::new(), &docker(), BUILDER_IMAGE)
        .await
        .unwrap();

    assert_eq!(built.tag(), "myapp:1");
    let result = built.result();
    assert!(result.was_built);
    assert!(!result.pushed);
    assert_eq!(result.strategy, BuildStrategy::Dockerfile);
    assert_eq!(&result.id, built.request().id());
}

#[tokio::test]
async fn pushed_result_reports_push() {
    let source = TempDir::new().unwrap();
    let runner = RecordingRunner::new();

    let built = Build::new(request(&source, "app:2"))
        .build(&runner, &docker(), BUILDER_IMAGE)
        .await
        .unwrap();
    let pushed = built.push(&runner, &docker()).await.unwrap();

    assert!(pushed.result().pushed);
    assert_eq!(pushed.tag(), "app:2");
    assert_eq!(runner.calls_of("push")[0].argv, vec!["docker", "push", "app:2"]);
}

#[tokio::test]
async fn buildpack_mount_only_when_staged() {
    let source = TempDir::new().unwrap();
    let runner = RecordingRunner::new();

    Build::new(request(&source, "app"))
        .with_buildpacks(Some(BuildpackDir::new("/tmp/staged")))
        .build(&runner, &docker(), BUILDER_IMAGE)
        .await
        .unwrap();

    let run = &runner.calls_of("run")[0];
    assert!(run.argv.contains(&"/tmp/staged:/tmp/buildpacks".to_string()));
}

#[tokio::test]
async fn builder_failure_stops_the_build() {
    let source = TempDir::new().unwrap();
    let runner = RecordingRunner::new().respond(
        &["docker", "run"],
        CommandOutput::failed(1, "-----> Unable to select a buildpack"),
    );

    let err = Build::new(request(&source, "app"))
        .build(&runner, &docker(), BUILDER_IMAGE)
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::BuildpackRun(_)));
    assert!(
        err.command_output()
            .unwrap()
            .stderr
            .contains("Unable to select a buildpack")
    );
    assert!(runner.calls_of("commit").is_empty());
}

#[tokio::test]
async fn empty_commit_output_is_an_error() {
    let source = TempDir::new().unwrap();
    let runner = RecordingRunner::new().respond(&["docker", "commit"], CommandOutput::ok("\n"));

    let err = Build::new(request(&source, "app"))
        .build(&runner, &docker(), BUILDER_IMAGE)
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::EmptyCommit(ref c) if c.starts_with("build-")));
    assert!(runner.calls_of("create").is_empty());
}

#[tokio::test]
async fn create_and_tag_failures_name_their_step() {
    let source = TempDir::new().unwrap();

    let err = Build::new(request(&source, "app"))
        .build(
            &RecordingRunner::new().fail(&["docker", "create"], 1),
            &docker(),
            BUILDER_IMAGE,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Create { .. }));

    let err = Build::new(request(&source, "app:3"))
        .build(
            &RecordingRunner::new().fail(&["docker", "tag"], 1),
            &docker(),
            BUILDER_IMAGE,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Tag { ref tag, .. } if tag == "app:3"));
}
