// ABOUTME: Typed builders for every container engine invocation.
// ABOUTME: Produces argument lists, never shell strings.

use std::path::Path;

use crate::exec::CommandSpec;
use crate::types::Credentials;

/// Mount point of the source tree inside the builder container.
pub const APP_MOUNT: &str = "/tmp/app";
/// Mount point of custom buildpacks inside the builder container.
pub const BUILDPACKS_MOUNT: &str = "/tmp/buildpacks";
/// Herokuish entrypoint inside the builder image.
pub const HEROKUISH_ENTRYPOINT: &str = "/bin/herokuish";
/// Port the web process listens on.
pub const WEB_PORT: u16 = 80;

/// A container engine CLI (`docker`, `podman`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    program: String,
}

impl Engine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
    }

    /// `service <engine> start`
    pub fn service_start(&self) -> CommandSpec {
        CommandSpec::new("service").args([self.program.as_str(), "start"])
    }

    /// `<engine> ps`
    pub fn ps(&self) -> CommandSpec {
        self.command().arg("ps")
    }

    /// `<engine> login -u <user> -p <password>`
    pub fn login(&self, credentials: &Credentials) -> CommandSpec {
        self.command()
            .args(["login", "-u", credentials.username(), "-p"])
            .secret_arg(credentials.password())
    }

    /// `<engine> build <path> --tag <tag>`
    pub fn build(&self, source: &Path, tag: &str) -> CommandSpec {
        self.command()
            .arg("build")
            .arg(source.display().to_string())
            .args(["--tag", tag])
    }

    /// `<engine> run -i --name=<name> -v <src>:/tmp/app [-v <bp>:/tmp/buildpacks] <image> /bin/herokuish buildpack build`
    pub fn run_buildpack_build(
        &self,
        name: &str,
        source: &Path,
        buildpacks: Option<&Path>,
        builder_image: &str,
    ) -> CommandSpec {
        let mut cmd = self
            .command()
            .args(["run", "-i"])
            .arg(format!("--name={}", name))
            .arg("-v")
            .arg(format!("{}:{}", source.display(), APP_MOUNT));
        if let Some(buildpacks) = buildpacks {
            cmd = cmd
                .arg("-v")
                .arg(format!("{}:{}", buildpacks.display(), BUILDPACKS_MOUNT));
        }
        cmd.arg(builder_image)
            .args([HEROKUISH_ENTRYPOINT, "buildpack", "build"])
    }

    /// `<engine> commit <container>`
    pub fn commit(&self, container: &str) -> CommandSpec {
        self.command().args(["commit", container])
    }

    /// `<engine> create --expose 80 --env PORT=80 --name=<name> <image> /bin/herokuish procfile start web`
    pub fn create_web(&self, name: &str, image: &str) -> CommandSpec {
        self.command()
            .args(["create", "--expose"])
            .arg(WEB_PORT.to_string())
            .arg("--env")
            .arg(format!("PORT={}", WEB_PORT))
            .arg(format!("--name={}", name))
            .arg(image)
            .args([HEROKUISH_ENTRYPOINT, "procfile", "start", "web"])
    }

    /// `<engine> tag <image> <tag>`
    pub fn tag(&self, image: &str, tag: &str) -> CommandSpec {
        self.command().args(["tag", image, tag])
    }

    /// `<engine> push <tag>`
    pub fn push(&self, tag: &str) -> CommandSpec {
        self.command().args(["push", tag])
    }
}
