// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Source path and image name positionals plus build options.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bob-builder")]
#[command(about = "Build a container image from source, with a Dockerfile or buildpacks")]
#[command(version)]
pub struct Cli {
    /// Directory containing the source code
    pub code_path: PathBuf,

    /// Image to build, optionally with registry host and tag
    pub image_name: String,

    /// Push the image after a successful build
    #[arg(long)]
    pub push: bool,

    /// Registry username
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// Registry password
    #[arg(long, requires = "username")]
    pub password: Option<String>,

    /// Trust the image's registry host without TLS verification
    #[arg(long, visible_alias = "allow-insecure")]
    pub insecure: bool,

    /// Custom buildpack: a .tgz/.tar.gz URL or a git remote
    #[arg(long)]
    pub buildpack: Option<String>,

    /// Settings file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging, including every command run
    #[arg(short, long)]
    pub verbose: bool,
}
