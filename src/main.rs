// ABOUTME: Entry point for the bob-builder CLI application.
// ABOUTME: Parses arguments, builds the request and runs the orchestrator.

mod cli;

use bob_builder::Orchestrator;
use bob_builder::build::BuildRequest;
use bob_builder::buildpack::BuildpackSource;
use bob_builder::config::Settings;
use bob_builder::error::Result;
use bob_builder::types::{Credentials, ImageName};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let image = ImageName::parse(&cli.image_name)?;
    let buildpack = cli
        .buildpack
        .as_deref()
        .map(BuildpackSource::parse)
        .transpose()?;

    let request = BuildRequest::new(&cli.code_path, image)?
        .buildpack(buildpack)
        .credentials(Credentials::from_parts(cli.username, cli.password))
        .allow_insecure(cli.insecure)
        .push(cli.push);

    let orchestrator = Orchestrator::from_settings(settings)?;
    let result = orchestrator.run(request).await?;

    if result.pushed {
        println!("Built and pushed {}", result.tag);
    } else {
        println!("Built {}", result.tag);
    }
    Ok(())
}
