// ABOUTME: Entry point for the skiff CLI application.
// ABOUTME: Parses arguments and dispatches to deployment and conversion workflows.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skiff::config::{self, Config};
use skiff::deploy::{Deployer, Outcome};
use skiff::error::{Error, Result};
use skiff::jobs::{self, ConversionClient, ConversionRequest, VoiceParams};
use skiff::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, &output).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init { domain, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, domain.as_deref(), force)?;
            output.progress(&format!("Wrote {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Frontend { path } => {
            let deployer = Deployer::new(&load_config()?);
            output.progress("Deploying frontend...");
            finish(output, deployer.deploy_frontend(&path).await)
        }
        Commands::Backend { path } => {
            let deployer = Deployer::new(&load_config()?);
            output.progress("Deploying backend...");
            finish(output, deployer.deploy_backend(&path).await)
        }
        Commands::Tls => {
            let deployer = Deployer::new(&load_config()?);
            output.progress("Provisioning TLS...");
            finish(output, deployer.provision_tls().await)
        }
        Commands::Status => {
            let deployer = Deployer::new(&load_config()?);
            finish(output, deployer.hosting_stats().await)
        }
        Commands::Convert {
            file,
            voice,
            rate,
            pitch,
        } => {
            let config = load_config()?;
            let conversion = config.conversion()?;
            let client = ConversionClient::new(conversion)?;

            let request = ConversionRequest {
                document: std::fs::read(&file)?,
                voice: VoiceParams {
                    voice_id: voice.unwrap_or_else(|| "default".to_string()),
                    speaking_rate: rate,
                    pitch,
                },
            };

            output.progress(&format!("Converting {}...", file.display()));
            let result =
                jobs::run_conversion(&client, &request, &conversion.poll_policy()).await?;

            output.outcome(
                &Outcome::success("conversion completed").with_url(result.audio_url.clone()),
            );
            Ok(())
        }
        Commands::Voices => {
            let config = load_config()?;
            let client = ConversionClient::new(config.conversion()?)?;
            let voices = client.voices().await.map_err(Error::Job)?;
            output.json(&voices);
            Ok(())
        }
        Commands::History => {
            let config = load_config()?;
            let client = ConversionClient::new(config.conversion()?)?;
            let history = client.history().await.map_err(Error::Job)?;
            output.json(&history);
            Ok(())
        }
    }
}

fn load_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    Config::discover(&cwd)
}

/// Print a workflow outcome; a failed workflow sets a non-zero exit code.
fn finish(output: &Output, outcome: Outcome) -> Result<()> {
    output.outcome(&outcome);
    if outcome.is_success() {
        Ok(())
    } else {
        Err(Error::Deployment(outcome.message().to_string()))
    }
}
