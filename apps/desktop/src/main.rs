use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, PredictionController, Submission, SubmitDisposition};
use shared::domain::ModelLabel;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod interactive;
mod render;

#[derive(Parser, Debug)]
#[command(name = "fraudcheck", about = "Check job postings against the fraud classifier service")]
struct Cli {
    /// Base URL of the classifier service; overrides client.toml and API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available models.
    Models,
    /// Check that the service is reachable.
    Health,
    /// Classify one posting from TEXT, --file, or stdin.
    Predict {
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long)]
        model: Option<ModelLabel>,
    },
    /// Read postings line by line; an empty line sends.
    Interactive {
        #[arg(long)]
        model: Option<ModelLabel>,
    },
}

async fn read_posting(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read posting from '{}'", path.display()));
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read posting from stdin")?;
    Ok(text)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = Some(api_url);
    }
    info!(api_url = ?settings.api_url, default_model = %settings.default_model, "settings loaded");
    let controller = PredictionController::from_settings(&settings);

    match cli.command {
        Command::Models => println!("{}", render::render_catalog(settings.default_model)),
        Command::Health => {
            let health = controller.check_health().await?;
            println!("{}: {}", health.status, health.message);
            if !health.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Predict { text, file, model } => {
            let text = read_posting(text, file).await?;
            let model = model.unwrap_or(settings.default_model);
            let disposition = controller.submit(Submission::new(text, model)).await;
            let SubmitDisposition::Settled(outcome) = disposition else {
                anyhow::bail!("prediction did not settle: {disposition:?}");
            };
            println!("{}", render::render_outcome(&outcome));
            if outcome.is_failure() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Interactive { model } => {
            interactive::run(&controller, model.unwrap_or(settings.default_model)).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
