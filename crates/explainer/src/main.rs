//! Explainer CLI binary.
//!
//! This binary provides command-line access to Explainer's functionality:
//! - Run the full plan, generate, render and correct loop for a topic
//! - Print a storyboard without generating code
//! - Render an existing script
//! - Run several topics concurrently

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, load_config, plan_topic, render_file, run_batch, run_topic};

    // API keys may live in a .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    // Execute the requested command
    let succeeded = match cli.command {
        Commands::Run {
            topic,
            max_corrections,
            namespace,
            format,
        } => run_topic(&config, &topic, max_corrections, namespace, format).await?,

        Commands::Plan { topic, format } => plan_topic(&config, &topic, format).await?,

        Commands::Render {
            file,
            identifier,
            format,
        } => render_file(&config, &file, &identifier, format).await?,

        Commands::Batch {
            topics,
            jobs,
            max_corrections,
            format,
        } => run_batch(&config, &topics, jobs, max_corrections, format).await?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
