//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Explainer - turn a topic into an animated explainer video
#[derive(Parser, Debug)]
#[command(name = "explainer")]
#[command(about = "Plan, generate and self-correct Manim animations from a topic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file replacing the home and working-directory files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan, generate, render and correct a scene for a topic
    Run {
        /// Topic to explain
        topic: String,

        /// Correction requests allowed (overrides configuration)
        #[arg(long)]
        max_corrections: Option<u32>,

        /// Prefix for the scene identifier
        #[arg(long)]
        namespace: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the storyboard for a topic without generating code
    Plan {
        /// Topic to explain
        topic: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Render an existing script with the configured renderer
    Render {
        /// Script to render
        file: PathBuf,

        /// Scene class name inside the script
        identifier: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Run several topics concurrently
    Batch {
        /// Topics to explain
        #[arg(required = true)]
        topics: Vec<String>,

        /// Runs in flight at once
        #[arg(short, long, default_value = "2")]
        jobs: usize,

        /// Correction requests allowed per run (overrides configuration)
        #[arg(long)]
        max_corrections: Option<u32>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
