//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the explainer binary.

mod commands;
mod output;
mod run;

pub use commands::{Cli, Commands, OutputFormat};
pub use run::{load_config, plan_topic, render_file, run_batch, run_topic};
