//! Human and JSON rendering of command results.

use super::OutputFormat;
use explainer::{
    BatchEntry, ExecutionResult, ExecutionStatus, ExplainerResult, JsonError, RunOutcome,
    RunStatus, ScenePlan,
};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> ExplainerResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Print a finished run.
pub fn print_outcome(outcome: &RunOutcome, format: OutputFormat) -> ExplainerResult<()> {
    if format == OutputFormat::Json {
        return print_json(outcome);
    }

    println!("Scene: {}", outcome.identifier());
    println!(
        "Status: {} after {} attempt(s), {} correction(s)",
        outcome.status(),
        outcome.attempts(),
        outcome.corrections()
    );
    match outcome.status() {
        RunStatus::Succeeded => {
            if let Some(video) = outcome.video() {
                println!("Video: {}", video.display());
            }
        }
        RunStatus::Failed => {
            println!("Last error:");
            println!("{:-<80}", "");
            println!("{}", outcome.last_error().unwrap_or_default().trim_end());
            println!("{:-<80}", "");
        }
    }
    Ok(())
}

/// Print a storyboard.
pub fn print_plan(plan: &ScenePlan, format: OutputFormat) -> ExplainerResult<()> {
    if format == OutputFormat::Json {
        return print_json(plan);
    }

    println!("Scene class: {}", plan.identifier());
    println!("{:-<80}", "");
    println!("{}", plan.narrative().trim_end());
    Ok(())
}

/// Print a single render.
pub fn print_execution(
    identifier: &str,
    result: &ExecutionResult,
    format: OutputFormat,
) -> ExplainerResult<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }

    let seconds = result.duration().as_secs_f64();
    match result.status() {
        ExecutionStatus::Rendered => {
            if let Some(video) = result.artifact_path() {
                println!("Rendered {} in {:.1}s: {}", identifier, seconds, video.display());
            }
        }
        ExecutionStatus::ScriptError => {
            println!("Rendering {} failed after {:.1}s:", identifier, seconds);
            println!("{}", result.error().unwrap_or_default().trim_end());
        }
        ExecutionStatus::MissingArtifact => {
            println!("Rendering {} exited cleanly but produced no video", identifier);
        }
    }
    Ok(())
}

/// Print one line per batch entry, or the whole batch as JSON.
pub fn print_batch(entries: &[BatchEntry], format: OutputFormat) -> ExplainerResult<()> {
    if format == OutputFormat::Json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| match entry.result() {
                Ok(outcome) => serde_json::json!({
                    "topic": entry.topic(),
                    "namespace": entry.namespace(),
                    "outcome": outcome,
                }),
                Err(e) => serde_json::json!({
                    "topic": entry.topic(),
                    "namespace": entry.namespace(),
                    "error": e.to_string(),
                }),
            })
            .collect();
        return print_json(&rows);
    }

    for entry in entries {
        match entry.result() {
            Ok(outcome) => match outcome.video() {
                Some(video) => println!("[ok]     {}: {}", entry.topic(), video.display()),
                None => println!(
                    "[failed] {}: gave up after {} attempt(s)",
                    entry.topic(),
                    outcome.attempts()
                ),
            },
            Err(e) => println!("[error]  {}: {}", entry.topic(), e),
        }
    }
    let succeeded = entries.iter().filter(|e| e.succeeded()).count();
    println!("Total: {}/{} rendered", succeeded, entries.len());
    Ok(())
}
