//! Core data types for the Explainer animation pipeline.
//!
//! This crate provides the foundation data types shared by the model drivers,
//! the renderer and the orchestrator: chat messages and generation requests on
//! one side, storyboards, generated scripts and execution results on the other.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod code;
mod execution;
mod message;
mod outcome;
mod plan;
mod request;
mod role;

pub use code::{CorrectionResult, GeneratedCode};
pub use execution::{ExecutionResult, ExecutionStatus};
pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use outcome::{AttemptRecord, RunOutcome, RunOutcomeBuilder, RunOutcomeBuilderError, RunStatus};
pub use plan::ScenePlan;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    TokenUsage,
};
pub use role::Role;
