//! Plan, generate, render and correct loop for Explainer.
//!
//! A run asks the model for a storyboard, asks again for a Manim script that
//! implements it, renders the script, and while rendering fails feeds the
//! error back for a corrected script, up to a fixed number of corrections.
//!
//! # Components
//!
//! - [`ScenePlanner`]: topic to [`ScenePlan`](explainer_core::ScenePlan)
//! - [`CodeGenerator`]: plan to [`GeneratedCode`](explainer_core::GeneratedCode)
//! - [`CodeCorrector`]: failing script and error to
//!   [`CorrectionResult`](explainer_core::CorrectionResult)
//! - [`Orchestrator`]: the state machine tying them to a
//!   [`SceneRenderer`](explainer_interface::SceneRenderer)
//!
//! Instructions for each request live in [`PromptTemplate`]s loaded from
//! configuration ([`ExplainerConfig`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod config;
mod corrector;
mod extraction;
mod generator;
mod orchestrator;
mod planner;
mod requester;
mod template;

pub use batch::{BatchEntry, run_namespace};
pub use config::{ExplainerConfig, ModelSettings, PipelineSettings, TemplateSet};
pub use corrector::CodeCorrector;
pub use extraction::{extract_and_parse, extract_json, parse_json, strip_code_fence};
pub use generator::CodeGenerator;
pub use orchestrator::{Orchestrator, PipelineStage};
pub use planner::ScenePlanner;
pub use requester::RequestOptions;
pub use template::{FieldKind, PromptTemplate, SchemaField};
