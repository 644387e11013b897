//! Test utilities for pipeline tests.
//!
//! A scripted driver that answers each kind of request from its own queue and
//! a fake renderer that plays back canned outcomes. Both record every call.

#![allow(dead_code)]

use async_trait::async_trait;
use explainer_core::{ExecutionResult, GenerateRequest, GenerateResponse};
use explainer_error::{
    ExplainerResult, ModelsError, ModelsErrorKind, RenderError, RenderErrorKind,
};
use explainer_interface::{ExplainerDriver, SceneRenderer};
use explainer_pipeline::{ExplainerConfig, TemplateSet};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Which requester sent a request, told apart by the schema in its system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Plan,
    Code,
    Correction,
}

impl RequestKind {
    fn of(request: &GenerateRequest) -> Self {
        let system = request
            .messages()
            .first()
            .map(|m| m.content().as_str())
            .unwrap_or_default();
        if system.contains("\"fixed_code\"") {
            Self::Correction
        } else if system.contains("\"scene_class_name\"") {
            Self::Plan
        } else {
            Self::Code
        }
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Reply with this completion text
    Text(String),
    /// Fail with this provider error
    Fail(ModelsErrorKind),
    /// Never answer
    Hang,
}

/// Driver answering plan, code and correction requests from separate queues.
///
/// The last reply in a queue is repeated once the others are used up.
#[derive(Default)]
pub struct ScriptedDriver {
    plans: Mutex<VecDeque<Reply>>,
    codes: Mutex<VecDeque<Reply>>,
    corrections: Mutex<VecDeque<Reply>>,
    requests: Arc<Mutex<Vec<(RequestKind, GenerateRequest)>>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(self, reply: Reply) -> Self {
        self.plans.lock().unwrap().push_back(reply);
        self
    }

    pub fn code(self, reply: Reply) -> Self {
        self.codes.lock().unwrap().push_back(reply);
        self
    }

    pub fn correction(self, reply: Reply) -> Self {
        self.corrections.lock().unwrap().push_back(reply);
        self
    }

    /// Number of generate() calls of any kind.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of generate() calls of one kind.
    pub fn calls_of(&self, kind: RequestKind) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Requests of one kind, in order.
    pub fn requests_of(&self, kind: RequestKind) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn next_reply(&self, kind: RequestKind) -> Option<Reply> {
        let queue = match kind {
            RequestKind::Plan => &self.plans,
            RequestKind::Code => &self.codes,
            RequestKind::Correction => &self.corrections,
        };
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ExplainerDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> ExplainerResult<GenerateResponse> {
        let kind = RequestKind::of(req);
        self.requests.lock().unwrap().push((kind, req.clone()));

        match self.next_reply(kind) {
            Some(Reply::Text(text)) => Ok(GenerateResponse::new(text)),
            Some(Reply::Fail(error)) => Err(ModelsError::new("scripted", error).into()),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ModelsError::new("scripted", ModelsErrorKind::EmptyResponse).into())
            }
            None => Err(ModelsError::new(
                "scripted",
                ModelsErrorKind::InvalidRequest(format!("no scripted reply for {kind:?}")),
            )
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

/// One canned execution outcome.
#[derive(Debug, Clone)]
pub enum Run {
    /// Exit non-zero with this stderr
    Fail(String),
    /// Exit zero and leave a video
    Render,
    /// Exit zero without a video
    NoVideo,
    /// The executable is missing
    LaunchFailure,
}

/// Renderer playing back canned outcomes; the last one repeats.
#[derive(Default)]
pub struct FakeRenderer {
    runs: Mutex<VecDeque<Run>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeRenderer {
    pub fn new(runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            runs: Mutex::new(runs.into_iter().collect()),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Sources executed, in order.
    pub fn sources(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(s, _)| s.clone()).collect()
    }

    /// Identifiers executed, in order.
    pub fn identifiers(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, i)| i.clone()).collect()
    }

    fn next_run(&self) -> Run {
        let mut runs = self.runs.lock().unwrap();
        if runs.len() > 1 {
            runs.pop_front().unwrap()
        } else {
            runs.front().cloned().unwrap_or(Run::Render)
        }
    }
}

#[async_trait]
impl SceneRenderer for FakeRenderer {
    async fn execute(&self, source: &str, identifier: &str) -> ExplainerResult<ExecutionResult> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_string(), identifier.to_string()));

        let elapsed = Duration::from_millis(5);
        match self.next_run() {
            Run::Fail(stderr) => Ok(ExecutionResult::failure("", stderr, Some(1), elapsed)),
            Run::Render => Ok(ExecutionResult::success(
                "File ready",
                Some(video_path(identifier)),
                elapsed,
            )),
            Run::NoVideo => Ok(ExecutionResult::success("", None, elapsed)),
            Run::LaunchFailure => Err(RenderError::new(RenderErrorKind::Launch {
                program: "fake".to_string(),
                message: "No such file or directory".to_string(),
            })
            .into()),
        }
    }

    fn renderer_name(&self) -> &str {
        "fake"
    }

    fn output_dir(&self, identifier: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/fake/media/videos").join(identifier))
    }
}

pub fn video_path(identifier: &str) -> PathBuf {
    PathBuf::from("/fake/media/videos")
        .join(identifier)
        .join(format!("{identifier}.mp4"))
}

pub fn plan_reply(narrative: &str, identifier: &str) -> Reply {
    Reply::Text(
        serde_json::json!({"scene": narrative, "scene_class_name": identifier}).to_string(),
    )
}

pub fn code_reply(source: &str) -> Reply {
    Reply::Text(
        serde_json::json!({"code": source, "explanation": "first draft", "error_fixes": null})
            .to_string(),
    )
}

pub fn correction_reply(source: &str, change: &str) -> Reply {
    Reply::Text(
        serde_json::json!({
            "fixed_code": source,
            "explanation": format!("Fixed: {change}"),
            "changes_made": [change]
        })
        .to_string(),
    )
}

pub fn templates() -> TemplateSet {
    ExplainerConfig::bundled()
        .expect("bundled configuration")
        .templates()
        .clone()
}

/// Last user message of a request.
pub fn user_text(request: &GenerateRequest) -> String {
    request
        .messages()
        .last()
        .map(|m| m.content().clone())
        .unwrap_or_default()
}
