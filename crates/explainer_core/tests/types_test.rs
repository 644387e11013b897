//! Tests for the pipeline data types.

use explainer_core::{
    AttemptRecord, CorrectionResult, ExecutionResult, ExecutionStatus, GeneratedCode, RunOutcome,
    RunStatus, ScenePlan,
};
use std::time::Duration;
use strum::IntoEnumIterator;

#[test]
fn test_scene_plan_requires_both_fields() {
    let missing_identifier = r#"{"scene": "Scene 1: Introduction"}"#;
    assert!(serde_json::from_str::<ScenePlan>(missing_identifier).is_err());

    let missing_narrative = r#"{"scene_class_name": "Sky"}"#;
    assert!(serde_json::from_str::<ScenePlan>(missing_narrative).is_err());
}

#[test]
fn test_generated_code_tolerates_null_lists() -> anyhow::Result<()> {
    let json = r#"{"code": "print(1)", "explanation": "trivial", "error_fixes": null}"#;
    let code: GeneratedCode = serde_json::from_str(json)?;

    assert_eq!(code.rationale(), Some("trivial"));
    assert!(code.fixups().is_empty());
    Ok(())
}

#[test]
fn test_correction_requires_fixed_code() {
    let json = r#"{"explanation": "fixed it", "changes_made": []}"#;
    assert!(serde_json::from_str::<CorrectionResult>(json).is_err());
}

#[test]
fn test_correction_replaces_source_entirely() {
    let correction = CorrectionResult::new("new source", "", vec!["rewrote".to_string()]);
    let code = GeneratedCode::from(correction);

    assert_eq!(code.source(), "new source");
    assert!(code.rationale().is_none());
}

#[test]
fn test_execution_status_classification() {
    let clean_without_video = ExecutionResult::success("done", None, Duration::ZERO);
    assert_eq!(clean_without_video.status(), ExecutionStatus::MissingArtifact);
    assert!(clean_without_video.error().is_none());

    let failure = ExecutionResult::failure("partial", "Traceback ...", Some(1), Duration::ZERO);
    assert_eq!(failure.status(), ExecutionStatus::ScriptError);
    assert_eq!(failure.error(), Some("Traceback ..."));
    assert_eq!(*failure.exit_code(), Some(1));
}

#[test]
fn test_every_status_is_reachable() {
    let observed: Vec<ExecutionStatus> = vec![
        ExecutionResult::success("", Some("a.mp4".into()), Duration::ZERO).status(),
        ExecutionResult::failure("", "boom", None, Duration::ZERO).status(),
        ExecutionResult::success("", None, Duration::ZERO).status(),
    ];
    for status in ExecutionStatus::iter() {
        assert!(observed.contains(&status), "{status} not produced");
    }
}

#[test]
fn test_failed_outcome_hides_video_and_keeps_error() -> anyhow::Result<()> {
    let last = ExecutionResult::failure("", "SyntaxError: invalid syntax", Some(1), Duration::ZERO);
    let mut first = AttemptRecord::new(
        1,
        ExecutionResult::failure("", "ImportError", Some(1), Duration::ZERO),
    );
    first.set_correction(CorrectionResult::new("v2", "import fixed", vec![]));

    let outcome = RunOutcome::builder()
        .identifier("Broken")
        .final_source("v2")
        .plan("plan")
        .last_execution(last.clone())
        .attempts(2u32)
        .status(RunStatus::Failed)
        .history(vec![first, AttemptRecord::new(2, last)])
        .build()?;

    assert!(!outcome.succeeded());
    assert!(outcome.video().is_none());
    assert_eq!(outcome.last_error(), Some("SyntaxError: invalid syntax"));
    assert_eq!(outcome.corrections(), 1);
    Ok(())
}

#[test]
fn test_outcome_serializes_for_cli_output() -> anyhow::Result<()> {
    let last = ExecutionResult::success(
        "",
        Some("media/videos/A/480p15/A.mp4".into()),
        Duration::from_millis(1500),
    );
    let outcome = RunOutcome::builder()
        .identifier("A")
        .final_source("src")
        .plan("plan")
        .last_execution(last.clone())
        .attempts(1u32)
        .status(RunStatus::Succeeded)
        .history(vec![AttemptRecord::new(1, last)])
        .build()?;

    let value = serde_json::to_value(&outcome)?;
    assert_eq!(value["status"], "Succeeded");
    assert_eq!(value["last_execution"]["duration_ms"], 1500);
    assert_eq!(value["last_execution"]["artifact_path"], "media/videos/A/480p15/A.mp4");
    Ok(())
}
