//! Renderer tests using `sh -c` scripts in place of the Manim executable.
//!
//! The renderer appends `<identifier>.py <identifier>` to the command line, so
//! inside the scripts `$0` is the script file and `$1` the identifier.
#![cfg(unix)]

use explainer_core::ExecutionStatus;
use explainer_error::RenderErrorKind;
use explainer_interface::SceneRenderer;
use explainer_render::{ManimRenderer, RenderSettings};
use std::path::Path;
use std::time::Duration;

const SOURCE: &str = "from manim import *\n\nclass Hello(Scene):\n    def construct(self):\n        pass\n";

fn shell_renderer(dir: &Path, script: &str, timeout_secs: Option<u64>) -> ManimRenderer {
    let settings = RenderSettings::builder()
        .program("sh")
        .args(vec!["-c".to_string(), script.to_string()])
        .quality_flags(Vec::<String>::new())
        .working_dir(dir)
        .timeout_secs(timeout_secs)
        .build()
        .expect("settings");
    ManimRenderer::new(settings)
}

const RENDER_COPY: &str =
    r#"mkdir -p "media/videos/$1/480p15" && cp "$0" "media/videos/$1/480p15/$1.mp4" && echo "File ready""#;

#[tokio::test]
async fn test_successful_render_locates_video() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), RENDER_COPY, Some(30));

    let result = renderer.execute(SOURCE, "Hello").await?;

    assert_eq!(result.status(), ExecutionStatus::Rendered);
    assert!(result.error().is_none());
    assert!(result.stdout().contains("File ready"));
    assert_eq!(*result.exit_code(), Some(0));

    let video = result.artifact_path().expect("artifact");
    assert!(video.is_absolute());
    assert!(video.ends_with("media/videos/Hello/480p15/Hello.mp4"));
    assert_eq!(std::fs::read_to_string(video)?, SOURCE);
    Ok(())
}

#[tokio::test]
async fn test_script_error_is_captured_not_raised() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let script = r#"echo "Animation 0: 0%" ; echo "NameError: name 'Circl' is not defined" >&2 ; exit 1"#;
    let renderer = shell_renderer(dir.path(), script, Some(30));

    let result = renderer.execute(SOURCE, "Broken").await?;

    assert_eq!(result.status(), ExecutionStatus::ScriptError);
    assert_eq!(
        result.error().map(str::trim),
        Some("NameError: name 'Circl' is not defined")
    );
    assert!(result.stdout().contains("Animation 0"));
    assert_eq!(*result.exit_code(), Some(1));
    assert!(result.artifact_path().is_none());
    Ok(())
}

#[tokio::test]
async fn test_silent_failure_reports_exit_status() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), "exit 3", Some(30));

    let result = renderer.execute(SOURCE, "Silent").await?;

    assert_eq!(result.error(), Some("Renderer exited with status 3"));
    Ok(())
}

#[tokio::test]
async fn test_clean_exit_without_video() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), "echo nothing rendered", Some(30));

    let result = renderer.execute(SOURCE, "Empty").await?;

    assert_eq!(result.status(), ExecutionStatus::MissingArtifact);
    assert!(result.error().is_none());
    assert!(result.artifact_path().is_none());
    Ok(())
}

#[tokio::test]
async fn test_script_written_and_overwritten() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), r#"cat "$0""#, Some(30));

    let first = renderer.execute("print('first')\n", "Scene").await?;
    assert!(first.stdout().contains("first"));

    let second = renderer.execute("print('second')\n", "Scene").await?;
    assert!(second.stdout().contains("second"));

    let on_disk = std::fs::read_to_string(dir.path().join("Scene.py"))?;
    assert_eq!(on_disk, "print('second')\n");
    Ok(())
}

#[tokio::test]
async fn test_newest_video_wins() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("media/videos/Scene/480p15");
    std::fs::create_dir_all(&out)?;
    std::fs::write(out.join("Older.mp4"), b"old")?;
    std::fs::write(out.join("notes.txt"), b"ignored")?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let script = r#"touch "media/videos/$1/480p15/Newer.mp4""#;
    let renderer = shell_renderer(dir.path(), script, Some(30));

    let result = renderer.execute(SOURCE, "Scene").await?;

    let video = result.artifact_path().expect("artifact");
    assert!(video.ends_with("Newer.mp4"));
    Ok(())
}

#[tokio::test]
async fn test_rerender_ignores_partial_clips() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("media/videos/Sky/480p15");
    let partials = out.join("partial_movie_files/Sky");
    std::fs::create_dir_all(&partials)?;
    std::fs::write(partials.join("1111_a.mp4"), b"clip")?;
    std::fs::write(out.join("Sky.mp4"), b"first render")?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // A second render adds a clip, then rewrites the final video in place.
    let script = r#"out="media/videos/$1/480p15"
echo clip > "$out/partial_movie_files/$1/2222_b.mp4"
cat "$0" > "$out/$1.mp4""#;
    let renderer = shell_renderer(dir.path(), script, Some(30));

    let result = renderer.execute(SOURCE, "Sky").await?;

    let video = result.artifact_path().expect("artifact");
    assert!(video.ends_with("media/videos/Sky/480p15/Sky.mp4"), "selected {}", video.display());
    assert_eq!(std::fs::read_to_string(video)?, SOURCE);
    Ok(())
}

#[tokio::test]
async fn test_timeout_kills_renderer() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), "sleep 10", Some(1));

    let started = std::time::Instant::now();
    let result = renderer.execute(SOURCE, "Slow").await?;

    assert!(started.elapsed() < Duration::from_secs(8));
    assert_eq!(result.status(), ExecutionStatus::ScriptError);
    assert!(result.error().is_some_and(|e| e.contains("timed out")));
    assert_eq!(*result.exit_code(), None);
    Ok(())
}

#[tokio::test]
async fn test_timeout_keeps_partial_output() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let script = r#"echo "Animation 0: 40%"
echo "UserWarning: slow LaTeX" >&2
sleep 10"#;
    let renderer = shell_renderer(dir.path(), script, Some(1));

    let started = std::time::Instant::now();
    let result = renderer.execute(SOURCE, "Stalled").await?;

    assert!(started.elapsed() < Duration::from_secs(8));
    assert_eq!(result.status(), ExecutionStatus::ScriptError);
    assert!(result.stdout().contains("Animation 0: 40%"));
    let error = result.error().expect("error");
    assert!(error.starts_with("Rendering timed out after 1 seconds"), "error: {error}");
    assert!(error.contains("UserWarning: slow LaTeX"), "error: {error}");
    Ok(())
}

#[tokio::test]
async fn test_missing_executable_is_launch_failure() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = RenderSettings::builder()
        .program("explainer-no-such-renderer")
        .working_dir(dir.path())
        .build()?;
    let renderer = ManimRenderer::new(settings);

    let err = renderer
        .execute(SOURCE, "Hello")
        .await
        .expect_err("launch must fail");

    assert!(matches!(
        err.render_kind(),
        Some(RenderErrorKind::Launch { program, .. }) if program == "explainer-no-such-renderer"
    ));
    Ok(())
}

#[tokio::test]
async fn test_invalid_identifier_rejected_before_writing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let renderer = shell_renderer(dir.path(), "exit 0", Some(30));

    let err = renderer
        .execute(SOURCE, "../Escape")
        .await
        .expect_err("identifier must be rejected");

    assert_eq!(
        err.render_kind(),
        Some(&RenderErrorKind::InvalidIdentifier("../Escape".to_string()))
    );
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_settings_from_partial_toml() -> anyhow::Result<()> {
    let settings: RenderSettings = toml::from_str(
        r#"
        program = "manim"
        args = []
        quality_flags = ["-qh"]
        quality_dir = "1080p60"
        timeout_secs = 120
        "#,
    )?;

    assert_eq!(settings.program(), "manim");
    assert_eq!(settings.command_args("Atom"), vec!["-qh", "Atom.py", "Atom"]);
    assert_eq!(settings.timeout(), Some(Duration::from_secs(120)));
    assert_eq!(
        settings.artifact_dir("Atom"),
        Path::new(".").join("media/videos/Atom/1080p60")
    );
    Ok(())
}
