//! Subprocess renderer driving the Manim command line.

use crate::{RenderSettings, find_latest_artifact, is_valid_identifier};
use async_trait::async_trait;
use explainer_core::ExecutionResult;
use explainer_error::{ExplainerResult, RenderError, RenderErrorKind};
use explainer_interface::SceneRenderer;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

const VIDEO_EXTENSION: &str = "mp4";

/// How long a killed renderer's pipes may take to close.
const PIPE_GRACE: Duration = Duration::from_secs(1);

/// Renders generated scripts by running the Manim command line.
///
/// Scripts are left on disk after the run, overwritten by the next script
/// with the same identifier. A run that outlives the configured timeout is
/// killed; whatever it printed by then is kept in the result.
#[derive(Debug, Clone, Default)]
pub struct ManimRenderer {
    settings: RenderSettings,
}

impl ManimRenderer {
    /// Create a renderer with the given invocation settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Invocation settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Write `source` to the script file for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderErrorKind::Io`] if the working directory cannot be
    /// created or the file cannot be written.
    pub async fn write_script(&self, source: &str, identifier: &str) -> ExplainerResult<PathBuf> {
        let dir = self.settings.working_dir();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| io_error(dir.display().to_string(), e))?;

        let path = self.settings.script_path(identifier);
        tokio::fs::write(&path, source)
            .await
            .map_err(|e| io_error(path.display().to_string(), e))?;

        debug!(path = %path.display(), bytes = source.len(), "Wrote scene script");
        Ok(path)
    }

    fn command(&self, identifier: &str) -> Command {
        let mut command = Command::new(self.settings.program());
        command
            .args(self.settings.command_args(identifier))
            .current_dir(self.settings.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    #[track_caller]
    fn launch_error(&self, err: std::io::Error) -> RenderError {
        RenderError::new(RenderErrorKind::Launch {
            program: self.settings.program().clone(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl SceneRenderer for ManimRenderer {
    #[instrument(
        skip(self, source),
        fields(bytes = source.len(), program = %self.settings.program())
    )]
    async fn execute(&self, source: &str, identifier: &str) -> ExplainerResult<ExecutionResult> {
        if !is_valid_identifier(identifier) {
            return Err(
                RenderError::new(RenderErrorKind::InvalidIdentifier(identifier.to_string())).into(),
            );
        }

        self.write_script(source, identifier).await?;

        let started = Instant::now();
        let mut child = self
            .command(identifier)
            .spawn()
            .map_err(|e| self.launch_error(e))?;
        let stdout = Captured::default();
        let stderr = Captured::default();
        let mut readers = [
            stdout.drain(child.stdout.take()),
            stderr.drain(child.stderr.take()),
        ];

        let status = match self.settings.timeout() {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        debug!(error = %e, "Renderer exited before it could be killed");
                    }
                    // Orphaned grandchildren may hold the pipes open.
                    let drained = tokio::time::timeout(PIPE_GRACE, async {
                        for reader in readers.iter_mut() {
                            let _ = reader.await;
                        }
                    })
                    .await;
                    if drained.is_err() {
                        readers.iter().for_each(JoinHandle::abort);
                    }

                    warn!(timeout_secs = limit.as_secs(), "Renderer timed out");
                    let mut error =
                        format!("Rendering timed out after {} seconds", limit.as_secs());
                    let partial = stderr.text();
                    if !partial.trim().is_empty() {
                        error.push_str("\n\n");
                        error.push_str(partial.trim_end());
                    }
                    return Ok(ExecutionResult::failure(
                        stdout.text(),
                        error,
                        None,
                        started.elapsed(),
                    ));
                }
            },
            None => child.wait().await,
        }
        .map_err(|e| self.launch_error(e))?;
        for reader in readers {
            let _ = reader.await;
        }
        let elapsed = started.elapsed();

        let stdout = stdout.text();
        let stderr = stderr.text();

        if status.success() {
            let dir = self.settings.artifact_dir(identifier);
            let artifact = find_latest_artifact(&dir, VIDEO_EXTENSION);
            match &artifact {
                Some(path) => info!(
                    artifact = %path.display(),
                    duration_ms = elapsed.as_millis() as u64,
                    "Render succeeded"
                ),
                None => warn!(searched = %dir.display(), "Renderer exited cleanly without a video"),
            }
            return Ok(ExecutionResult::success(stdout, artifact, elapsed));
        }

        let code = status.code();
        let error = if stderr.trim().is_empty() {
            match code {
                Some(code) => format!("Renderer exited with status {code}"),
                None => "Renderer was terminated by a signal".to_string(),
            }
        } else {
            stderr
        };
        warn!(exit_code = ?code, "Render failed");
        Ok(ExecutionResult::failure(stdout, error, code, elapsed))
    }

    fn renderer_name(&self) -> &str {
        "manim"
    }

    fn output_dir(&self, identifier: &str) -> Option<PathBuf> {
        Some(self.settings.artifact_dir(identifier))
    }
}

/// Bytes read so far from one of the child's pipes.
///
/// Shared with the reading task so a timed-out run can still report what the
/// renderer printed before it was killed.
#[derive(Debug, Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn drain<P>(&self, pipe: Option<P>) -> JoinHandle<()>
    where
        P: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::clone(&self.0);
        tokio::spawn(async move {
            let Some(mut pipe) = pipe else {
                return;
            };
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => buffer
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        debug!(error = %e, "Stopped reading renderer output");
                        break;
                    }
                }
            }
        })
    }

    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[track_caller]
fn io_error(path: String, err: std::io::Error) -> RenderError {
    RenderError::new(RenderErrorKind::Io {
        path,
        message: err.to_string(),
    })
}
