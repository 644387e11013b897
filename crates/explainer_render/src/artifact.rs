//! Rendered video discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Newest file directly in `dir` with the given extension, as an absolute path.
///
/// Subdirectories are not searched: Manim keeps per-animation clips under
/// `partial_movie_files/` next to the finished video. Files are ranked by
/// creation time, falling back to modification time on filesystems that do
/// not record creation. Ties go to the lexically greatest path. A missing or
/// unreadable directory yields `None`.
///
/// # Examples
///
/// ```
/// use explainer_render::find_latest_artifact;
///
/// let dir = tempfile::tempdir().unwrap();
/// assert!(find_latest_artifact(dir.path(), "mp4").is_none());
///
/// std::fs::write(dir.path().join("Scene.mp4"), b"").unwrap();
/// let found = find_latest_artifact(dir.path(), "mp4").unwrap();
/// assert!(found.is_absolute());
/// assert!(found.ends_with("Scene.mp4"));
/// ```
pub fn find_latest_artifact(dir: &Path, extension: &str) -> Option<PathBuf> {
    let newest = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .filter_map(|entry| {
            let stamp = timestamp(&entry)?;
            trace!(path = %entry.path().display(), "Candidate artifact");
            Some((stamp, entry.into_path()))
        })
        .max()
        .map(|(_, path)| path)?;

    debug!(path = %newest.display(), "Selected newest artifact");
    Some(std::path::absolute(&newest).unwrap_or(newest))
}

fn timestamp(entry: &walkdir::DirEntry) -> Option<SystemTime> {
    let metadata = entry.metadata().ok()?;
    metadata.created().or_else(|_| metadata.modified()).ok()
}
