//! Renderer invocation settings.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How to invoke the rendering engine and where it leaves its output.
///
/// The command line is `<program> <args...> <quality_flags...> <identifier>.py
/// <identifier>`, run from `working_dir`. Videos are looked up under
/// `<working_dir>/<media_dir>/videos/<identifier>/<quality_dir>/`.
///
/// Deserializes from the `[renderer]` configuration table; missing keys take
/// the defaults below.
///
/// # Examples
///
/// ```
/// use explainer_render::RenderSettings;
/// use std::path::Path;
///
/// let settings = RenderSettings::default();
/// assert_eq!(settings.program(), "python");
/// assert_eq!(
///     settings.artifact_dir("Hello"),
///     Path::new(".").join("media").join("videos").join("Hello").join("480p15")
/// );
///
/// let custom = RenderSettings::builder()
///     .program("manim")
///     .args(Vec::<String>::new())
///     .quality_flags(vec!["-qm".to_string()])
///     .quality_dir("720p30")
///     .build()
///     .unwrap();
/// assert_eq!(custom.command_args("Hello"), vec!["-qm", "Hello.py", "Hello"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[serde(default)]
#[builder(setter(into), default)]
pub struct RenderSettings {
    /// Executable to launch
    program: String,
    /// Arguments placed before the quality flags
    args: Vec<String>,
    /// Quality selection flags
    quality_flags: Vec<String>,
    /// Media root, relative to the working directory unless absolute
    media_dir: PathBuf,
    /// Per-quality subdirectory the engine writes videos into
    quality_dir: String,
    /// Directory scripts are written to and the engine runs in
    working_dir: PathBuf,
    /// Kill the engine after this many seconds
    #[getter(skip)]
    timeout_secs: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["-m".to_string(), "manim".to_string()],
            quality_flags: vec!["-ql".to_string()],
            media_dir: PathBuf::from("media"),
            quality_dir: "480p15".to_string(),
            working_dir: PathBuf::from("."),
            timeout_secs: Some(600),
        }
    }
}

impl RenderSettings {
    /// Creates a new builder for `RenderSettings`.
    pub fn builder() -> RenderSettingsBuilder {
        RenderSettingsBuilder::default()
    }

    /// Engine time limit, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Where the script for `identifier` is written.
    pub fn script_path(&self, identifier: &str) -> PathBuf {
        self.working_dir.join(script_file_name(identifier))
    }

    /// Directory searched for the video of `identifier`.
    pub fn artifact_dir(&self, identifier: &str) -> PathBuf {
        self.media_root()
            .join("videos")
            .join(identifier)
            .join(&self.quality_dir)
    }

    /// Arguments passed to [`program`](Self::program) for `identifier`.
    pub fn command_args(&self, identifier: &str) -> Vec<String> {
        self.args
            .iter()
            .chain(self.quality_flags.iter())
            .cloned()
            .chain([script_file_name(identifier), identifier.to_string()])
            .collect()
    }

    fn media_root(&self) -> PathBuf {
        if self.media_dir.is_absolute() {
            self.media_dir.clone()
        } else {
            self.working_dir.join(&self.media_dir)
        }
    }
}

fn script_file_name(identifier: &str) -> String {
    format!("{identifier}.py")
}
