//! Manim subprocess renderer for Explainer.
//!
//! [`ManimRenderer`] implements [`SceneRenderer`](explainer_interface::SceneRenderer):
//! it writes a generated script to `<identifier>.py`, runs the rendering engine
//! against it, and either captures the engine's error output or locates the
//! newest video the engine produced for that scene.
//!
//! # Example
//!
//! ```no_run
//! use explainer_interface::SceneRenderer;
//! use explainer_render::{ManimRenderer, RenderSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = ManimRenderer::new(RenderSettings::default());
//! let source = "from manim import *\n\nclass Hello(Scene):\n    def construct(self):\n        self.play(Write(Text(\"Hello\")))\n";
//!
//! let result = renderer.execute(source, "Hello").await?;
//! match result.artifact_path() {
//!     Some(video) => println!("Rendered {}", video.display()),
//!     None => println!("Failed: {:?}", result.error()),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod identifier;
mod manim;
mod settings;

pub use artifact::find_latest_artifact;
pub use identifier::is_valid_identifier;
pub use manim::ManimRenderer;
pub use settings::{RenderSettings, RenderSettingsBuilder, RenderSettingsBuilderError};
