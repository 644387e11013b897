//! Storyboard produced by the planning step.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Storyboard for one animation.
///
/// The identifier doubles as the generated scene class name and as the file
/// stem of both the script and the rendered video. Field names on the wire
/// are the ones the planning prompt asks the model for.
///
/// # Examples
///
/// ```
/// use explainer_core::ScenePlan;
///
/// let json = r#"{"scene": "Scene 1: Introduction ...", "scene_class_name": "WhyIsTheSkyBlue"}"#;
/// let plan: ScenePlan = serde_json::from_str(json).unwrap();
///
/// assert_eq!(plan.identifier(), "WhyIsTheSkyBlue");
/// assert!(plan.narrative().starts_with("Scene 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ScenePlan {
    /// Free-text scene-by-scene description
    #[serde(rename = "scene")]
    narrative: String,
    /// Scene class name and file stem
    #[serde(rename = "scene_class_name")]
    identifier: String,
}

impl ScenePlan {
    /// Create a plan.
    pub fn new(narrative: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            identifier: identifier.into(),
        }
    }

    /// Same storyboard under a different identifier.
    ///
    /// Used to keep concurrent runs from writing to the same files.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_core::ScenePlan;
    ///
    /// let plan = ScenePlan::new("...", "GradientDescent");
    /// let renamed = plan.renamed("Run7_GradientDescent");
    /// assert_eq!(renamed.identifier(), "Run7_GradientDescent");
    /// assert_eq!(renamed.narrative(), plan.narrative());
    /// ```
    pub fn renamed(&self, identifier: impl Into<String>) -> Self {
        Self {
            narrative: self.narrative.clone(),
            identifier: identifier.into(),
        }
    }
}
