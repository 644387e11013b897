//! Generated scripts and corrections.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A runnable rendering script produced by the model.
///
/// Replaced wholesale by each correction; never patched in place.
///
/// # Examples
///
/// ```
/// use explainer_core::GeneratedCode;
///
/// let json = r#"{"code": "from manim import *\n", "explanation": null}"#;
/// let code: GeneratedCode = serde_json::from_str(json).unwrap();
///
/// assert!(code.source().starts_with("from manim"));
/// assert!(code.rationale().is_none());
/// assert!(code.fixups().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct GeneratedCode {
    /// Complete script source
    #[serde(rename = "code")]
    source: String,
    /// Model's explanation of the script
    #[serde(rename = "explanation", default)]
    #[getter(skip)]
    rationale: Option<String>,
    /// Fixes applied, in order
    #[serde(rename = "error_fixes", default, deserialize_with = "null_as_empty")]
    fixups: Vec<String>,
}

impl GeneratedCode {
    /// Script with no explanation or fix history.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            rationale: None,
            fixups: Vec::new(),
        }
    }

    /// Attach an explanation.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Model's explanation of the script, if any.
    pub fn rationale(&self) -> Option<&str> {
        self.rationale.as_deref()
    }

    /// Rewrite the source, keeping explanation and fix history.
    pub fn map_source(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.source = f(self.source);
        self
    }
}

/// Replacement script returned by the correction step.
///
/// # Examples
///
/// ```
/// use explainer_core::{CorrectionResult, GeneratedCode};
///
/// let json = r#"{
///     "fixed_code": "from manim import *\nclass A(Scene): pass\n",
///     "explanation": "Added the missing import",
///     "changes_made": ["import manim"]
/// }"#;
/// let correction: CorrectionResult = serde_json::from_str(json).unwrap();
/// assert_eq!(correction.changes().len(), 1);
///
/// let code = GeneratedCode::from(correction);
/// assert!(code.source().contains("class A"));
/// assert_eq!(code.fixups(), &vec!["import manim".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct CorrectionResult {
    /// Complete replacement source
    #[serde(rename = "fixed_code")]
    source: String,
    /// What was wrong and how it was fixed
    #[serde(rename = "explanation", default)]
    rationale: String,
    /// Individual changes, in order
    #[serde(rename = "changes_made", default, deserialize_with = "null_as_empty")]
    changes: Vec<String>,
}

impl CorrectionResult {
    /// Create a correction.
    pub fn new(
        source: impl Into<String>,
        rationale: impl Into<String>,
        changes: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            rationale: rationale.into(),
            changes,
        }
    }

    /// Rewrite the replacement source, keeping explanation and changes.
    pub fn map_source(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.source = f(self.source);
        self
    }
}

impl From<CorrectionResult> for GeneratedCode {
    fn from(correction: CorrectionResult) -> Self {
        let rationale = if correction.rationale.is_empty() {
            None
        } else {
            Some(correction.rationale)
        };
        Self {
            source: correction.source,
            rationale,
            fixups: correction.changes,
        }
    }
}

// Models routinely send `null` for list fields they have nothing to put in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
