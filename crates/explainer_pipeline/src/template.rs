//! Instructional prompt templates.

use derive_getters::Getters;
use explainer_core::Message;
use explainer_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Value type of one response field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A JSON string
    #[default]
    #[display("string")]
    String,
    /// A JSON array of strings
    #[display("list of strings")]
    StringList,
}

/// One field of the JSON object the model must return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SchemaField {
    /// Key in the JSON object
    name: String,
    /// Value type
    #[serde(default)]
    kind: FieldKind,
    /// What the model should put there
    description: String,
    /// Whether the key must be present
    #[serde(default = "required_by_default")]
    required: bool,
}

fn required_by_default() -> bool {
    true
}

impl SchemaField {
    /// Create a required field.
    pub fn new(name: impl Into<String>, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// System instruction, user instruction and response schema for one request.
///
/// The user instruction may contain `{name}` placeholders. Substitution is a
/// single pass: values are inserted verbatim and never rescanned, so code or
/// error text containing braces passes through untouched. Placeholders with
/// no value are left as written.
///
/// # Examples
///
/// ```
/// use explainer_pipeline::{FieldKind, PromptTemplate, SchemaField};
///
/// let template = PromptTemplate::new(
///     "You are a Manim expert.",
///     "Plan the scene for the following topic: {topic}",
///     vec![SchemaField::new("scene", FieldKind::String, "Detailed plan for the animation")],
/// );
///
/// let messages = template.messages(&[("topic", "why is the sky blue")]);
/// assert_eq!(messages.len(), 2);
/// assert!(messages[0].content().contains("\"scene\""));
/// assert_eq!(
///     messages[1].content(),
///     "Plan the scene for the following topic: why is the sky blue"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PromptTemplate {
    /// System instruction
    system: String,
    /// User instruction with placeholders
    user: String,
    /// Fields of the expected JSON response
    #[serde(default)]
    schema: Vec<SchemaField>,
}

impl PromptTemplate {
    /// Create a template.
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        schema: Vec<SchemaField>,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            schema,
        }
    }

    /// Substitute `vars` into `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use explainer_pipeline::PromptTemplate;
    ///
    /// let out = PromptTemplate::substitute(
    ///     "CODE:\n{code}\nERROR:\n{error} {unknown}",
    ///     &[("code", "d = {error}"), ("error", "KeyError")],
    /// );
    /// assert_eq!(out, "CODE:\nd = {error}\nERROR:\nKeyError {unknown}");
    /// ```
    pub fn substitute(text: &str, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            let value = after[name_len..]
                .starts_with('}')
                .then(|| vars.iter().find(|(key, _)| *key == name))
                .flatten();

            match value {
                Some((_, value)) => {
                    out.push_str(value);
                    rest = &after[name_len + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Placeholders used by the user instruction, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.user.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];
            if name_len > 0 && after[name_len..].starts_with('}') && !found.contains(&name) {
                found.push(name);
            }
            rest = after;
        }
        found
    }

    /// Instructions describing the JSON object the model must return.
    pub fn format_instructions(&self) -> String {
        if self.schema.is_empty() {
            return String::new();
        }

        let mut out = String::from(
            "Respond with a single JSON object and nothing else: no markdown fences and no \
             commentary. Escape newlines inside string values. The object has these keys:\n",
        );
        for field in &self.schema {
            let presence = if field.required { "required" } else { "optional" };
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "- \"{}\" ({}, {}): {}",
                field.name, field.kind, presence, field.description
            );
        }
        out
    }

    /// System and user messages with `vars` substituted into the user
    /// instruction and the format instructions appended to the system one.
    pub fn messages(&self, vars: &[(&str, &str)]) -> Vec<Message> {
        let instructions = self.format_instructions();
        let system = if instructions.is_empty() {
            self.system.trim_end().to_string()
        } else {
            format!("{}\n\n{}", self.system.trim_end(), instructions.trim_end())
        };
        vec![
            Message::system(system),
            Message::user(Self::substitute(&self.user, vars)),
        ]
    }

    /// Check that the user instruction references every placeholder in
    /// `required`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::Template`] naming `template` if the user
    /// instruction is blank or a required placeholder is missing.
    pub fn validate(&self, template: &str, required: &[&str]) -> Result<(), PipelineError> {
        if self.user.trim().is_empty() {
            return Err(template_error(template, "user instruction is empty"));
        }
        let present = self.placeholders();
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !present.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(template_error(
                template,
                format!("user instruction must reference {{{}}}", missing.join("}, {")),
            ));
        }
        Ok(())
    }
}

#[track_caller]
fn template_error(template: &str, message: impl Into<String>) -> PipelineError {
    PipelineError::new(PipelineErrorKind::Template {
        template: template.to_string(),
        message: message.into(),
    })
}
