//! Utilities for extracting structured data from LLM responses.
//!
//! Even in JSON mode, models wrap objects in markdown fences, prefix them with
//! a sentence of prose, or paste multi-line scripts into string values without
//! escaping the newlines. The helpers here recover the object in those cases.

use explainer_error::{ExplainerResult, JsonError};

/// Extract the JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. The whole response, when it is already a bare object
/// 2. A ```` ```json ```` fenced block
/// 3. The first balanced `{ ... }`, skipping braces inside strings
/// 4. Any other fenced block
///
/// # Errors
///
/// Returns [`JsonError`] if no object is found.
///
/// # Examples
///
/// ```
/// use explainer_pipeline::extract_json;
///
/// let response = "Here is the plan:\n```json\n{\"scene\": \"...\", \"scene_class_name\": \"Orbit\"}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// assert!(json.contains("Orbit"));
/// ```
pub fn extract_json(response: &str) -> ExplainerResult<String> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed.to_string());
    }

    if let Some(json) = extract_from_code_block(response, Some("json")) {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    if let Some(json) = extract_from_code_block(response, None).filter(|j| j.starts_with('{')) {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in LLM response"
    );
    Err(JsonError::with_payload("No JSON object found in response", response).into())
}

/// Parse JSON into `T`, tolerating raw control characters inside strings.
///
/// # Errors
///
/// Returns [`JsonError`] if the text does not decode as `T` even after
/// escaping control characters.
///
/// # Examples
///
/// ```
/// use explainer_core::GeneratedCode;
/// use explainer_pipeline::parse_json;
///
/// // Literal newlines inside the string value.
/// let json = "{\"code\": \"from manim import *\nclass A(Scene):\n    pass\"}";
/// let code: GeneratedCode = parse_json(json).unwrap();
/// assert!(code.source().contains("class A(Scene):\n"));
/// ```
pub fn parse_json<T>(json: &str) -> ExplainerResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let first = match serde_json::from_str(json) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if first.is_syntax() || first.is_eof() {
        let repaired = escape_control_characters(json);
        if repaired != json {
            if let Ok(value) = serde_json::from_str(&repaired) {
                tracing::debug!("Parsed JSON after escaping control characters");
                return Ok(value);
            }
        }
    }

    tracing::error!(error = %first, "JSON parsing failed");
    Err(JsonError::with_payload(format!("Failed to parse JSON: {first}"), json).into())
}

/// Extract and parse in one step.
///
/// # Errors
///
/// Returns [`JsonError`] if no object is found or it does not decode as `T`.
pub fn extract_and_parse<T>(response: &str) -> ExplainerResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(response)?;
    parse_json(&json)
}

/// Remove a markdown fence wrapped around a whole script.
///
/// Models sometimes return the `code` value as a fenced block; the renderer
/// would reject the backticks as a syntax error. Text that is not entirely
/// fenced is returned unchanged.
///
/// # Examples
///
/// ```
/// use explainer_pipeline::strip_code_fence;
///
/// let fenced = "```python\nfrom manim import *\n```".to_string();
/// assert_eq!(strip_code_fence(fenced), "from manim import *\n");
///
/// let plain = "from manim import *\n".to_string();
/// assert_eq!(strip_code_fence(plain.clone()), plain);
/// ```
pub fn strip_code_fence(source: String) -> String {
    let trimmed = source.trim();
    if !(trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6) {
        return source;
    }
    let inner = &trimmed[3..trimmed.len() - 3];
    let body = match inner.find('\n') {
        Some(newline) => &inner[newline + 1..],
        None => return source,
    };
    let mut stripped = body.trim_end().to_string();
    stripped.push('\n');
    stripped
}

/// Content of the first fenced block, optionally restricted to one language.
///
/// An unterminated fence yields everything after it, which is what a
/// truncated completion looks like.
fn extract_from_code_block(response: &str, language: Option<&str>) -> Option<String> {
    let (start, opening) = match language {
        Some(lang) => {
            let pattern = format!("```{lang}");
            (response.find(&pattern)?, pattern.len())
        }
        None => (response.find("```")?, 3),
    };

    let after_fence = start + opening;
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    let content = match response[content_start..].find("```") {
        Some(end) => &response[content_start..content_start + end],
        None => &response[content_start..],
    };
    Some(content.trim().to_string())
}

/// Content between the first `open` and its matching `close`.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Escape raw newlines, carriage returns and tabs that appear inside strings.
fn escape_control_characters(json: &str) -> String {
    let mut out = String::with_capacity(json.len() + 16);
    let mut in_string = false;
    let mut escape_next = false;

    for ch in json.chars() {
        if escape_next {
            escape_next = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' if in_string => {
                escape_next = true;
                out.push(ch);
            }
            '"' => {
                in_string = !in_string;
                out.push(ch);
            }
            '\n' if in_string => out.push_str("\\n"),
            '\r' if in_string => out.push_str("\\r"),
            '\t' if in_string => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
