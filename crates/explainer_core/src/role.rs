//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
///
/// Serialized in lowercase, which is what OpenAI-compatible chat endpoints
/// expect on the wire.
///
/// # Examples
///
/// ```
/// use explainer_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "system");
/// assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the whole exchange
    #[display("system")]
    System,
    /// Request from the pipeline
    #[display("user")]
    User,
    /// Reply from the model
    #[display("assistant")]
    Assistant,
}
