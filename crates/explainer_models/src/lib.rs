//! LLM provider integrations for Explainer.
//!
//! Every provider the pipeline targets speaks the OpenAI chat-completions
//! protocol, so the crate is built around [`OpenAICompatibleClient`]. Named
//! providers wrap it with their endpoint and credential conventions, each
//! behind its own feature flag.
//!
//! # Available Providers
//!
//! - **Any OpenAI-compatible endpoint** - always available
//! - **Groq** - Enable with `groq` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "groq")]
//! # {
//! use explainer_models::GroqDriver;
//! use explainer_interface::ExplainerDriver;
//! use explainer_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = GroqDriver::new("llama-3.3-70b-versatile")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai_compat;

pub use openai_compat::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, OpenAICompatError,
    OpenAICompatibleClient, ResponseFormat, Usage,
};

#[cfg(feature = "groq")]
mod groq;

#[cfg(feature = "groq")]
pub use groq::{GROQ_API_KEY_ENV, GROQ_CHAT_COMPLETIONS_URL, GroqDriver};
