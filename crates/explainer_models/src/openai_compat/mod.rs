//! OpenAI-compatible chat completions.

mod client;
mod dto;
mod error;

pub use client::OpenAICompatibleClient;
pub use dto::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, ResponseFormat, Usage,
};
pub use error::OpenAICompatError;
