//! Groq LPU inference driver.

mod driver;

pub use driver::{GROQ_API_KEY_ENV, GROQ_CHAT_COMPLETIONS_URL, GroqDriver};
