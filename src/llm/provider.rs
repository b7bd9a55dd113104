//! Provider trait for LLM backends.
//!
//! The service only needs one capability from a model: turn a prompt into
//! reply text. Keeping that behind [`CompletionProvider`] lets tests (or a
//! different vendor) stand in without touching parsing or fallback code.

use async_trait::async_trait;

use super::error::LlmError;
use crate::analysis::Prompt;

/// A backend that answers a prompt with raw reply text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider name (e.g. `"openrouter"`).
    fn name(&self) -> &str;

    /// Send the prompt and return the model's reply text.
    ///
    /// One attempt only; callers decide what to do on failure.
    async fn generate(&self, prompt: &Prompt) -> Result<String, LlmError>;
}
