//! Language model access.
//!
//! - [`provider`]: the [`CompletionProvider`] capability trait
//! - [`openrouter`]: the OpenRouter implementation over reqwest
//! - [`error`]: [`LlmError`] with stable codes

pub mod error;
pub mod openrouter;
pub mod provider;

pub use error::LlmError;
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use provider::CompletionProvider;
