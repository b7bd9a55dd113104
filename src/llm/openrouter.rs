//! OpenRouter provider (OpenAI-compatible Chat Completions).
//!
//! Sends one non-streaming `POST {base_url}/chat/completions` with a
//! system + user message pair and returns `choices[0].message.content`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use airtime::analysis::build_prompt;
//! use airtime::llm::openrouter::{OpenRouterConfig, OpenRouterProvider};
//! use airtime::llm::provider::CompletionProvider;
//!
//! # async fn example() -> Result<(), airtime::llm::error::LlmError> {
//! let config = OpenRouterConfig::new("sk-or-...", "openrouter/aurora-alpha");
//! let provider = OpenRouterProvider::new(config)?;
//! let reply = provider.generate(&build_prompt("call mom, finish essay")).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::analysis::Prompt;
use crate::config::LlmConfig;
use crate::llm::error::LlmError;
use crate::llm::provider::CompletionProvider;

/// Configuration for the OpenRouter provider.
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// API key for bearer authentication; `None` fails every call.
    pub api_key: Option<String>,
    /// Base URL including the `/v1` segment.
    pub base_url: String,
    /// The model to request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: usize,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenRouterConfig {
    /// Create a config with the given API key and model and default tuning.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            api_key: Some(api_key.into()),
            base_url: defaults.base_url,
            model: model.into(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout: Duration::from_secs(defaults.request_timeout_secs),
        }
    }

    /// Build from the `[llm]` config section and an already-resolved key.
    pub fn from_llm_config(config: &LlmConfig, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Build the JSON request body for the Chat Completions API.
pub fn build_completions_request(
    model: &str,
    prompt: &Prompt,
    temperature: f64,
    max_tokens: usize,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": prompt.system},
            {"role": "user", "content": prompt.user},
        ],
        "temperature": temperature,
        "max_tokens": max_tokens,
    })
}

/// Pull `choices[0].message.content` out of a completion body.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let envelope: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LlmError::EnvelopeError(format!("response is not JSON: {e}")))?;
    envelope
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| LlmError::EnvelopeError("missing choices[0].message.content".into()))
}

/// Extract an error message from an OpenAI-style error body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

/// OpenRouter provider.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenRouterProvider {
    /// Create a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: OpenRouterConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Map an HTTP error status to the appropriate [`LlmError`].
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => LlmError::AuthError(format!("OpenRouter authentication failed: {message}")),
            _ => LlmError::ProviderError(format!("OpenRouter HTTP {}: {message}", status.as_u16())),
        }
    }

    fn map_transport_error(e: &reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::TimeoutError(format!("OpenRouter request timed out: {e}"))
        } else {
            LlmError::RequestError(format!("OpenRouter request failed: {e}"))
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::ConfigError("no API key configured".into()))?;

        let body = build_completions_request(
            &self.config.model,
            prompt,
            self.config.temperature,
            self.config.max_tokens,
        );

        debug!(model = %self.config.model, "sending request to OpenRouter");
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &text));
        }

        let content = extract_content(&text)?;
        debug!(reply_len = content.len(), "received reply from OpenRouter");
        Ok(content)
    }
}
