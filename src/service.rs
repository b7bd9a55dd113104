//! Brain-dump analysis service.
//!
//! Glues the prompt, the provider and the tolerant parser together.
//! [`BrainDumpService::analyze`] never fails: a provider error or an
//! unrecoverable reply both end in [`fallback_analysis`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisResult, build_prompt, fallback_analysis, parse_analysis_response};
use crate::llm::provider::CompletionProvider;

/// Analyzes brain dumps through a [`CompletionProvider`].
#[derive(Clone)]
pub struct BrainDumpService {
    provider: Arc<dyn CompletionProvider>,
}

impl std::fmt::Debug for BrainDumpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrainDumpService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl BrainDumpService {
    /// Create a service backed by the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Analyze one brain dump.
    pub async fn analyze(&self, brain_dump: &str) -> AnalysisResult {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            %request_id,
            provider = self.provider.name(),
            input_len = brain_dump.len(),
            "analyzing brain dump"
        );

        let prompt = build_prompt(brain_dump);
        let result = match self.provider.generate(&prompt).await {
            Ok(reply) => parse_analysis_response(&reply, brain_dump),
            Err(e) => {
                warn!(
                    %request_id,
                    code = e.code(),
                    transport = e.is_transport(),
                    error = %e,
                    "provider call failed"
                );
                fallback_analysis(brain_dump)
            }
        };

        info!(
            %request_id,
            elapsed_ms = elapsed_millis(started),
            events = result.calendar_events.len(),
            "brain dump analyzed"
        );
        result
    }
}

/// Milliseconds since `started`, saturating at `u64::MAX`.
fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::analysis::Prompt;
    use crate::llm::error::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned reply (or error) and records the prompts it saw.
    struct ScriptedProvider {
        reply: Result<String, fn() -> LlmError>,
        seen: Mutex<Vec<Prompt>>,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_owned()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: fn() -> LlmError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &Prompt) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(prompt.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn reply_is_parsed() {
        let provider = ScriptedProvider::replying(r#"{"urgency": 5, "quickWin": "Reply to Sam"}"#);
        let service = BrainDumpService::new(provider.clone());

        let result = service.analyze("email Sam back").await;
        assert_eq!(result.urgency, 5);
        assert_eq!(result.quick_win, "Reply to Sam");
        assert_eq!(result.organized_notes, vec!["email Sam back"]);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].user.contains("email Sam back"));
    }

    #[tokio::test]
    async fn provider_error_falls_back() {
        let provider = ScriptedProvider::failing(|| LlmError::TimeoutError("slow".into()));
        let service = BrainDumpService::new(provider);

        let result = service.analyze("pay rent").await;
        assert_eq!(result.organized_notes, vec!["pay rent"]);
        assert_eq!(result.calendar_events.len(), 1);
        assert_eq!(result.calendar_events[0].title, "Organize: pay rent");
    }

    #[tokio::test]
    async fn garbage_reply_falls_back() {
        let provider = ScriptedProvider::replying("I'm sorry, I can't do that.");
        let service = BrainDumpService::new(provider);

        let result = service.analyze("water plants").await;
        assert_eq!(
            result.calendar_events[0].notes,
            "AI processing unavailable - review this manually"
        );
    }

    #[test]
    fn debug_shows_provider_name() {
        let service = BrainDumpService::new(ScriptedProvider::replying("{}"));
        assert!(format!("{service:?}").contains("scripted"));
    }

    #[tokio::test]
    async fn envelope_error_falls_back() {
        let provider = ScriptedProvider::failing(|| LlmError::EnvelopeError("no content".into()));
        let service = BrainDumpService::new(provider);

        let result = service.analyze("book flights").await;
        assert_eq!(result.calendar_events[0].title, "Organize: book flights");
    }

    #[test]
    fn elapsed_millis_is_small_for_fresh_instant() {
        assert!(elapsed_millis(Instant::now()) < 60_000);
    }
}
