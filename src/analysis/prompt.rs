//! Prompt construction for brain-dump analysis.
//!
//! The user's text is pasted into the template verbatim. It is not escaped,
//! so quotes or braces in a brain dump reach the model as typed.

/// The analysis instructions (loaded from `prompts/brain_dump.md` at compile time).
const BRAIN_DUMP_TEMPLATE: &str = include_str!("../../prompts/brain_dump.md");

/// Placeholder in [`BRAIN_DUMP_TEMPLATE`] replaced by the user's text.
const BRAIN_DUMP_PLACEHOLDER: &str = "{brain_dump}";

/// Role description sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are an ADHD-friendly task organizer and calendar assistant. \
Analyze brain dumps, organize tasks, set priorities, suggest calendar events with specific times, \
and provide encouragement. Always respond in valid JSON format with no markdown.";

/// A system + user prompt pair ready for a chat-completions call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Build the analysis prompt for a brain dump.
#[must_use]
pub fn build_prompt(brain_dump: &str) -> Prompt {
    Prompt {
        system: SYSTEM_PROMPT.to_owned(),
        user: BRAIN_DUMP_TEMPLATE.replacen(BRAIN_DUMP_PLACEHOLDER, brain_dump, 1),
    }
}
