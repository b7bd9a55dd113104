//! Tolerant parsing of the model's analysis reply.
//!
//! Models wrap JSON in markdown fences, prepend chatter, leave trailing
//! commas and break lines inside strings. Recovery runs in stages:
//!
//! 1. strip ```` ```json ```` / ```` ``` ```` markers,
//! 2. cut the span from the first `{` to the last `}`,
//! 3. strict parse, then one repair pass and a second parse,
//! 4. per-field extraction where each field falls back to its own default.
//!
//! Only stages 2 and 3 can fail; [`parse_analysis_response`] then answers
//! with [`fallback_analysis`] instead.

use serde_json::Value;
use tracing::{debug, warn};

use super::fallback::fallback_analysis;
use super::types::{
    AnalysisResult, CalendarEvent, DEFAULT_ADVICE, DEFAULT_CELEBRATION, DEFAULT_ENERGY_LEVEL,
    DEFAULT_EVENT_COLOR, DEFAULT_EVENT_PRIORITY, DEFAULT_EVENT_TITLE, DEFAULT_MINUTES,
    DEFAULT_MOTIVATION, DEFAULT_NEXT_STEP, DEFAULT_QUICK_WIN, DEFAULT_SCORE, DEFAULT_TIP,
    clamp_score,
};

/// Why a reply could not be recovered as a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    /// No `{ ... }` span in the reply.
    #[error("no JSON object in model reply")]
    NoObject,

    /// The span did not parse, even after repair.
    #[error("unparseable JSON after repair: {0}")]
    Syntax(#[from] serde_json::Error),
}

/// Parse a model reply, falling back to [`fallback_analysis`] when no JSON
/// object can be recovered.
#[must_use]
pub fn parse_analysis_response(raw: &str, brain_dump: &str) -> AnalysisResult {
    match recover_analysis(raw, brain_dump) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, reply_len = raw.len(), "model reply unusable");
            fallback_analysis(brain_dump)
        }
    }
}

/// Recover an analysis from a model reply without falling back.
///
/// # Errors
///
/// Returns the stage at which recovery gave up.
pub fn recover_analysis(raw: &str, brain_dump: &str) -> Result<AnalysisResult, RecoveryError> {
    let root = recover_json_object(raw)?;
    let result = extract_analysis(&root, brain_dump);
    debug!(
        events = result.calendar_events.len(),
        "extracted analysis from model reply"
    );
    Ok(result)
}

/// Run the textual recovery stages and return the parsed object.
fn recover_json_object(raw: &str) -> Result<Value, RecoveryError> {
    let cleaned = strip_code_fences(raw);
    let span = object_span(&cleaned).ok_or(RecoveryError::NoObject)?;

    // The span starts with `{` and ends with `}`, so any value that parses is an object.
    let root = match serde_json::from_str::<Value>(span) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "strict parse failed, attempting repair");
            serde_json::from_str::<Value>(&repair_json(span))?
        }
    };
    Ok(root)
}

/// Remove markdown fence markers wherever they appear.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_owned()
}

/// Slice from the first `{` to the last `}` inclusive.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Best-effort fix-ups for near-valid JSON.
///
/// Inside strings, raw line breaks and `\n` / `\r` escapes collapse into a
/// single space. Outside strings, a comma directly followed (ignoring
/// whitespace) by `}` or `]` is dropped.
fn repair_json(span: &str) -> String {
    let mut out = String::with_capacity(span.len());
    let mut chars = span.chars().peekable();
    let mut in_string = false;
    let mut after_break = false;

    while let Some(c) = chars.next() {
        if in_string {
            let is_break = match c {
                '\n' | '\r' => true,
                '\\' if matches!(chars.peek(), Some('n' | 'r')) => {
                    chars.next();
                    true
                }
                _ => false,
            };
            if is_break {
                if !after_break {
                    out.push(' ');
                }
                after_break = true;
                continue;
            }
            after_break = false;
            match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    in_string = true;
                    after_break = false;
                    out.push(c);
                }
                ',' => {
                    let next = chars.clone().find(|n| !n.is_whitespace());
                    if !matches!(next, Some('}' | ']')) {
                        out.push(c);
                    }
                }
                _ => out.push(c),
            }
        }
    }

    out
}

// ── Field extraction ──────────────────────────────────────────

/// Read `node[key]` through `extract`, or `default` when the key is missing
/// or `extract` rejects the value.
fn get_or_default<T>(
    node: &Value,
    key: &str,
    default: T,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> T {
    node.get(key).and_then(extract).unwrap_or(default)
}

/// Integers, or finite floats truncated toward zero.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn score(value: &Value) -> Option<i64> {
    whole_number(value).map(clamp_score)
}

/// Non-negative minute counts; negatives are rejected.
fn minutes(value: &Value) -> Option<u32> {
    whole_number(value).and_then(|n| u32::try_from(n).ok())
}

/// Any string, kept verbatim (blank included).
fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// For fields that must never be blank.
fn non_blank_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// String elements of an array; `None` when none survive.
fn string_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect();
    (!items.is_empty()).then_some(items)
}

fn extract_analysis(root: &Value, brain_dump: &str) -> AnalysisResult {
    AnalysisResult {
        urgency: get_or_default(root, "urgency", DEFAULT_SCORE, score),
        priority: get_or_default(root, "priority", DEFAULT_SCORE, score),
        advice: get_or_default(root, "advice", DEFAULT_ADVICE.to_owned(), non_blank_text),
        motivation: get_or_default(
            root,
            "motivation",
            DEFAULT_MOTIVATION.to_owned(),
            non_blank_text,
        ),
        organized_notes: get_or_default(
            root,
            "organizedNotes",
            vec![brain_dump.to_owned()],
            string_list,
        ),
        quick_win: get_or_default(root, "quickWin", DEFAULT_QUICK_WIN.to_owned(), text),
        estimated_time: get_or_default(root, "estimatedTime", DEFAULT_MINUTES, minutes),
        energy_level: get_or_default(
            root,
            "energyLevel",
            DEFAULT_ENERGY_LEVEL.to_owned(),
            text,
        ),
        celebration: get_or_default(
            root,
            "celebration",
            DEFAULT_CELEBRATION.to_owned(),
            text,
        ),
        next_steps: get_or_default(
            root,
            "nextSteps",
            vec![DEFAULT_NEXT_STEP.to_owned()],
            string_list,
        ),
        dopamine_score: get_or_default(root, "dopamineScore", DEFAULT_SCORE, score),
        calendar_events: get_or_default(root, "calendarEvents", Vec::new(), |v| {
            v.as_array().map(|events| extract_events(events))
        }),
        time_management_tips: get_or_default(
            root,
            "timeManagementTips",
            vec![DEFAULT_TIP.to_owned()],
            string_list,
        ),
    }
}

/// Each object becomes an event; anything else in the array is skipped.
fn extract_events(events: &[Value]) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| event.is_object())
        .map(extract_event)
        .collect()
}

fn extract_event(event: &Value) -> CalendarEvent {
    CalendarEvent {
        title: get_or_default(event, "title", DEFAULT_EVENT_TITLE.to_owned(), text),
        date: get_or_default(event, "date", String::new(), text),
        time: get_or_default(event, "time", String::new(), text),
        duration: get_or_default(event, "duration", DEFAULT_MINUTES, minutes),
        priority: get_or_default(
            event,
            "priority",
            DEFAULT_EVENT_PRIORITY.to_owned(),
            text,
        ),
        notes: get_or_default(event, "notes", String::new(), text),
        color: get_or_default(event, "color", DEFAULT_EVENT_COLOR.to_owned(), text),
    }
}
