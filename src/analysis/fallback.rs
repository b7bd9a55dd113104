//! Degraded-mode analysis built from the user's text alone.
//!
//! Used whenever the provider call fails or its reply cannot be recovered as
//! JSON. Building a fallback never fails.

use chrono::{Local, NaiveDate};
use tracing::info;

use super::types::{AnalysisResult, CalendarEvent, DEFAULT_MINUTES, DEFAULT_SCORE};

/// Characters of the brain dump kept in the fallback event title.
pub const TITLE_PREFIX_CHARS: usize = 30;

/// Notes attached to the fallback calendar event.
pub const FALLBACK_EVENT_NOTES: &str = "AI processing unavailable - review this manually";

/// Time of day suggested for the fallback calendar event.
pub const FALLBACK_EVENT_TIME: &str = "14:00";

/// Build the fallback analysis dated today (local time).
#[must_use]
pub fn fallback_analysis(brain_dump: &str) -> AnalysisResult {
    info!("using fallback analysis");
    fallback_analysis_on(brain_dump, Local::now().date_naive())
}

/// Build the fallback analysis with an explicit event date.
#[must_use]
pub fn fallback_analysis_on(brain_dump: &str, date: NaiveDate) -> AnalysisResult {
    let event = CalendarEvent {
        title: format!("Organize: {}", title_excerpt(brain_dump)),
        date: date.format("%Y-%m-%d").to_string(),
        time: FALLBACK_EVENT_TIME.to_owned(),
        duration: DEFAULT_MINUTES,
        notes: FALLBACK_EVENT_NOTES.to_owned(),
        ..CalendarEvent::default()
    };

    AnalysisResult {
        urgency: DEFAULT_SCORE,
        priority: DEFAULT_SCORE,
        advice: "Let's break this down step by step - you've got this!".to_owned(),
        motivation: "Great job taking action! Planning is half the battle 🌟".to_owned(),
        organized_notes: vec![brain_dump.to_owned()],
        quick_win: "Start with just 5 minutes to get momentum going".to_owned(),
        estimated_time: DEFAULT_MINUTES,
        energy_level: "medium".to_owned(),
        celebration: "Fantastic! You're making progress! 🎉".to_owned(),
        next_steps: vec![
            "Read through your task carefully".to_owned(),
            "Identify the very first action step".to_owned(),
            "Set a 10-minute timer and start".to_owned(),
        ],
        dopamine_score: DEFAULT_SCORE,
        calendar_events: vec![event],
        time_management_tips: vec![
            "Try the Pomodoro technique: 25 min work, 5 min break".to_owned(),
            "Start with the easiest part to build confidence".to_owned(),
            "Celebrate small wins along the way".to_owned(),
        ],
    }
}

/// First [`TITLE_PREFIX_CHARS`] characters, with `...` when anything was cut.
fn title_excerpt(text: &str) -> String {
    match text.char_indices().nth(TITLE_PREFIX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn fixed_fields() {
        let result = fallback_analysis_on("abc", day());
        assert_eq!(result.urgency, 3);
        assert_eq!(result.priority, 3);
        assert_eq!(result.dopamine_score, 3);
        assert_eq!(result.estimated_time, 30);
        assert_eq!(result.energy_level, "medium");
        assert_eq!(result.organized_notes, vec!["abc".to_owned()]);
        assert_eq!(result.next_steps.len(), 3);
        assert_eq!(result.time_management_tips.len(), 3);
        assert!(!result.advice.is_empty());
        assert!(!result.motivation.is_empty());
    }

    #[test]
    fn single_event_for_the_given_day() {
        let result = fallback_analysis_on("abc", day());
        assert_eq!(result.calendar_events.len(), 1);
        let event = &result.calendar_events[0];
        assert_eq!(event.title, "Organize: abc");
        assert_eq!(event.date, "2026-03-14");
        assert_eq!(event.time, "14:00");
        assert_eq!(event.duration, 30);
        assert_eq!(event.priority, "medium");
        assert_eq!(event.notes, FALLBACK_EVENT_NOTES);
        assert_eq!(event.color, "blue");
    }

    #[test]
    fn title_truncated_after_thirty_chars() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let result = fallback_analysis_on(text, day());
        assert_eq!(
            result.calendar_events[0].title,
            "Organize: abcdefghijklmnopqrstuvwxyz0123..."
        );
    }

    #[test]
    fn title_not_truncated_at_exactly_thirty_chars() {
        let text = "a".repeat(30);
        let result = fallback_analysis_on(&text, day());
        assert_eq!(result.calendar_events[0].title, format!("Organize: {text}"));
    }

    #[test]
    fn title_truncation_respects_char_boundaries() {
        let text = "é".repeat(31);
        let result = fallback_analysis_on(&text, day());
        assert_eq!(
            result.calendar_events[0].title,
            format!("Organize: {}...", "é".repeat(30))
        );
    }

    #[test]
    fn empty_input_still_complete() {
        let result = fallback_analysis_on("", day());
        assert_eq!(result.organized_notes, vec![String::new()]);
        assert_eq!(result.calendar_events[0].title, "Organize: ");
    }

    #[test]
    fn stable_within_a_day() {
        let first = fallback_analysis("abc");
        let second = fallback_analysis("abc");
        // Only the event date can vary, and only across midnight.
        if first.calendar_events[0].date == second.calendar_events[0].date {
            assert_eq!(first, second);
        }
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(
            first.calendar_events[0].date == today || second.calendar_events[0].date == today
        );
    }
}
