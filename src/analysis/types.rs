//! Result types produced by brain-dump analysis.
//!
//! The serialized field names are the wire contract of `POST /api/brain-dump`
//! and must not change.

use serde::{Deserialize, Serialize};

/// Lowest accepted score for `urgency`, `priority` and `dopamineScore`.
pub const MIN_SCORE: i64 = 1;
/// Highest accepted score.
pub const MAX_SCORE: i64 = 5;
/// Score used when the model gives none.
pub const DEFAULT_SCORE: i64 = 3;
/// Minutes used for `estimatedTime` and event `duration` when absent.
pub const DEFAULT_MINUTES: u32 = 30;

pub const DEFAULT_ADVICE: &str = "Break this into smaller, manageable steps";
pub const DEFAULT_MOTIVATION: &str = "You've got this! Every step forward counts 💪";
pub const DEFAULT_QUICK_WIN: &str = "Start with the easiest task to build momentum";
pub const DEFAULT_ENERGY_LEVEL: &str = "medium";
pub const DEFAULT_CELEBRATION: &str = "Amazing work! You're making real progress! 🎉";
pub const DEFAULT_NEXT_STEP: &str = "Take the first small step";
pub const DEFAULT_TIP: &str = "Take breaks every 25 minutes";

pub const DEFAULT_EVENT_TITLE: &str = "Task";
pub const DEFAULT_EVENT_PRIORITY: &str = "medium";
pub const DEFAULT_EVENT_COLOR: &str = "blue";

/// Normalized analysis of one brain dump.
///
/// Every field is always populated: list fields other than
/// `calendar_events` are never empty and scores stay within
/// [`MIN_SCORE`]..=[`MAX_SCORE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 1 = can wait weeks, 5 = do today.
    pub urgency: i64,
    /// 1 = nice to have, 5 = absolutely critical.
    pub priority: i64,
    pub advice: String,
    pub motivation: String,
    /// Tasks restated as a clean list.
    pub organized_notes: Vec<String>,
    /// The easiest task to start with.
    pub quick_win: String,
    /// Total estimated effort in minutes.
    pub estimated_time: u32,
    /// Nominally `low`, `medium` or `high`; the model's value is kept verbatim.
    pub energy_level: String,
    pub celebration: String,
    pub next_steps: Vec<String>,
    /// How rewarding finishing will feel, 1 to 5.
    pub dopamine_score: i64,
    pub calendar_events: Vec<CalendarEvent>,
    pub time_management_tips: Vec<String>,
}

/// A suggested calendar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    /// ISO-8601 date (`YYYY-MM-DD`), or empty when unknown.
    pub date: String,
    /// `HH:MM`, or empty when unknown.
    pub time: String,
    /// Minutes.
    pub duration: u32,
    /// Free-form label such as `high` or `urgent`.
    pub priority: String,
    pub notes: String,
    /// Free-form display color such as `blue` or `orange`.
    pub color: String,
}

impl Default for CalendarEvent {
    fn default() -> Self {
        Self {
            title: DEFAULT_EVENT_TITLE.to_owned(),
            date: String::new(),
            time: String::new(),
            duration: DEFAULT_MINUTES,
            priority: DEFAULT_EVENT_PRIORITY.to_owned(),
            notes: String::new(),
            color: DEFAULT_EVENT_COLOR.to_owned(),
        }
    }
}

/// Clamp a score into the accepted 1 to 5 range.
#[must_use]
pub fn clamp_score(score: i64) -> i64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn calendar_event_defaults() {
        let event = CalendarEvent::default();
        assert_eq!(event.title, "Task");
        assert_eq!(event.duration, 30);
        assert_eq!(event.priority, "medium");
        assert_eq!(event.color, "blue");
        assert!(event.date.is_empty());
        assert!(event.time.is_empty());
        assert!(event.notes.is_empty());
    }

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-4), 1);
        assert_eq!(clamp_score(0), 1);
        assert_eq!(clamp_score(3), 3);
        assert_eq!(clamp_score(9), 5);
    }

    #[test]
    fn result_serializes_with_wire_field_names() {
        let result = AnalysisResult {
            urgency: 4,
            priority: 2,
            advice: "a".into(),
            motivation: "m".into(),
            organized_notes: vec!["n".into()],
            quick_win: "q".into(),
            estimated_time: 45,
            energy_level: "high".into(),
            celebration: "c".into(),
            next_steps: vec!["s".into()],
            dopamine_score: 5,
            calendar_events: vec![CalendarEvent::default()],
            time_management_tips: vec!["t".into()],
        };
        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "urgency",
            "priority",
            "advice",
            "motivation",
            "organizedNotes",
            "quickWin",
            "estimatedTime",
            "energyLevel",
            "celebration",
            "nextSteps",
            "dopamineScore",
            "calendarEvents",
            "timeManagementTips",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object.len(), 13);

        let event = value["calendarEvents"][0].as_object().unwrap();
        for key in ["title", "date", "time", "duration", "priority", "notes", "color"] {
            assert!(event.contains_key(key), "missing event field {key}");
        }
        assert_eq!(event.len(), 7);
    }
}
