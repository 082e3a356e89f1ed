//! Task record as written by the data store.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::de;
use crate::time::parse_date_key;

/// Task priority. Unknown or missing values read as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 4] = [Priority::High, Priority::Medium, Priority::Low, Priority::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::None => "None",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::None,
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw.as_str().map(Priority::parse).unwrap_or_default())
    }
}

/// Checklist item nested under a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subtask {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::null_default")]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub list_id: String,
    pub priority: Priority,
    #[serde(deserialize_with = "de::null_default")]
    pub completed: bool,
    #[serde(deserialize_with = "de::opt_instant")]
    pub completion_date: Option<DateTime<Utc>>,
    /// `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM[:SS]`, or RFC 3339.
    #[serde(deserialize_with = "de::opt_string")]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub trashed: bool,
    #[serde(deserialize_with = "de::null_default")]
    pub wont_do: bool,
    /// Grouping header rather than a real task.
    #[serde(deserialize_with = "de::null_default")]
    pub is_section: bool,
    #[serde(deserialize_with = "de::null_default")]
    pub subtasks: Vec<Subtask>,
    #[serde(deserialize_with = "de::null_default")]
    pub tags: BTreeSet<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Not trashed, not won't-do, and not a section header.
    pub fn is_active(&self) -> bool {
        !self.is_section && !self.trashed && !self.wont_do
    }

    /// Completed real task (sections never count).
    pub fn is_done(&self) -> bool {
        self.completed && !self.is_section
    }

    /// Local calendar day the task was completed on.
    pub fn completion_day(&self, offset: FixedOffset) -> Option<NaiveDate> {
        if !self.is_done() {
            return None;
        }
        self.completion_date
            .map(|at| at.with_timezone(&offset).date_naive())
    }

    /// Latest instant that still counts as "on time".
    ///
    /// A date-only due date runs to the end of that local day.
    pub fn due_deadline(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let raw = self.due_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(day) = parse_date_key(raw) {
            let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
            return offset.from_local_datetime(&day.and_time(end_of_day)).single();
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&offset));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|ndt| offset.from_local_datetime(&ndt).single())
    }

    /// Completed on or before its due date/time.
    pub fn completed_on_time(&self, offset: FixedOffset) -> bool {
        if !self.is_done() {
            return false;
        }
        match (self.completion_date, self.due_deadline(offset)) {
            (Some(done), Some(deadline)) => done <= deadline.with_timezone(&Utc),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn done_at(iso: &str, due: Option<&str>) -> Task {
        Task {
            completed: true,
            completion_date: Some(DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc)),
            due_date: due.map(str::to_string),
            ..Task::new("t1", "Write report")
        }
    }

    #[test]
    fn test_priority_is_lenient() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"priority": "High"}, {"priority": "urgent"}, {"priority": null}, {}]"#,
        )
        .unwrap();
        let priorities: Vec<_> = tasks.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::None, Priority::None, Priority::None]
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let task: Task = serde_json::from_str(r#"{"id": 17, "title": "x", "tags": null}"#).unwrap();
        assert_eq!(task.id, "17");
        assert!(!task.completed);
        assert!(task.tags.is_empty());
        assert!(task.subtasks.is_empty());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_camel_case_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a","listId":"inbox","wontDo":true,"isSection":false,
                "completionDate":"2024-08-04T10:00:00Z","dueDate":"2024-08-04"}"#,
        )
        .unwrap();
        assert_eq!(task.list_id, "inbox");
        assert!(task.wont_do);
        assert!(!task.is_active());
        assert_eq!(task.due_date.as_deref(), Some("2024-08-04"));
    }

    #[test]
    fn test_date_only_due_runs_to_end_of_day() {
        assert!(done_at("2024-08-04T23:59:00Z", Some("2024-08-04")).completed_on_time(utc()));
        assert!(!done_at("2024-08-05T00:00:01Z", Some("2024-08-04")).completed_on_time(utc()));
    }

    #[test]
    fn test_due_date_time_is_exact() {
        let task = done_at("2024-08-04T10:00:00Z", Some("2024-08-04T10:00"));
        assert!(task.completed_on_time(utc()));
        let late = done_at("2024-08-04T10:01:00Z", Some("2024-08-04T10:00"));
        assert!(!late.completed_on_time(utc()));
        let rfc = done_at("2024-08-04T10:01:00Z", Some("2024-08-04T12:00:00+02:00"));
        assert!(!rfc.completed_on_time(utc()));
    }

    #[test]
    fn test_due_date_respects_offset() {
        // 23:30 UTC is already the next day at +02:00
        let task = done_at("2024-08-04T23:30:00Z", Some("2024-08-04"));
        assert!(task.completed_on_time(utc()));
        assert!(!task.completed_on_time(FixedOffset::east_opt(2 * 3600).unwrap()));
    }

    #[test]
    fn test_not_on_time_without_due_or_completion() {
        assert!(!done_at("2024-08-04T10:00:00Z", None).completed_on_time(utc()));
        assert!(!done_at("2024-08-04T10:00:00Z", Some("garbage")).completed_on_time(utc()));
        let open = Task {
            due_date: Some("2024-08-04".into()),
            ..Task::new("t", "open")
        };
        assert!(!open.completed_on_time(utc()));
    }

    #[test]
    fn test_sections_never_count_as_done() {
        let mut section = done_at("2024-08-04T10:00:00Z", Some("2024-08-04"));
        section.is_section = true;
        assert!(!section.is_done());
        assert!(section.completion_day(utc()).is_none());
        assert!(!section.completed_on_time(utc()));
    }
}
