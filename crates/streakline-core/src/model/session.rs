//! Completed pomodoro focus session.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::de;
use crate::time::millis_to_local;

const MILLIS_PER_MINUTE: i64 = 60_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSession {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "de::millis")]
    pub start_time: i64,
    /// Epoch milliseconds; expected to be after `start_time`.
    #[serde(deserialize_with = "de::millis")]
    pub end_time: i64,
    #[serde(deserialize_with = "de::opt_string")]
    pub task_id: Option<String>,
    #[serde(deserialize_with = "de::string")]
    pub task_name: String,
    #[serde(deserialize_with = "de::string")]
    pub note: String,
}

impl PomodoroSession {
    pub fn new(id: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            ..Self::default()
        }
    }

    /// Focus time in milliseconds. Inverted or empty ranges count as zero.
    pub fn duration_millis(&self) -> i64 {
        self.end_time.saturating_sub(self.start_time).max(0)
    }

    /// Whole minutes of focus, rounded down.
    pub fn duration_minutes(&self) -> i64 {
        self.duration_millis() / MILLIS_PER_MINUTE
    }

    /// Start time in the given offset; `None` for out-of-range timestamps.
    pub fn local_start(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        millis_to_local(self.start_time, offset)
    }
}

/// Convert a millisecond total to minutes, rounding half up.
pub fn millis_to_rounded_minutes(millis: i64) -> u64 {
    let millis = u64::try_from(millis.max(0)).unwrap_or(0);
    (millis + (MILLIS_PER_MINUTE as u64) / 2) / MILLIS_PER_MINUTE as u64
}
