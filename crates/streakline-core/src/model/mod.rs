//! Data contracts shared with the storage and presentation collaborators.
//!
//! Records are created and mutated elsewhere; the analytics engine only ever
//! sees them through an immutable [`AppData`] snapshot.

pub mod de;
mod habit;
mod session;
mod task;

pub use habit::{Habit, HabitPeriod};
pub use session::{millis_to_rounded_minutes, PomodoroSession};
pub use task::{Priority, Subtask, Task};

use serde::{Deserialize, Serialize};

/// Read-only snapshot passed into every analytics function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    #[serde(deserialize_with = "de::null_default")]
    pub tasks: Vec<Task>,
    #[serde(deserialize_with = "de::null_default")]
    pub habits: Vec<Habit>,
    #[serde(rename = "pomodoroSessions", alias = "sessions", deserialize_with = "de::null_default")]
    pub sessions: Vec<PomodoroSession>,
}

impl AppData {
    pub fn new(tasks: Vec<Task>, habits: Vec<Habit>, sessions: Vec<PomodoroSession>) -> Self {
        Self {
            tasks,
            habits,
            sessions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.habits.is_empty() && self.sessions.is_empty()
    }

    /// Completed tasks, section headers excluded.
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_done())
    }

    /// Distinct check-in days summed across habits (not deduplicated
    /// between habits). Malformed keys never count.
    pub fn total_check_ins(&self) -> usize {
        self.habits.iter().map(|h| h.check_in_dates().len()).sum()
    }

    /// Total focus time; inverted sessions contribute nothing.
    pub fn total_focus_millis(&self) -> i64 {
        self.sessions
            .iter()
            .fold(0i64, |acc, s| acc.saturating_add(s.duration_millis()))
    }

    /// Total focus time in whole minutes, rounded down.
    pub fn total_focus_minutes(&self) -> u64 {
        u64::try_from(self.total_focus_millis() / 60_000).unwrap_or(0)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }
}
