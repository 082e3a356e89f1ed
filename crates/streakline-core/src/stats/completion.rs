//! Task completion rate.

use serde::{Deserialize, Serialize};

use super::percent;
use crate::model::Task;

/// Which non-section tasks count toward the denominator.
///
/// The default excludes trashed and won't-do tasks. Section headers are
/// never eligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionFilter {
    pub include_trashed: bool,
    pub include_wont_do: bool,
}

impl CompletionFilter {
    /// Count every non-section task.
    pub fn everything() -> Self {
        Self {
            include_trashed: true,
            include_wont_do: true,
        }
    }

    pub fn admits(&self, task: &Task) -> bool {
        !task.is_section
            && (self.include_trashed || !task.trashed)
            && (self.include_wont_do || !task.wont_do)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub eligible: u64,
    pub completed: u64,
    /// Whole percent, 0-100.
    pub rate: u32,
}

pub fn completion_stats(tasks: &[Task], filter: CompletionFilter) -> CompletionStats {
    let (eligible, completed) = tasks
        .iter()
        .filter(|t| filter.admits(t))
        .fold((0u64, 0u64), |(eligible, completed), t| {
            (eligible + 1, completed + u64::from(t.completed))
        });

    CompletionStats {
        eligible,
        completed,
        rate: percent(completed, eligible),
    }
}

/// Completed share of eligible tasks as a rounded percentage.
pub fn completion_rate(tasks: &[Task], filter: CompletionFilter) -> u32 {
    completion_stats(tasks, filter).rate
}
