//! Group-by distributions over tasks.
//!
//! Only active tasks are counted (no sections, trashed or won't-do), and
//! groups with nothing in them are left out of the result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::KeyValue;
use crate::model::{Priority, Task};

/// Which active tasks a distribution counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskScope {
    #[default]
    All,
    Completed,
    Open,
}

impl std::str::FromStr for TaskScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskScope::All),
            "completed" | "done" => Ok(TaskScope::Completed),
            "open" => Ok(TaskScope::Open),
            other => Err(format!("unknown task scope: {other}")),
        }
    }
}

impl TaskScope {
    fn admits(&self, task: &Task) -> bool {
        task.is_active()
            && match self {
                TaskScope::All => true,
                TaskScope::Completed => task.completed,
                TaskScope::Open => !task.completed,
            }
    }
}

/// Task count per list id, largest first (ties by list id).
pub fn tasks_by_list(tasks: &[Task], scope: TaskScope) -> Vec<KeyValue> {
    ranked(
        tasks
            .iter()
            .filter(|t| scope.admits(t))
            .map(|t| t.list_id.as_str()),
    )
}

/// Task count per priority, most urgent first. Empty priorities are omitted.
pub fn tasks_by_priority(tasks: &[Task], scope: TaskScope) -> Vec<KeyValue> {
    let mut counts = [0u64; Priority::ALL.len()];
    for task in tasks.iter().filter(|t| scope.admits(t)) {
        if let Some(idx) = Priority::ALL.iter().position(|p| *p == task.priority) {
            counts[idx] += 1;
        }
    }

    Priority::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(priority, count)| KeyValue::new(priority.as_str(), count))
        .collect()
}

/// Task count per tag, largest first. A task with several tags counts once per tag.
pub fn tasks_by_tag(tasks: &[Task], scope: TaskScope) -> Vec<KeyValue> {
    ranked(
        tasks
            .iter()
            .filter(|t| scope.admits(t))
            .flat_map(|t| t.tags.iter().map(String::as_str)),
    )
}

fn ranked<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<KeyValue> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut out: Vec<KeyValue> = counts
        .into_iter()
        .map(|(key, count)| KeyValue::new(key, count))
        .collect();
    // stable sort keeps the BTreeMap key order for ties
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}
