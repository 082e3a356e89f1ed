//! Achievement evaluation.
//!
//! Evaluation runs in two passes. The first pass measures every
//! metric-based entry against a [`MetricSnapshot`]. The second pass resolves
//! entries that count other unlocks, reading only the frozen first-pass
//! result, so evaluation always terminates and never depends on registry
//! order.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::registry::{AchievementDef, Category, MetricSnapshot, Rule, REGISTRY};
use crate::model::AppData;

/// Progress towards an achievement goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: u64,
    pub goal: u64,
}

impl Progress {
    pub fn new(current: u64, goal: u64) -> Self {
        Self { current, goal }
    }

    pub fn is_unlocked(&self) -> bool {
        self.current >= self.goal
    }

    /// Completion percentage, capped at 100.
    pub fn percent(&self) -> u32 {
        if self.goal == 0 {
            return 100;
        }
        crate::stats::percent(self.current.min(self.goal), self.goal)
    }
}

/// An achievement together with its evaluated progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub description: String,
    pub icon: &'static str,
    pub xp_bonus: u32,
    pub progress: Progress,
    pub unlocked: bool,
}

impl AchievementStatus {
    fn new(def: &AchievementDef, progress: Progress) -> Self {
        Self {
            id: def.id,
            category: def.category,
            title: def.title,
            description: def.describe(),
            icon: def.icon,
            xp_bonus: def.xp_bonus,
            unlocked: progress.is_unlocked(),
            progress,
        }
    }
}

/// Evaluate the whole registry against a snapshot, in registry order.
pub fn evaluate(data: &AppData, offset: FixedOffset) -> Vec<AchievementStatus> {
    evaluate_snapshot(&MetricSnapshot::measure(data, offset))
}

/// Evaluate the registry against pre-measured metrics.
pub fn evaluate_snapshot(snapshot: &MetricSnapshot) -> Vec<AchievementStatus> {
    evaluate_defs(REGISTRY, snapshot)
}

pub(crate) fn evaluate_defs(defs: &[AchievementDef], snapshot: &MetricSnapshot) -> Vec<AchievementStatus> {
    // pass 1: metric rules only
    let first: Vec<Option<Progress>> = defs
        .iter()
        .map(|def| match def.rule {
            Rule::Metric { metric, goal } => Some(Progress::new(snapshot.get(metric), goal)),
            Rule::UnlockedOthers { .. } => None,
        })
        .collect();

    let unlocked_others = first
        .iter()
        .flatten()
        .filter(|p| p.is_unlocked())
        .count() as u64;

    // pass 2: self-referential rules against the frozen first pass
    let statuses: Vec<AchievementStatus> = defs
        .iter()
        .zip(first)
        .map(|(def, progress)| {
            let progress = progress.unwrap_or_else(|| Progress::new(unlocked_others, def.rule.goal()));
            AchievementStatus::new(def, progress)
        })
        .collect();

    tracing::debug!(
        total = statuses.len(),
        unlocked = statuses.iter().filter(|s| s.unlocked).count(),
        "evaluated achievements"
    );
    statuses
}

/// Unlocked entries only.
pub fn unlocked(statuses: &[AchievementStatus]) -> impl Iterator<Item = &AchievementStatus> {
    statuses.iter().filter(|s| s.unlocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::registry::Metric;
    use crate::model::{Habit, Task};
    use chrono::{Offset, Utc};

    fn def(id: &'static str, rule: Rule) -> AchievementDef {
        AchievementDef {
            id,
            category: Category::Special,
            title: id,
            description: "{goal}",
            icon: "",
            xp_bonus: 1,
            rule,
        }
    }

    #[test]
    fn test_progress() {
        assert!(Progress::new(3, 3).is_unlocked());
        assert!(!Progress::new(2, 3).is_unlocked());
        assert_eq!(Progress::new(1, 4).percent(), 25);
        assert_eq!(Progress::new(9, 4).percent(), 100);
        assert_eq!(Progress::new(0, 0).percent(), 100);
    }

    #[test]
    fn test_empty_data_unlocks_nothing() {
        let statuses = evaluate(&AppData::default(), Utc.fix());
        assert_eq!(statuses.len(), REGISTRY.len());
        assert_eq!(unlocked(&statuses).count(), 0);
        let ids: Vec<_> = statuses.iter().map(|s| s.id).collect();
        let registry_ids: Vec<_> = REGISTRY.iter().map(|d| d.id).collect();
        assert_eq!(ids, registry_ids);
    }

    #[test]
    fn test_first_steps_unlock() {
        let data = AppData::new(
            vec![Task {
                completed: true,
                ..Task::new("t", "t")
            }],
            vec![Habit::new("h", "h").with_check_ins(["2024-08-01"])],
            vec![],
        );
        let statuses = evaluate(&data, Utc.fix());
        let ids: Vec<_> = unlocked(&statuses).map(|s| s.id).collect();
        assert_eq!(ids, vec!["first_check_in", "first_task"]);
    }

    #[test]
    fn test_self_referential_excludes_itself_and_ignores_order() {
        let mut snapshot_defs = vec![
            def("all", Rule::UnlockedOthers { goal: 2 }),
            def("a", Rule::Metric { metric: Metric::CheckIns, goal: 0 }),
            def("b", Rule::Metric { metric: Metric::Sessions, goal: 0 }),
            def("c", Rule::Metric { metric: Metric::Sessions, goal: 5 }),
        ];
        let snapshot = MetricSnapshot::default();

        let statuses = evaluate_defs(&snapshot_defs, &snapshot);
        let all = statuses.iter().find(|s| s.id == "all").unwrap();
        assert_eq!(all.progress, Progress::new(2, 2));
        assert!(all.unlocked);

        snapshot_defs.reverse();
        let reversed = evaluate_defs(&snapshot_defs, &snapshot);
        let all = reversed.iter().find(|s| s.id == "all").unwrap();
        assert_eq!(all.progress, Progress::new(2, 2));
    }

    #[test]
    fn test_self_referential_never_counts_each_other() {
        let defs = [
            def("x", Rule::UnlockedOthers { goal: 0 }),
            def("y", Rule::UnlockedOthers { goal: 1 }),
        ];
        let statuses = evaluate_defs(&defs, &MetricSnapshot::default());
        assert!(statuses[0].unlocked);
        assert_eq!(statuses[1].progress.current, 0);
        assert!(!statuses[1].unlocked);
    }
}
