//! XP score.
//!
//! The score is recomputed from scratch for a snapshot. It has no state and
//! never reads the wall clock; only the UTC offset affects it, through
//! on-time task detection and achievement metrics.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::evaluate::{evaluate, AchievementStatus};
use crate::model::AppData;

pub const XP_PER_TASK: u64 = 10;
pub const XP_ON_TIME_BONUS: u64 = 5;
pub const XP_PER_FOCUS_BLOCK: u64 = 20;
pub const FOCUS_BLOCK_MINUTES: u64 = 25;
pub const XP_PER_CHECK_IN: u64 = 5;

/// XP split by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tasks_completed: u64,
    pub on_time_tasks: u64,
    pub focus_minutes: u64,
    pub check_ins: u64,
    pub achievements_unlocked: u64,

    pub task_xp: u64,
    pub on_time_xp: u64,
    pub focus_xp: u64,
    pub habit_xp: u64,
    pub achievement_xp: u64,
    pub total: u64,
}

/// Score a snapshot, evaluating achievements along the way.
pub fn compute_score(data: &AppData, offset: FixedOffset) -> ScoreBreakdown {
    score_with(data, offset, &evaluate(data, offset))
}

/// Score a snapshot against already-evaluated achievements.
pub fn score_with(data: &AppData, offset: FixedOffset, statuses: &[AchievementStatus]) -> ScoreBreakdown {
    // trashed and won't-do completions earn nothing
    let scored: Vec<_> = data
        .tasks
        .iter()
        .filter(|t| t.completed && t.is_active())
        .collect();
    let tasks_completed = scored.len() as u64;
    let on_time_tasks = scored.iter().filter(|t| t.completed_on_time(offset)).count() as u64;
    let focus_minutes = data.total_focus_minutes();
    let check_ins = data.total_check_ins() as u64;

    let unlocked: Vec<_> = statuses.iter().filter(|s| s.unlocked).collect();

    let task_xp = tasks_completed * XP_PER_TASK;
    let on_time_xp = on_time_tasks * XP_ON_TIME_BONUS;
    let focus_xp = (focus_minutes / FOCUS_BLOCK_MINUTES) * XP_PER_FOCUS_BLOCK;
    let habit_xp = check_ins * XP_PER_CHECK_IN;
    let achievement_xp: u64 = unlocked.iter().map(|s| u64::from(s.xp_bonus)).sum();

    ScoreBreakdown {
        tasks_completed,
        on_time_tasks,
        focus_minutes,
        check_ins,
        achievements_unlocked: unlocked.len() as u64,
        task_xp,
        on_time_xp,
        focus_xp,
        habit_xp,
        achievement_xp,
        total: task_xp + on_time_xp + focus_xp + habit_xp + achievement_xp,
    }
}
