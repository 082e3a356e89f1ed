//! Read-only context for an external assistant.
//!
//! The assistant itself lives outside this crate. All it receives is this
//! serializable bundle of derived values.

use serde::Serialize;

use crate::achievements::{evaluate, score_with, ScoreBreakdown};
use crate::model::AppData;
use crate::stats::{completion_stats, habit_stats, trend, CompletionFilter, TrendReport};
use crate::time::DayContext;

/// Window lengths used when building a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindows {
    pub trend_days: u32,
    pub consistency_days: u32,
}

impl Default for ContextWindows {
    fn default() -> Self {
        Self {
            trend_days: crate::stats::DEFAULT_TREND_DAYS,
            consistency_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStreakContext {
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub checked_in_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantContext {
    pub today: String,
    pub score: ScoreBreakdown,
    /// Titles of unlocked achievements, registry order.
    pub unlocked_achievements: Vec<String>,
    pub achievements_total: usize,
    pub completion_rate: u32,
    pub open_tasks: u64,
    pub habits: Vec<HabitStreakContext>,
    pub trend: TrendReport,
}

impl AssistantContext {
    pub fn build(data: &AppData, ctx: &DayContext, windows: ContextWindows) -> Self {
        let statuses = evaluate(data, ctx.offset);
        let score = score_with(data, ctx.offset, &statuses);
        let completion = completion_stats(&data.tasks, CompletionFilter::default());

        let habits = habit_stats(&data.habits, ctx, windows.consistency_days)
            .into_iter()
            .map(|s| HabitStreakContext {
                name: s.name,
                current_streak: s.current_streak,
                longest_streak: s.longest_streak,
                checked_in_today: s.checked_in_today,
            })
            .collect();

        Self {
            today: ctx.today_key(),
            score,
            unlocked_achievements: statuses
                .iter()
                .filter(|s| s.unlocked)
                .map(|s| s.title.to_string())
                .collect(),
            achievements_total: statuses.len(),
            completion_rate: completion.rate,
            open_tasks: completion.eligible - completion.completed,
            habits,
            trend: trend(data, ctx, windows.trend_days),
        }
    }

    /// Pretty JSON, ready to hand to the assistant.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
