//! Cross-entity activity: which days had anything happen, and the headline
//! totals shown on a dashboard.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{completion_stats, CompletionFilter};
use crate::model::{millis_to_rounded_minutes, AppData};
use crate::streak::{current_streak_of_dates, longest_streak_of_dates, StreakSummary};
use crate::time::{millis_to_local, DayContext};

/// Days with at least one completed task, check-in, or session start.
///
/// Only the offset matters here; the result does not depend on "today".
pub fn activity_days(data: &AppData, offset: FixedOffset) -> BTreeSet<NaiveDate> {
    let tasks = data.tasks.iter().filter_map(|t| t.completion_day(offset));
    let check_ins = data.habits.iter().flat_map(|h| h.check_in_dates());
    let sessions = data
        .sessions
        .iter()
        .filter_map(|s| millis_to_local(s.start_time, offset).map(|dt| dt.date_naive()));
    tasks.chain(check_ins).chain(sessions).collect()
}

/// Streak over days with any activity at all.
pub fn activity_streak(data: &AppData, ctx: &DayContext) -> StreakSummary {
    let days = activity_days(data, ctx.offset);
    StreakSummary {
        current: current_streak_of_dates(&days, ctx.today),
        longest: longest_streak_of_dates(&days),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub date_key: String,
    pub tasks_completed: u64,
    pub focus_minutes: u64,
    pub sessions: u64,
    pub habits_checked_in: u64,
    pub habits_total: u64,
}

/// Headline totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub tasks_eligible: u64,
    pub tasks_completed: u64,
    pub completion_rate: u32,
    pub focus_minutes: u64,
    pub sessions: u64,
    pub check_ins: u64,
    pub habits: u64,
    pub active_days: u64,
    pub activity_streak: StreakSummary,
    pub today: TodaySummary,
}

pub fn summarize(data: &AppData, ctx: &DayContext) -> Summary {
    let completion = completion_stats(&data.tasks, CompletionFilter::default());
    let days = activity_days(data, ctx.offset);

    let today_millis = data
        .sessions
        .iter()
        .filter(|s| ctx.date_of_millis(s.start_time) == Some(ctx.today))
        .fold((0i64, 0u64), |(ms, n), s| {
            (ms.saturating_add(s.duration_millis()), n + 1)
        });

    let today = TodaySummary {
        date_key: ctx.today_key(),
        tasks_completed: data
            .tasks
            .iter()
            .filter(|t| t.completion_day(ctx.offset) == Some(ctx.today))
            .count() as u64,
        focus_minutes: millis_to_rounded_minutes(today_millis.0),
        sessions: today_millis.1,
        habits_checked_in: data
            .habits
            .iter()
            .filter(|h| h.is_checked_in(ctx.today))
            .count() as u64,
        habits_total: data.habits.len() as u64,
    };

    Summary {
        tasks_eligible: completion.eligible,
        tasks_completed: completion.completed,
        completion_rate: completion.rate,
        focus_minutes: millis_to_rounded_minutes(data.total_focus_millis()),
        sessions: data.sessions.len() as u64,
        check_ins: data.total_check_ins() as u64,
        habits: data.habits.len() as u64,
        active_days: days.len() as u64,
        activity_streak: StreakSummary {
            current: current_streak_of_dates(&days, ctx.today),
            longest: longest_streak_of_dates(&days),
        },
        today,
    }
}
