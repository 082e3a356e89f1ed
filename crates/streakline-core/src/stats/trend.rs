//! Trailing trend report: per-day activity over the last N days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{millis_to_rounded_minutes, AppData};
use crate::time::{days_between, to_date_key, DayContext, DayWindow};

/// Default trend window, in days.
pub const DEFAULT_TREND_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDay {
    pub date_key: String,
    pub tasks_completed: u32,
    pub focus_minutes: u64,
    pub check_ins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    pub window: DayWindow,
    pub days: Vec<TrendDay>,
    pub total_tasks_completed: u64,
    pub total_focus_minutes: u64,
    pub total_check_ins: u64,
}

/// Per-day completions, focus minutes and check-ins for the `days` days
/// ending today, oldest first.
pub fn trend(data: &AppData, ctx: &DayContext, days: u32) -> TrendReport {
    let window = ctx.trailing_window(days);
    let len = window.days as usize;
    let mut tasks = vec![0u32; len];
    let mut focus_millis = vec![0i64; len];
    let mut check_ins = vec![0u32; len];

    let slot = |date: NaiveDate| window.contains(date).then(|| days_between(window.start, date) as usize);

    for idx in data.tasks.iter().filter_map(|t| t.completion_day(ctx.offset)).filter_map(slot) {
        tasks[idx] += 1;
    }
    for idx in data.habits.iter().flat_map(|h| h.check_in_dates()).filter_map(slot) {
        check_ins[idx] += 1;
    }
    for session in &data.sessions {
        if let Some(idx) = ctx.date_of_millis(session.start_time).and_then(slot) {
            focus_millis[idx] = focus_millis[idx].saturating_add(session.duration_millis());
        }
    }

    let days: Vec<TrendDay> = window
        .iter_days()
        .enumerate()
        .map(|(i, day)| TrendDay {
            date_key: to_date_key(day),
            tasks_completed: tasks[i],
            focus_minutes: millis_to_rounded_minutes(focus_millis[i]),
            check_ins: check_ins[i],
        })
        .collect();

    TrendReport {
        window,
        total_tasks_completed: days.iter().map(|d| u64::from(d.tasks_completed)).sum(),
        total_focus_minutes: days.iter().map(|d| d.focus_minutes).sum(),
        total_check_ins: days.iter().map(|d| u64::from(d.check_ins)).sum(),
        days,
    }
}
