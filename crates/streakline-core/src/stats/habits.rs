//! Habit consistency and per-habit statistics.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{percent, KeyValue, WEEKDAY_NAMES};
use crate::model::Habit;
use crate::streak::{current_streak_of_dates, longest_streak_of_dates};
use crate::time::{DayContext, DayWindow};

/// Check-ins inside `window` over `habits * days`, as a rounded percentage.
pub fn habit_consistency_rate(habits: &[Habit], window: DayWindow) -> u32 {
    let check_ins = habits
        .iter()
        .flat_map(|h| h.check_in_dates())
        .filter(|d| window.contains(*d))
        .count() as u64;
    let slots = habits.len() as u64 * u64::from(window.days);
    percent(check_ins, slots)
}

/// Derived figures for a single habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: String,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_ins: u32,
    /// Check-ins over `total_days`, capped at 100.
    pub completion_rate: u32,
    /// Check-ins over the days of the consistency window.
    pub window_rate: u32,
    pub checked_in_today: bool,
}

impl HabitStats {
    pub fn compute(habit: &Habit, ctx: &DayContext, window: DayWindow) -> Self {
        let days = habit.check_in_dates();
        let total = days.len() as u64;
        let in_window = days.iter().filter(|d| window.contains(**d)).count() as u64;

        Self {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            current_streak: current_streak_of_dates(&days, ctx.today),
            longest_streak: longest_streak_of_dates(&days),
            total_check_ins: u32::try_from(total).unwrap_or(u32::MAX),
            completion_rate: percent(total, u64::from(habit.total_days)).min(100),
            window_rate: percent(in_window, u64::from(window.days)),
            checked_in_today: days.contains(&ctx.today),
        }
    }
}

/// Per-habit statistics, in input order.
pub fn habit_stats(habits: &[Habit], ctx: &DayContext, window_days: u32) -> Vec<HabitStats> {
    let window = ctx.trailing_window(window_days);
    habits
        .iter()
        .map(|h| HabitStats::compute(h, ctx, window))
        .collect()
}

/// Check-ins per weekday across all habits. Always seven entries, Sunday first.
pub fn check_ins_by_weekday(habits: &[Habit]) -> Vec<KeyValue> {
    let mut counts = [0u64; 7];
    for day in habits.iter().flat_map(|h| h.check_in_dates()) {
        counts[day.weekday().num_days_from_sunday() as usize] += 1;
    }

    WEEKDAY_NAMES
        .iter()
        .zip(counts)
        .map(|(name, count)| KeyValue::new(*name, count))
        .collect()
}
