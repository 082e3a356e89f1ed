//! Statistics module for Streakline
//!
//! Pure reducers over an [`AppData`](crate::model::AppData) snapshot:
//! completion and consistency rates, time-bucketed focus sums, the
//! contribution heatmap, group-by distributions and the trailing trend
//! report. Every function is total: empty input yields zero-valued output.

mod activity;
mod completion;
mod distribution;
mod focus;
mod habits;
mod heatmap;
mod trend;

use serde::{Deserialize, Serialize};

pub use activity::{activity_days, activity_streak, summarize, Summary, TodaySummary};

pub use completion::{completion_rate, completion_stats, CompletionFilter, CompletionStats};

pub use distribution::{tasks_by_list, tasks_by_priority, tasks_by_tag, TaskScope};

pub use focus::{
    focus_breakdown, focus_by_day, focus_by_hour, focus_by_month, focus_by_weekday, FocusBucket,
};

pub use habits::{
    check_ins_by_weekday, habit_consistency_rate, habit_stats, HabitStats,
};

pub use heatmap::{ActivityHeatmap, HeatmapAnalyzer, HeatmapDay, DEFAULT_HEATMAP_DAYS};

pub use trend::{trend, TrendDay, TrendReport, DEFAULT_TREND_DAYS};

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: u64,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Weekday labels, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month labels, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `numerator / denominator * 100`, rounded; 0 when the denominator is 0.
pub fn percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13); // 12.5 rounds half up
        assert_eq!(percent(4, 4), 100);
    }
}
