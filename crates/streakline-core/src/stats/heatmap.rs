//! Activity heatmap.
//!
//! One cell per calendar day over a trailing window. A day's count merges
//! three independent sources, each contributing one per occurrence:
//! completed tasks (by completion date), habit check-ins, and focus sessions
//! (by start date).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::AppData;
use crate::time::{days_between, to_date_key, DayContext, DayWindow};

/// Default trailing window, in days.
pub const DEFAULT_HEATMAP_DAYS: u32 = 365;

/// Heatmap cell for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date_key: String,
    pub count: u32,
    pub tasks: u32,
    pub check_ins: u32,
    pub sessions: u32,
    /// Intensity bucket 0-4 relative to the busiest day of the window.
    pub level: u8,
}

impl HeatmapDay {
    fn new(date: NaiveDate) -> Self {
        Self {
            date_key: to_date_key(date),
            count: 0,
            tasks: 0,
            check_ins: 0,
            sessions: 0,
            level: 0,
        }
    }

    /// Bucket the count into five levels against `max_count`.
    fn calculate_level(&mut self, max_count: u32) {
        self.level = if self.count == 0 || max_count == 0 {
            0
        } else {
            let ratio = f64::from(self.count) / f64::from(max_count);
            (ratio * 4.0).ceil().clamp(1.0, 4.0) as u8
        };
    }
}

/// Complete heatmap over a window, oldest day first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub window: DayWindow,
    pub days: Vec<HeatmapDay>,
    pub total: u64,
    pub max_count: u32,
    pub active_days: u32,
}

impl ActivityHeatmap {
    pub fn get(&self, date_key: &str) -> Option<&HeatmapDay> {
        self.days.iter().find(|d| d.date_key == date_key)
    }
}

/// Heatmap builder.
#[derive(Debug, Clone)]
pub struct HeatmapAnalyzer {
    pub days: u32,
}

impl Default for HeatmapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatmapAnalyzer {
    /// Create an analyzer over the default one-year window.
    pub fn new() -> Self {
        Self {
            days: DEFAULT_HEATMAP_DAYS,
        }
    }

    pub fn with_days(days: u32) -> Self {
        Self { days }
    }

    /// Build the heatmap for the window ending at `ctx.today`.
    pub fn build(&self, data: &AppData, ctx: &DayContext) -> ActivityHeatmap {
        let window = ctx.trailing_window(self.days);
        let mut days: Vec<HeatmapDay> = window.iter_days().map(HeatmapDay::new).collect();

        let slot = |date: NaiveDate| -> Option<usize> {
            window
                .contains(date)
                .then(|| days_between(window.start, date) as usize)
        };

        for date in data.tasks.iter().filter_map(|t| t.completion_day(ctx.offset)) {
            if let Some(idx) = slot(date) {
                days[idx].tasks += 1;
            }
        }

        for date in data.habits.iter().flat_map(|h| h.check_in_dates()) {
            if let Some(idx) = slot(date) {
                days[idx].check_ins += 1;
            }
        }

        for date in data.sessions.iter().filter_map(|s| ctx.date_of_millis(s.start_time)) {
            if let Some(idx) = slot(date) {
                days[idx].sessions += 1;
            }
        }

        for day in &mut days {
            day.count = day.tasks + day.check_ins + day.sessions;
        }

        let max_count = days.iter().map(|d| d.count).max().unwrap_or(0);
        for day in &mut days {
            day.calculate_level(max_count);
        }

        ActivityHeatmap {
            window,
            total: days.iter().map(|d| u64::from(d.count)).sum(),
            active_days: days.iter().filter(|d| d.count > 0).count() as u32,
            max_count,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Habit, PomodoroSession, Task};
    use chrono::{DateTime, TimeZone, Utc};

    fn ctx() -> DayContext {
        DayContext::utc(NaiveDate::from_ymd_opt(2024, 8, 4).unwrap())
    }

    fn completed(id: &str, iso: &str) -> Task {
        Task {
            completed: true,
            completion_date: Some(DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc)),
            ..Task::new(id, id)
        }
    }

    fn session_at(iso_day: (i32, u32, u32)) -> PomodoroSession {
        let start = Utc
            .with_ymd_and_hms(iso_day.0, iso_day.1, iso_day.2, 9, 0, 0)
            .unwrap()
            .timestamp_millis();
        PomodoroSession::new("s", start, start + 25 * 60_000)
    }

    #[test]
    fn test_empty_data_yields_zero_cells() {
        let heatmap = HeatmapAnalyzer::new().build(&AppData::default(), &ctx());
        assert_eq!(heatmap.days.len(), 365);
        assert_eq!(heatmap.total, 0);
        assert_eq!(heatmap.max_count, 0);
        assert_eq!(heatmap.days.last().unwrap().date_key, "2024-08-04");
        assert!(heatmap.days.iter().all(|d| d.level == 0));
    }

    #[test]
    fn test_sources_merge_per_day() {
        let data = AppData::new(
            vec![
                completed("a", "2024-08-04T08:00:00Z"),
                completed("b", "2024-08-03T08:00:00Z"),
                Task::new("open", "open"),
            ],
            vec![
                Habit::new("h1", "Read").with_check_ins(["2024-08-04", "2024-08-01"]),
                Habit::new("h2", "Run").with_check_ins(["2024-08-04"]),
            ],
            vec![session_at((2024, 8, 4)), session_at((2024, 7, 1))],
        );

        let heatmap = HeatmapAnalyzer::with_days(7).build(&data, &ctx());
        let today = heatmap.get("2024-08-04").unwrap();
        assert_eq!((today.tasks, today.check_ins, today.sessions), (1, 2, 1));
        assert_eq!(today.count, 4);
        assert_eq!(today.level, 4);

        assert_eq!(heatmap.get("2024-08-03").unwrap().count, 1);
        assert_eq!(heatmap.get("2024-08-03").unwrap().level, 1);
        assert_eq!(heatmap.get("2024-08-01").unwrap().count, 1);
        // 2024-07-01 is outside the window
        assert_eq!(heatmap.total, 6);
        assert_eq!(heatmap.active_days, 3);
    }

    #[test]
    fn test_zero_day_window() {
        let heatmap = HeatmapAnalyzer::with_days(0).build(&AppData::default(), &ctx());
        assert!(heatmap.days.is_empty());
        assert_eq!(heatmap.total, 0);
    }
}
