//! Streak engine.
//!
//! A streak is a run of consecutive calendar days with at least one entry.
//! Inputs are treated as sets: duplicates and ordering never change the
//! result, and keys that are not valid `YYYY-MM-DD` dates are ignored.
//!
//! The current streak uses a two-day lookback: a streak that ended
//! yesterday is still alive until today is over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::time::parse_date_key;

/// Both streak figures for one set of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Parse day keys into a deduplicated, ordered set.
pub fn parse_day_set<I, S>(keys: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|k| parse_date_key(k.as_ref()))
        .collect()
}

/// Current streak over day keys, relative to `today`.
pub fn current_streak<I, S>(keys: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    current_streak_of_dates(&parse_day_set(keys), today)
}

/// Longest streak over day keys.
pub fn longest_streak<I, S>(keys: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    longest_streak_of_dates(&parse_day_set(keys))
}

/// Current and longest streak in one pass over the keys.
pub fn summarize<I, S>(keys: I, today: NaiveDate) -> StreakSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let days = parse_day_set(keys);
    StreakSummary {
        current: current_streak_of_dates(&days, today),
        longest: longest_streak_of_dates(&days),
    }
}

/// Current streak over parsed days.
///
/// Starts at today if present, else at yesterday if present, else 0, then
/// walks backward while each previous day is present.
pub fn current_streak_of_dates(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|y| days.contains(y))
    };

    let mut cursor = anchor;
    let mut streak = 0u32;
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// Longest run of consecutive days.
pub fn longest_streak_of_dates(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut running = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        running = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => running + 1,
            _ => 1,
        };
        longest = longest.max(running);
        previous = Some(day);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const AUGUST: [&str; 4] = ["2024-08-01", "2024-08-02", "2024-08-03", "2024-08-04"];

    #[test]
    fn test_empty_input() {
        let none: [&str; 0] = [];
        assert_eq!(current_streak(none, date(2024, 8, 4)), 0);
        assert_eq!(longest_streak(none), 0);
    }

    #[test]
    fn test_streak_through_today() {
        assert_eq!(current_streak(AUGUST, date(2024, 8, 4)), 4);
        assert_eq!(longest_streak(AUGUST), 4);
    }

    #[test]
    fn test_yesterday_keeps_streak_alive() {
        let keys = &AUGUST[..3];
        assert_eq!(current_streak(keys, date(2024, 8, 4)), 3);
        assert_eq!(longest_streak(keys), 3);
    }

    #[test]
    fn test_gap_of_two_days_breaks_streak() {
        let keys = &AUGUST[..3];
        assert_eq!(current_streak(keys, date(2024, 8, 5)), 0);
        assert_eq!(longest_streak(keys), 3);
    }

    #[test]
    fn test_walk_stops_at_first_gap() {
        let keys = ["2024-07-28", "2024-07-29", "2024-08-02", "2024-08-03", "2024-08-04"];
        assert_eq!(current_streak(keys, date(2024, 8, 4)), 3);
    }

    #[test]
    fn test_longest_over_gaps() {
        let keys = [
            "2024-01-01", "2024-01-02",
            "2024-01-05", "2024-01-06", "2024-01-07", "2024-01-08",
            "2024-01-10",
        ];
        assert_eq!(longest_streak(keys), 4);
    }

    #[test]
    fn test_single_day() {
        assert_eq!(longest_streak(["2024-01-01"]), 1);
        assert_eq!(current_streak(["2024-01-01"], date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let shuffled = ["2024-08-03", "2024-08-01", "2024-08-04", "2024-08-02", "2024-08-03"];
        assert_eq!(current_streak(shuffled, date(2024, 8, 4)), 4);
        assert_eq!(longest_streak(shuffled), 4);
    }

    #[test]
    fn test_across_month_and_leap_day() {
        let keys = ["2024-02-28", "2024-02-29", "2024-03-01"];
        assert_eq!(longest_streak(keys), 3);
        assert_eq!(current_streak(keys, date(2024, 3, 1)), 3);

        let non_leap = ["2023-02-28", "2023-03-01"];
        assert_eq!(longest_streak(non_leap), 2);
    }

    #[test]
    fn test_invalid_keys_ignored() {
        let keys = ["2024-08-03", "garbage", "2024-08-04", "2024-02-30"];
        assert_eq!(current_streak(keys, date(2024, 8, 4)), 2);
        assert_eq!(longest_streak(keys), 2);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(AUGUST, date(2024, 8, 4));
        assert_eq!(summary, StreakSummary { current: 4, longest: 4 });
    }
}
