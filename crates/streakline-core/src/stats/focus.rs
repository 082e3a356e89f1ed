//! Time-bucketed focus sums.
//!
//! Each session is attributed to the bucket its start time falls in. Output
//! series are dense: every bucket of the domain is present, in order, with
//! zero where nothing was recorded. Values are minutes, rounded after
//! summing milliseconds so short sessions are not lost to truncation.

use chrono::{Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use super::{KeyValue, MONTH_NAMES, WEEKDAY_NAMES};
use crate::model::{millis_to_rounded_minutes, PomodoroSession};
use crate::time::{days_between, to_date_key, DayContext, DayWindow};

/// Bucket domain for [`focus_breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusBucket {
    /// Trailing days ending today.
    Day,
    /// Hour of day, 0-23.
    Hour,
    /// Day of week, Sunday first.
    Weekday,
    /// Month of the current year.
    Month,
}

impl std::str::FromStr for FocusBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(FocusBucket::Day),
            "hour" | "hourly" => Ok(FocusBucket::Hour),
            "weekday" | "week" => Ok(FocusBucket::Weekday),
            "month" | "monthly" => Ok(FocusBucket::Month),
            other => Err(format!("unknown focus bucket: {other}")),
        }
    }
}

/// Dispatch to the reducer for `bucket`. `days` only applies to [`FocusBucket::Day`].
pub fn focus_breakdown(
    sessions: &[PomodoroSession],
    bucket: FocusBucket,
    ctx: &DayContext,
    days: u32,
) -> Vec<KeyValue> {
    match bucket {
        FocusBucket::Day => focus_by_day(sessions, ctx.trailing_window(days), ctx.offset),
        FocusBucket::Hour => focus_by_hour(sessions, ctx.offset),
        FocusBucket::Weekday => focus_by_weekday(sessions, ctx.offset),
        FocusBucket::Month => focus_by_month(sessions, ctx.today.year(), ctx.offset),
    }
}

/// Focus minutes per day of `window`, keyed `YYYY-MM-DD`, oldest first.
pub fn focus_by_day(
    sessions: &[PomodoroSession],
    window: DayWindow,
    offset: FixedOffset,
) -> Vec<KeyValue> {
    let mut buckets = vec![0i64; window.days as usize];
    for session in sessions {
        let Some(start) = session.local_start(offset) else {
            continue;
        };
        let day = start.date_naive();
        if !window.contains(day) {
            continue;
        }
        let idx = days_between(window.start, day) as usize;
        buckets[idx] = buckets[idx].saturating_add(session.duration_millis());
    }

    window
        .iter_days()
        .zip(buckets)
        .map(|(day, millis)| KeyValue::new(to_date_key(day), millis_to_rounded_minutes(millis)))
        .collect()
}

/// Focus minutes per hour of day, keyed `HH:00`.
pub fn focus_by_hour(sessions: &[PomodoroSession], offset: FixedOffset) -> Vec<KeyValue> {
    let buckets = accumulate::<24>(sessions, offset, |start| start.hour() as usize);
    buckets
        .iter()
        .enumerate()
        .map(|(hour, millis)| {
            KeyValue::new(format!("{hour:02}:00"), millis_to_rounded_minutes(*millis))
        })
        .collect()
}

/// Focus minutes per weekday, Sunday first.
pub fn focus_by_weekday(sessions: &[PomodoroSession], offset: FixedOffset) -> Vec<KeyValue> {
    let buckets = accumulate::<7>(sessions, offset, |start| {
        start.weekday().num_days_from_sunday() as usize
    });
    labelled(&WEEKDAY_NAMES, &buckets)
}

/// Focus minutes per month of `year`, January first.
pub fn focus_by_month(sessions: &[PomodoroSession], year: i32, offset: FixedOffset) -> Vec<KeyValue> {
    let mut buckets = [0i64; 12];
    for session in sessions {
        let Some(start) = session.local_start(offset).filter(|s| s.year() == year) else {
            continue;
        };
        let idx = start.month0() as usize;
        buckets[idx] = buckets[idx].saturating_add(session.duration_millis());
    }
    labelled(&MONTH_NAMES, &buckets)
}

fn accumulate<const N: usize>(
    sessions: &[PomodoroSession],
    offset: FixedOffset,
    index: impl Fn(&chrono::DateTime<FixedOffset>) -> usize,
) -> [i64; N] {
    let mut buckets = [0i64; N];
    for session in sessions {
        if let Some(start) = session.local_start(offset) {
            let idx = index(&start);
            if idx < N {
                buckets[idx] = buckets[idx].saturating_add(session.duration_millis());
            }
        }
    }
    buckets
}

fn labelled(labels: &[&str], millis: &[i64]) -> Vec<KeyValue> {
    labels
        .iter()
        .zip(millis)
        .map(|(label, ms)| KeyValue::new(*label, millis_to_rounded_minutes(*ms)))
        .collect()
}
