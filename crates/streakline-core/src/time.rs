//! Calendar-day utilities.
//!
//! Every day key in Streakline is a local calendar date formatted as
//! `YYYY-MM-DD`. Timestamps are converted to day keys through an explicit
//! UTC offset carried by [`DayContext`], so no computation depends on the
//! ambient timezone of the process or on a midnight falling mid-call.

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// `strftime` pattern for day keys.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Longest window any report spans, roughly a century of days.
pub const MAX_WINDOW_DAYS: u32 = 36_600;

/// Format a local calendar date as a day key.
pub fn to_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` day key. Surrounding whitespace is ignored.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

/// Like [`parse_date_key`] but reports the offending key.
pub fn require_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    parse_date_key(key).ok_or_else(|| ValidationError::InvalidDateKey(key.to_string()))
}

/// Convert epoch milliseconds to a timestamp in the given offset.
pub fn millis_to_local(millis: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&offset))
}

/// Day key of an epoch-millisecond timestamp, in the given offset.
pub fn date_key_for_millis(millis: i64, offset: FixedOffset) -> Option<String> {
    millis_to_local(millis, offset).map(|dt| to_date_key(dt.date_naive()))
}

/// Whole calendar days from `a` to `b` (negative when `b` is earlier).
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Build a fixed offset from minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, ValidationError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(ValidationError::InvalidOffset { minutes })
}

/// The offset the host is currently running in.
pub fn system_offset() -> FixedOffset {
    *Local::now().offset()
}

/// The notion of "today" for a single analytics call.
///
/// Captured once and passed by reference so a call that straddles midnight
/// still sees a single, consistent day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayContext {
    pub today: NaiveDate,
    pub offset: FixedOffset,
}

impl DayContext {
    /// Pin "today" to an explicit date.
    pub fn fixed(today: NaiveDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }

    /// Pin "today" to an explicit date in UTC.
    pub fn utc(today: NaiveDate) -> Self {
        Self::fixed(today, Utc.fix())
    }

    /// Read the wall clock once, in the given offset.
    pub fn now(offset: FixedOffset) -> Self {
        let today = Utc::now().with_timezone(&offset).date_naive();
        Self { today, offset }
    }

    /// Read the wall clock once, in the host's current offset.
    pub fn local_now() -> Self {
        Self::now(system_offset())
    }

    pub fn today_key(&self) -> String {
        to_date_key(self.today)
    }

    pub fn yesterday(&self) -> Option<NaiveDate> {
        self.today.pred_opt()
    }

    /// Local calendar date of an epoch-millisecond timestamp.
    pub fn date_of_millis(&self, millis: i64) -> Option<NaiveDate> {
        millis_to_local(millis, self.offset).map(|dt| dt.date_naive())
    }

    /// Local calendar date of a UTC timestamp.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// The trailing `days`-long window ending today (inclusive).
    pub fn trailing_window(&self, days: u32) -> DayWindow {
        DayWindow::ending_at(self.today, days)
    }
}

/// A contiguous, inclusive run of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: NaiveDate,
    pub days: u32,
}

impl DayWindow {
    /// Window of `days` days whose last day is `end`.
    ///
    /// The length is capped at [`MAX_WINDOW_DAYS`] and at the days available
    /// before `end`, so the window always ends on `end`.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let available = u32::try_from(end.signed_duration_since(NaiveDate::MIN).num_days() + 1)
            .unwrap_or(u32::MAX);
        let days = days.min(MAX_WINDOW_DAYS).min(available);
        let start = end
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(end);
        Self { start, days }
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// Last day of the window, `None` when empty.
    pub fn end(&self) -> Option<NaiveDate> {
        if self.days == 0 {
            return None;
        }
        self.start
            .checked_add_days(Days::new(u64::from(self.days - 1)))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.end() {
            Some(end) => date >= self.start && date <= end,
            None => false,
        }
    }

    /// Every day of the window, oldest first.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + Clone {
        let start = self.start;
        (0..self.days).filter_map(move |i| start.checked_add_days(Days::new(u64::from(i))))
    }
}

/// One cell of a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub date_key: String,
}

/// Lazy iterator over the days of one calendar month.
///
/// Cloning restarts from the clone point; an invalid month yields nothing.
#[derive(Debug, Clone)]
pub struct MonthDays {
    next: Option<NaiveDate>,
    month: u32,
}

impl Iterator for MonthDays {
    type Item = MonthDay;

    fn next(&mut self) -> Option<Self::Item> {
        use chrono::Datelike;

        let date = self.next.filter(|d| d.month() == self.month)?;
        self.next = date.succ_opt();
        Some(MonthDay {
            date,
            date_key: to_date_key(date),
        })
    }
}

/// Enumerate the days of `month` (1-12) in `year`.
pub fn enumerate_month(year: i32, month: u32) -> MonthDays {
    MonthDays {
        next: NaiveDate::from_ymd_opt(year, month, 1),
        month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_roundtrip() {
        let d = date(2024, 8, 4);
        assert_eq!(to_date_key(d), "2024-08-04");
        assert_eq!(parse_date_key("2024-08-04"), Some(d));
        assert_eq!(parse_date_key(" 2024-08-04 "), Some(d));
        assert_eq!(parse_date_key("2024-13-01"), None);
        assert_eq!(parse_date_key("yesterday"), None);
        assert!(require_date_key("08/04/2024").is_err());
    }

    #[test]
    fn test_millis_use_explicit_offset() {
        // 2024-08-03T23:30:00Z
        let millis = 1_722_727_800_000;
        let utc = offset_from_minutes(0).unwrap();
        let tokyo = offset_from_minutes(9 * 60).unwrap();
        let new_york = offset_from_minutes(-4 * 60).unwrap();

        assert_eq!(date_key_for_millis(millis, utc).as_deref(), Some("2024-08-03"));
        assert_eq!(date_key_for_millis(millis, tokyo).as_deref(), Some("2024-08-04"));
        assert_eq!(date_key_for_millis(millis, new_york).as_deref(), Some("2024-08-03"));
    }

    #[test]
    fn test_offset_bounds() {
        assert!(offset_from_minutes(14 * 60).is_ok());
        assert!(offset_from_minutes(25 * 60).is_err());
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 2, 28)), -2);
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 3, 1)), 0);
        // DST change in many zones; calendar days are unaffected
        assert_eq!(days_between(date(2024, 3, 30), date(2024, 3, 31)), 1);
    }

    #[test]
    fn test_enumerate_month() {
        let feb: Vec<_> = enumerate_month(2024, 2).collect();
        assert_eq!(feb.len(), 29);
        assert_eq!(feb[0].date_key, "2024-02-01");
        assert_eq!(feb[28].date_key, "2024-02-29");

        assert_eq!(enumerate_month(2023, 2).count(), 28);
        assert_eq!(enumerate_month(2024, 12).count(), 31);
        assert_eq!(enumerate_month(2024, 13).count(), 0);
    }

    #[test]
    fn test_enumerate_month_is_restartable() {
        let mut days = enumerate_month(2024, 4);
        days.next();
        let snapshot = days.clone();
        assert_eq!(days.count(), 29);
        assert_eq!(snapshot.count(), 29);
        assert_eq!(enumerate_month(2024, 4).count(), 30);
    }

    #[test]
    fn test_trailing_window() {
        let ctx = DayContext::utc(date(2024, 8, 4));
        let window = ctx.trailing_window(7);
        assert_eq!(window.start, date(2024, 7, 29));
        assert_eq!(window.end(), Some(date(2024, 8, 4)));
        assert!(window.contains(date(2024, 7, 29)));
        assert!(!window.contains(date(2024, 7, 28)));
        assert!(!window.contains(date(2024, 8, 5)));
        assert_eq!(window.iter_days().count(), 7);

        let empty = ctx.trailing_window(0);
        assert!(empty.is_empty());
        assert!(!empty.contains(date(2024, 8, 4)));
        assert_eq!(empty.iter_days().count(), 0);
    }

    #[test]
    fn test_oversized_window_is_capped_and_still_ends_today() {
        let today = date(2024, 8, 4);
        let window = DayWindow::ending_at(today, u32::MAX);
        assert_eq!(window.days, MAX_WINDOW_DAYS);
        assert_eq!(window.end(), Some(today));

        let near_min = NaiveDate::MIN + Days::new(2);
        let window = DayWindow::ending_at(near_min, 10);
        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.days, 3);
        assert_eq!(window.end(), Some(near_min));
    }
}
