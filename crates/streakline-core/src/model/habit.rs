//! Habit record and check-in toggling.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::de;
use crate::streak::current_streak_of_dates;
use crate::time::{parse_date_key, to_date_key};

/// Part of the day a habit belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum HabitPeriod {
    #[default]
    Morning,
    Afternoon,
    Night,
}

impl<'de> Deserialize<'de> for HabitPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let period = match raw.as_str().map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("afternoon") => HabitPeriod::Afternoon,
            Some("night") | Some("evening") => HabitPeriod::Night,
            _ => HabitPeriod::Morning,
        };
        Ok(period)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Habit {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    /// Icon key resolved by the presentation layer.
    #[serde(deserialize_with = "de::string")]
    pub icon: String,
    pub period: HabitPeriod,
    /// `YYYY-MM-DD` keys; stored order is meaningless.
    #[serde(deserialize_with = "de::null_default")]
    pub check_ins: BTreeSet<String>,
    /// Denominator for the historical completion rate.
    #[serde(deserialize_with = "de::count")]
    pub total_days: u32,
    /// Cached current streak as of the last toggle.
    #[serde(deserialize_with = "de::count")]
    pub streak: u32,
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper mostly used by tests and fixtures.
    pub fn with_check_ins<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_ins.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Check-in days that parse as dates. Malformed keys are dropped.
    pub fn check_in_dates(&self) -> BTreeSet<NaiveDate> {
        self.check_ins
            .iter()
            .filter_map(|k| parse_date_key(k))
            .collect()
    }

    /// Whether any stored key parses to `day`, whatever its spelling.
    pub fn is_checked_in(&self, day: NaiveDate) -> bool {
        self.check_ins.iter().any(|k| parse_date_key(k) == Some(day))
    }

    /// Return a copy with `day` checked in (or un-checked if it already was)
    /// and the cached streak recomputed against `today`.
    ///
    /// Un-checking drops every stored spelling of the day; checking in
    /// always writes the canonical key.
    pub fn toggle_check_in(&self, day: NaiveDate, today: NaiveDate) -> Habit {
        let mut next = self.clone();
        let before = next.check_ins.len();
        next.check_ins.retain(|k| parse_date_key(k) != Some(day));
        if next.check_ins.len() == before {
            next.check_ins.insert(to_date_key(day));
        }
        next.streak = current_streak_of_dates(&next.check_in_dates(), today);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_check_ins_are_a_set() {
        let habit: Habit = serde_json::from_str(
            r#"{"id":1,"name":"Read","checkIns":["2024-08-02","2024-08-01","2024-08-02"],
                "totalDays":10,"period":"Night"}"#,
        )
        .unwrap();
        assert_eq!(habit.id, "1");
        assert_eq!(habit.check_ins.len(), 2);
        assert_eq!(habit.period, HabitPeriod::Night);
        assert_eq!(habit.total_days, 10);
    }

    #[test]
    fn test_malformed_check_ins_are_ignored() {
        let habit = Habit::new("h", "Walk").with_check_ins(["2024-08-01", "not-a-day", ""]);
        assert_eq!(habit.check_in_dates().len(), 1);
    }

    #[test]
    fn test_toggle_adds_and_recomputes_streak() {
        let today = date(2024, 8, 4);
        let habit = Habit::new("h", "Walk").with_check_ins(["2024-08-02", "2024-08-03"]);

        let checked = habit.toggle_check_in(today, today);
        assert!(checked.is_checked_in(today));
        assert_eq!(checked.streak, 3);

        let unchecked = checked.toggle_check_in(date(2024, 8, 3), today);
        assert!(!unchecked.is_checked_in(date(2024, 8, 3)));
        assert_eq!(unchecked.streak, 1);

        // the original is untouched
        assert_eq!(habit.check_ins.len(), 2);
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn test_toggle_matches_non_canonical_keys() {
        let today = date(2024, 8, 4);
        let habit = Habit::new("h", "Walk").with_check_ins([" 2024-08-04", "2024-08-04 ", "2024-08-03"]);
        assert!(habit.is_checked_in(today));

        let unchecked = habit.toggle_check_in(today, today);
        assert!(!unchecked.is_checked_in(today));
        assert_eq!(unchecked.check_ins.len(), 1);
        assert_eq!(unchecked.check_in_dates().len(), 1);
        assert_eq!(unchecked.streak, 1);

        let rechecked = unchecked.toggle_check_in(today, today);
        assert!(rechecked.check_ins.contains("2024-08-04"));
        assert_eq!(rechecked.streak, 2);
    }
}
