//! Static achievement registry.
//!
//! Achievements are plain data: an id, a category, display templates, an
//! icon key for the presentation layer, an XP bonus and a [`Rule`] that says
//! how progress is measured. The registry is defined once and never mutated.

use chrono::{Datelike, FixedOffset, NaiveDate, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{AppData, Priority};
use crate::stats::activity_days;
use crate::streak::longest_streak_of_dates;
use crate::time::millis_to_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Habit,
    Task,
    Focus,
    Consistency,
    Milestone,
    Special,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Habit,
        Category::Task,
        Category::Focus,
        Category::Consistency,
        Category::Milestone,
        Category::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Habit => "habit",
            Category::Task => "task",
            Category::Focus => "focus",
            Category::Consistency => "consistency",
            Category::Milestone => "milestone",
            Category::Special => "special",
        }
    }
}

/// A measurable quantity of an [`AppData`] snapshot.
///
/// Every metric is monotone: adding records never lowers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Check-ins summed across habits.
    CheckIns,
    /// Best longest streak of any single habit.
    HabitStreak,
    HabitsTracked,
    /// Days on which every habit was checked in.
    PerfectDays,
    TasksCompleted,
    /// Completed on or before the due date/time.
    OnTimeTasks,
    HighPriorityCompleted,
    WeekendTasks,
    Sessions,
    FocusMinutes,
    LongestSessionMinutes,
    /// Sessions started between 22:00 and 04:59 local time.
    NightSessions,
    /// Sessions started between 05:00 and 07:59 local time.
    EarlySessions,
    /// Distinct days with any activity.
    ActiveDays,
    /// Longest run of days with any activity.
    ActivityStreak,
    /// Completed tasks + check-ins + sessions.
    TotalActivities,
}

/// How an achievement's progress is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Rule {
    /// `current` is a metric of the snapshot.
    Metric { metric: Metric, goal: u64 },
    /// `current` is the number of unlocked metric-based achievements.
    UnlockedOthers { goal: u64 },
}

impl Rule {
    pub fn goal(&self) -> u64 {
        match self {
            Rule::Metric { goal, .. } | Rule::UnlockedOthers { goal } => *goal,
        }
    }

    pub fn is_self_referential(&self) -> bool {
        matches!(self, Rule::UnlockedOthers { .. })
    }
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    /// `{goal}` is replaced by the rule's goal.
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_bonus: u32,
    pub rule: Rule,
}

impl AchievementDef {
    pub fn describe(&self) -> String {
        self.description.replace("{goal}", &self.rule.goal().to_string())
    }
}

const fn metric(
    id: &'static str,
    category: Category,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    xp_bonus: u32,
    metric: Metric,
    goal: u64,
) -> AchievementDef {
    AchievementDef {
        id,
        category,
        title,
        description,
        icon,
        xp_bonus,
        rule: Rule::Metric { metric, goal },
    }
}

/// The registry, in display order.
pub static REGISTRY: &[AchievementDef] = &[
    // habit
    metric("first_check_in", Category::Habit, "First Step", "Check in on a habit {goal} time", "sprout", 10, Metric::CheckIns, 1),
    metric("habit_week", Category::Habit, "Week Strong", "Keep a habit going for {goal} days in a row", "flame", 50, Metric::HabitStreak, 7),
    metric("habit_month", Category::Habit, "Habit Formed", "Keep a habit going for {goal} days in a row", "fire", 150, Metric::HabitStreak, 30),
    metric("check_in_century", Category::Habit, "Century", "Record {goal} habit check-ins", "hundred", 100, Metric::CheckIns, 100),
    metric("habit_collector", Category::Habit, "Collector", "Track {goal} habits", "stack", 25, Metric::HabitsTracked, 5),
    // task
    metric("first_task", Category::Task, "Getting Started", "Complete {goal} task", "check", 10, Metric::TasksCompleted, 1),
    metric("task_50", Category::Task, "Achiever", "Complete {goal} tasks", "checks", 75, Metric::TasksCompleted, 50),
    metric("task_250", Category::Task, "Task Master", "Complete {goal} tasks", "crown", 200, Metric::TasksCompleted, 250),
    metric("punctual", Category::Task, "Punctual", "Finish {goal} tasks on or before their due date", "clock", 75, Metric::OnTimeTasks, 25),
    metric("priority_crusher", Category::Task, "Priority Crusher", "Complete {goal} high-priority tasks", "flag", 50, Metric::HighPriorityCompleted, 10),
    // focus
    metric("first_focus", Category::Focus, "In the Zone", "Finish {goal} focus session", "timer", 10, Metric::Sessions, 1),
    metric("pomodoro_100", Category::Focus, "Tomato Farmer", "Finish {goal} focus sessions", "tomato", 100, Metric::Sessions, 100),
    metric("focus_10h", Category::Focus, "Deep Worker", "Focus for {goal} minutes in total", "brain", 75, Metric::FocusMinutes, 600),
    metric("focus_100h", Category::Focus, "Flow State", "Focus for {goal} minutes in total", "wave", 250, Metric::FocusMinutes, 6000),
    metric("marathon", Category::Focus, "Marathon", "Focus for {goal} minutes in a single session", "runner", 50, Metric::LongestSessionMinutes, 90),
    // consistency
    metric("active_week", Category::Consistency, "On a Roll", "Be active {goal} days in a row", "calendar", 50, Metric::ActivityStreak, 7),
    metric("active_month", Category::Consistency, "Unstoppable", "Be active {goal} days in a row", "rocket", 150, Metric::ActivityStreak, 30),
    metric("perfect_week", Category::Consistency, "Perfectionist", "Check in on every habit on {goal} days", "star", 75, Metric::PerfectDays, 7),
    metric("dedicated", Category::Consistency, "Dedicated", "Be active on {goal} different days", "medal", 100, Metric::ActiveDays, 100),
    // milestone
    metric("milestone_100", Category::Milestone, "Momentum", "Log {goal} activities", "trophy", 50, Metric::TotalActivities, 100),
    metric("milestone_1000", Category::Milestone, "Legend", "Log {goal} activities", "gem", 300, Metric::TotalActivities, 1000),
    // special
    metric("night_owl", Category::Special, "Night Owl", "Start {goal} focus sessions late at night", "owl", 40, Metric::NightSessions, 10),
    metric("early_bird", Category::Special, "Early Bird", "Start {goal} focus sessions early in the morning", "sunrise", 40, Metric::EarlySessions, 10),
    metric("weekend_warrior", Category::Special, "Weekend Warrior", "Complete {goal} tasks on weekends", "shield", 40, Metric::WeekendTasks, 20),
    AchievementDef {
        id: "all_rounder",
        category: Category::Special,
        title: "All-Rounder",
        description: "Unlock {goal} other achievements",
        icon: "compass",
        xp_bonus: 200,
        rule: Rule::UnlockedOthers { goal: 10 },
    },
];

/// Look up a registry entry by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    REGISTRY.iter().find(|def| def.id == id)
}

/// Every metric measured once from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    values: BTreeMap<Metric, u64>,
}

impl MetricSnapshot {
    /// Measure every metric. Local-time metrics use `offset`; nothing reads
    /// the wall clock.
    pub fn measure(data: &AppData, offset: FixedOffset) -> Self {
        let mut values = BTreeMap::new();

        let habit_days: Vec<_> = data.habits.iter().map(|h| h.check_in_dates()).collect();
        let check_ins = data.total_check_ins() as u64;
        values.insert(Metric::CheckIns, check_ins);
        values.insert(
            Metric::HabitStreak,
            habit_days
                .iter()
                .map(|days| u64::from(longest_streak_of_dates(days)))
                .max()
                .unwrap_or(0),
        );
        values.insert(Metric::HabitsTracked, data.habits.len() as u64);
        values.insert(Metric::PerfectDays, perfect_days(&habit_days));

        let done: Vec<_> = data.completed_tasks().collect();
        values.insert(Metric::TasksCompleted, done.len() as u64);
        values.insert(
            Metric::OnTimeTasks,
            done.iter().filter(|t| t.completed_on_time(offset)).count() as u64,
        );
        values.insert(
            Metric::HighPriorityCompleted,
            done.iter().filter(|t| t.priority == Priority::High).count() as u64,
        );
        values.insert(
            Metric::WeekendTasks,
            done.iter()
                .filter_map(|t| t.completion_day(offset))
                .filter(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
                .count() as u64,
        );

        let starts: Vec<_> = data
            .sessions
            .iter()
            .filter_map(|s| millis_to_local(s.start_time, offset))
            .collect();
        values.insert(Metric::Sessions, data.sessions.len() as u64);
        values.insert(Metric::FocusMinutes, data.total_focus_minutes());
        values.insert(
            Metric::LongestSessionMinutes,
            data.sessions
                .iter()
                .map(|s| u64::try_from(s.duration_minutes()).unwrap_or(0))
                .max()
                .unwrap_or(0),
        );
        values.insert(
            Metric::NightSessions,
            starts.iter().filter(|s| s.hour() >= 22 || s.hour() < 5).count() as u64,
        );
        values.insert(
            Metric::EarlySessions,
            starts.iter().filter(|s| (5..8).contains(&s.hour())).count() as u64,
        );

        let active = activity_days(data, offset);
        values.insert(Metric::ActiveDays, active.len() as u64);
        values.insert(Metric::ActivityStreak, u64::from(longest_streak_of_dates(&active)));
        values.insert(
            Metric::TotalActivities,
            done.len() as u64 + check_ins + data.sessions.len() as u64,
        );

        Self { values }
    }

    pub fn get(&self, metric: Metric) -> u64 {
        self.values.get(&metric).copied().unwrap_or(0)
    }
}

/// Days on which every habit has a check-in (0 when there are no habits).
fn perfect_days(habit_days: &[BTreeSet<NaiveDate>]) -> u64 {
    let Some((first, rest)) = habit_days.split_first() else {
        return 0;
    };
    first
        .iter()
        .filter(|day| rest.iter().all(|days| days.contains(day)))
        .count() as u64
}
