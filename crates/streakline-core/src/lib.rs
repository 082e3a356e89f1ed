//! # Streakline Core Library
//!
//! Analytics and gamification for a personal productivity tracker. Given a
//! snapshot of tasks, habits and pomodoro focus sessions, the library derives
//! streaks, completion and consistency rates, time-bucketed focus totals, an
//! activity heatmap, achievements and an XP score.
//!
//! ## Architecture
//!
//! - **Analytics** ([`streak`], [`stats`], [`achievements`]): pure functions of
//!   an [`AppData`] snapshot. "Today" and the UTC offset are always explicit
//!   through [`DayContext`]; nothing reads the ambient timezone.
//! - **Storage** ([`storage`]): the [`DataStore`] trait with in-memory and
//!   JSON-file implementations, plus TOML-based [`Config`].
//! - **Insight** ([`insight`]): a serializable context bundle for an external
//!   assistant.
//!
//! ## Key Components
//!
//! - [`HeatmapAnalyzer`]: trailing activity heatmap
//! - [`evaluate`]: achievement progress in registry order
//! - [`compute_score`]: XP total with a per-source breakdown

pub mod achievements;
pub mod error;
pub mod insight;
pub mod model;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod time;

pub use achievements::{compute_score, evaluate, AchievementStatus, Progress, ScoreBreakdown};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use insight::{AssistantContext, ContextWindows};
pub use model::{AppData, Habit, HabitPeriod, PomodoroSession, Priority, Subtask, Task};
pub use stats::{HeatmapAnalyzer, KeyValue};
pub use storage::{data_dir, Config, DataStore, JsonFileStore, MemoryStore};
pub use streak::StreakSummary;
pub use time::{DayContext, DayWindow};
