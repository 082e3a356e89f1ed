//! Achievements and XP scoring.
//!
//! The registry is static tagged data; presentation (icons, localized
//! titles) belongs to the caller. Evaluation and scoring are pure functions
//! of an [`AppData`](crate::model::AppData) snapshot and a UTC offset.

mod evaluate;
mod registry;
mod score;

pub use evaluate::{evaluate, evaluate_snapshot, unlocked, AchievementStatus, Progress};
pub use registry::{find, AchievementDef, Category, Metric, MetricSnapshot, Rule, REGISTRY};
pub use score::{
    compute_score, score_with, ScoreBreakdown, FOCUS_BLOCK_MINUTES, XP_ON_TIME_BONUS,
    XP_PER_CHECK_IN, XP_PER_FOCUS_BLOCK, XP_PER_TASK,
};
