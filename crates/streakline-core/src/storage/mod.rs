//! Persistence behind an injected [`DataStore`].
//!
//! The analytics engine never touches storage; callers load an
//! [`AppData`] snapshot through a store and hand it over.

mod config;
mod store;

pub use config::Config;
pub use store::{Collection, JsonFileStore, MemoryStore};

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::error::{ConfigError, Result, StoreError};
use crate::model::{AppData, Habit, PomodoroSession, Task};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STREAKLINE_DATA_DIR";

/// Returns `$STREAKLINE_DATA_DIR` if set, otherwise `~/.config/streakline/`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
            .join(".config")
            .join("streakline"),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Read/write access to the three persisted collections.
pub trait DataStore {
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn load_habits(&self) -> Result<Vec<Habit>>;
    fn load_sessions(&self) -> Result<Vec<PomodoroSession>>;

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()>;
    fn save_habits(&mut self, habits: &[Habit]) -> Result<()>;
    fn save_sessions(&mut self, sessions: &[PomodoroSession]) -> Result<()>;

    /// Load everything into one snapshot.
    fn snapshot(&self) -> Result<AppData> {
        Ok(AppData::new(
            self.load_tasks()?,
            self.load_habits()?,
            self.load_sessions()?,
        ))
    }

    /// Replace every collection with the snapshot's contents.
    fn restore(&mut self, data: &AppData) -> Result<()> {
        self.save_tasks(&data.tasks)?;
        self.save_habits(&data.habits)?;
        self.save_sessions(&data.sessions)
    }
}

/// Toggle a habit's check-in for `day` and persist the result.
///
/// Returns the updated habit with its cached streak recomputed.
pub fn toggle_check_in<S: DataStore + ?Sized>(
    store: &mut S,
    habit_id: &str,
    day: NaiveDate,
    today: NaiveDate,
) -> Result<Habit> {
    let mut habits = store.load_habits()?;
    let slot = habits
        .iter_mut()
        .find(|h| h.id == habit_id)
        .ok_or_else(|| StoreError::NotFound {
            kind: "habit",
            id: habit_id.to_string(),
        })?;

    let updated = slot.toggle_check_in(day, today);
    *slot = updated.clone();
    store.save_habits(&habits)?;

    tracing::info!(
        habit = habit_id,
        day = %day,
        checked_in = updated.is_checked_in(day),
        streak = updated.streak,
        "toggled check-in"
    );
    Ok(updated)
}
