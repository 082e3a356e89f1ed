//! [`DataStore`] implementations.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{data_dir, DataStore};
use crate::error::{Result, StoreError};
use crate::model::{AppData, Habit, PomodoroSession, Task};

/// A persisted collection and its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tasks,
    Habits,
    Sessions,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Tasks, Collection::Habits, Collection::Sessions];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks",
            Collection::Habits => "habits",
            Collection::Sessions => "pomodoroSessions",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks.json",
            Collection::Habits => "habits.json",
            Collection::Sessions => "pomodoroSessions.json",
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: AppData,
}

impl MemoryStore {
    pub fn new(data: AppData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }
}

impl DataStore for MemoryStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.data.tasks.clone())
    }

    fn load_habits(&self) -> Result<Vec<Habit>> {
        Ok(self.data.habits.clone())
    }

    fn load_sessions(&self) -> Result<Vec<PomodoroSession>> {
        Ok(self.data.sessions.clone())
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.data.tasks = tasks.to_vec();
        Ok(())
    }

    fn save_habits(&mut self, habits: &[Habit]) -> Result<()> {
        self.data.habits = habits.to_vec();
        Ok(())
    }

    fn save_sessions(&mut self, sessions: &[PomodoroSession]) -> Result<()> {
        self.data.sessions = sessions.to_vec();
        Ok(())
    }

    fn snapshot(&self) -> Result<AppData> {
        Ok(self.data.clone())
    }
}

/// One JSON array file per collection inside a directory.
///
/// A missing, empty or `null` file reads as an empty collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.dir.join(collection.file_name())
    }

    fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.path_of(collection);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(collection = collection.name(), path = %path.display(), "collection file missing");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    collection: collection.name(),
                    path,
                    source,
                }
                .into())
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Option<Vec<T>> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                collection: collection.name(),
                source,
            })?;
        let records = records.unwrap_or_default();
        tracing::debug!(collection = collection.name(), count = records.len(), "loaded collection");
        Ok(records)
    }

    fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let path = self.path_of(collection);
        let write_failed = |source| StoreError::WriteFailed {
            collection: collection.name(),
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let content = serde_json::to_string_pretty(records)?;

        // write-then-rename so readers never see a half-written file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_failed)?;
        std::fs::rename(&tmp, &path).map_err(write_failed)?;

        tracing::debug!(collection = collection.name(), count = records.len(), "saved collection");
        Ok(())
    }
}

impl DataStore for JsonFileStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read(Collection::Tasks)
    }

    fn load_habits(&self) -> Result<Vec<Habit>> {
        self.read(Collection::Habits)
    }

    fn load_sessions(&self) -> Result<Vec<PomodoroSession>> {
        self.read(Collection::Sessions)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.write(Collection::Tasks, tasks)
    }

    fn save_habits(&mut self, habits: &[Habit]) -> Result<()> {
        self.write(Collection::Habits, habits)
    }

    fn save_sessions(&mut self, sessions: &[PomodoroSession]) -> Result<()> {
        self.write(Collection::Sessions, sessions)
    }
}
