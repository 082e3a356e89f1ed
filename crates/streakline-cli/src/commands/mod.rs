pub mod achievements;
pub mod config;
pub mod habit;
pub mod report;

use serde::Serialize;
use streakline_core::time::require_date_key;
use streakline_core::{Config, DataStore, DayContext, JsonFileStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Store, config and "today" for one command invocation.
pub struct Workspace {
    pub store: JsonFileStore,
    pub config: Config,
    pub ctx: DayContext,
}

impl Workspace {
    /// Open the default data directory. `today` overrides the clock.
    pub fn open(today: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let store = JsonFileStore::open_default()?;
        let ctx = match today {
            Some(key) => DayContext::fixed(require_date_key(key)?, config.offset()),
            None => config.day_context(),
        };
        tracing::debug!(dir = %store.dir().display(), today = %ctx.today, "opened workspace");
        Ok(Self { store, config, ctx })
    }

    pub fn snapshot(&self) -> Result<streakline_core::AppData, Box<dyn std::error::Error>> {
        Ok(self.store.snapshot()?)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
