use clap::Subcommand;
use serde::Serialize;
use streakline_core::stats::{check_ins_by_weekday, habit_consistency_rate, habit_stats, HabitStats, KeyValue};
use streakline_core::storage::toggle_check_in;
use streakline_core::time::require_date_key;

use super::{print_json, CliResult, Workspace};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Toggle a check-in (today unless --date is given)
    Check {
        /// Habit ID
        id: String,
        /// Day to toggle, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
struct HabitReport {
    consistency_rate: u32,
    consistency_days: u32,
    habits: Vec<HabitStats>,
    by_weekday: Vec<KeyValue>,
}

pub fn list(today: Option<&str>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let days = ws.config.consistency_days;
    print_json(&HabitReport {
        consistency_rate: habit_consistency_rate(&data.habits, ws.ctx.trailing_window(days)),
        consistency_days: days,
        habits: habit_stats(&data.habits, &ws.ctx, days),
        by_weekday: check_ins_by_weekday(&data.habits),
    })
}

pub fn run(today: Option<&str>, action: HabitAction) -> CliResult {
    match action {
        HabitAction::Check { id, date } => {
            let mut ws = Workspace::open(today)?;
            let day = match date.as_deref() {
                Some(key) => require_date_key(key)?,
                None => ws.ctx.today,
            };
            let habit = toggle_check_in(&mut ws.store, &id, day, ws.ctx.today)?;
            let state = if habit.is_checked_in(day) { "checked in" } else { "unchecked" };
            println!("{} {state} on {day} (streak {})", habit.name, habit.streak);
        }
    }
    Ok(())
}
