use streakline_core::achievements::{evaluate, score_with};
use streakline_core::{AssistantContext, ContextWindows};

use super::{print_json, CliResult, Workspace};

pub fn list(today: Option<&str>, unlocked_only: bool) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let statuses: Vec<_> = evaluate(&data, ws.ctx.offset)
        .into_iter()
        .filter(|s| !unlocked_only || s.unlocked)
        .collect();
    print_json(&statuses)
}

pub fn score(today: Option<&str>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let statuses = evaluate(&data, ws.ctx.offset);
    print_json(&score_with(&data, ws.ctx.offset, &statuses))
}

pub fn context(today: Option<&str>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let windows = ContextWindows {
        trend_days: ws.config.trend_days,
        consistency_days: ws.config.consistency_days,
    };
    println!("{}", AssistantContext::build(&data, &ws.ctx, windows).to_json()?);
    Ok(())
}
