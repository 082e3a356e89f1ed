use serde::Serialize;
use streakline_core::stats::{
    self, completion_stats, focus_breakdown, tasks_by_list, tasks_by_priority, tasks_by_tag,
    CompletionFilter, CompletionStats, FocusBucket, KeyValue, TaskScope,
};
use streakline_core::HeatmapAnalyzer;

use super::{print_json, CliResult, Workspace};

pub fn summary(today: Option<&str>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    print_json(&stats::summarize(&data, &ws.ctx))
}

pub fn focus(today: Option<&str>, by: FocusBucket, days: Option<u32>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let days = days.unwrap_or(ws.config.focus_days);
    print_json(&focus_breakdown(&data.sessions, by, &ws.ctx, days))
}

pub fn heatmap(today: Option<&str>, days: Option<u32>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let analyzer = HeatmapAnalyzer::with_days(days.unwrap_or(ws.config.heatmap_days));
    print_json(&analyzer.build(&data, &ws.ctx))
}

pub fn trend(today: Option<&str>, days: Option<u32>) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let days = days.unwrap_or(ws.config.trend_days);
    print_json(&stats::trend(&data, &ws.ctx, days))
}

#[derive(Serialize)]
struct TaskReport {
    completion: CompletionStats,
    by: String,
    groups: Vec<KeyValue>,
}

pub fn tasks(today: Option<&str>, by: &str, scope: TaskScope) -> CliResult {
    let ws = Workspace::open(today)?;
    let data = ws.snapshot()?;
    let groups = match by {
        "list" => tasks_by_list(&data.tasks, scope),
        "priority" => tasks_by_priority(&data.tasks, scope),
        "tag" => tasks_by_tag(&data.tasks, scope),
        other => return Err(format!("unknown grouping: {other} (expected list, priority or tag)").into()),
    };
    print_json(&TaskReport {
        completion: completion_stats(&data.tasks, CompletionFilter::default()),
        by: by.to_string(),
        groups,
    })
}
