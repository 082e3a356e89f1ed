//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `dir` as the data directory and return
/// (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_streakline"))
        .env("STREAKLINE_DATA_DIR", dir)
        .env_remove("STREAKLINE_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn seed(dir: &Path) {
    std::fs::write(dir.join("config.toml"), "utc_offset_minutes = 0\n").unwrap();
    std::fs::write(
        dir.join("tasks.json"),
        r#"[
            {"id":"t1","title":"Write","listId":"work","priority":"High","completed":true,
             "completionDate":"2024-08-04T09:00:00Z","dueDate":"2024-08-04"},
            {"id":"t2","title":"Read","listId":"home","priority":"Low","completed":false},
            {"id":"s","title":"Section","isSection":true}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("habits.json"),
        r#"[{"id":"h1","name":"Stretch","checkIns":["2024-08-01","2024-08-02","2024-08-03"],"totalDays":4}]"#,
    )
    .unwrap();
    // 2024-08-04 10:00-10:25 and 10:30-11:00 UTC
    std::fs::write(
        dir.join("pomodoroSessions.json"),
        r#"[{"id":"p1","startTime":1722765600000,"endTime":1722767100000},
            {"id":"p2","startTime":1722767400000,"endTime":1722769200000}]"#,
    )
    .unwrap();
}

#[test]
fn test_summary_on_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let summary = run_json(dir.path(), &["summary", "--today", "2024-08-04"]);
    assert_eq!(summary["tasks_completed"], 0);
    assert_eq!(summary["completion_rate"], 0);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_summary() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let summary = run_json(dir.path(), &["summary", "--today", "2024-08-04"]);
    assert_eq!(summary["tasks_completed"], 1);
    assert_eq!(summary["completion_rate"], 50);
    assert_eq!(summary["focus_minutes"], 55);
    assert_eq!(summary["activity_streak"]["current"], 4);
}

#[test]
fn test_focus_by_hour() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let series = run_json(dir.path(), &["focus", "--by", "hour", "--today", "2024-08-04"]);
    let series = series.as_array().unwrap();
    assert_eq!(series.len(), 24);
    assert_eq!(series[10]["key"], "10:00");
    assert_eq!(series[10]["value"], 55);
}

#[test]
fn test_heatmap_days() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let heatmap = run_json(dir.path(), &["heatmap", "--days", "7", "--today", "2024-08-04"]);
    assert_eq!(heatmap["days"].as_array().unwrap().len(), 7);
    // 3 check-ins, 1 task, 2 sessions
    assert_eq!(heatmap["total"], 6);
}

#[test]
fn test_habit_check_toggles() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let (stdout, stderr, code) = run_cli(dir.path(), &["habit", "check", "h1", "--today", "2024-08-04"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("checked in"));
    assert!(stdout.contains("streak 4"));

    let habits = run_json(dir.path(), &["habits", "--today", "2024-08-04"]);
    assert_eq!(habits["habits"][0]["current_streak"], 4);
    assert_eq!(habits["habits"][0]["checked_in_today"], true);

    let (stdout, _, code) = run_cli(dir.path(), &["habit", "check", "h1", "--today", "2024-08-04"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("unchecked"));
}

#[test]
fn test_habit_check_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "check", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_achievements_and_score() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let unlocked = run_json(dir.path(), &["achievements", "--unlocked"]);
    let ids: Vec<_> = unlocked
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["first_check_in", "first_task", "first_focus"]);

    let score = run_json(dir.path(), &["score"]);
    // 10 + 5 on time + 20 * 2 blocks + 3 * 5 check-ins + 30 bonus
    assert_eq!(score["total"], 100);
}

#[test]
fn test_tasks_by_priority() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let report = run_json(dir.path(), &["tasks", "--by", "priority"]);
    assert_eq!(report["groups"][0]["key"], "High");
    assert_eq!(report["groups"].as_array().unwrap().len(), 2);

    let (_, _, code) = run_cli(dir.path(), &["tasks", "--by", "colour"]);
    assert_eq!(code, 1);
}

#[test]
fn test_context() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let context = run_json(dir.path(), &["context", "--today", "2024-08-04"]);
    assert_eq!(context["today"], "2024-08-04");
    assert_eq!(context["completionRate"], 50);
    assert_eq!(context["trend"]["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "trend_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "trend_days", "14"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "trend_days"]);
    assert_eq!(stdout.trim(), "14");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("trend_days = 14"));

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "bogus", "1"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "trend_days"]);
    assert_eq!(stdout.trim(), "7");
}

#[test]
fn test_bad_today_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["summary", "--today", "yesterday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("yesterday"));
}

#[test]
fn test_bad_today_fails_for_every_command() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    for args in [
        &["tasks"][..],
        &["achievements"],
        &["score"],
        &["habits"],
        &["heatmap"],
        &["config", "list"],
    ] {
        let mut args = args.to_vec();
        args.extend(["--today", "not-a-date"]);
        let (_, stderr, code) = run_cli(dir.path(), &args);
        assert_eq!(code, 1, "{args:?} accepted a bad --today");
        assert!(stderr.contains("not-a-date"), "{args:?}: {stderr}");
    }
}

#[test]
fn test_oversized_days_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["heatmap", "--days", "4000000000"]);
    assert_ne!(code, 0);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "trend_days", "4000000000"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("trend_days"));
}
