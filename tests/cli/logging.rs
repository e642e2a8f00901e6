use crate::cli::support::{reslug, setup_database};
use predicates::prelude::*;

#[test]
fn test_log_level_debug_shows_debug_messages() {
    reslug()
        .args(["--log-level", "debug", "parse", "x~abc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_level_is_quiet() {
    reslug()
        .args(["parse", "x~abc"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_unauthorized_delete_logs_warning() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["delete", "--kinds", "lesson", "post", "--id", "lesson_old"])
        .assert()
        .success()
        .stderr(predicate::str::contains("deletion not authorized"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let (_dir, db) = setup_database();

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args(["--log-json", "--log-level", "info", "delete", "--kinds", "lesson", "post"])
        .args(["--id", "lesson_old", "--authorize"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.is_empty()).collect();
    assert!(!lines.is_empty());
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("level").is_some());
    }
    assert!(stderr.contains("deletion complete"));
}
