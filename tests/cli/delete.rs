use std::fs;

use crate::cli::support::{has_row, reslug, row_count, setup_database, stdout_json};
use predicates::prelude::*;

#[test]
fn test_plan_delete_never_mutates() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["plan-delete", "--kinds", "lesson", "post", "--id", "lesson_old", "--id", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan: 1 of 2 requested id(s) would be deleted"))
        .stdout(predicate::str::contains("present   lesson_old"))
        .stdout(predicate::str::contains("missing   ghost"))
        .stdout(predicate::str::contains("Collisions: 3"));

    assert_eq!(row_count(&db), 11);
}

#[test]
fn test_delete_without_authorize_is_inert() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["delete", "--kinds", "lesson", "post", "--id", "lesson_old"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "unauthorized: nothing was deleted (re-run with --authorize)",
        ));

    assert!(has_row(&db, "lesson_old"));
    assert_eq!(row_count(&db), 11);
}

#[test]
fn test_delete_authorized_reports_every_outcome() {
    let (_dir, db) = setup_database();

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args([
            "--format",
            "json",
            "delete",
            "--kinds",
            "lesson",
            "post",
            "--id",
            "lesson_old",
            "--id",
            "lesson_pinned",
            "--id",
            "ghost",
            "--authorize",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["mode"], "executed");
    assert_eq!(json["counts"]["deleted"], 1);
    assert_eq!(json["counts"]["rejected"], 1);
    assert_eq!(json["counts"]["not_found"], 1);
    assert_eq!(json["collisions_before"], 3);
    assert_eq!(json["collisions_after"], 2);
    assert_eq!(json["entries"][1]["status"], "rejected");
    assert!(json["generated_at"].is_string());

    assert!(!has_row(&db, "lesson_old"));
    assert!(has_row(&db, "lesson_pinned"));
    assert!(has_row(&db, "post_ab12c"));
}

#[test]
fn test_delete_rerun_reports_not_found() {
    let (_dir, db) = setup_database();
    let args = [
        "delete",
        "--kinds",
        "lesson",
        "post",
        "--id",
        "lesson_old",
        "--authorize",
    ];

    reslug().arg("--database").arg(&db).args(args).assert().success();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 of 1 requested id(s)"))
        .stdout(predicate::str::contains("not-found lesson_old"))
        .stdout(predicate::str::contains("Collisions: 2 before, 2 after"));
}

#[test]
fn test_stale_ids_feed_ids_file() {
    let (dir, db) = setup_database();

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "lesson", "post", "--stale-ids"])
        .output()
        .unwrap();
    let ids_file = dir.path().join("reviewed.txt");
    fs::write(&ids_file, &output.stdout).unwrap();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["--format", "records", "delete", "--kinds", "lesson", "post", "--authorize"])
        .arg("--ids-file")
        .arg(&ids_file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H reslug=1 records=1 mode=executed kinds=lesson/post requested=2 present=2 deleted=1 not_found=0 rejected=1 failed=0 pending=0 collisions_before=3 collisions_after=2",
        ))
        .stdout(predicate::str::contains("D rejected id=lesson_pinned"));
}

#[test]
fn test_delete_requires_ids() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["delete", "--kinds", "lesson", "post", "--authorize"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no ids given"));

    assert_eq!(row_count(&db), 11);
}

#[test]
fn test_delete_requires_kinds() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["delete", "--id", "lesson_old", "--authorize"])
        .assert()
        .code(2);

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["delete", "--kinds", "lesson", "lesson", "--id", "lesson_old"])
        .assert()
        .code(2);

    assert!(has_row(&db, "lesson_old"));
}

#[test]
fn test_delete_missing_database_is_store_error() {
    let dir = tempfile::tempdir().unwrap();

    reslug()
        .arg("--database")
        .arg(dir.path().join("absent.db"))
        .args(["delete", "--kinds", "lesson", "post", "--id", "x", "--authorize"])
        .assert()
        .code(3);
}

#[test]
fn test_quiet_delete_still_reports_reverification() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["--quiet", "delete", "--kinds", "lesson", "post"])
        .args(["--id", "lesson_old", "--id", "lesson_pinned", "--authorize"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary: 1 deleted, 0 not found, 1 rejected, 0 failed, 0 pending",
        ))
        .stdout(predicate::str::contains("Collisions: 3 before, 2 after"));
}
