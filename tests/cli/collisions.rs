use crate::cli::support::{reslug, setup_database, stdout_json};
use predicates::prelude::*;

#[test]
fn test_collisions_reports_total() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "lesson", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 collision(s) between lesson and post"))
        .stdout(predicate::str::contains("lesson_old [lesson] version=- Intro (old) (stale)"))
        .stdout(predicate::str::contains("claude-code-tools").not());
}

#[test]
fn test_collisions_limit_samples_display_only() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "lesson", "post", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 collision(s)"))
        .stdout(predicate::str::contains("Showing 1 of 3"));

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args(["--format", "json", "collisions", "lesson", "post", "--limit", "1"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["total"], 3);
    assert_eq!(json["shown"], 1);
    assert_eq!(json["collisions"].as_array().unwrap().len(), 1);
}

#[test]
fn test_collisions_json_pairs_follow_argument_order() {
    let (_dir, db) = setup_database();

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args(["--format", "json", "collisions", "post", "lesson"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["query"]["kind_a"], "post");
    for pair in json["collisions"].as_array().unwrap() {
        assert_eq!(pair["a"]["kind"], "post");
        assert_eq!(pair["b"]["kind"], "lesson");
        assert_eq!(pair["a"]["canonical_slug"], pair["slug"]);
        assert_eq!(pair["b"]["canonical_slug"], pair["slug"]);
    }
}

#[test]
fn test_collisions_none() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "course", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No collisions between course and post"));
}

#[test]
fn test_collisions_same_kind_is_usage_error() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "lesson", "lesson"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duplicates"));
}

#[test]
fn test_collisions_stale_ids() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["collisions", "lesson", "post", "--stale-ids"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lesson_old\nlesson_pinned\n"))
        .stdout(predicate::str::contains("# 1 collision(s) undecided"))
        .stdout(predicate::str::contains("lesson_both").not());
}

#[test]
fn test_collisions_stale_ids_quiet_prints_ids_only() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["--quiet", "collisions", "lesson", "post", "--stale-ids"])
        .assert()
        .success()
        .stdout("lesson_old\nlesson_pinned\n");
}

#[test]
fn test_collisions_records_format() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["--format", "records", "collisions", "lesson", "post"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H reslug=1 records=1 mode=collisions kinds=lesson/post total=3 shown=3",
        ))
        .stdout(predicate::str::contains(
            "C slug=\"intro-to-msw~ab12c\" a=lesson_old b=post_ab12c",
        ));
}

#[test]
fn test_duplicates_within_kind() {
    let (_dir, db) = setup_database();

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["duplicates", "lesson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 slug(s) held by more than one lesson record"))
        .stdout(predicate::str::contains("shared~zz111 (2 records)"));

    reslug()
        .arg("--database")
        .arg(&db)
        .args(["duplicates", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate slugs among post records"));
}

#[test]
fn test_duplicates_json() {
    let (_dir, db) = setup_database();

    let output = reslug()
        .arg("--database")
        .arg(&db)
        .args(["--format", "json", "duplicates", "lesson"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["total"], 1);
    assert_eq!(json["groups"][0]["slug"], "shared~zz111");
    assert_eq!(json["groups"][0]["records"].as_array().unwrap().len(), 2);
}
