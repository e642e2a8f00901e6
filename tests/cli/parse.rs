use crate::cli::support::{reslug, stdout_json};
use predicates::prelude::*;

#[test]
fn test_parse_tilde_slug() {
    reslug()
        .args(["parse", "claude-code-tools~e58tr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base:       claude-code-tools"))
        .stdout(predicate::str::contains("hash:       e58tr"))
        .stdout(predicate::str::contains("convention: tilde"));
}

#[test]
fn test_parse_dash_slug_has_no_base() {
    reslug()
        .args(["parse", "claude-code-tools-e58tr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base:       -"))
        .stdout(predicate::str::contains("hash:       e58tr"))
        .stdout(predicate::str::contains("convention: dash"));
}

#[test]
fn test_parse_needs_no_database() {
    // No database configured anywhere; parsing is pure
    reslug().args(["parse", "abc"]).assert().success();
}

#[test]
fn test_parse_ignores_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("reslug.toml"), "database = [unclosed").unwrap();

    reslug()
        .current_dir(dir.path())
        .args(["parse", "intro-to-msw~ab12c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hash:       ab12c"));
}

#[test]
fn test_parse_json() {
    let output = reslug()
        .args(["--format", "json", "parse", "intro-to-msw~ab12c"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["base"], "intro-to-msw");
    assert_eq!(json["hash"], "ab12c");
    assert_eq!(json["convention"], "tilde");
    assert_eq!(json["suffix_matching"], true);
}

#[test]
fn test_parse_empty_slug() {
    let output = reslug()
        .args(["--format", "json", "parse", ""])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["base"], "");
    assert_eq!(json["hash"], "");
    assert_eq!(json["suffix_matching"], false);
}

#[test]
fn test_parse_records() {
    reslug()
        .args(["--format", "records", "parse", "x~abc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H reslug=1 records=1 mode=parse input=\"x~abc\" base=\"x\" hash=abc convention=tilde",
        ));
}
