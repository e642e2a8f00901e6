use std::fs;

use crate::cli::support::{create_fixture, reslug, setup_database};
use predicates::prelude::*;

#[test]
fn test_database_from_local_config() {
    let dir = tempfile::tempdir().unwrap();
    create_fixture(&dir.path().join("content.db"));
    fs::write(dir.path().join("reslug.toml"), "database = \"content.db\"\n").unwrap();

    reslug()
        .current_dir(dir.path())
        .args(["collisions", "lesson", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 collision(s)"));
}

#[test]
fn test_database_from_env() {
    let (dir, db) = setup_database();

    reslug()
        .current_dir(dir.path())
        .env("RESLUG_DATABASE", &db)
        .args(["resolve", "intro-to-msw~ab12c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lesson_old"));
}

#[test]
fn test_explicit_config_and_display_limit() {
    let (dir, db) = setup_database();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        format!(
            "database = {:?}\n\n[display]\nsample_limit = 2\n",
            db.display().to_string()
        ),
    )
    .unwrap();

    reslug()
        .arg("--config")
        .arg(&config)
        .args(["collisions", "lesson", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 of 3"));
}

#[test]
fn test_custom_schema_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("cms.db");
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch(
            r#"
            CREATE TABLE resources (
                rid TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                data TEXT,
                published_version TEXT
            );
            INSERT INTO resources VALUES
                ('a1', 'article', '{"meta":{"slug":"hello~h1"}}', 'v1'),
                ('t1', 'tip', '{"meta":{"slug":"hello~h1"}}', NULL);
            "#,
        )
        .unwrap();
    fs::write(
        dir.path().join("reslug.toml"),
        r#"
database = "cms.db"

[schema]
table = "resources"
id_column = "rid"
kind_column = "kind"
payload_column = "data"
version_column = "published_version"
slug_path = "$.meta.slug"
"#,
    )
    .unwrap();

    reslug()
        .current_dir(dir.path())
        .args(["collisions", "tip", "article", "--stale-ids", "--quiet"])
        .assert()
        .success()
        .stdout("t1\n");
}

#[test]
fn test_invalid_schema_identifier_rejected() {
    let (dir, db) = setup_database();
    fs::write(
        dir.path().join("reslug.toml"),
        "[schema]\ntable = \"ContentResource; DROP TABLE x\"\n",
    )
    .unwrap();

    reslug()
        .current_dir(dir.path())
        .arg("--database")
        .arg(&db)
        .args(["resolve", "x~abc"])
        .assert()
        .code(2);
}

#[test]
fn test_malformed_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("reslug.toml"), "database = [unclosed").unwrap();

    reslug()
        .current_dir(dir.path())
        .args(["resolve", "x~abc"])
        .assert()
        .failure();
}
