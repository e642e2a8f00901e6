use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use rusqlite::Connection;
use tempfile::TempDir;

/// Get a Command for reslug, isolated from the caller's environment
pub fn reslug() -> Command {
    let mut cmd = cargo_bin_cmd!("reslug");
    cmd.env_remove("RESLUG_DATABASE")
        .env_remove("RESLUG_LOG")
        .env_remove("RUST_LOG")
        .env("RESLUG_CONFIG_DIR", "/nonexistent/reslug-config");
    cmd
}

/// Content database with three lesson/post collisions:
///
/// - `intro-to-msw~ab12c`: `lesson_old` is stale, `post_ab12c` migrated
/// - `testing~cd34e`: `lesson_pinned` is stale but referenced by an attachment
/// - `both~ef56g`: both sides migrated (undecided)
///
/// plus a dash-convention lesson that only the resolver links to
/// `post_e58tr`, and two lessons sharing `shared~zz111`.
pub fn create_fixture(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE ContentResource (
            id TEXT PRIMARY KEY,
            type TEXT NOT NULL,
            fields TEXT NOT NULL DEFAULT '{}',
            currentVersionId TEXT
        );
        CREATE TABLE Attachment (
            id TEXT PRIMARY KEY,
            resourceId TEXT NOT NULL REFERENCES ContentResource(id)
        );
        INSERT INTO ContentResource VALUES
            ('post_e58tr', 'post', '{"slug":"claude-code-tools~e58tr","title":"Claude Code tools"}', 'v1'),
            ('p_xyz', 'lesson', '{"slug":"claude-code-tools-e58tr"}', NULL),
            ('post_ab12c', 'post', '{"slug":"intro-to-msw~ab12c","title":"Intro"}', 'v2'),
            ('lesson_old', 'lesson', '{"slug":"intro-to-msw~ab12c","title":"Intro (old)"}', NULL),
            ('post_cd34e', 'post', '{"slug":"testing~cd34e"}', 'v3'),
            ('lesson_pinned', 'lesson', '{"slug":"testing~cd34e"}', NULL),
            ('post_ef56g', 'post', '{"slug":"both~ef56g"}', 'v4'),
            ('lesson_both', 'lesson', '{"slug":"both~ef56g"}', 'v5'),
            ('lesson_dup1', 'lesson', '{"slug":"shared~zz111"}', NULL),
            ('lesson_dup2', 'lesson', '{"slug":"shared~zz111"}', NULL),
            ('lesson_legacy', 'lesson', 'not json', NULL);
        INSERT INTO Attachment VALUES ('att_1', 'lesson_pinned');
        "#,
    )
    .unwrap();
}

/// Temp dir holding `content.db` built by [`create_fixture`]
pub fn setup_database() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("content.db");
    create_fixture(&db);
    (dir, db)
}

/// Number of rows left in the content table
pub fn row_count(path: &Path) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM ContentResource", [], |row| row.get(0))
        .unwrap()
}

pub fn has_row(path: &Path, id: &str) -> bool {
    let conn = Connection::open(path).unwrap();
    conn.query_row(
        "SELECT COUNT(*) FROM ContentResource WHERE id = ?1",
        [id],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        > 0
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
