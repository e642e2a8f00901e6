//! SQLite-backed content store

use std::path::Path;
use std::time::Instant;

use rusqlite::{params, Connection, ErrorCode, OpenFlags, Row};

use super::sql::{Statements, RECORD_COLUMNS};
use super::{CandidateQuery, ContentStore, ContentStoreMut, DeleteOutcome};
use crate::config::SchemaConfig;
use crate::error::{ReslugError, Result};
use crate::map_db_err;
use crate::record::ContentRecord;
use crate::trace_time;

/// Content store over a SQLite database.
///
/// Owns its connection for the duration of one operation; the connection is
/// closed when the store is dropped, whichever way the operation ends.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    statements: Statements,
}

impl SqliteStore {
    /// Open an existing database for reading and deleting.
    ///
    /// Never creates a database: a missing file is [`ReslugError::StoreNotFound`].
    #[tracing::instrument(skip(path, schema), fields(path = %path.display()))]
    pub fn open(path: &Path, schema: &SchemaConfig) -> Result<Self> {
        Self::open_with_flags(
            path,
            schema,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Open an existing database read-only, for resolution and detection
    #[tracing::instrument(skip(path, schema), fields(path = %path.display()))]
    pub fn open_read_only(path: &Path, schema: &SchemaConfig) -> Result<Self> {
        Self::open_with_flags(
            path,
            schema,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn open_with_flags(path: &Path, schema: &SchemaConfig, flags: OpenFlags) -> Result<Self> {
        if !path.is_file() {
            return Err(ReslugError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            map_db_err!(
                "open content database",
                format!("{}: {}", path.display(), e)
            )
        })?;

        Self::from_connection(conn, schema)
    }

    /// Wrap an already-open connection, e.g. an in-memory database
    pub fn from_connection(conn: Connection, schema: &SchemaConfig) -> Result<Self> {
        schema.validate()?;

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| map_db_err!("enable foreign keys", e))?;

        let statements = Statements::new(schema);

        let tables: i64 = conn
            .query_row(statements.table_exists, params![schema.table], |r| r.get(0))
            .map_err(|e| map_db_err!("inspect schema", e))?;
        if tables == 0 {
            return Err(map_db_err!(
                "inspect schema",
                format!("no table named {}", schema.table)
            ));
        }

        tracing::debug!(table = %schema.table, "opened content store");
        Ok(SqliteStore { conn, statements })
    }

    fn query_records<P: rusqlite::Params>(
        &self,
        operation: &str,
        sql: &str,
        params: P,
    ) -> Result<Vec<ContentRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| map_db_err!(operation, e))?;

        let rows = stmt
            .query_map(params, |row| record_at(row, 0))
            .map_err(|e| map_db_err!(operation, e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!(operation, e))
    }
}

fn record_at(row: &Row, offset: usize) -> rusqlite::Result<ContentRecord> {
    Ok(ContentRecord {
        id: row.get(offset)?,
        kind: row.get(offset + 1)?,
        canonical_slug: row.get(offset + 2)?,
        version_ref: row.get(offset + 3)?,
        title: row.get(offset + 4)?,
        visibility: row.get(offset + 5)?,
        state: row.get(offset + 6)?,
    })
}

impl ContentStore for SqliteStore {
    fn get(&self, id: &str) -> Result<Option<ContentRecord>> {
        let mut records = self.query_records("look up record", &self.statements.get, params![id])?;
        Ok(records.pop())
    }

    fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<ContentRecord>> {
        let start = Instant::now();
        let fragment = query.fragment.as_deref().unwrap_or("");
        let records = self.query_records(
            "find candidate records",
            &self.statements.candidates,
            params![query.input, fragment],
        )?;
        trace_time!(start, "find_candidates", matches = records.len());
        Ok(records)
    }

    fn slug_join(&self, kind_a: &str, kind_b: &str) -> Result<Vec<(ContentRecord, ContentRecord)>> {
        let start = Instant::now();
        let mut stmt = self
            .conn
            .prepare_cached(&self.statements.slug_join)
            .map_err(|e| map_db_err!("join canonical slugs", e))?;

        let pairs = stmt
            .query_map(params![kind_a, kind_b], |row| {
                Ok((record_at(row, 0)?, record_at(row, RECORD_COLUMNS)?))
            })
            .map_err(|e| map_db_err!("join canonical slugs", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("join canonical slugs", e))?;

        trace_time!(start, "slug_join", pairs = pairs.len());
        Ok(pairs)
    }

    fn slug_groups(&self, kind: &str) -> Result<Vec<(String, Vec<ContentRecord>)>> {
        let records = self.query_records(
            "group canonical slugs",
            &self.statements.slug_groups,
            params![kind],
        )?;

        // Rows arrive ordered by slug
        let mut groups: Vec<(String, Vec<ContentRecord>)> = Vec::new();
        for record in records {
            let Some(slug) = record.canonical_slug.clone() else {
                continue;
            };
            match groups.last_mut() {
                Some((current, members)) if *current == slug => members.push(record),
                _ => groups.push((slug, vec![record])),
            }
        }
        Ok(groups)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(&self.statements.count, [], |r| r.get(0))
            .map_err(|e| map_db_err!("count records", e))?;
        Ok(count.max(0) as u64)
    }
}

impl ContentStoreMut for SqliteStore {
    fn delete(&mut self, id: &str) -> Result<DeleteOutcome> {
        match self.conn.execute(&self.statements.delete, params![id]) {
            Ok(0) => Ok(DeleteOutcome::NotFound),
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Ok(DeleteOutcome::Rejected(e.to_string()))
            }
            Err(e) => Err(map_db_err!("delete record", format!("{}: {}", id, e))),
        }
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        tracing::debug!("closing content store");
    }
}
