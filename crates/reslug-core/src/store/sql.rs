//! SQL text for the SQLite content store
//!
//! Names come from a validated [`SchemaConfig`]; values are always bound.

use crate::config::SchemaConfig;

/// Prepared statement text for one schema
#[derive(Debug, Clone)]
pub(super) struct Statements {
    pub get: String,
    pub candidates: String,
    pub slug_join: String,
    pub slug_groups: String,
    pub count: String,
    pub delete: String,
    pub table_exists: &'static str,
}

/// Number of columns produced by [`records_cte`] per record
pub(super) const RECORD_COLUMNS: usize = 7;

fn payload_field(schema: &SchemaConfig, path: &str) -> String {
    format!(
        "CASE WHEN json_valid(\"{payload}\") THEN CAST(json_extract(\"{payload}\", '{path}') AS TEXT) END",
        payload = schema.payload_column,
        path = path
    )
}

/// `WITH r AS (...)` normalising a content row into the record columns
fn records_cte(schema: &SchemaConfig) -> String {
    format!(
        r#"WITH r AS (
            SELECT
                CAST("{id}" AS TEXT) AS id,
                CAST("{kind}" AS TEXT) AS kind,
                {slug} AS slug,
                CAST("{version}" AS TEXT) AS version_ref,
                {title} AS title,
                {visibility} AS visibility,
                {state} AS state
            FROM "{table}"
        )"#,
        id = schema.id_column,
        kind = schema.kind_column,
        version = schema.version_column,
        table = schema.table,
        slug = payload_field(schema, &schema.slug_path),
        title = payload_field(schema, &schema.title_path),
        visibility = payload_field(schema, &schema.visibility_path),
        state = payload_field(schema, &schema.state_path),
    )
}

const RECORD_SELECT: &str = "id, kind, slug, version_ref, title, visibility, state";

impl Statements {
    pub fn new(schema: &SchemaConfig) -> Self {
        let cte = records_cte(schema);

        let get = format!("{cte} SELECT {RECORD_SELECT} FROM r WHERE id = ?1");

        // ?2 is the hash fragment, '' when suffix matching is disabled
        let candidates = format!(
            "{cte} SELECT {RECORD_SELECT} FROM r
             WHERE id = ?1
                OR slug = ?1
                OR (?2 <> '' AND (substr(id, -length(?2)) = ?2
                                  OR substr(slug, -length(?2)) = ?2))"
        );

        let slug_join = format!(
            "{cte} SELECT
                a.id, a.kind, a.slug, a.version_ref, a.title, a.visibility, a.state,
                b.id, b.kind, b.slug, b.version_ref, b.title, b.visibility, b.state
             FROM r a JOIN r b ON a.slug = b.slug
             WHERE a.kind = ?1 AND b.kind = ?2 AND a.slug IS NOT NULL
             ORDER BY a.slug, a.id, b.id"
        );

        let slug_groups = format!(
            "{cte} SELECT {RECORD_SELECT} FROM r
             WHERE kind = ?1 AND slug IN (
                 SELECT slug FROM r
                 WHERE kind = ?1 AND slug IS NOT NULL
                 GROUP BY slug HAVING COUNT(*) > 1
             )
             ORDER BY slug, id"
        );

        Statements {
            get,
            candidates,
            slug_join,
            slug_groups,
            count: format!("SELECT COUNT(*) FROM \"{}\"", schema.table),
            delete: format!(
                "DELETE FROM \"{}\" WHERE \"{}\" = ?1",
                schema.table, schema.id_column
            ),
            table_exists: "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        }
    }
}
