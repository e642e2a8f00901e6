//! Utilities for records output format

use crate::record::ContentRecord;

/// Escape double quotes in a string for records format.
/// Replaces `"` with `\"` to allow safe embedding in quoted fields.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Render an optional field, using `-` for absent values
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Quote a free-text field so spaces cannot split it, `"-"` when absent
pub fn quoted(value: Option<&str>) -> String {
    format!("\"{}\"", escape_quotes(or_dash(value)))
}

/// Format the fields of a record shared by every `R` line
///
/// `id=<id> kind="<kind>" slug="<slug>" version=<ref> title="<title>"`
pub fn record_fields(record: &ContentRecord) -> String {
    format!(
        "id={} kind={} slug={} version={} title={}",
        record.id,
        quoted(Some(record.kind.as_str())),
        quoted(record.canonical_slug.as_deref()),
        or_dash(record.version_ref.as_deref()),
        quoted(record.title.as_deref())
    )
}
