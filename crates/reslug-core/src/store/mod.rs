//! The content store interface
//!
//! Every component talks to the store through these traits, so the same
//! resolver, detector and deletion code runs against the SQLite database in
//! production and against [`MemoryStore`] in tests.

mod memory;
mod sql;
mod sqlite;

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::record::ContentRecord;
use crate::slug;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Parameters of the broad candidate match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    /// Matched exactly against id and canonical slug
    pub input: String,
    /// Matched as a suffix of id and canonical slug; `None` disables suffix
    /// matching entirely
    pub fragment: Option<String>,
}

impl CandidateQuery {
    /// Build the query for a slug or id, parsing out its hash fragment
    pub fn for_input(input: &str) -> Self {
        let parsed = slug::parse(input);
        CandidateQuery {
            input: input.to_string(),
            fragment: parsed.has_fragment().then_some(parsed.hash),
        }
    }

    /// The match predicate, for stores that filter in process
    pub fn matches(&self, record: &ContentRecord) -> bool {
        let slug = record.canonical_slug.as_deref();
        if record.id == self.input || slug == Some(self.input.as_str()) {
            return true;
        }
        match &self.fragment {
            Some(fragment) => {
                record.id.ends_with(fragment.as_str())
                    || slug.is_some_and(|s| s.ends_with(fragment.as_str()))
            }
            None => false,
        }
    }
}

/// Result of deleting a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    /// Already gone, e.g. removed by an earlier or concurrent run
    NotFound,
    /// The store refused this one record without losing connectivity
    Rejected(String),
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteOutcome::Deleted => write!(f, "deleted"),
            DeleteOutcome::NotFound => write!(f, "not-found"),
            DeleteOutcome::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Read-only access to content records
pub trait ContentStore {
    /// Look up a record by id
    fn get(&self, id: &str) -> Result<Option<ContentRecord>>;

    /// All records matching the candidate predicate, in no particular order
    fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<ContentRecord>>;

    /// Every `(a, b)` with `a.kind == kind_a`, `b.kind == kind_b` and equal,
    /// non-null canonical slugs
    fn slug_join(&self, kind_a: &str, kind_b: &str) -> Result<Vec<(ContentRecord, ContentRecord)>>;

    /// Canonical slugs held by more than one record of `kind`, with those
    /// records
    fn slug_groups(&self, kind: &str) -> Result<Vec<(String, Vec<ContentRecord>)>>;

    /// Total number of records
    fn count(&self) -> Result<u64>;
}

/// Mutating access, limited to deletion by id
pub trait ContentStoreMut: ContentStore {
    fn delete(&mut self, id: &str) -> Result<DeleteOutcome>;
}
