//! In-process content store
//!
//! Substitute for the database in tests and experiments. Can be told to
//! refuse individual deletions or to lose its connection after a number of
//! deletions.

use std::collections::{BTreeMap, HashSet};

use super::{CandidateQuery, ContentStore, ContentStoreMut, DeleteOutcome};
use crate::error::{ReslugError, Result};
use crate::record::ContentRecord;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, ContentRecord>,
    rejected: HashSet<String>,
    offline: bool,
    offline_after_deletes: Option<usize>,
    deletes_attempted: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace a record
    pub fn insert(&mut self, record: ContentRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Make deletion of `id` fail as a per-record rejection
    pub fn reject_deletes_of(&mut self, id: &str) {
        self.rejected.insert(id.to_string());
    }

    /// Lose the connection once `n` further deletions have been attempted
    pub fn go_offline_after_deletes(&mut self, n: usize) {
        self.offline_after_deletes = Some(self.deletes_attempted + n);
    }

    /// Lose the connection immediately
    pub fn go_offline(&mut self) {
        self.offline = true;
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    fn ensure_online(&self, operation: &str) -> Result<()> {
        if self.offline {
            return Err(ReslugError::connectivity(operation, "store is offline"));
        }
        Ok(())
    }
}

impl ContentStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<ContentRecord>> {
        self.ensure_online("look up record")?;
        Ok(self.records.get(id).cloned())
    }

    fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<ContentRecord>> {
        self.ensure_online("find candidate records")?;
        Ok(self
            .records
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    fn slug_join(&self, kind_a: &str, kind_b: &str) -> Result<Vec<(ContentRecord, ContentRecord)>> {
        self.ensure_online("join canonical slugs")?;
        let mut pairs = Vec::new();
        for a in self.records.values().filter(|r| r.kind == kind_a) {
            let Some(slug) = a.canonical_slug.as_deref() else {
                continue;
            };
            for b in self.records.values().filter(|r| r.kind == kind_b) {
                if b.canonical_slug.as_deref() == Some(slug) {
                    pairs.push((a.clone(), b.clone()));
                }
            }
        }
        pairs.sort_by(|(a1, b1), (a2, b2)| {
            (&a1.canonical_slug, &a1.id, &b1.id).cmp(&(&a2.canonical_slug, &a2.id, &b2.id))
        });
        Ok(pairs)
    }

    fn slug_groups(&self, kind: &str) -> Result<Vec<(String, Vec<ContentRecord>)>> {
        self.ensure_online("group canonical slugs")?;
        let mut by_slug: BTreeMap<String, Vec<ContentRecord>> = BTreeMap::new();
        for record in self.records.values().filter(|r| r.kind == kind) {
            if let Some(slug) = &record.canonical_slug {
                by_slug.entry(slug.clone()).or_default().push(record.clone());
            }
        }
        Ok(by_slug
            .into_iter()
            .filter(|(_, records)| records.len() > 1)
            .collect())
    }

    fn count(&self) -> Result<u64> {
        self.ensure_online("count records")?;
        Ok(self.records.len() as u64)
    }
}

impl ContentStoreMut for MemoryStore {
    fn delete(&mut self, id: &str) -> Result<DeleteOutcome> {
        if self
            .offline_after_deletes
            .is_some_and(|limit| self.deletes_attempted >= limit)
        {
            self.offline = true;
        }
        self.ensure_online("delete record")?;
        self.deletes_attempted += 1;

        if self.rejected.contains(id) && self.records.contains_key(id) {
            return Ok(DeleteOutcome::Rejected(format!(
                "record {} is still referenced",
                id
            )));
        }

        Ok(match self.records.remove(id) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }
}
