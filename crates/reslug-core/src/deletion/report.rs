//! Deletion report types

use std::fmt;

use serde::Serialize;

use crate::collisions::CollisionQuery;
use crate::record::ContentRecord;
use crate::store::DeleteOutcome;

/// Which state a deletion call ran in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionMode {
    /// Dry run: records were looked up, nothing was deleted
    Planned,
    /// Execution was requested without authorization; nothing was deleted
    Unauthorized,
    /// Records were deleted
    Executed,
}

impl DeletionMode {
    pub fn mutated(&self) -> bool {
        matches!(self, DeletionMode::Executed)
    }
}

impl fmt::Display for DeletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionMode::Planned => write!(f, "planned"),
            DeletionMode::Unauthorized => write!(f, "unauthorized"),
            DeletionMode::Executed => write!(f, "executed"),
        }
    }
}

/// What happened to one requested id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum EntryStatus {
    /// Exists and would be deleted
    Present,
    /// Does not exist; nothing to delete
    Missing,
    Deleted,
    /// Vanished between planning and deletion
    NotFound,
    /// The store refused to delete this record
    Rejected(String),
    /// The delete was issued but the store failed; the run stopped here
    Failed(String),
    /// Not attempted because the run was aborted
    Pending,
}

impl From<DeleteOutcome> for EntryStatus {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted => EntryStatus::Deleted,
            DeleteOutcome::NotFound => EntryStatus::NotFound,
            DeleteOutcome::Rejected(reason) => EntryStatus::Rejected(reason),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Present => write!(f, "present"),
            EntryStatus::Missing => write!(f, "missing"),
            EntryStatus::Deleted => write!(f, "deleted"),
            EntryStatus::NotFound => write!(f, "not-found"),
            EntryStatus::Rejected(_) => write!(f, "rejected"),
            EntryStatus::Failed(_) => write!(f, "failed"),
            EntryStatus::Pending => write!(f, "pending"),
        }
    }
}

/// One requested id with the record as it was looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionEntry {
    pub id: String,
    /// Identifying fields at lookup time; `None` if the id did not exist
    pub record: Option<ContentRecord>,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Totals over a report's entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionCounts {
    pub requested: usize,
    /// Ids found in the store at lookup time
    pub present: usize,
    /// Delete statements issued
    pub attempted: usize,
    pub deleted: usize,
    pub not_found: usize,
    pub rejected: usize,
    /// Delete issued but interrupted by a store failure
    pub failed: usize,
    /// Ids never attempted because the run aborted
    pub pending: usize,
}

/// Result of a plan or execution, fit for operator review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub mode: DeletionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<CollisionQuery>,
    pub entries: Vec<DeletionEntry>,
    pub counts: DeletionCounts,
    /// Collisions for the justifying kind pair before any deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collisions_before: Option<usize>,
    /// Collisions remaining after an executed deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collisions_after: Option<usize>,
}

impl DeletionReport {
    pub fn new(mode: DeletionMode, entries: Vec<DeletionEntry>) -> Self {
        let mut report = DeletionReport {
            mode,
            justification: None,
            entries,
            counts: DeletionCounts::default(),
            collisions_before: None,
            collisions_after: None,
        };
        report.tally();
        report
    }

    pub(super) fn tally(&mut self) {
        let mut counts = DeletionCounts {
            requested: self.entries.len(),
            ..DeletionCounts::default()
        };
        for entry in &self.entries {
            if entry.record.is_some() {
                counts.present += 1;
            }
            match entry.status {
                EntryStatus::Present | EntryStatus::Missing => {}
                EntryStatus::Deleted => {
                    counts.attempted += 1;
                    counts.deleted += 1;
                }
                EntryStatus::NotFound => {
                    counts.attempted += 1;
                    counts.not_found += 1;
                }
                EntryStatus::Rejected(_) => {
                    counts.attempted += 1;
                    counts.rejected += 1;
                }
                EntryStatus::Failed(_) => {
                    counts.attempted += 1;
                    counts.failed += 1;
                }
                EntryStatus::Pending => counts.pending += 1,
            }
        }
        self.counts = counts;
    }

    /// Ids that would be (or were) deleted, in request order
    pub fn target_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Present | EntryStatus::Deleted))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// True when the store was left untouched by this call
    pub fn nothing_deleted(&self) -> bool {
        self.counts.deleted == 0
    }
}
