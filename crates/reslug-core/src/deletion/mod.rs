//! Guarded deletion
//!
//! Deletion is irreversible, so it is a two-state protocol:
//!
//! - **Planned** (the default): every requested id is looked up and reported
//!   with its identifying fields. Nothing is mutated.
//! - **Executed**: only when the caller passes [`Authorization::Authorized`]
//!   on that very call. Ids are deleted one at a time; a missing id counts as
//!   already removed, a per-record rejection is counted and skipped, and a
//!   store failure aborts the run with a partial report in which the id
//!   being deleted is `Failed` and the rest are `Pending`. Afterwards the
//!   collision query that justified the deletion is run again and its count
//!   is reported.
//!
//! Asking to execute without authorization produces an `Unauthorized`
//! report with the same lookups as a plan, so a re-run without the flag is
//! always inert.

mod report;

use serde::Serialize;

use crate::collisions::CollisionQuery;
use crate::error::{ReslugError, Result};
use crate::store::{ContentStore, ContentStoreMut};

pub use report::{DeletionCounts, DeletionEntry, DeletionMode, DeletionReport, EntryStatus};

/// Caller's explicit permission to mutate, required on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorization {
    #[default]
    DryRun,
    Authorized,
}

impl Authorization {
    pub fn from_flag(authorized: bool) -> Self {
        if authorized {
            Authorization::Authorized
        } else {
            Authorization::DryRun
        }
    }
}

/// A reviewed list of ids and the collision query that motivated it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    ids: Vec<String>,
    justification: CollisionQuery,
}

impl DeletionRequest {
    /// Repeated ids are collapsed, keeping the first occurrence, so every id
    /// is attempted exactly once.
    pub fn new(ids: impl IntoIterator<Item = String>, justification: CollisionQuery) -> Self {
        let mut seen = std::collections::HashSet::new();
        let ids = ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .filter(|id| seen.insert(id.clone()))
            .collect();
        DeletionRequest { ids, justification }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn justification(&self) -> &CollisionQuery {
        &self.justification
    }
}

fn lookup_entries<S: ContentStore + ?Sized>(
    store: &S,
    request: &DeletionRequest,
) -> Result<Vec<DeletionEntry>> {
    request
        .ids
        .iter()
        .map(|id| {
            let record = store.get(id)?;
            let status = if record.is_some() {
                EntryStatus::Present
            } else {
                EntryStatus::Missing
            };
            Ok(DeletionEntry {
                id: id.clone(),
                record,
                status,
            })
        })
        .collect()
}

fn lookup_report<S: ContentStore + ?Sized>(
    store: &S,
    request: &DeletionRequest,
    mode: DeletionMode,
) -> Result<DeletionReport> {
    let collisions_before = request.justification.run(store)?.len();
    let mut report = DeletionReport::new(mode, lookup_entries(store, request)?);
    report.justification = Some(request.justification.clone());
    report.collisions_before = Some(collisions_before);
    Ok(report)
}

/// Report what deleting `request` would do. Never mutates the store.
#[tracing::instrument(skip(store, request), fields(ids = request.ids.len(), justification = %request.justification))]
pub fn plan_deletion<S: ContentStore + ?Sized>(
    store: &S,
    request: &DeletionRequest,
) -> Result<DeletionReport> {
    lookup_report(store, request, DeletionMode::Planned)
}

/// Delete the requested ids if, and only if, `authorization` says so.
#[tracing::instrument(skip(store, request), fields(ids = request.ids.len(), justification = %request.justification))]
pub fn execute_deletion<S: ContentStoreMut + ?Sized>(
    store: &mut S,
    request: &DeletionRequest,
    authorization: Authorization,
) -> Result<DeletionReport> {
    if authorization != Authorization::Authorized {
        tracing::warn!("deletion not authorized; nothing was deleted");
        return lookup_report(&*store, request, DeletionMode::Unauthorized);
    }

    let collisions_before = match request.justification.run(&*store) {
        Ok(collisions) => collisions.len(),
        Err(cause) => {
            tracing::error!(error = %cause, "collision count failed before deletion");
            return Err(ReslugError::DeletionAborted {
                report: Box::new(executed_report(
                    pending_entries(&request.ids),
                    request,
                    None,
                )),
                cause: Box::new(cause),
            });
        }
    };

    let mut entries: Vec<DeletionEntry> = Vec::with_capacity(request.ids.len());
    for (index, id) in request.ids.iter().enumerate() {
        let record = match store.get(id) {
            Ok(record) => record,
            Err(cause) => {
                tracing::error!(id = %id, error = %cause, processed = index, "deletion aborted");
                entries.extend(pending_entries(&request.ids[index..]));
                return Err(aborted(entries, request, collisions_before, cause));
            }
        };

        match store.delete(id) {
            Ok(outcome) => {
                tracing::info!(id = %id, outcome = %outcome, "delete");
                entries.push(DeletionEntry {
                    id: id.clone(),
                    record,
                    status: outcome.into(),
                });
            }
            Err(cause) => {
                tracing::error!(id = %id, error = %cause, processed = index, "deletion aborted");
                entries.push(DeletionEntry {
                    id: id.clone(),
                    record,
                    status: EntryStatus::Failed(cause.to_string()),
                });
                entries.extend(pending_entries(&request.ids[index + 1..]));
                return Err(aborted(entries, request, collisions_before, cause));
            }
        }
    }

    let mut report = executed_report(entries, request, Some(collisions_before));

    match request.justification.run(&*store) {
        Ok(remaining) => report.collisions_after = Some(remaining.len()),
        Err(cause) => {
            tracing::error!(error = %cause, "re-verification failed after deletion");
            return Err(ReslugError::DeletionAborted {
                report: Box::new(report),
                cause: Box::new(cause),
            });
        }
    }

    tracing::info!(
        deleted = report.counts.deleted,
        not_found = report.counts.not_found,
        rejected = report.counts.rejected,
        collisions_before,
        collisions_after = report.collisions_after,
        "deletion complete"
    );
    Ok(report)
}

fn executed_report(
    entries: Vec<DeletionEntry>,
    request: &DeletionRequest,
    collisions_before: Option<usize>,
) -> DeletionReport {
    let mut report = DeletionReport::new(DeletionMode::Executed, entries);
    report.justification = Some(request.justification.clone());
    report.collisions_before = collisions_before;
    report
}

fn pending_entries(ids: &[String]) -> Vec<DeletionEntry> {
    ids.iter()
        .map(|id| DeletionEntry {
            id: id.clone(),
            record: None,
            status: EntryStatus::Pending,
        })
        .collect()
}

fn aborted(
    entries: Vec<DeletionEntry>,
    request: &DeletionRequest,
    collisions_before: usize,
    cause: ReslugError,
) -> ReslugError {
    ReslugError::DeletionAborted {
        report: Box::new(executed_report(entries, request, Some(collisions_before))),
        cause: Box::new(cause),
    }
}
