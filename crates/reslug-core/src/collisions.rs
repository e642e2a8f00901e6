//! Duplicate detection
//!
//! Collisions are exact canonical-slug matches between two kinds; unlike the
//! resolver, no hash-fragment matching is involved. Null slugs never match.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::bail_usage;
use crate::error::Result;
use crate::record::{Collision, DuplicateGroup};
use crate::store::ContentStore;
use crate::trace_time;

/// The kind pair whose collisions justify a deletion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionQuery {
    pub kind_a: String,
    pub kind_b: String,
}

impl CollisionQuery {
    pub fn new(kind_a: impl Into<String>, kind_b: impl Into<String>) -> Self {
        CollisionQuery {
            kind_a: kind_a.into(),
            kind_b: kind_b.into(),
        }
    }

    /// Run the detector for this pair
    pub fn run<S: ContentStore + ?Sized>(&self, store: &S) -> Result<Vec<Collision>> {
        find_collisions(store, &self.kind_a, &self.kind_b)
    }
}

impl fmt::Display for CollisionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind_a, self.kind_b)
    }
}

/// Every pair of records of `kind_a` and `kind_b` sharing a canonical slug.
///
/// The result is total; sampling for display is up to the caller.
#[tracing::instrument(skip(store))]
pub fn find_collisions<S: ContentStore + ?Sized>(
    store: &S,
    kind_a: &str,
    kind_b: &str,
) -> Result<Vec<Collision>> {
    if kind_a == kind_b {
        bail_usage!(format!(
            "collisions are between two different kinds (got {} twice); use duplicates for one kind",
            kind_a
        ));
    }

    let start = Instant::now();
    let collisions: Vec<Collision> = store
        .slug_join(kind_a, kind_b)?
        .into_iter()
        .filter_map(|(a, b)| {
            let slug = a.canonical_slug.clone()?;
            (b.canonical_slug.as_deref() == Some(slug.as_str())).then_some(Collision { slug, a, b })
        })
        .collect();

    trace_time!(start, "find_collisions", pairs = collisions.len());
    Ok(collisions)
}

/// Canonical slugs shared by several records of the same kind
#[tracing::instrument(skip(store))]
pub fn find_kind_duplicates<S: ContentStore + ?Sized>(
    store: &S,
    kind: &str,
) -> Result<Vec<DuplicateGroup>> {
    Ok(store
        .slug_groups(kind)?
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(slug, records)| DuplicateGroup {
            kind: kind.to_string(),
            slug,
            records,
        })
        .collect())
}

/// Partially migrated records picked out of a collision list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaleSelection {
    /// Ids of stale records, first-seen order, no repeats
    pub ids: Vec<String>,
    /// Collisions where both or neither side is migrated
    pub undecided: usize,
}

/// Select the stale side of each collision for operator review.
///
/// A record is stale when it has no version reference and collides with one
/// that does.
pub fn stale_ids(collisions: &[Collision]) -> StaleSelection {
    let mut seen = HashSet::new();
    let mut selection = StaleSelection::default();

    for collision in collisions {
        match collision.stale_side() {
            Some(record) => {
                if seen.insert(record.id.as_str()) {
                    selection.ids.push(record.id.clone());
                }
            }
            None => selection.undecided += 1,
        }
    }

    selection
}
