//! Candidate resolution for a slug or id
//!
//! The match is intentionally broad: exact id or slug, or either one ending
//! with the input's hash fragment. That tolerates both slug conventions, and
//! is also why unrelated records can show up together here.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::record::ContentRecord;
use crate::slug::{self, ParsedSlug};
use crate::store::{CandidateQuery, ContentStore};

/// Explanation attached to every resolution shown to an operator
pub const BROAD_MATCH_NOTE: &str = "Candidates include records whose id or slug merely ends with \
the hash fragment, so this set is a superset of exact matches and can contain unrelated records \
(false-positive collisions). Use `collisions` for exact canonical-slug collisions.";

/// Outcome of resolving one input
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub input: String,
    pub parsed: ParsedSlug,
    /// False when the input has no usable fragment and only exact matches
    /// were considered
    pub suffix_matching: bool,
    /// Matching records, ordered by id for display only
    pub candidates: Vec<ContentRecord>,
    /// Ids of candidates matching the input exactly by id or slug
    pub exact_matches: Vec<String>,
    pub note: &'static str,
}

impl Resolution {
    /// More than one candidate is advisory, not an error
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    /// The candidate set, for order-independent comparison
    pub fn id_set(&self) -> BTreeSet<&str> {
        self.candidates.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Resolve a slug or id to every record it could refer to. Read-only.
#[tracing::instrument(skip(store))]
pub fn resolve<S: ContentStore + ?Sized>(store: &S, slug_or_id: &str) -> Result<Resolution> {
    let parsed = slug::parse(slug_or_id);
    let query = CandidateQuery::for_input(slug_or_id);

    let mut candidates = store.find_candidates(&query)?;
    candidates.sort_by(|a, b| a.id.cmp(&b.id));
    candidates.dedup_by(|a, b| a.id == b.id);

    let exact_matches = candidates
        .iter()
        .filter(|r| r.id == slug_or_id || r.canonical_slug.as_deref() == Some(slug_or_id))
        .map(|r| r.id.clone())
        .collect();

    if candidates.len() > 1 {
        tracing::debug!(
            candidates = candidates.len(),
            fragment = %parsed.hash,
            "ambiguous resolution"
        );
    }

    Ok(Resolution {
        input: slug_or_id.to_string(),
        suffix_matching: query.fragment.is_some(),
        parsed,
        candidates,
        exact_matches,
        note: BROAD_MATCH_NOTE,
    })
}
