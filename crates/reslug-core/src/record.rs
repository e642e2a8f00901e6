//! Content record types

use serde::{Deserialize, Serialize};

/// A row in the content store, with the payload fields reslug extracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Opaque, unique, immutable identifier
    pub id: String,
    /// Discriminator such as `post`, `lesson` or `course`
    pub kind: String,
    /// Public identity extracted from the payload; absent on legacy rows
    pub canonical_slug: Option<String>,
    /// Current version reference; absent on partially migrated rows
    pub version_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        ContentRecord {
            id: id.into(),
            kind: kind.into(),
            canonical_slug: None,
            version_ref: None,
            title: None,
            visibility: None,
            state: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.canonical_slug = Some(slug.into());
        self
    }

    pub fn with_version(mut self, version_ref: impl Into<String>) -> Self {
        self.version_ref = Some(version_ref.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// A record with a version reference has completed migration
    pub fn is_migrated(&self) -> bool {
        self.version_ref.is_some()
    }
}

/// Two records of different kinds claiming the same canonical slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub slug: String,
    /// Record of the first requested kind
    pub a: ContentRecord,
    /// Record of the second requested kind
    pub b: ContentRecord,
}

impl Collision {
    /// The partially migrated side, when exactly one side is migrated
    pub fn stale_side(&self) -> Option<&ContentRecord> {
        match (self.a.is_migrated(), self.b.is_migrated()) {
            (true, false) => Some(&self.b),
            (false, true) => Some(&self.a),
            _ => None,
        }
    }
}

/// Several records of one kind sharing a canonical slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub kind: String,
    pub slug: String,
    pub records: Vec<ContentRecord>,
}
