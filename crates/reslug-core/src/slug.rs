//! Slug parsing
//!
//! Two slug conventions coexist in migrated content:
//! - `install-msw~fefi6`: a short hash appended after a literal `~`
//! - `install-msw-fefi6`: the hash appended as one more dash segment
//!
//! The parser accepts both without knowing which pipeline produced a slug.
//! Only the tilde form yields a reliable base slug; for everything else the
//! final dash segment is taken as the hash fragment and the base is unknown.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

static TILDE_SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();

fn tilde_suffix() -> Option<&'static Regex> {
    TILDE_SUFFIX
        .get_or_init(|| match Regex::new(r"^(.*)~([a-z0-9]+)$") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "Failed to compile tilde slug regex");
                None
            }
        })
        .as_ref()
}

/// Which convention produced the hash fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugConvention {
    /// `<base>~<hash>`
    Tilde,
    /// `<...>-<fragment>`, base unknown
    Dash,
    /// No separator; the fragment is the whole slug
    Bare,
    /// Empty input
    Empty,
}

impl fmt::Display for SlugConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugConvention::Tilde => write!(f, "tilde"),
            SlugConvention::Dash => write!(f, "dash"),
            SlugConvention::Bare => write!(f, "bare"),
            SlugConvention::Empty => write!(f, "empty"),
        }
    }
}

/// A slug split into base and hash fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSlug {
    /// Base slug; only known for the tilde convention and empty input
    pub base: Option<String>,
    /// Hash fragment used for suffix matching
    pub hash: String,
    pub convention: SlugConvention,
}

impl ParsedSlug {
    /// Whether the fragment can be used for suffix matching.
    ///
    /// An empty fragment would turn a suffix match into "match everything".
    pub fn has_fragment(&self) -> bool {
        !self.hash.is_empty()
    }
}

/// Split a slug into `(base, hash fragment)`.
///
/// Never fails: the worst case is a fragment equal to the whole slug.
pub fn parse(slug: &str) -> ParsedSlug {
    if slug.is_empty() {
        return ParsedSlug {
            base: Some(String::new()),
            hash: String::new(),
            convention: SlugConvention::Empty,
        };
    }

    if let Some(caps) = tilde_suffix().and_then(|re| re.captures(slug)) {
        return ParsedSlug {
            base: Some(caps[1].to_string()),
            hash: caps[2].to_string(),
            convention: SlugConvention::Tilde,
        };
    }

    match slug.rsplit_once('-') {
        Some((_, fragment)) => ParsedSlug {
            base: None,
            hash: fragment.to_string(),
            convention: SlugConvention::Dash,
        },
        None => ParsedSlug {
            base: None,
            hash: slug.to_string(),
            convention: SlugConvention::Bare,
        },
    }
}
