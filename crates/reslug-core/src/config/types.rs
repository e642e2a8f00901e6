//! Configuration type definitions

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ReslugError, Result};

static IDENTIFIER: OnceLock<Option<Regex>> = OnceLock::new();
static JSON_PATH: OnceLock<Option<Regex>> = OnceLock::new();

fn identifier_re() -> Option<&'static Regex> {
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok())
        .as_ref()
}

fn json_path_re() -> Option<&'static Regex> {
    JSON_PATH
        .get_or_init(|| Regex::new(r"^\$(\.[A-Za-z_][A-Za-z0-9_]*)+$").ok())
        .as_ref()
}

/// Default number of collision pairs shown before output is sampled
pub const DEFAULT_SAMPLE_LIMIT: usize = 20;

/// Top-level reslug configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite content database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Where records and their payload fields live
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Operator display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Table, column and payload-path names of the content store.
///
/// These are interpolated into SQL, so they are validated rather than bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub table: String,
    pub id_column: String,
    pub kind_column: String,
    pub payload_column: String,
    pub version_column: String,
    pub slug_path: String,
    pub title_path: String,
    pub visibility_path: String,
    pub state_path: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            table: "ContentResource".to_string(),
            id_column: "id".to_string(),
            kind_column: "type".to_string(),
            payload_column: "fields".to_string(),
            version_column: "currentVersionId".to_string(),
            slug_path: "$.slug".to_string(),
            title_path: "$.title".to_string(),
            visibility_path: "$.visibility".to_string(),
            state_path: "$.state".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Reject names that are not plain identifiers or simple JSON paths
    pub fn validate(&self) -> Result<()> {
        let identifiers = [
            ("schema.table", &self.table),
            ("schema.id_column", &self.id_column),
            ("schema.kind_column", &self.kind_column),
            ("schema.payload_column", &self.payload_column),
            ("schema.version_column", &self.version_column),
        ];
        for (context, value) in identifiers {
            if !matches(identifier_re(), value) {
                return Err(ReslugError::invalid_value(context, value));
            }
        }

        let paths = [
            ("schema.slug_path", &self.slug_path),
            ("schema.title_path", &self.title_path),
            ("schema.visibility_path", &self.visibility_path),
            ("schema.state_path", &self.state_path),
        ];
        for (context, value) in paths {
            if !matches(json_path_re(), value) {
                return Err(ReslugError::invalid_value(context, value));
            }
        }

        Ok(())
    }
}

fn matches(re: Option<&Regex>, value: &str) -> bool {
    re.is_some_and(|re| re.is_match(value))
}

/// Display settings for operator-facing output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Collision pairs shown before the listing is sampled
    pub sample_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}
