//! Error types and exit codes for reslug
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Store error (database missing or unreachable)
//!
//! Only fatal conditions are errors. A record that vanished before it could
//! be deleted, a slug that resolves to several records, and a deletion call
//! made without authorization are all reported as outcomes, not raised.

mod macros;

use std::path::PathBuf;

use thiserror::Error;

use crate::deletion::DeletionReport;

/// Exit codes for the reslug binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Store error - database missing or unreachable (3)
    Store = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ReslugError {
    fn from(err: rusqlite::Error) -> Self {
        ReslugError::Connectivity {
            operation: "query content store".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Errors that can occur during reslug operations
#[derive(Error, Debug)]
pub enum ReslugError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Store errors (exit code 3)
    #[error("content database not found: {path:?}")]
    StoreNotFound { path: PathBuf },

    #[error("store unavailable while trying to {operation}: {reason}")]
    Connectivity { operation: String, reason: String },

    /// A fatal error that interrupted an authorized deletion part way.
    ///
    /// The message is the underlying error's; the partial report records
    /// which ids were already processed.
    #[error("{cause}")]
    DeletionAborted {
        report: Box<DeletionReport>,
        cause: Box<ReslugError>,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl ReslugError {
    /// Create an error for a failed store operation
    pub fn connectivity(operation: &str, error: impl std::fmt::Display) -> Self {
        ReslugError::Connectivity {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ReslugError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// True for errors that mean the store itself could not be used
    pub fn is_fatal_store_error(&self) -> bool {
        match self {
            ReslugError::Connectivity { .. } | ReslugError::StoreNotFound { .. } => true,
            ReslugError::DeletionAborted { cause, .. } => cause.is_fatal_store_error(),
            _ => false,
        }
    }

    /// Partial deletion report, if this error interrupted a deletion
    pub fn partial_report(&self) -> Option<&DeletionReport> {
        match self {
            ReslugError::DeletionAborted { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ReslugError::UnknownFormat(_)
            | ReslugError::UsageError(_)
            | ReslugError::InvalidValue { .. } => ExitCode::Usage,

            ReslugError::StoreNotFound { .. } | ReslugError::Connectivity { .. } => {
                ExitCode::Store
            }

            ReslugError::DeletionAborted { cause, .. } => cause.exit_code(),

            ReslugError::Io(_)
            | ReslugError::Json(_)
            | ReslugError::Toml(_)
            | ReslugError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ReslugError::UnknownFormat(_) => "unknown_format",
            ReslugError::UsageError(_) => "usage_error",
            ReslugError::InvalidValue { .. } => "invalid_value",
            ReslugError::StoreNotFound { .. } => "store_not_found",
            ReslugError::Connectivity { .. } => "connectivity",
            ReslugError::DeletionAborted { .. } => "deletion_aborted",
            ReslugError::Io(_) => "io_error",
            ReslugError::Json(_) => "json_error",
            ReslugError::Toml(_) => "toml_error",
            ReslugError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let ReslugError::DeletionAborted { report, cause } = self {
            error_obj["cause_type"] = serde_json::json!(cause.error_type());
            error_obj["partial_report"] =
                serde_json::to_value(report.as_ref()).unwrap_or(serde_json::Value::Null);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for reslug operations
pub type Result<T> = std::result::Result<T, ReslugError>;
