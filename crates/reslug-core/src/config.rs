//! Configuration for reslug
//!
//! Looked up in order: an explicit `--config` path, `./reslug.toml`, then
//! `<config dir>/reslug/config.toml`. Missing files fall back to defaults
//! matching the `ContentResource` schema.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReslugError, Result};

pub use types::{Config, DisplayConfig, SchemaConfig, DEFAULT_SAMPLE_LIMIT};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "reslug.toml";

const CONFIG_DIR: &str = "reslug";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "RESLUG_CONFIG_DIR";

impl Config {
    /// Load and validate a config file.
    ///
    /// A relative `database` path is resolved against the file's directory.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReslugError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&content)?;

        if let Some(db) = &config.database {
            if db.is_relative() {
                if let Some(dir) = path.parent() {
                    config.database = Some(dir.join(db));
                }
            }
        }

        config.schema.validate()?;
        Ok(config)
    }

    /// Find and load the configuration for a run started in `cwd`
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ReslugError::UsageError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }

        if let Some(global) = global_config_path() {
            if global.is_file() {
                return Self::load(&global);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Override the database path, e.g. from `--database`
    pub fn with_database(mut self, database: Option<PathBuf>) -> Self {
        if database.is_some() {
            self.database = database;
        }
        self
    }

    /// The configured database path, or a usage error naming the fix
    pub fn require_database(&self) -> Result<&Path> {
        self.database.as_deref().ok_or_else(|| {
            ReslugError::UsageError(
                "no content database configured (use --database, RESLUG_DATABASE, or `database` in reslug.toml)"
                    .to_string(),
            )
        })
    }
}

fn global_config_path() -> Option<PathBuf> {
    let dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
        Ok(env_dir) => PathBuf::from(env_dir),
        Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
    };
    Some(dir.join(CONFIG_FILE))
}
