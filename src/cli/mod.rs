//! CLI argument parsing for reslug
//!
//! Supports global flags: --config, --database, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{CollisionsArgs, DeleteArgs, DuplicatesArgs, IdListArgs, ResolveArgs};
pub use reslug_core::format::OutputFormat;

/// Reslug - resolve slugs and clean up colliding content records
#[derive(Parser, Debug)]
#[command(name = "reslug")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ./reslug.toml, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite content database (overrides the config file)
    #[arg(long, global = true, env = "RESLUG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a slug into base slug and hash fragment
    Parse {
        /// Slug to parse
        slug: String,
    },

    /// List every record a slug or id could refer to
    Resolve(ResolveArgs),

    /// List records of two kinds that share a canonical slug
    Collisions(CollisionsArgs),

    /// List canonical slugs held by several records of one kind
    Duplicates(DuplicatesArgs),

    /// Show what deleting the given ids would do (never deletes)
    PlanDelete(IdListArgs),

    /// Delete the given ids; inert unless --authorize is passed
    Delete(DeleteArgs),
}
