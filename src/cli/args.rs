//! Command argument structures

use std::path::PathBuf;

use clap::Args;

use super::parse::parse_kind;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Slug (either convention) or record id
    pub slug_or_id: String,
}

#[derive(Args, Debug)]
pub struct CollisionsArgs {
    /// First kind (e.g. lesson)
    #[arg(value_parser = parse_kind)]
    pub kind_a: String,

    /// Second kind (e.g. post)
    #[arg(value_parser = parse_kind)]
    pub kind_b: String,

    /// Show at most this many pairs (the total is always reported)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print only the ids of stale (unmigrated) records, one per line
    #[arg(long)]
    pub stale_ids: bool,
}

#[derive(Args, Debug)]
pub struct DuplicatesArgs {
    /// Kind to check
    #[arg(value_parser = parse_kind)]
    pub kind: String,
}

/// Ids to delete and the kind pair whose collisions justify it
#[derive(Args, Debug)]
pub struct IdListArgs {
    /// Kind pair whose collisions motivated this deletion
    #[arg(long, num_args = 2, value_names = ["KIND_A", "KIND_B"], required = true, value_parser = parse_kind)]
    pub kinds: Vec<String>,

    /// Record id (can be repeated)
    #[arg(long = "id", action = clap::ArgAction::Append)]
    pub ids: Vec<String>,

    /// File with one id per line ('#' comments and blank lines ignored)
    #[arg(long)]
    pub ids_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub list: IdListArgs,

    /// Actually delete. Without this flag nothing is deleted.
    #[arg(long)]
    pub authorize: bool,
}
