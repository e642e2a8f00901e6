//! Command dispatch logic for reslug

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use reslug_core::config::Config;
use reslug_core::error::Result;
use reslug_core::store::SqliteStore;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: Config,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = Config::discover(cli.config.as_deref(), &cwd)?
            .with_database(cli.database.clone());
        debug!(elapsed = ?start.elapsed(), database = ?config.database, "load_config");
        Ok(Self { cli, config, start })
    }

    /// Open the content database for lookups only
    pub fn open_read_only(&self) -> Result<SqliteStore> {
        SqliteStore::open_read_only(self.config.require_database()?, &self.config.schema)
    }

    /// Open the content database for deletion
    pub fn open_writable(&self) -> Result<SqliteStore> {
        SqliteStore::open(self.config.require_database()?, &self.config.schema)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("reslug {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Resolve content slugs and clean up colliding records.");
        println!();
        println!("Run `reslug --help` for usage information.");
        Ok(())
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Parse { slug } => super::parse::execute(ctx.cli, slug),
            Commands::Resolve(args) => super::resolve::execute(ctx, args),
            Commands::Collisions(args) => super::collisions::execute(ctx, args),
            Commands::Duplicates(args) => super::duplicates::execute(ctx, args),
            Commands::PlanDelete(args) => super::delete::execute_plan(ctx, args),
            Commands::Delete(args) => super::delete::execute_delete(ctx, args),
        };
        debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        result
    }
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // Parsing touches neither config nor database
    if let Some(Commands::Parse { slug }) = &cli.command {
        return super::parse::execute(cli, slug);
    }

    let ctx = CommandContext::new(cli, start)?;

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
