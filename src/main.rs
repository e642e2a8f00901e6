//! Reslug - slug resolution and guarded duplicate cleanup
//!
//! Operator CLI around reslug-core: parse slugs, resolve them against the
//! content database, list collisions, and delete reviewed ids only when
//! explicitly authorized.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use reslug_core::error::{ExitCode as ReslugExitCode, ReslugError};
use reslug_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_format_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--format` is global, but clap may fail before `Cli.format` is
            // available. If JSON was requested, emit a structured error.
            if argv_format_json {
                let reslug_error = match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    clap::error::ErrorKind::ValueValidation
                    | clap::error::ErrorKind::InvalidValue
                    | clap::error::ErrorKind::InvalidSubcommand
                    | clap::error::ErrorKind::UnknownArgument
                    | clap::error::ErrorKind::MissingRequiredArgument
                    | clap::error::ErrorKind::WrongNumberOfValues
                    | clap::error::ErrorKind::ArgumentConflict => {
                        ReslugError::UsageError(err.to_string())
                    }
                    _ => ReslugError::Other(err.to_string()),
                };

                eprintln!("{}", reslug_error.to_json());
                return ExitCode::from(reslug_error.exit_code() as u8);
            }

            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let result = commands::dispatch::run(&cli, start);

    match result {
        Ok(()) => ExitCode::from(ReslugExitCode::Success as u8),
        Err(e) => {
            let exit_code = e.exit_code();

            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else {
                if let Some(report) = e.partial_report() {
                    commands::delete::output_report(&cli, report);
                }
                if !cli.quiet {
                    eprintln!("error: {}", e);
                }
            }

            ExitCode::from(exit_code as u8)
        }
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
